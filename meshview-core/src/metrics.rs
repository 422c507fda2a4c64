/// Mesh statistics: counts, surface area, enclosed volume and bounds
use crate::error::Result;
use crate::geometry::{BoundingBox, MeshBuffer};

/// Statistics shown for a loaded model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelStats {
    pub vertex_count: usize,
    pub face_count: usize,
    pub surface_area: f64,
    pub volume: f64,
    pub bounding_box: BoundingBox,
}

/// Compute [`ModelStats`] for a mesh in a single pass over its triangles.
///
/// The buffers are validated before anything is accumulated, so a malformed
/// mesh yields an error and never partial statistics.
///
/// `volume` is the absolute sum of signed tetrahedra anchored at the origin.
/// It is only meaningful for closed, consistently wound meshes; neither
/// property is checked here.
pub fn compute_stats(mesh: &MeshBuffer) -> Result<ModelStats> {
    let triangles = mesh.triangles()?;
    let face_count = triangles.len();

    let mut surface_area = 0.0;
    let mut signed_volume = 0.0;
    for tri in triangles {
        surface_area += tri.area();
        signed_volume += tri.signed_volume();
    }

    let bounding_box = mesh.bounding_box().unwrap_or_else(BoundingBox::empty);

    log::debug!(
        "stats for '{}': {} vertices, {} faces, area {:.6}, volume {:.6}",
        mesh.name,
        mesh.vertex_count(),
        face_count,
        surface_area,
        signed_volume.abs()
    );

    Ok(ModelStats {
        vertex_count: mesh.vertex_count(),
        face_count,
        surface_area,
        volume: signed_volume.abs(),
        bounding_box,
    })
}
