/// Recentering of a mesh about its bounding-box center
use nalgebra::Vector3;

use crate::geometry::MeshBuffer;

/// Return a copy of `mesh` translated so its bounding-box center sits at the
/// origin. Indices are left untouched; an empty mesh is returned unchanged.
pub fn normalize(mesh: &MeshBuffer) -> MeshBuffer {
    let mut normalized = mesh.clone();
    normalize_in_place(&mut normalized);
    normalized
}

/// Translate `mesh` in place so its bounding-box center sits at the origin.
///
/// Returns the offset that was added to every vertex.
pub fn normalize_in_place(mesh: &mut MeshBuffer) -> Vector3<f64> {
    let offset = match mesh.bounding_box() {
        Some(bbox) => -bbox.center().coords,
        None => return Vector3::zeros(),
    };
    for v in &mut mesh.vertices {
        *v += offset;
    }
    log::debug!(
        "normalized mesh '{}' by ({:.4}, {:.4}, {:.4})",
        mesh.name,
        offset.x,
        offset.y,
        offset.z
    );
    offset
}
