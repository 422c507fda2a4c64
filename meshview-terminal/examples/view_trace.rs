/// Example: Trace a view transition without opening the terminal UI
///
/// Usage: cargo run --example view_trace -- [top|bottom|front|back|left|right]

use meshview_core::{MeshBuffer, ViewRequest, Viewer, ViewerConfig};
use nalgebra::Vector3;
use std::env;
use std::io;

fn main() -> io::Result<()> {
    env_logger::init();

    let view = env::args().nth(1).unwrap_or_else(|| "top".to_string());
    let request: ViewRequest = view
        .parse()
        .map_err(|e: meshview_core::MeshViewError| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;

    let mut viewer = Viewer::new(ViewerConfig::default(), 80, 24)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;
    let mesh = MeshBuffer::cube(2.0).translated(Vector3::new(1.0, 2.0, 3.0));
    let stats = *viewer
        .load_mesh(mesh)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;

    println!(
        "vertices {} faces {} area {:.3} volume {:.3}",
        stats.vertex_count, stats.face_count, stats.surface_area, stats.volume
    );

    viewer
        .request_view(request, 0.0)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;

    let mut now = 0.0;
    while viewer.is_transitioning() {
        now += 100.0;
        if let Some(frame) = viewer.advance(now) {
            let p = viewer.pose().position;
            println!(
                "t={:>5.0}ms progress {:.2} eased {:.3} position ({:.3}, {:.3}, {:.3})",
                now, frame.progress, frame.eased, p.x, p.y, p.z
            );
        }
    }

    Ok(())
}
