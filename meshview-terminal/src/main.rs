/// MeshView Terminal Demo
///
/// Shows an off-center cube, recentered and framed by the viewer core.
/// Usage: meshview-terminal [config.toml]
/// Controls:
///   - T/B/F/K/L/R: Top, bottom, front, back, left, right views
///   - 0 / Space: Reset to the fitted view
///   - Q/ESC: Quit

use meshview_core::{MeshBuffer, ViewerConfig};
use meshview_terminal::TerminalApp;
use nalgebra::Vector3;
use std::env;
use std::io;

fn main() -> io::Result<()> {
    env_logger::init();

    let config = match env::args().nth(1) {
        Some(path) => ViewerConfig::load(&path)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?,
        None => ViewerConfig::default(),
    };

    // Off-center so normalization has something to do
    let mesh = MeshBuffer::cube(2.0).translated(Vector3::new(4.0, 1.5, -3.0));

    println!("MeshView Terminal - starting (press Q to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = TerminalApp::new(mesh, config)?;
    app.run()?;

    println!("Thank you for using MeshView!");
    Ok(())
}
