/// Terminal host for the mesh viewer
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use meshview_core::{MeshBuffer, MeshViewError, ViewPreset, ViewRequest, Viewer, ViewerConfig};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod renderer;

pub use renderer::AsciiRenderer;

/// Map a key to the view it requests
pub fn view_for_key(code: KeyCode) -> Option<ViewRequest> {
    let request: ViewRequest = match code {
        KeyCode::Char('t') => ViewPreset::Top.into(),
        KeyCode::Char('b') => ViewPreset::Bottom.into(),
        KeyCode::Char('f') => ViewPreset::Front.into(),
        KeyCode::Char('k') => ViewPreset::Back.into(),
        KeyCode::Char('l') => ViewPreset::Left.into(),
        KeyCode::Char('r') => ViewPreset::Right.into(),
        KeyCode::Char('0') | KeyCode::Char(' ') => ViewRequest::Reset,
        _ => return None,
    };
    Some(request)
}

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    viewer: Viewer,
    renderer: AsciiRenderer,
    running: bool,
    started: Instant,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
    status: String,
}

impl TerminalApp {
    pub fn new(mesh: MeshBuffer, config: ViewerConfig) -> io::Result<Self> {
        let (width, height) = terminal::size()?;

        let mut viewer = Viewer::new(config, width as u32, height as u32).map_err(to_io)?;
        viewer.load_mesh(mesh).map_err(to_io)?;

        let now = Instant::now();
        Ok(Self {
            viewer,
            renderer: AsciiRenderer::new(width as usize, height as usize),
            running: true,
            started: now,
            last_frame: now,
            frame_count: 0,
            fps: 0.0,
            status: String::new(),
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    /// Milliseconds since the app started, the clock fed to transitions
    fn now_ms(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            if event::poll(Duration::from_millis(0))? {
                self.handle_input()?;
            }

            self.viewer.advance(self.now_ms());

            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        match event::read()? {
            Event::Key(KeyEvent { code, .. }) => match code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.running = false;
                }
                code => {
                    if let Some(request) = view_for_key(code) {
                        self.request_view(request);
                    }
                }
            },
            Event::Resize(width, height) => {
                self.viewer.set_viewport(width as u32, height as u32);
                self.renderer = AsciiRenderer::new(width as usize, height as usize);
            }
            _ => {}
        }
        Ok(())
    }

    fn request_view(&mut self, request: ViewRequest) {
        let now = self.now_ms();
        self.status = match self.viewer.request_view(request, now) {
            Ok(true) => format!("view: {}", request),
            Ok(false) => format!("view: {} (busy)", request),
            Err(e) => {
                log::warn!("view request '{}' failed: {}", request, e);
                format!("error: {}", e)
            }
        };
    }

    fn stats_line(&self) -> String {
        match self.viewer.stats() {
            Some(stats) => {
                let size = stats.bounding_box.size();
                format!(
                    "V {} | F {} | Area {:.3} | Vol {:.3} | Size {:.2}x{:.2}x{:.2} | {}",
                    stats.vertex_count,
                    stats.face_count,
                    stats.surface_area,
                    stats.volume,
                    size.x,
                    size.y,
                    size.z,
                    self.status
                )
            }
            None => "no model loaded".to_string(),
        }
    }

    fn render(&mut self) -> io::Result<()> {
        self.renderer.clear();
        if let Some(mesh) = self.viewer.mesh() {
            self.renderer.render_mesh(mesh, self.viewer.camera());
        }

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "MeshView | FPS: {:.1} | Views: T/B/F/K(back)/L/R  0=Reset  Q=Quit",
                self.fps
            )),
            cursor::MoveTo(0, 1),
            Print(self.stats_line()),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

fn to_io(e: MeshViewError) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, e.to_string())
}
