//! Terminal shell around the wireframe viewer core
use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal,
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use wf3d_core::{Camera, MovementConfig, Transform, Vector3, Viewer, Wireframe};

pub mod input;
pub mod renderer;

pub use input::{Action, InputCollector};
pub use renderer::AsciiRenderer;

/// Runtime settings for the terminal viewer
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Ticks per second
    pub fps: f64,
    /// Initial fisheye slider position
    pub fisheye: f64,
    pub movement: MovementConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            fps: 30.0,
            fisheye: 0.0,
            movement: MovementConfig::default(),
        }
    }
}

/// Tick interval for a frame rate, bounded to 1..=240 ticks per second
pub fn tick_interval(fps: f64) -> Duration {
    let fps = if fps.is_finite() { fps.clamp(1.0, 240.0) } else { 30.0 };
    Duration::from_secs_f64(1.0 / fps)
}

/// Main application struct for the terminal wireframe viewer
pub struct TerminalApp {
    scene: Wireframe,
    viewer: Viewer,
    renderer: AsciiRenderer,
    input: InputCollector,
    fisheye: f64,
    tick: Duration,
    running: bool,
    needs_redraw: bool,
}

impl TerminalApp {
    pub fn new(scene: Wireframe, config: AppConfig) -> io::Result<Self> {
        let (width, height) = terminal::size()?;

        let mut camera = Camera::new(Transform::new(Vector3::new(0.0, 0.0, -10.0), 0.0, 0.0, 0.0), 1.0);
        camera.set_fisheye(config.fisheye);

        let mut viewer = Viewer::new(camera, config.movement);
        viewer.on_resize(width as u32, height as u32);

        Ok(Self {
            scene,
            viewer,
            renderer: AsciiRenderer::new(width as usize, height as usize),
            input: InputCollector::new(),
            fisheye: config.fisheye.max(0.0),
            tick: tick_interval(config.fps),
            running: true,
            needs_redraw: true,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide, EnableMouseCapture)?;

        let result = self.main_loop();

        // Cleanup
        execute!(stdout(), DisableMouseCapture, terminal::LeaveAlternateScreen, cursor::Show)?;
        terminal::disable_raw_mode()?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let mut last_tick = Instant::now();

        while self.running {
            // Handle input until the next tick is due
            let deadline = last_tick + self.tick;
            while self.running {
                let remaining = deadline.saturating_duration_since(Instant::now());
                if !event::poll(remaining)? {
                    break;
                }
                let event = event::read()?;
                self.handle_event(event);
            }

            // Update
            let now = Instant::now();
            let elapsed = now - last_tick;
            last_tick = now;

            let input = self.input.take();
            if self.viewer.on_tick(&input, Some(elapsed)) {
                self.needs_redraw = true;
            }

            // Render
            if self.needs_redraw {
                self.render()?;
                self.needs_redraw = false;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let action = match event {
            Event::Key(key) => self.input.handle_key(key),
            Event::Mouse(mouse) => self.input.handle_mouse(mouse, self.viewer.is_camera_mode()),
            Event::Resize(width, height) => {
                self.viewer.on_resize(width as u32, height as u32);
                self.renderer.resize(width as usize, height as usize);
                self.needs_redraw = true;
                None
            }
            _ => None,
        };

        if let Some(action) = action {
            self.apply(action);
        }
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::ToggleCameraMode => {
                let enabled = !self.viewer.is_camera_mode();
                self.viewer.set_camera_mode(enabled);
            }
            Action::SetCameraMode(enabled) => self.viewer.set_camera_mode(enabled),
            Action::AdjustFisheye(delta) => {
                self.fisheye = (self.fisheye + delta).max(0.0);
                self.viewer.set_fisheye(self.fisheye);
            }
        }
        self.needs_redraw = true;
    }

    fn render(&mut self) -> io::Result<()> {
        // Clear renderer
        self.renderer.clear();

        // Render scene
        self.renderer
            .render_wireframe(&self.scene, &self.viewer, Color::DarkGrey);

        // Output to terminal
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(self.status_line()),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }

    fn status_line(&self) -> String {
        let camera = self.viewer.camera();
        let transform = &camera.pos_n_rot;
        let mode = if self.viewer.is_camera_mode() { "CAMERA" } else { "idle" };
        format!(
            "WF3D | {mode} | pos {:.2} yaw {:.2} pitch {:.2} | stretch {:.3} | Tab=camera WASD/Space=move Shift=fast Ctrl=slow +/-=fisheye Q=quit",
            transform.position, transform.yaw, transform.pitch, camera.depth_stretch()
        )
    }
}
