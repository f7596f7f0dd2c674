//! WF3D Terminal Viewer - Wireframe Grid
//!
//! Flies a camera over a wireframe ground grid rendered as ASCII.
//! Controls:
//!   - Tab / Middle Mouse: Camera mode (mouse look + movement)
//!   - WASD / Arrow Keys: Move, Space: Rise
//!   - Shift: Fast, Ctrl: Slow
//!   - +/-: Fisheye
//!   - Q/ESC: Quit
use clap::Parser;
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use wf3d_core::{MovementConfig, Vector3, Wireframe};
use wf3d_terminal::{AppConfig, TerminalApp};

#[derive(Parser, Debug)]
#[command(name = "wf3d-terminal", about = "ASCII wireframe viewer")]
struct CliArgs {
    /// Ticks per second
    #[arg(long, default_value_t = 30.0)]
    fps: f64,

    /// Initial fisheye slider position (0 disables the effect)
    #[arg(long, default_value_t = 0.0)]
    fisheye: f64,

    /// Grid lines on each side of the origin
    #[arg(long, default_value_t = 20)]
    grid_extent: i32,

    /// Radians per unit of mouse movement
    #[arg(long, default_value_t = 0.02)]
    look_sensitivity: f64,

    /// Distance per reference tick at normal speed
    #[arg(long, default_value_t = 0.4)]
    base_speed: f64,

    /// Log file, defaults to wf3d-terminal.log in the temp directory
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Raw mode and the alternate screen own the terminal, so logs go to a file.
fn log_target(path: &Path) -> io::Result<env_logger::Target> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(env_logger::Target::Pipe(Box::new(file)))
}

fn main() -> io::Result<()> {
    let args = CliArgs::parse();

    let log_path = args
        .log_file
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("wf3d-terminal.log"));
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(log_target(&log_path)?)
        .init();
    log::debug!("{args:?}");

    let mut scene = Wireframe::grid(args.grid_extent.clamp(0, 500), 1.0);
    scene.extend(Wireframe::cube(Vector3::new(0.0, 0.0, 0.0), 2.0));

    let config = AppConfig {
        fps: args.fps,
        fisheye: args.fisheye,
        movement: MovementConfig {
            base_speed: args.base_speed,
            look_sensitivity: args.look_sensitivity,
            ..MovementConfig::default()
        },
    };

    let mut app = TerminalApp::new(scene, config)?;
    app.run()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_log_target_writes_to_file() {
        let path = std::env::temp_dir().join(format!("wf3d-terminal-test-{}.log", std::process::id()));
        let _ = std::fs::remove_file(&path);

        let env_logger::Target::Pipe(mut writer) = log_target(&path).unwrap() else {
            panic!("expected a file target");
        };
        writeln!(writer, "camera mode Idle -> Navigating").unwrap();
        writer.flush().unwrap();
        drop(writer);

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "camera mode Idle -> Navigating\n");
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_cli_args() {
        let args = CliArgs::try_parse_from(["wf3d-terminal", "--fps", "60", "--log-file", "view.log"]).unwrap();
        assert_eq!(args.fps, 60.0);
        assert_eq!(args.log_file, Some(PathBuf::from("view.log")));
        assert_eq!(args.grid_extent, 20);

        let args = CliArgs::try_parse_from(["wf3d-terminal"]).unwrap();
        assert_eq!(args.log_file, None);
    }
}
