use clap::Parser;
use color_eyre::Result;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use ratatui::DefaultTerminal;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use bim_configurator::config::{load_config, Config};
use bim_configurator::scene::InMemoryScene;
use bim_configurator::script::{load_script, run_script};
use bim_configurator::session::Session;
use bim_configurator::ui::App;

#[derive(Parser, Debug)]
#[command(name = "bim-configurator")]
#[command(about = "BIM Configurator - place and edit parametric walls, slabs and furniture")]
#[command(version)]
struct Args {
    /// Configuration file (defaults to ./bim-configurator.toml when present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Run a JSON command script instead of the interactive UI
    #[arg(long, value_name = "FILE")]
    script: Option<PathBuf>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    if let Some(script_path) = &args.script {
        init_logging(&config, LogTarget::Stderr)?;
        return run_headless(&config, script_path);
    }

    init_logging(&config, LogTarget::File)?;

    let mut app = App::new(&config);
    always_restore(|| run_tui(&mut app, ratatui::init()), ratatui::restore)
}

/// Runs `body`, then `restore`, whether or not `body` failed.
fn always_restore<T>(body: impl FnOnce() -> Result<T>, restore: impl FnOnce()) -> Result<T> {
    let result = body();
    restore();
    result
}

/// Runs the UI with mouse capture. The caller restores the terminal.
fn run_tui(app: &mut App, terminal: DefaultTerminal) -> Result<()> {
    crossterm::execute!(std::io::stdout(), EnableMouseCapture)?;
    let result = app.run(terminal);
    let released = crossterm::execute!(std::io::stdout(), DisableMouseCapture);
    result?;
    released?;
    Ok(())
}

fn run_headless(config: &Config, script_path: &Path) -> Result<()> {
    let commands = load_script(script_path)?;
    let mut session = Session::new(InMemoryScene::new(), config.assets.loader())
        .with_defaults(config.defaults)
        .with_camera(config.camera);

    let report = run_script(&mut session, commands);
    for step in &report.steps {
        match &step.result {
            Ok(outcome) => {
                for warning in outcome.warnings() {
                    println!("step {}: warning: {warning}", step.index + 1);
                }
            }
            Err(message) => println!("step {}: rejected: {message}", step.index + 1),
        }
    }

    for element in session.elements() {
        let c = element.volume.center;
        println!(
            "{} {} at ({:.2}, {:.2}, {:.2})",
            element.id.short(),
            element.label(),
            c.x,
            c.y,
            c.z
        );
    }
    println!(
        "{} commands, {} rejected, {} elements in scene",
        report.steps.len(),
        report.rejected(),
        session.len()
    );
    Ok(())
}

enum LogTarget {
    Stderr,
    /// The configured log file, or nowhere; stderr would tear the TUI.
    File,
}

fn init_logging(config: &Config, target: LogTarget) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));

    match (target, &config.logging.file) {
        (LogTarget::Stderr, _) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
        (LogTarget::File, Some(path)) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file))
                .init();
        }
        (LogTarget::File, None) => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use color_eyre::eyre::eyre;
    use std::cell::Cell;

    #[test]
    fn terminal_is_restored_when_the_ui_fails() {
        let restored = Cell::new(false);
        let result: Result<()> = always_restore(
            || Err(eyre!("mouse capture unavailable")),
            || restored.set(true),
        );
        assert!(result.is_err());
        assert!(restored.get());
    }

    #[test]
    fn terminal_is_restored_after_a_clean_exit() {
        let restored = Cell::new(false);
        let result = always_restore(|| Ok(7), || restored.set(true));
        assert_eq!(result.unwrap(), 7);
        assert!(restored.get());
    }
}
