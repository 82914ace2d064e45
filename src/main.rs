// Entry point for the Minesweeper TUI
// Loads configuration, starts file logging and launches the terminal host

use std::fs::{self, File};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use anyhow::Result;
use tracing::{info, Level};

mod tm_color; // Terminal color matching
mod tm_config; // Configuration persistence
mod tm_lang; // Localized strings
mod tm_ui; // Terminal host: rendering and input routing

use tm_config::{load_or_create_config, log_path, Config};
use tm_lang::Lang;
use tm_ui::run as run_ui;

/// Create the log file, along with its directory
fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    File::create(path)
}

/// Log to a file next to the config; stdout belongs to the UI.
/// Logging is skipped, with a note on stderr, if the file cannot be created.
fn init_logging(cfg: &Config) {
    let Some(path) = log_path() else { return };
    let file = match open_log_file(&path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Logging disabled: cannot create {}: {}", path.display(), e);
            return;
        }
    };
    let level = cfg.log_level.parse::<Level>().unwrap_or(Level::INFO);
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
}

fn main() -> Result<()> {
    let mut cfg = load_or_create_config();
    init_logging(&cfg);
    // validated after logging starts so a fallback is recorded
    cfg.validate();
    info!("Starting with a {}x{} board and {} mines", cfg.width, cfg.height, cfg.mines);

    let mut lang = Lang::new(&cfg.language);
    run_ui(&mut cfg, &mut lang)
}
