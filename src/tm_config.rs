// Configuration persistence
// Board size, engine rules and display preferences stored as TOML

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use tmines::{FlagPolicy, MinePlacement, Rules};

use crate::tm_lang::Lang;

/// Original board: 9x9 with 10 mines
pub const DEFAULT_BOARD: (usize, usize, usize) = (9, 9, 10);

/// User configuration, persisted to disk as TOML
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    // Board size for every session
    pub width: usize,
    pub height: usize,
    pub mines: usize,

    // Engine rules
    pub flag_policy: FlagPolicy,
    pub mine_placement: MinePlacement,

    // Preferences
    pub ascii_icons: bool, // Use ASCII fallback icons
    pub language: String,  // "en" or "zh"
    pub log_level: String, // tracing level name
}

impl Default for Config {
    fn default() -> Self {
        // Auto-detect system language on first run
        let system_lang = sys_locale::get_locale().unwrap_or_else(|| "en".to_string());
        let lang = if system_lang.to_lowercase().starts_with("zh") {
            "zh".to_string()
        } else {
            "en".to_string()
        };
        let (width, height, mines) = DEFAULT_BOARD;

        Config {
            width,
            height,
            mines,
            flag_policy: FlagPolicy::default(),
            mine_placement: MinePlacement::default(),
            ascii_icons: false,
            language: lang,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn params(&self) -> (usize, usize, usize) {
        (self.width, self.height, self.mines)
    }

    /// Reset the board size to the default if the engine would reject it.
    /// Returns true if anything was changed.
    pub fn validate(&mut self) -> bool {
        let (w, h, n) = self.params();
        let capacity = match self.mine_placement {
            MinePlacement::FullGrid => w.checked_mul(h).map(|area| area.saturating_sub(1)),
            MinePlacement::SkipFirstRowAndColumn => w.saturating_sub(1).checked_mul(h.saturating_sub(1)),
        };
        if w == 0 || h == 0 || capacity.is_none_or(|cap| n > cap) {
            warn!("Invalid board {}x{} with {} mines in config, using defaults", w, h, n);
            (self.width, self.height, self.mines) = DEFAULT_BOARD;
            self.mine_placement = MinePlacement::FullGrid;
            return true;
        }
        false
    }

    /// Engine rules, with game-ended messages in the current language
    pub fn rules(&self, lang: &Lang) -> Rules {
        Rules {
            flag_policy: self.flag_policy,
            mine_placement: self.mine_placement,
            win_message: lang.assets.win_message,
            loss_message: lang.assets.loss_message,
        }
    }
}

/// Path of a per-project file named after the executable, e.g.
/// ~/.config/tmines/tmines.toml on Linux.
/// Falls back to the current directory if ProjectDirs is unavailable
fn project_file(ext: &str) -> Option<PathBuf> {
    let exe = env::current_exe().ok()?;
    let name = exe.file_stem().and_then(|s| s.to_str())?;
    let mut path = match ProjectDirs::from("com", "tmines", name) {
        Some(proj) => proj.config_dir().to_path_buf(),
        None => env::current_dir().ok()?,
    };
    path.push(format!("{}.{}", name, ext));
    Some(path)
}

pub fn config_path() -> Option<PathBuf> {
    project_file("toml")
}

/// Log file next to the config file; the terminal itself belongs to the UI
pub fn log_path() -> Option<PathBuf> {
    project_file("log")
}

/// Load configuration from disk, or create the default file if not found
pub fn load_or_create_config() -> Config {
    if let Some(path) = config_path() {
        if let Ok(s) = fs::read_to_string(&path) {
            if let Ok(cfg) = toml::from_str::<Config>(&s) {
                return cfg;
            }
        }
        let cfg = Config::default();
        write_config(&cfg, &path);
        return cfg;
    }
    Config::default()
}

pub fn save_config(cfg: &Config) {
    if let Some(path) = config_path() {
        write_config(cfg, &path);
    }
}

fn write_config(cfg: &Config, path: &Path) {
    if let Ok(s) = toml::to_string(cfg) {
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        match fs::write(path, s) {
            Ok(()) => debug!("Config written to {}", path.display()),
            Err(e) => warn!("Could not write config {}: {}", path.display(), e),
        }
    }
}
