/// Game settings from `config.toml`.
///
/// Looked up next to the executable first, then in the working directory.
/// Every key is optional; anything absent or unreadable takes its default.
///
/// Logging is not up yet when this runs (its settings live here), so
/// problems are collected in `GameConfig::warnings` and logged by `main`
/// once the subscriber exists.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::sim::clock::DEFAULT_FPS;

/// Largest accepted `display.tile_size`. The board is repainted pixel by
/// pixel every frame, and a terminal cannot show more than a few pixels
/// per tile anyway.
pub const MAX_TILE_SIZE: u16 = 8;

// ── Resolved settings ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub fps: u32,
    pub tile_size: u16,
    pub level_file: Option<PathBuf>,
    pub log: LogConfig,
    pub gamepad: GamepadConfig,
    pub warnings: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive; `RUST_LOG` overrides it.
    pub level: String,
    pub dir: PathBuf,
    pub file: String,
}

#[derive(Clone, Debug)]
pub struct GamepadConfig {
    pub restart: Vec<String>,
    pub quit: Vec<String>,
}

// ── File layout ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    speed: TomlSpeed,
    #[serde(default)]
    display: TomlDisplay,
    #[serde(default)]
    general: TomlGeneral,
    #[serde(default)]
    log: TomlLog,
    #[serde(default)]
    gamepad: TomlGamepad,
}

#[derive(Deserialize, Debug)]
struct TomlSpeed {
    #[serde(default = "default_fps")]
    fps: u32,
}

#[derive(Deserialize, Debug)]
struct TomlDisplay {
    #[serde(default = "default_tile_size")]
    tile_size: u16,
}

#[derive(Deserialize, Debug, Default)]
struct TomlGeneral {
    #[serde(default)]
    level_file: String,
}

#[derive(Deserialize, Debug)]
struct TomlLog {
    #[serde(default = "default_log_level")]
    level: String,
    #[serde(default = "default_log_file")]
    file: String,
}

#[derive(Deserialize, Debug)]
struct TomlGamepad {
    #[serde(default = "default_restart")]
    restart: Vec<String>,
    #[serde(default = "default_quit")]
    quit: Vec<String>,
}

// ── Defaults ──

fn default_fps() -> u32 { DEFAULT_FPS }
fn default_tile_size() -> u16 { 2 }
fn default_log_level() -> String { "info".into() }
fn default_log_file() -> String { "stonekeep.log".into() }
fn default_restart() -> Vec<String> { vec!["Start".into()] }
fn default_quit() -> Vec<String> { vec!["Select".into()] }

impl Default for TomlSpeed {
    fn default() -> Self {
        TomlSpeed { fps: default_fps() }
    }
}

impl Default for TomlDisplay {
    fn default() -> Self {
        TomlDisplay { tile_size: default_tile_size() }
    }
}

impl Default for TomlLog {
    fn default() -> Self {
        TomlLog {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

impl Default for TomlGamepad {
    fn default() -> Self {
        TomlGamepad {
            restart: default_restart(),
            quit: default_quit(),
        }
    }
}

// ── Loading ──

impl GameConfig {
    /// Find and parse `config.toml`. Never fails: with no file at all
    /// the result is the defaults, anchored at the working directory.
    pub fn load() -> Self {
        let mut warnings = Vec::new();

        let (text, home) = match find_toml(&candidate_dirs(), &mut warnings) {
            Some(found) => found,
            None => (String::new(), cwd_or_dot()),
        };

        let mut cfg = GameConfig::parse(&text, &home);
        warnings.append(&mut cfg.warnings);
        cfg.warnings = warnings;
        cfg
    }

    /// Parse config text directly. `home` anchors relative paths.
    pub fn parse(text: &str, home: &Path) -> Self {
        let mut warnings = Vec::new();
        let cfg = parse_toml(text, "config.toml", &mut warnings);
        GameConfig::from_toml(cfg, home, warnings)
    }

    fn from_toml(cfg: TomlConfig, home: &Path, mut warnings: Vec<String>) -> Self {
        let fps = if cfg.speed.fps == 0 {
            warnings.push(format!("speed.fps = 0 is invalid; using {}", DEFAULT_FPS));
            DEFAULT_FPS
        } else {
            cfg.speed.fps
        };

        let tile_size = match cfg.display.tile_size {
            0 => {
                warnings.push(format!("display.tile_size = 0 is invalid; using {}", default_tile_size()));
                default_tile_size()
            }
            n if n > MAX_TILE_SIZE => {
                warnings.push(format!("display.tile_size = {n} is too large; using {MAX_TILE_SIZE}"));
                MAX_TILE_SIZE
            }
            n => n,
        };

        let level_file = match cfg.general.level_file.trim() {
            "" => None,
            p if Path::new(p).is_absolute() => Some(PathBuf::from(p)),
            p => Some(home.join(p)),
        };

        GameConfig {
            fps,
            tile_size,
            level_file,
            log: LogConfig {
                level: cfg.log.level,
                dir: home.to_path_buf(),
                file: cfg.log.file,
            },
            gamepad: GamepadConfig {
                restart: cfg.gamepad.restart,
                quit: cfg.gamepad.quit,
            },
            warnings,
        }
    }
}

fn cwd_or_dot() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    // Executable dir
    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    // CWD
    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Text of the first readable `config.toml` in `search_dirs`, plus the
/// directory it came from.
fn find_toml(search_dirs: &[PathBuf], warnings: &mut Vec<String>) -> Option<(String, PathBuf)> {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if !path.exists() {
            continue;
        }
        match std::fs::read_to_string(&path) {
            Ok(text) => return Some((text, dir.clone())),
            Err(e) => warnings.push(format!("could not read {}: {e}", path.display())),
        }
    }
    None
}

fn parse_toml(text: &str, origin: &str, warnings: &mut Vec<String>) -> TomlConfig {
    match toml::from_str::<TomlConfig>(text) {
        Ok(cfg) => cfg,
        Err(e) => {
            warnings.push(format!("{origin} parse error, using default settings: {e}"));
            TomlConfig::default()
        }
    }
}
