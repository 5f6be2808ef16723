/// Level loader.
///
/// ## Sources (priority order):
///   1. `general.level_file` from config.toml, if set
///   2. The built-in embedded level
///
/// ## Text format (`.txt`):
///   Optional line 1: `# Level Name`
///   Lines starting with `;` are comments.
///   Remaining lines: map rows, all the same width.
///
/// ## Tile legend:
///   ' ' = Empty          '.' = Flux           '#' = Unbreakable wall
///   'P' = Player         'o' = Stone          'O' = Falling stone
///   'b' = Box            'B' = Falling box
///   'k' = Key 1          'K' = Lock 1
///   'j' = Key 2          'J' = Lock 2
///
/// The embedded level is stored as numeric tags (see `Tile::tag`).
///
/// Every level is validated before play: non-empty, rectangular, exactly
/// one player, and a closed ring of Unbreakable walls. The simulation
/// relies on the border so it never looks past the edge of the grid.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::domain::entity::Player;
use crate::domain::grid::Grid;
use crate::domain::tile::Tile;

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level has no rows")]
    Empty,

    #[error("row {row} is {found} cells wide, expected {expected}")]
    Ragged { row: usize, expected: usize, found: usize },

    #[error("unknown tile glyph {glyph:?} at ({x}, {y})")]
    UnknownGlyph { glyph: char, x: usize, y: usize },

    #[error("unknown tile tag {tag} at ({x}, {y})")]
    UnknownTag { tag: u8, x: usize, y: usize },

    #[error("level needs exactly one player, found {0}")]
    PlayerCount(usize),

    #[error("border cell ({x}, {y}) is {found:?}, expected an unbreakable wall")]
    OpenBorder { x: usize, y: usize, found: Tile },

    #[error("could not read level file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A validated level: the grid plus the player cell found in it.
#[derive(Clone, Debug)]
pub struct Level {
    pub name: String,
    pub grid: Grid,
    pub player: Player,
}

// ══════════════════════════════════════════════════════════════
// Embedded level
// ══════════════════════════════════════════════════════════════

pub const EMBEDDED_NAME: &str = "Keystone";

const EMBEDDED_TAGS: [[u8; 8]; 6] = [
    [2, 2, 2, 2, 2, 2, 2, 2],
    [2, 3, 0, 1, 1, 2, 0, 2],
    [2, 4, 2, 6, 1, 2, 0, 2],
    [2, 8, 4, 1, 1, 2, 0, 2],
    [2, 4, 1, 1, 1, 9, 0, 2],
    [2, 2, 2, 2, 2, 2, 2, 2],
];

// ══════════════════════════════════════════════════════════════
// Public API
// ══════════════════════════════════════════════════════════════

impl Level {
    /// The level compiled into the binary.
    pub fn embedded() -> Result<Level, LevelError> {
        let rows: Vec<&[u8]> = EMBEDDED_TAGS.iter().map(|r| r.as_slice()).collect();
        Level::from_tags(EMBEDDED_NAME, &rows)
    }

    /// Build from numeric tag rows.
    pub fn from_tags(name: &str, rows: &[&[u8]]) -> Result<Level, LevelError> {
        let mut cells = Vec::with_capacity(rows.len());
        for (y, row) in rows.iter().enumerate() {
            let mut out = Vec::with_capacity(row.len());
            for (x, &tag) in row.iter().enumerate() {
                let tile = Tile::from_tag(tag).ok_or(LevelError::UnknownTag { tag, x, y })?;
                out.push(tile);
            }
            cells.push(out);
        }
        Level::validate(name, cells)
    }

    /// Parse the text format described in the module docs.
    pub fn parse(text: &str, fallback_name: &str) -> Result<Level, LevelError> {
        let mut name = fallback_name.to_string();
        let mut cells = Vec::new();

        for (i, line) in text.lines().enumerate() {
            if i == 0 {
                if let Some(title) = line.strip_prefix("# ") {
                    name = title.trim().to_string();
                    continue;
                }
            }
            if line.starts_with(';') {
                continue;
            }
            let y = cells.len();
            let mut row = Vec::with_capacity(line.len());
            for (x, glyph) in line.chars().enumerate() {
                let tile = Tile::from_glyph(glyph).ok_or(LevelError::UnknownGlyph { glyph, x, y })?;
                row.push(tile);
            }
            cells.push(row);
        }

        // Trailing blank lines are not rows.
        while cells.last().map_or(false, |r| r.is_empty()) {
            cells.pop();
        }

        Level::validate(&name, cells)
    }

    /// Read and parse a level file.
    pub fn from_file(path: &Path) -> Result<Level, LevelError> {
        let text = std::fs::read_to_string(path).map_err(|source| LevelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "Untitled".to_string());
        Level::parse(&text, &stem)
    }

    /// Render back to the text format (used by tests and the log).
    pub fn to_text(&self) -> String {
        let mut out = format!("# {}\n", self.name);
        for row in self.grid.rows() {
            out.extend(row.iter().map(|t| t.glyph()));
            out.push('\n');
        }
        out
    }

    fn validate(name: &str, cells: Vec<Vec<Tile>>) -> Result<Level, LevelError> {
        let expected = match cells.first() {
            Some(r) if !r.is_empty() => r.len(),
            _ => return Err(LevelError::Empty),
        };
        for (row, r) in cells.iter().enumerate() {
            if r.len() != expected {
                return Err(LevelError::Ragged { row, expected, found: r.len() });
            }
        }

        let grid = Grid::from_rows(cells);

        let players = grid.positions_of(Tile::Player);
        let (px, py) = match players.as_slice() {
            [only] => *only,
            _ => return Err(LevelError::PlayerCount(players.len())),
        };

        if let Some((x, y, found)) = grid.border_violation(Tile::Unbreakable) {
            return Err(LevelError::OpenBorder { x, y, found });
        }

        Ok(Level {
            name: name.to_string(),
            grid,
            player: Player::new(px, py),
        })
    }
}

/// Pick the level source from config (file if set, embedded otherwise).
pub fn load_level(config: &GameConfig) -> Result<Level, LevelError> {
    let level = match &config.level_file {
        Some(path) => Level::from_file(path)?,
        None => Level::embedded()?,
    };
    info!(
        name = %level.name,
        width = level.grid.width(),
        height = level.grid.height(),
        keys = level.grid.count(Tile::Key1) + level.grid.count(Tile::Key2),
        "level loaded"
    );
    debug!("layout:\n{}", level.to_text());
    Ok(level)
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_level_is_valid() {
        let level = Level::embedded().expect("embedded level");
        assert_eq!(level.name, EMBEDDED_NAME);
        assert_eq!(level.grid.width(), 8);
        assert_eq!(level.grid.height(), 6);
        assert_eq!(level.player, Player::new(1, 1));
        assert_eq!(level.grid.get(1, 1), Some(Tile::Player));
        assert_eq!(level.grid.get(3, 2), Some(Tile::Box));
        assert_eq!(level.grid.get(1, 3), Some(Tile::Key1));
        assert_eq!(level.grid.get(5, 4), Some(Tile::Lock1));
    }

    #[test]
    fn parse_text_level_with_title() {
        let text = "# Tiny\n#####\n#P.o#\n#####\n";
        let level = Level::parse(text, "fallback").expect("valid");
        assert_eq!(level.name, "Tiny");
        assert_eq!(level.player, Player::new(1, 1));
        assert_eq!(level.grid.get(3, 1), Some(Tile::Stone));
    }

    #[test]
    fn parse_skips_comments_and_trailing_blanks() {
        let text = "; a comment\n###\n#P#\n###\n\n\n";
        let level = Level::parse(text, "fallback").expect("valid");
        assert_eq!(level.name, "fallback");
        assert_eq!(level.grid.height(), 3);
    }

    #[test]
    fn text_round_trip_of_embedded() {
        let level = Level::embedded().expect("embedded level");
        let again = Level::parse(&level.to_text(), "x").expect("valid");
        assert_eq!(again.name, level.name);
        assert_eq!(again.grid, level.grid);
    }

    #[test]
    fn rejects_empty() {
        assert!(matches!(Level::parse("", "x"), Err(LevelError::Empty)));
        assert!(matches!(Level::parse("# Only a title\n", "x"), Err(LevelError::Empty)));
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = Level::parse("####\n#P#\n####\n", "x").unwrap_err();
        assert!(matches!(err, LevelError::Ragged { row: 1, expected: 4, found: 3 }));
    }

    #[test]
    fn rejects_unknown_glyph() {
        let err = Level::parse("###\n#P?\n###\n", "x").unwrap_err();
        assert!(matches!(err, LevelError::UnknownGlyph { glyph: '?', x: 2, y: 1 }));
    }

    #[test]
    fn rejects_unknown_tag() {
        let rows: [&[u8]; 1] = [&[2, 12]];
        let err = Level::from_tags("x", &rows).unwrap_err();
        assert!(matches!(err, LevelError::UnknownTag { tag: 12, x: 1, y: 0 }));
    }

    #[test]
    fn rejects_missing_or_extra_player() {
        let none = Level::parse("###\n# #\n###\n", "x").unwrap_err();
        assert!(matches!(none, LevelError::PlayerCount(0)));

        let two = Level::parse("####\n#PP#\n####\n", "x").unwrap_err();
        assert!(matches!(two, LevelError::PlayerCount(2)));
    }

    #[test]
    fn rejects_open_border() {
        let err = Level::parse("###\n#P \n###\n", "x").unwrap_err();
        assert!(matches!(err, LevelError::OpenBorder { x: 2, y: 1, found: Tile::Empty }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Level::from_file(Path::new("/nonexistent/level.txt")).unwrap_err();
        assert!(matches!(err, LevelError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/level.txt"));
    }
}
