/// Tile types and their properties.
/// Properties are queried via methods, not stored as flags,
/// so tile semantics are centralized here.

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Tile {
    Empty,
    Flux,         // Walkable fill, behaves like Empty for movement
    Unbreakable,  // Border / wall
    Player,
    Stone,
    FallingStone,
    Box,
    FallingBox,
    Key1,
    Lock1,
    Key2,
    Lock2,
}

impl Tile {
    /// Every kind, in numeric tag order.
    pub const ALL: [Tile; 12] = [
        Tile::Empty,
        Tile::Flux,
        Tile::Unbreakable,
        Tile::Player,
        Tile::Stone,
        Tile::FallingStone,
        Tile::Box,
        Tile::FallingBox,
        Tile::Key1,
        Tile::Lock1,
        Tile::Key2,
        Tile::Lock2,
    ];

    /// Numeric level tag (0..=11).
    #[allow(dead_code)]
    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Inverse of `tag()`.
    pub fn from_tag(tag: u8) -> Option<Tile> {
        Tile::ALL.get(tag as usize).copied()
    }

    /// Can the player step straight into this cell?
    pub fn is_walkable(self) -> bool {
        matches!(self, Tile::Empty | Tile::Flux)
    }

    /// Can this be shoved sideways by the player?
    /// Only objects at rest; a falling object is never pushable.
    pub fn is_pushable(self) -> bool {
        matches!(self, Tile::Stone | Tile::Box)
    }

    /// Is this subject to gravity at all?
    pub fn is_heavy(self) -> bool {
        matches!(self, Tile::Stone | Tile::FallingStone | Tile::Box | Tile::FallingBox)
    }

    /// The mid-fall variant this object becomes when the cell below opens.
    pub fn falling(self) -> Option<Tile> {
        match self {
            Tile::Stone | Tile::FallingStone => Some(Tile::FallingStone),
            Tile::Box | Tile::FallingBox => Some(Tile::FallingBox),
            _ => None,
        }
    }

    /// The at-rest variant a falling object settles into.
    pub fn settled(self) -> Option<Tile> {
        match self {
            Tile::FallingStone => Some(Tile::Stone),
            Tile::FallingBox => Some(Tile::Box),
            _ => None,
        }
    }

    /// The lock opened by picking up this key.
    pub fn lock_for_key(self) -> Option<Tile> {
        match self {
            Tile::Key1 => Some(Tile::Lock1),
            Tile::Key2 => Some(Tile::Lock2),
            _ => None,
        }
    }

    /// Level text glyph. See `sim::level` for the legend.
    pub fn glyph(self) -> char {
        match self {
            Tile::Empty => ' ',
            Tile::Flux => '.',
            Tile::Unbreakable => '#',
            Tile::Player => 'P',
            Tile::Stone => 'o',
            Tile::FallingStone => 'O',
            Tile::Box => 'b',
            Tile::FallingBox => 'B',
            Tile::Key1 => 'k',
            Tile::Lock1 => 'K',
            Tile::Key2 => 'j',
            Tile::Lock2 => 'J',
        }
    }

    /// Inverse of `glyph()`.
    pub fn from_glyph(ch: char) -> Option<Tile> {
        Tile::ALL.iter().copied().find(|t| t.glyph() == ch)
    }
}

impl Default for Tile {
    fn default() -> Self {
        Tile::Empty
    }
}
