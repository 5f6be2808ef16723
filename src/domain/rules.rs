/// Movement rules: ordered, first match wins.
///
/// Pure functions over the grid. These decide *which* move applies;
/// `sim::step` performs it.
///
/// ### Horizontal (Left / Right), checked top to bottom
/// ┌───┬──────────────────────────────────────────────┬──────────────────┐
/// │ # │ Precondition                                  │ Action           │
/// ├───┼──────────────────────────────────────────────┼──────────────────┤
/// │ 1 │ dest is Flux or Empty                         │ step             │
/// │ 2 │ dest is Stone/Box, dest+dx is Empty,          │ push object to   │
/// │   │ cell below dest is not Empty                  │ dest+dx, step    │
/// │ 3 │ dest is Key1                                  │ open Lock1, step │
/// │ 4 │ dest is Key2                                  │ open Lock2, step │
/// └───┴──────────────────────────────────────────────┴──────────────────┘
///
/// ### Vertical (Up / Down), checked top to bottom
/// ┌───┬──────────────────────────────────────────────┬──────────────────┐
/// │ 1 │ dest is Flux or Empty                         │ step             │
/// │ 2 │ dest is Key1                                  │ open Lock1, step │
/// │ 3 │ dest is Key2                                  │ open Lock2, step │
/// └───┴──────────────────────────────────────────────┴──────────────────┘
///
/// Nothing matches → the attempt is a no-op. Off-map cells never match.

use super::entity::{MoveDir, Player};
use super::grid::Grid;
use super::tile::Tile;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MoveRule {
    /// Walk into a Flux or Empty cell.
    Step,
    /// Shove a resting Stone/Box one cell ahead and take its place.
    Push,
    /// Take the key in the destination; opens every matching lock.
    TakeKey(Tile),
}

pub const HORIZONTAL_RULES: [MoveRule; 4] = [
    MoveRule::Step,
    MoveRule::Push,
    MoveRule::TakeKey(Tile::Key1),
    MoveRule::TakeKey(Tile::Key2),
];

pub const VERTICAL_RULES: [MoveRule; 3] = [
    MoveRule::Step,
    MoveRule::TakeKey(Tile::Key1),
    MoveRule::TakeKey(Tile::Key2),
];

/// The ordered rule list for a direction.
pub fn rules_for(dir: MoveDir) -> &'static [MoveRule] {
    if dir.is_horizontal() {
        &HORIZONTAL_RULES
    } else {
        &VERTICAL_RULES
    }
}

impl MoveRule {
    /// Does this rule's precondition hold for `player` moving `dir`?
    pub fn applies(self, grid: &Grid, player: &Player, dir: MoveDir) -> bool {
        let (dx, dy) = match player.offset(dir, 1) {
            Some(p) => p,
            None => return false,
        };
        let dest = match grid.get(dx, dy) {
            Some(t) => t,
            None => return false,
        };

        match self {
            MoveRule::Step => dest.is_walkable(),
            MoveRule::Push => {
                if !dest.is_pushable() { return false; }
                let beyond_empty = player
                    .offset(dir, 2)
                    .map_or(false, |(bx, by)| grid.is(bx, by, Tile::Empty));
                // Object must be resting: a hanging one is not pushable.
                let resting = !grid.is(dx, dy + 1, Tile::Empty);
                beyond_empty && resting
            }
            MoveRule::TakeKey(key) => dest == key,
        }
    }
}

/// First rule (in table order) whose precondition holds, if any.
pub fn find_move(grid: &Grid, player: &Player, dir: MoveDir) -> Option<MoveRule> {
    rules_for(dir)
        .iter()
        .copied()
        .find(|rule| rule.applies(grid, player, dir))
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════
