/// Gravity for stones and boxes.
///
/// ## Scan order
///
/// One pass per tick: rows bottom to top, columns left to right. An
/// object that drops into row y+1 is never looked at again in the same
/// pass because row y+1 was already scanned, so nothing moves more than
/// one row per tick.
///
/// ## Transitions (first match wins per cell)
///
/// ┌───┬─────────────────────────────────────┬────────────────────────────┐
/// │ # │ Cell / below                         │ Result                     │
/// ├───┼─────────────────────────────────────┼────────────────────────────┤
/// │ 1 │ Stone or FallingStone, below Empty   │ below = FallingStone, cell = Empty │
/// │ 2 │ Box or FallingBox, below Empty       │ below = FallingBox, cell = Empty   │
/// │ 3 │ FallingStone, below not Empty        │ cell = Stone (settles)     │
/// │ 4 │ FallingBox, below not Empty          │ cell = Box (settles)       │
/// │ - │ anything else                        │ unchanged                  │
/// └───┴─────────────────────────────────────┴────────────────────────────┘
///
/// Off-map "below" counts as not Empty, so an object on the bottom row
/// settles instead of reading past the grid.

use super::grid::Grid;
use super::tile::Tile;

/// What happened to one cell during a gravity pass.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FallOutcome {
    /// Object moved from `(x, y)` to `(x, y + 1)` and is now mid-fall.
    Dropped { x: usize, y: usize, kind: Tile },
    /// Falling object came to rest at `(x, y)`.
    Landed { x: usize, y: usize, kind: Tile },
}

/// Which transition applies to `(x, y)`, if any. Pure.
pub fn transition_at(grid: &Grid, x: usize, y: usize) -> Option<FallOutcome> {
    let here = grid.get(x, y)?;
    if !here.is_heavy() {
        return None;
    }

    if grid.is(x, y + 1, Tile::Empty) {
        let kind = here.falling()?;
        return Some(FallOutcome::Dropped { x, y, kind });
    }

    let kind = here.settled()?;
    Some(FallOutcome::Landed { x, y, kind })
}

/// Run one full gravity pass over the grid, mutating it in place.
/// Returns every transition performed, in scan order.
pub fn advance_falling(grid: &mut Grid) -> Vec<FallOutcome> {
    let mut outcomes = Vec::new();

    for y in (0..grid.height()).rev() {
        for x in 0..grid.width() {
            let Some(outcome) = transition_at(grid, x, y) else { continue };
            match outcome {
                FallOutcome::Dropped { x, y, kind } => {
                    grid.set(x, y + 1, kind);
                    grid.set(x, y, Tile::Empty);
                }
                FallOutcome::Landed { x, y, kind } => {
                    grid.set(x, y, kind);
                }
            }
            outcomes.push(outcome);
        }
    }

    outcomes
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════
