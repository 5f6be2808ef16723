/// WorldState: the complete snapshot of a running game.
///
/// ## Tile Architecture
///
/// Two grids:
///   - `level.grid`: the level as loaded. **Never mutated** after load.
///   - `grid`:       the live board (level + everything that happened since).
///
/// The player is both a `Tile::Player` cell in `grid` and the `player`
/// coordinates. `move_player_to()` is the only place either changes, so
/// they cannot drift apart. `restart()` resets `grid = level.grid.clone()`.

use crate::domain::entity::Player;
use crate::domain::grid::Grid;
use crate::domain::tile::Tile;
use super::level::Level;

#[derive(Clone, Debug)]
pub struct WorldState {
    pub level: Level,
    pub grid: Grid,
    pub player: Player,
    pub tick: u64,
}

impl WorldState {
    pub fn new(level: Level) -> Self {
        WorldState {
            grid: level.grid.clone(),
            player: level.player,
            level,
            tick: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Relocate the player: origin becomes Empty, destination becomes
    /// Player, coordinates follow.
    pub fn move_player_to(&mut self, x: usize, y: usize) {
        self.grid.set(self.player.x, self.player.y, Tile::Empty);
        self.grid.set(x, y, Tile::Player);
        self.player = Player::new(x, y);
    }

    /// Clear every `lock` cell on the board. Returns how many opened.
    pub fn unlock(&mut self, lock: Tile) -> usize {
        self.grid.replace_all(lock, Tile::Empty)
    }

    /// Back to the layout the level started with.
    pub fn restart(&mut self) {
        self.grid = self.level.grid.clone();
        self.player = self.level.player;
        self.tick = 0;
    }

    /// Does the grid agree with `player` and hold exactly one Player cell?
    pub fn player_in_sync(&self) -> bool {
        self.grid.positions_of(Tile::Player) == vec![(self.player.x, self.player.y)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> WorldState {
        let level = Level::parse("#####\n#P K#\n#K  #\n#####\n", "t").expect("valid");
        WorldState::new(level)
    }

    #[test]
    fn move_keeps_player_in_sync() {
        let mut w = world();
        assert!(w.player_in_sync());
        w.move_player_to(2, 1);
        assert_eq!(w.player, Player::new(2, 1));
        assert_eq!(w.grid.get(1, 1), Some(Tile::Empty));
        assert!(w.player_in_sync());
    }

    #[test]
    fn unlock_clears_all_matching_locks() {
        let mut w = world();
        assert_eq!(w.unlock(Tile::Lock1), 2);
        assert_eq!(w.grid.count(Tile::Lock1), 0);
        assert_eq!(w.unlock(Tile::Lock2), 0);
    }

    #[test]
    fn restart_restores_level_layout() {
        let mut w = world();
        w.move_player_to(2, 2);
        w.unlock(Tile::Lock1);
        w.tick = 9;
        w.restart();
        assert_eq!(w.grid, w.level.grid);
        assert_eq!(w.player, Player::new(1, 1));
        assert_eq!(w.tick, 0);
    }
}
