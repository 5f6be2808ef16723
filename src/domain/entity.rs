/// Entities: the player marker and movement directions.
/// Stones, boxes, keys and locks have no identity beyond their grid cell.

/// Movement direction (one queued input = one attempted step).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum MoveDir {
    Up,
    Down,
    Left,
    Right,
}

impl MoveDir {
    /// Signed grid offset. Exactly one component is non-zero.
    pub fn delta(self) -> (i32, i32) {
        match self {
            MoveDir::Left  => (-1, 0),
            MoveDir::Right => (1, 0),
            MoveDir::Up    => (0, -1),
            MoveDir::Down  => (0, 1),
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, MoveDir::Left | MoveDir::Right)
    }
}

/// Player position. Mirrors the single `Tile::Player` cell in the grid;
/// only `WorldState::move_player_to` changes it.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Player {
    pub x: usize,
    pub y: usize,
}

impl Player {
    pub fn new(x: usize, y: usize) -> Self {
        Player { x, y }
    }

    /// The cell `steps` cells away in `dir`, or None if it would leave
    /// the non-negative quadrant.
    pub fn offset(&self, dir: MoveDir, steps: i32) -> Option<(usize, usize)> {
        offset(self.x, self.y, dir, steps)
    }
}

/// `(x, y)` moved `steps` cells along `dir`.
pub fn offset(x: usize, y: usize, dir: MoveDir, steps: i32) -> Option<(usize, usize)> {
    let (dx, dy) = dir.delta();
    let nx = x as i64 + (dx * steps) as i64;
    let ny = y as i64 + (dy * steps) as i64;
    if nx < 0 || ny < 0 {
        return None;
    }
    Some((nx as usize, ny as usize))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deltas_have_one_nonzero_axis() {
        for dir in [MoveDir::Up, MoveDir::Down, MoveDir::Left, MoveDir::Right] {
            let (dx, dy) = dir.delta();
            assert_eq!(dx.abs() + dy.abs(), 1);
            assert_eq!(dir.is_horizontal(), dx != 0);
        }
    }

    #[test]
    fn offset_two_steps() {
        let p = Player::new(3, 2);
        assert_eq!(p.offset(MoveDir::Right, 2), Some((5, 2)));
        assert_eq!(p.offset(MoveDir::Up, 1), Some((3, 1)));
    }

    #[test]
    fn offset_below_zero_is_none() {
        let p = Player::new(1, 0);
        assert_eq!(p.offset(MoveDir::Up, 1), None);
        assert_eq!(p.offset(MoveDir::Left, 2), None);
    }
}
