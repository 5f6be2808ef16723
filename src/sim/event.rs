/// Events emitted during a simulation step.
/// The frame driver logs these; nothing feeds them back into the sim.

use crate::domain::entity::MoveDir;
use crate::domain::tile::Tile;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    PlayerMoved { dir: MoveDir, x: usize, y: usize },
    ObjectPushed { kind: Tile, x: usize, y: usize },
    LocksOpened { lock: Tile, count: usize },
    ObjectStartedFalling { kind: Tile, x: usize, y: usize },
    ObjectLanded { kind: Tile, x: usize, y: usize },
    MoveBlocked { dir: MoveDir },
}
