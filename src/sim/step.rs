/// The step function: advances the world by one tick.
///
/// Processing order:
///   1. Movement resolution: drain the input queue newest-first, one
///      attempted move per queued direction
///   2. Gravity: one bottom-to-top falling pass
///
/// Rule selection lives in `domain::rules` / `domain::physics`; this file
/// performs the chosen action on the world.

use crate::domain::entity::MoveDir;
use crate::domain::physics::{self, FallOutcome};
use crate::domain::rules::{self, MoveRule};
use super::event::GameEvent;
use super::input_queue::InputQueue;
use super::world::WorldState;

// ══════════════════════════════════════════════════════════════
// Main entry point
// ══════════════════════════════════════════════════════════════

pub fn step(world: &mut WorldState, inputs: &mut InputQueue) -> Vec<GameEvent> {
    let mut events: Vec<GameEvent> = Vec::new();
    world.tick += 1;

    resolve_player_movement(world, inputs, &mut events);
    resolve_gravity(world, &mut events);
    debug_assert!(world.player_in_sync());

    events
}

// ══════════════════════════════════════════════════════════════
// Player movement
// ══════════════════════════════════════════════════════════════

fn resolve_player_movement(world: &mut WorldState, inputs: &mut InputQueue, events: &mut Vec<GameEvent>) {
    while let Some(dir) = inputs.pop_latest() {
        attempt_move(world, dir, events);
    }
}

/// Try to move the player one cell in `dir`. A move no rule allows is a
/// silent no-op on the grid (it only records `MoveBlocked`).
pub fn attempt_move(world: &mut WorldState, dir: MoveDir, events: &mut Vec<GameEvent>) {
    let rule = match rules::find_move(&world.grid, &world.player, dir) {
        Some(r) => r,
        None => {
            events.push(GameEvent::MoveBlocked { dir });
            return;
        }
    };

    // Rules only match when the destination is on the map.
    let Some((dx, dy)) = world.player.offset(dir, 1) else { return };

    match rule {
        MoveRule::Step => {}
        MoveRule::Push => {
            // Far cell first: moving the player overwrites the object.
            let Some(kind) = world.grid.get(dx, dy) else { return };
            let Some((fx, fy)) = world.player.offset(dir, 2) else { return };
            world.grid.set(fx, fy, kind);
            events.push(GameEvent::ObjectPushed { kind, x: fx, y: fy });
        }
        MoveRule::TakeKey(key) => {
            if let Some(lock) = key.lock_for_key() {
                let count = world.unlock(lock);
                events.push(GameEvent::LocksOpened { lock, count });
            }
        }
    }

    world.move_player_to(dx, dy);
    events.push(GameEvent::PlayerMoved { dir, x: dx, y: dy });
}

// ══════════════════════════════════════════════════════════════
// Gravity
// ══════════════════════════════════════════════════════════════

fn resolve_gravity(world: &mut WorldState, events: &mut Vec<GameEvent>) {
    for outcome in physics::advance_falling(&mut world.grid) {
        match outcome {
            FallOutcome::Dropped { kind, x, y } => {
                events.push(GameEvent::ObjectStartedFalling { kind, x, y: y + 1 });
            }
            FallOutcome::Landed { kind, x, y } => {
                events.push(GameEvent::ObjectLanded { kind, x, y });
            }
        }
    }
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::Player;
    use crate::domain::tile::Tile;
    use crate::sim::level::Level;

    fn world_from(rows: &[&str]) -> WorldState {
        let text = rows.join("\n");
        WorldState::new(Level::parse(&text, "test").expect("valid test level"))
    }

    fn mv(world: &mut WorldState, dir: MoveDir) -> Vec<GameEvent> {
        let mut events = Vec::new();
        attempt_move(world, dir, &mut events);
        events
    }

    // ── Movement ──

    #[test]
    fn step_into_flux_relocates_player() {
        let mut w = world_from(&[
            "#####",
            "#P. #",
            "#####",
        ]);
        mv(&mut w, MoveDir::Right);
        assert_eq!(w.player, Player::new(2, 1));
        assert_eq!(w.grid.get(1, 1), Some(Tile::Empty));
        assert!(w.player_in_sync());

        mv(&mut w, MoveDir::Right);
        assert_eq!(w.player, Player::new(3, 1));
        assert!(w.player_in_sync());
    }

    #[test]
    fn blocked_moves_leave_grid_unchanged() {
        let mut w = world_from(&[
            "######",
            "#Pob #",
            "#    #",
            "######",
        ]);
        let before = w.grid.clone();
        let events = mv(&mut w, MoveDir::Right); // stone, box beyond
        assert_eq!(w.grid, before);
        assert_eq!(events, vec![GameEvent::MoveBlocked { dir: MoveDir::Right }]);

        mv(&mut w, MoveDir::Left); // wall
        mv(&mut w, MoveDir::Up);   // wall
        assert_eq!(w.grid, before);
        assert_eq!(w.player, Player::new(1, 1));
    }

    #[test]
    fn push_moves_object_two_cells_and_player_one() {
        // player (1,1), stone (2,1), empty (3,1), support under the stone.
        let mut w = world_from(&[
            "######",
            "#Po  #",
            "#....#",
            "######",
        ]);
        let events = mv(&mut w, MoveDir::Right);
        assert_eq!(w.grid.get(3, 1), Some(Tile::Stone));
        assert_eq!(w.player, Player::new(2, 1));
        assert_eq!(w.grid.get(2, 1), Some(Tile::Player));
        assert_eq!(w.grid.get(1, 1), Some(Tile::Empty));
        assert_eq!(w.grid.count(Tile::Stone), 1);
        assert!(events.contains(&GameEvent::ObjectPushed { kind: Tile::Stone, x: 3, y: 1 }));
    }

    #[test]
    fn push_box_left() {
        let mut w = world_from(&[
            "######",
            "# bP #",
            "######",
        ]);
        mv(&mut w, MoveDir::Left);
        assert_eq!(w.grid.get(1, 1), Some(Tile::Box));
        assert_eq!(w.player, Player::new(2, 1));
        assert_eq!(w.grid.get(3, 1), Some(Tile::Empty));
    }

    #[test]
    fn key1_opens_every_lock1() {
        let mut w = world_from(&[
            "#######",
            "#PkK K#",
            "#K J  #",
            "#######",
        ]);
        let events = mv(&mut w, MoveDir::Right);
        assert_eq!(w.grid.count(Tile::Lock1), 0);
        assert_eq!(w.grid.count(Tile::Lock2), 1);
        assert_eq!(w.player, Player::new(2, 1));
        assert!(w.player_in_sync());
        assert!(events.contains(&GameEvent::LocksOpened { lock: Tile::Lock1, count: 3 }));
    }

    #[test]
    fn key2_vertical_pickup() {
        let mut w = world_from(&[
            "#####",
            "#jJK#",
            "#P  #",
            "#####",
        ]);
        mv(&mut w, MoveDir::Up);
        assert_eq!(w.player, Player::new(1, 1));
        assert_eq!(w.grid.count(Tile::Lock2), 0);
        assert_eq!(w.grid.count(Tile::Lock1), 1);
    }

    // ── Whole ticks ──

    #[test]
    fn newest_input_is_applied_first() {
        // Right-then-Down queued: Down runs first (into the flux below),
        // then Right from the new position.
        let mut w = world_from(&[
            "#####",
            "#P###",
            "#.. #",
            "#####",
        ]);
        let mut q = InputQueue::new();
        q.push(MoveDir::Right);
        q.push(MoveDir::Down);
        step(&mut w, &mut q);
        assert!(q.is_empty());
        assert_eq!(w.player, Player::new(2, 2));

        // Same inputs in arrival order would have hit the wall first.
        let mut w = world_from(&[
            "#####",
            "#P###",
            "#.. #",
            "#####",
        ]);
        let mut events = Vec::new();
        attempt_move(&mut w, MoveDir::Right, &mut events);
        attempt_move(&mut w, MoveDir::Down, &mut events);
        assert_eq!(w.player, Player::new(1, 2));
    }

    #[test]
    fn tick_runs_movement_before_gravity() {
        // Stepping out from under a stone drops it in the same tick.
        let mut w = world_from(&[
            "####",
            "#o #",
            "#P #",
            "#. #",
            "####",
        ]);
        let mut q = InputQueue::new();
        q.push(MoveDir::Right);
        let events = step(&mut w, &mut q);
        assert_eq!(w.player, Player::new(2, 2));
        assert_eq!(w.grid.get(1, 2), Some(Tile::FallingStone));
        assert_eq!(w.grid.get(1, 1), Some(Tile::Empty));
        assert!(events.contains(&GameEvent::ObjectStartedFalling { kind: Tile::FallingStone, x: 1, y: 2 }));

        let events = step(&mut w, &mut q);
        assert_eq!(w.grid.get(1, 2), Some(Tile::Stone));
        assert!(events.contains(&GameEvent::ObjectLanded { kind: Tile::Stone, x: 1, y: 2 }));
        assert_eq!(w.tick, 2);
    }

    #[test]
    fn pushed_off_ledge_falls() {
        let mut w = world_from(&[
            "#####",
            "#Pb #",
            "#.. #",
            "#.. #",
            "#####",
        ]);
        let mut q = InputQueue::new();
        q.push(MoveDir::Right);
        step(&mut w, &mut q);
        // Box pushed to (3,1) and immediately starts falling into (3,2).
        assert_eq!(w.grid.get(3, 2), Some(Tile::FallingBox));
        step(&mut w, &mut q);
        assert_eq!(w.grid.get(3, 3), Some(Tile::FallingBox));
        step(&mut w, &mut q);
        assert_eq!(w.grid.get(3, 3), Some(Tile::Box));
        assert!(w.player_in_sync());
    }

    #[test]
    fn embedded_level_opening_moves() {
        let mut w = WorldState::new(Level::embedded().expect("embedded"));
        let mut q = InputQueue::new();

        // Stone under the player rests on the key; nothing falls yet.
        let before = w.grid.clone();
        step(&mut w, &mut q);
        assert_eq!(w.grid, before);

        // Step right into the empty cell.
        q.push(MoveDir::Right);
        step(&mut w, &mut q);
        assert_eq!(w.player, Player::new(2, 1));
        assert!(w.player_in_sync());
    }
}
