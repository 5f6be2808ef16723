/// Keyboard input collector.
///
/// Drains every pending crossterm event once per frame without blocking.
/// Movement keys are mapped through `keymap` and appended to the
/// `InputQueue` in arrival order; meta keys (quit / restart) are reported
/// back to the frame driver as flags. Key releases are ignored, so only
/// presses and auto-repeats produce moves.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, poll};

use crate::sim::input_queue::InputQueue;
use super::keymap;

const KEYS_QUIT: &[KeyCode] = &[KeyCode::Esc, KeyCode::Char('q'), KeyCode::Char('Q')];
const KEYS_RESTART: &[KeyCode] = &[KeyCode::Char('r'), KeyCode::Char('R')];

/// Non-movement requests seen during one drain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MetaInput {
    pub quit: bool,
    pub restart: bool,
}

impl MetaInput {
    pub fn merge(&mut self, other: MetaInput) {
        self.quit |= other.quit;
        self.restart |= other.restart;
    }
}

pub struct InputState {
    /// Raw key events collected during the last drain.
    pub raw_events: Vec<KeyEvent>,
}

impl InputState {
    pub fn new() -> Self {
        InputState {
            raw_events: Vec::with_capacity(8),
        }
    }

    /// Drain all pending terminal events into `queue`.
    /// Call this once per frame, before the simulation tick.
    pub fn drain_events(&mut self, queue: &mut InputQueue) -> std::io::Result<MetaInput> {
        self.raw_events.clear();

        while poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Release {
                    self.raw_events.push(key);
                }
            }
        }

        Ok(apply_keys(&self.raw_events, queue))
    }
}

/// Route already-read key events: directions into the queue, the rest
/// into `MetaInput`. Unmapped keys are dropped.
pub fn apply_keys(keys: &[KeyEvent], queue: &mut InputQueue) -> MetaInput {
    let mut meta = MetaInput::default();
    for key in keys {
        if is_ctrl_c(key) || KEYS_QUIT.contains(&key.code) {
            meta.quit = true;
        } else if KEYS_RESTART.contains(&key.code) {
            meta.restart = true;
        } else if let Some(dir) = keymap::map_crossterm(key.code) {
            queue.push(dir);
        }
    }
    meta
}

fn is_ctrl_c(k: &KeyEvent) -> bool {
    k.modifiers.contains(KeyModifiers::CONTROL)
        && (k.code == KeyCode::Char('c') || k.code == KeyCode::Char('C'))
}
