/// Pending directional inputs collected between ticks.
///
/// Appended in arrival order, drained from the back: the most recently
/// pressed direction is resolved first. Input backends only ever push;
/// `step` is the only consumer.

use crate::domain::entity::MoveDir;

#[derive(Clone, Debug, Default)]
pub struct InputQueue {
    pending: Vec<MoveDir>,
}

impl InputQueue {
    pub fn new() -> Self {
        InputQueue { pending: Vec::with_capacity(8) }
    }

    pub fn push(&mut self, dir: MoveDir) {
        self.pending.push(dir);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove and return the newest input.
    pub fn pop_latest(&mut self) -> Option<MoveDir> {
        self.pending.pop()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
