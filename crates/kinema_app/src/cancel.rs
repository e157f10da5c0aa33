//! Cooperative early termination.

use std::cell::Cell;
use std::rc::Rc;

/// Shared flag asking the player to stop after the current tick.
///
/// Clones share one flag, so an updater or an update closure can hold a
/// clone and end the scene from inside a frame.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Rc<Cell<bool>>,
}

impl CancellationToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    #[inline]
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }

    /// Clears the flag so the player can be reused.
    pub fn reset(&self) {
        self.cancelled.set(false);
    }
}
