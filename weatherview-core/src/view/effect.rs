//! Effects - side effects declared by the reducer
//!
//! The reducer never spawns or sleeps; it returns these and the runtime
//! carries them out.

use super::action::RequestId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Look up current conditions for `place`. Never cancelled.
    FetchConditions { request: RequestId, place: String },

    /// (Re)start the shake timer; supersedes any running one.
    StartShakeTimer { generation: u64 },

    /// (Re)start the error auto-clear timer; supersedes any running one.
    StartErrorTimer { generation: u64 },
}

/// Result of reducing one action: whether state changed, plus effects to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResult<E> {
    pub changed: bool,
    pub effects: Vec<E>,
}

impl<E> Default for DispatchResult<E> {
    fn default() -> Self {
        Self::unchanged()
    }
}

impl<E> DispatchResult<E> {
    #[inline]
    pub fn unchanged() -> Self {
        Self { changed: false, effects: vec![] }
    }

    #[inline]
    pub fn changed() -> Self {
        Self { changed: true, effects: vec![] }
    }

    #[inline]
    pub fn changed_with(effect: E) -> Self {
        Self { changed: true, effects: vec![effect] }
    }

    pub fn has_effects(&self) -> bool {
        !self.effects.is_empty()
    }
}
