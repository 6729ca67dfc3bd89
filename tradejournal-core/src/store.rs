//! Filter state store — holds the current `FilterState` and its observers.
//!
//! The store hands out the state by shared reference only. Writes come from
//! the selection controller through `commit`, which swaps the whole state
//! and then notifies each observer once.

use crate::state::FilterState;

/// Receives every committed state transition.
pub trait FilterObserver {
    fn state_changed(&mut self, state: &FilterState);
}

impl<F> FilterObserver for F
where
    F: FnMut(&FilterState),
{
    fn state_changed(&mut self, state: &FilterState) {
        self(state)
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u64);

/// Single-owner value holder with an observer list.
pub struct FilterStore {
    state: FilterState,
    observers: Vec<(ObserverId, Box<dyn FilterObserver>)>,
    next_observer: u64,
    revision: u64,
}

impl FilterStore {
    pub fn new(state: FilterState) -> Self {
        Self {
            state,
            observers: Vec::new(),
            next_observer: 0,
            revision: 0,
        }
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// Number of committed transitions since construction.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn subscribe(&mut self, observer: impl FilterObserver + 'static) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(oid, _)| *oid != id);
        self.observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Replace the state and notify every observer exactly once.
    pub(crate) fn commit(&mut self, state: FilterState) {
        self.state = state;
        self.revision += 1;
        for (_, observer) in &mut self.observers {
            observer.state_changed(&self.state);
        }
    }
}

impl std::fmt::Debug for FilterStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterStore")
            .field("state", &self.state)
            .field("observers", &self.observers.len())
            .field("revision", &self.revision)
            .finish()
    }
}
