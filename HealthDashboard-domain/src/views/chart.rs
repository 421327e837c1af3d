use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use tracing::debug;

/// What a chart component currently shows
#[derive(Debug, Clone, PartialEq)]
pub enum ChartState<T> {
    Loading,
    /// Fetch succeeded but there is nothing to plot
    Empty(String),
    /// Fetch failed
    Error(String),
    Ready(T),
}

impl<T> ChartState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ChartState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            ChartState::Ready(view) => Some(view),
            _ => None,
        }
    }
}

/// Handle for one fetch issued by a [`ChartPanel`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

/// Holds a chart's state and discards results of superseded fetches.
///
/// Every [`begin`](Self::begin) moves the panel to `Loading` and bumps the
/// generation; [`settle`](Self::settle) only applies a result whose ticket
/// carries the latest generation.
#[derive(Debug)]
pub struct ChartPanel<T> {
    generation: AtomicU64,
    state: Mutex<ChartState<T>>,
}

impl<T> Default for ChartPanel<T> {
    fn default() -> Self {
        Self {
            generation: AtomicU64::new(0),
            state: Mutex::new(ChartState::Loading),
        }
    }
}

impl<T: Clone> ChartPanel<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new fetch, superseding any in flight
    pub fn begin(&self) -> FetchTicket {
        let mut state = self.lock_state();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        *state = ChartState::Loading;
        FetchTicket { generation }
    }

    /// Apply `outcome` if `ticket` is still current. Returns whether it was applied.
    pub fn settle(&self, ticket: FetchTicket, outcome: ChartState<T>) -> bool {
        let mut state = self.lock_state();
        let current = self.generation.load(Ordering::SeqCst);
        if ticket.generation != current {
            debug!(
                "Discarding stale chart result (generation {}, current {})",
                ticket.generation, current
            );
            return false;
        }
        *state = outcome;
        true
    }

    pub fn state(&self) -> ChartState<T> {
        self.lock_state().clone()
    }

    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    fn lock_state(&self) -> MutexGuard<'_, ChartState<T>> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_panel_is_loading() {
        let panel: ChartPanel<u32> = ChartPanel::new();
        assert!(panel.state().is_loading());
        assert_eq!(panel.current_generation(), 0);
    }

    #[test]
    fn test_settle_current_ticket() {
        let panel = ChartPanel::new();
        let ticket = panel.begin();

        assert!(panel.settle(ticket, ChartState::Ready(7)));
        assert_eq!(panel.state(), ChartState::Ready(7));
        assert_eq!(panel.state().ready(), Some(&7));
    }

    #[test]
    fn test_stale_result_is_discarded() {
        let panel = ChartPanel::new();
        let slow = panel.begin();
        let fast = panel.begin();

        assert!(panel.settle(fast, ChartState::Ready("week")));
        assert!(!panel.settle(slow, ChartState::Ready("day")));
        assert_eq!(panel.state(), ChartState::Ready("week"));
    }

    #[test]
    fn test_stale_result_does_not_end_loading() {
        let panel: ChartPanel<u32> = ChartPanel::new();
        let first = panel.begin();
        let _second = panel.begin();

        assert!(!panel.settle(first, ChartState::Error("timeout".to_string())));
        assert!(panel.state().is_loading());
    }

    #[test]
    fn test_begin_reenters_loading() {
        let panel: ChartPanel<u32> = ChartPanel::new();
        let ticket = panel.begin();
        panel.settle(ticket, ChartState::Empty("nothing".to_string()));

        panel.begin();
        assert!(panel.state().is_loading());
        assert_eq!(panel.current_generation(), 2);
    }
}
