//! Async load state management
//!
//! Tracks the lifecycle of a value loaded by a background task: loading,
//! loaded, or failed. Each load is identified by a [`LoadTicket`] so that a
//! result arriving for a superseded load is discarded.

use serde::Serialize;

/// Phase of an async load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum LoadPhase {
    /// A load is in flight, or none has completed yet
    #[default]
    Loading,
    /// The last load succeeded
    Loaded,
    /// The last load failed
    LoadError,
}

/// Identifies one load request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LoadTicket(u64);

/// Shared state for an async-loaded value
///
/// # Examples
///
/// ```
/// use product_viewer_core::async_state::{AsyncState, LoadPhase};
///
/// let mut state: AsyncState<Vec<String>> = AsyncState::new();
/// assert_eq!(state.phase(), LoadPhase::Loading);
///
/// let ticket = state.begin().unwrap();
/// assert!(state.begin().is_none()); // one load at a time
///
/// assert!(state.finish(ticket, Ok(vec!["item1".to_string()])));
/// assert_eq!(state.phase(), LoadPhase::Loaded);
/// assert_eq!(state.data().map(|d| d.len()), Some(1));
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct AsyncState<T> {
    /// The loaded data (None until a load succeeds, cleared on failure)
    data: Option<T>,
    /// Current phase
    phase: LoadPhase,
    /// Error message if the last load failed
    error: Option<String>,
    /// Sequence number of the most recent load
    generation: u64,
    /// Whether the most recent load is still running
    in_flight: bool,
}

impl<T> Default for AsyncState<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> AsyncState<T> {
    /// Create a new state in the initial loading phase
    pub fn new() -> Self {
        Self {
            data: None,
            phase: LoadPhase::Loading,
            error: None,
            generation: 0,
            in_flight: false,
        }
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    pub fn is_loaded(&self) -> bool {
        self.phase == LoadPhase::Loaded
    }

    /// Check whether a load has been started and not yet finished
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Get the error message if any
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Start a load
    ///
    /// Returns `None` if a load is already in flight.
    pub fn begin(&mut self) -> Option<LoadTicket> {
        if self.in_flight {
            return None;
        }
        self.generation += 1;
        self.in_flight = true;
        self.phase = LoadPhase::Loading;
        Some(LoadTicket(self.generation))
    }

    /// Complete the load identified by `ticket`
    ///
    /// Success replaces the data wholesale; failure drops it. Returns false,
    /// leaving the state untouched, when the ticket is not the current load.
    pub fn finish(&mut self, ticket: LoadTicket, result: Result<T, String>) -> bool {
        if !self.in_flight || ticket.0 != self.generation {
            return false;
        }
        self.in_flight = false;

        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
                self.phase = LoadPhase::Loaded;
            }
            Err(error) => {
                self.data = None;
                self.error = Some(error);
                self.phase = LoadPhase::LoadError;
            }
        }
        true
    }
}

/// Extension trait for displaying an AsyncState in UI components
pub trait AsyncStateExt<T> {
    /// Get display status text
    fn status_text(&self) -> &'static str;
}

impl<T> AsyncStateExt<T> for AsyncState<T> {
    fn status_text(&self) -> &'static str {
        match self.phase {
            LoadPhase::Loading if self.data.is_none() => "Loading...",
            LoadPhase::Loading => "Refreshing...",
            LoadPhase::LoadError => "Error",
            LoadPhase::Loaded => "Ready",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state: AsyncState<String> = AsyncState::new();
        assert!(state.is_loading());
        assert!(!state.is_in_flight());
        assert!(!state.has_error());
        assert!(state.data().is_none());
    }

    #[test]
    fn test_finish_success() {
        let mut state: AsyncState<i32> = AsyncState::new();
        let ticket = state.begin().unwrap();
        assert!(state.finish(ticket, Ok(42)));

        assert!(state.is_loaded());
        assert!(!state.is_in_flight());
        assert_eq!(state.data(), Some(&42));
    }

    #[test]
    fn test_finish_error_drops_data() {
        let mut state: AsyncState<i32> = AsyncState::new();
        let ticket = state.begin().unwrap();
        state.finish(ticket, Ok(1));

        let ticket = state.begin().unwrap();
        assert!(state.finish(ticket, Err("Connection failed".to_string())));

        assert_eq!(state.phase(), LoadPhase::LoadError);
        assert_eq!(state.error(), Some("Connection failed"));
        assert!(state.data().is_none());
    }

    #[test]
    fn test_one_load_at_a_time() {
        let mut state: AsyncState<i32> = AsyncState::new();
        let ticket = state.begin().unwrap();
        assert!(state.begin().is_none());

        state.finish(ticket, Ok(1));
        assert!(state.begin().is_some());
    }

    #[test]
    fn test_stale_ticket_is_discarded() {
        let mut state: AsyncState<i32> = AsyncState::new();
        let first = state.begin().unwrap();
        state.finish(first, Ok(1));

        let second = state.begin().unwrap();
        assert!(!state.finish(first, Ok(99)));
        assert!(state.is_in_flight());

        assert!(state.finish(second, Ok(2)));
        assert_eq!(state.data(), Some(&2));

        // A finished ticket cannot be replayed
        assert!(!state.finish(second, Ok(3)));
        assert_eq!(state.data(), Some(&2));
    }

    #[test]
    fn test_status_text() {
        let mut state: AsyncState<i32> = AsyncState::new();
        assert_eq!(state.status_text(), "Loading...");

        let ticket = state.begin().unwrap();
        state.finish(ticket, Ok(42));
        assert_eq!(state.status_text(), "Ready");

        state.begin();
        assert_eq!(state.status_text(), "Refreshing...");
    }
}
