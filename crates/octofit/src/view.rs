//! Per-view loading state

use crate::error::Result;

/// State of one mounted view.
///
/// Starts in `Loading` and resolves exactly once, to `Loaded` or `Failed`.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Loaded(Vec<T>),
    Failed(String),
}

/// What a renderer should draw for a [`ViewState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Progress indicator
    Loading,
    /// Error alert carrying the failure message
    Error,
    /// Empty-state notice
    Empty,
    /// One row or card per item
    Ready,
}

impl<T> ViewState<T> {
    pub fn new() -> Self {
        ViewState::Loading
    }

    /// Apply the outcome of the view's fetch.
    ///
    /// Returns `false` and leaves the state untouched if the view already
    /// resolved.
    pub fn resolve(&mut self, result: Result<Vec<T>>) -> bool {
        if !self.is_loading() {
            return false;
        }
        *self = match result {
            Ok(items) => ViewState::Loaded(items),
            Err(e) => ViewState::Failed(e.to_string()),
        };
        true
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    /// Loaded items; empty while loading or after a failure
    pub fn items(&self) -> &[T] {
        match self {
            ViewState::Loaded(items) => items,
            _ => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn phase(&self) -> Phase {
        match self {
            ViewState::Loading => Phase::Loading,
            ViewState::Failed(_) => Phase::Error,
            ViewState::Loaded(items) if items.is_empty() => Phase::Empty,
            ViewState::Loaded(_) => Phase::Ready,
        }
    }
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OctofitError;

    #[test]
    fn starts_loading() {
        let state: ViewState<u32> = ViewState::new();
        assert!(state.is_loading());
        assert_eq!(state.phase(), Phase::Loading);
        assert!(state.items().is_empty());
        assert!(state.error().is_none());
    }

    #[test]
    fn resolves_to_loaded() {
        let mut state = ViewState::new();
        assert!(state.resolve(Ok(vec![1, 2, 3])));
        assert_eq!(state.phase(), Phase::Ready);
        assert_eq!(state.items(), &[1, 2, 3]);
    }

    #[test]
    fn empty_collection_is_empty_phase() {
        let mut state: ViewState<u32> = ViewState::new();
        state.resolve(Ok(Vec::new()));
        assert_eq!(state.phase(), Phase::Empty);
        assert!(state.items().is_empty());
    }

    #[test]
    fn failure_carries_message() {
        let mut state: ViewState<u32> = ViewState::new();
        state.resolve(Err(OctofitError::Fetch("HTTP error! status: 500".to_string())));
        assert_eq!(state.phase(), Phase::Error);
        assert_eq!(state.error(), Some("HTTP error! status: 500"));
        assert!(state.items().is_empty());
    }

    #[test]
    fn resolves_only_once() {
        let mut state = ViewState::new();
        assert!(state.resolve(Ok(vec![1])));
        assert!(!state.resolve(Err(OctofitError::Fetch("late".to_string()))));
        assert_eq!(state.items(), &[1]);
    }
}
