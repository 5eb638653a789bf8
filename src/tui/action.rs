// File: src/tui/action.rs
/// Requests from the key handler that the event loop must carry out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Refresh,
    Quit,
}
