//! View state - single source of truth for rendering.
//!
//! Only the reducer mutates it; everything else reads.

use crate::{ApiError, ResponseOrdering, WeatherSnapshot};

use super::action::RequestId;

/// A lookup failure as shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorInfo {
    pub message: String,
    pub source: ApiError,
}

impl From<ApiError> for ErrorInfo {
    fn from(source: ApiError) -> Self {
        Self { message: source.message(), source }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum FetchState {
    /// Nothing requested yet.
    #[default]
    Idle,
    Loading,
    Loaded(WeatherSnapshot),
    Failed(ErrorInfo),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    /// Place currently looked up.
    pub query: String,

    /// Pending input text, committed on submit.
    pub input: String,

    pub fetch: FetchState,

    /// Most recent snapshot that reached `Loaded`. Kept through later
    /// `Loading`/`Failed` states so the card can keep showing it.
    pub last_loaded: Option<WeatherSnapshot>,

    /// Whether any request has completed (either way).
    pub settled: bool,

    /// Error banner. Independent of `fetch`.
    pub error: Option<ErrorInfo>,
    pub error_generation: u64,

    /// `Some(generation)` while the shake signal is active.
    pub shake: Option<u64>,
    pub shake_generation: u64,

    /// Number of fetches issued so far; the newest is `RequestId(issued)`.
    pub issued: u64,

    /// Request whose completion is currently reflected in `fetch`.
    pub applied: Option<RequestId>,

    pub ordering: ResponseOrdering,
}

impl ViewState {
    pub fn new(query: impl Into<String>, ordering: ResponseOrdering) -> Self {
        Self {
            query: query.into(),
            input: String::new(),
            fetch: FetchState::Idle,
            last_loaded: None,
            settled: false,
            error: None,
            error_generation: 0,
            shake: None,
            shake_generation: 0,
            issued: 0,
            applied: None,
            ordering,
        }
    }

    pub fn latest_request(&self) -> Option<RequestId> {
        (self.issued > 0).then_some(RequestId(self.issued))
    }

    pub fn is_shaking(&self) -> bool {
        self.shake.is_some()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.message.as_str())
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_PLACE, ResponseOrdering::default())
    }
}
