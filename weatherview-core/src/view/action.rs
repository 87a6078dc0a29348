//! Actions: everything that can change a [`ViewState`](super::ViewState).
//!
//! Naming follows intent vs. result: `Query*` come from the user, `*Did*`
//! come back from a fetch task or a timer.

use crate::{ApiError, WeatherSnapshot};

/// Sequence number of an issued fetch, starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Replace the pending input text. No validation.
    QueryInput(String),

    /// Commit the pending input as the new query, or shake if it is empty.
    QuerySubmit,

    /// Issue a fetch for the current query. Dispatched once at startup;
    /// `QuerySubmit` performs the same step after assigning the query.
    QueryReconcile,

    /// A fetch succeeded and its reveal delay elapsed.
    WeatherDidLoad { request: RequestId, snapshot: WeatherSnapshot },

    /// A fetch failed.
    WeatherDidError { request: RequestId, error: ApiError },

    ShakeDidExpire(u64),

    ErrorDidExpire(u64),
}

impl Action {
    /// Short form for log lines; avoids dumping whole snapshots.
    pub fn summary(&self) -> String {
        match self {
            Action::QueryInput(text) => format!("QueryInput({} chars)", text.chars().count()),
            Action::WeatherDidLoad { request, snapshot } => {
                format!(
                    "WeatherDidLoad {{ {request}, {}: {:.1}°C }}",
                    snapshot.place, snapshot.temperature_c
                )
            }
            Action::WeatherDidError { request, error } => {
                format!("WeatherDidError {{ {request}, {:?} }}", error.message())
            }
            _ => format!("{self:?}"),
        }
    }
}
