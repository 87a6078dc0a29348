//! WeatherView: the query → fetch → display lifecycle.
//!
//! The shape follows a reducer/effect split:
//! 1. Inputs (keys, fetch completions, timer expiries) arrive as [`Action`]s
//! 2. [`reducer`] mutates [`ViewState`] and returns declarative [`Effect`]s
//! 3. [`WeatherView`] executes effects: spawns fetches, restarts scoped timers
//! 4. [`render`] derives a [`Screen`] from the state, with no side effects

pub mod action;
pub mod effect;
pub mod icon;
pub mod reducer;
pub mod render;
pub mod runtime;
pub mod state;
pub mod timer;

pub use action::{Action, RequestId};
pub use effect::{DispatchResult, Effect};
pub use icon::Icon;
pub use reducer::reducer;
pub use render::{Card, ConditionsCard, MainScreen, Screen, render};
pub use runtime::WeatherView;
pub use state::{ErrorInfo, FetchState, ViewState};
pub use timer::ScopedTimer;
