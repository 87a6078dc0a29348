//! Core library for the `weatherview` terminal client.
//!
//! This crate defines:
//! - Configuration & credential handling
//! - The current-conditions client abstraction and its OpenWeather implementation
//! - Shared domain models (snapshots, condition categories, lookup errors)
//! - The WeatherView request/state lifecycle: reducer, effects, scoped timers,
//!   runtime and the pure render derivation
//!
//! It is used by `weatherview-cli`, but the view runtime only needs a
//! [`WeatherApiClient`], so any front end (or a fake in tests) can drive it.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod view;

pub use config::{Config, ResponseOrdering, Timings};
pub use error::ApiError;
pub use model::{Condition, WeatherSnapshot};
pub use provider::{WeatherApiClient, client_from_config, openweather::OpenWeatherClient};
pub use view::{Action, FetchState, Screen, ViewState, WeatherView};
