use crate::{ApiError, Config, WeatherSnapshot, provider::openweather::OpenWeatherClient};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod openweather;

/// Source of current conditions for a place name.
///
/// Implementations own transport concerns (timeouts, retries); the view
/// issues exactly one call per lookup and never cancels it.
#[async_trait]
pub trait WeatherApiClient: Send + Sync + Debug {
    async fn fetch_current_conditions(&self, place: &str) -> Result<WeatherSnapshot, ApiError>;
}

#[async_trait]
impl<T: WeatherApiClient + ?Sized> WeatherApiClient for Arc<T> {
    async fn fetch_current_conditions(&self, place: &str) -> Result<WeatherSnapshot, ApiError> {
        (**self).fetch_current_conditions(place).await
    }
}

/// Construct the OpenWeather client from the credential in `config`.
pub fn client_from_config(config: &Config) -> anyhow::Result<OpenWeatherClient> {
    let api_key = config.api_key()?;
    Ok(OpenWeatherClient::new(api_key.to_owned()))
}
