use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{ApiError, Condition, WeatherSnapshot};

use super::WeatherApiClient;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Point the client at another host serving the same `/data/2.5/weather` route.
    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    async fn fetch_current(&self, place: &str) -> Result<WeatherSnapshot, ApiError> {
        let url = format!("{}/data/2.5/weather", self.base_url);
        debug!(place, "requesting current conditions");

        let res = self
            .http
            .get(&url)
            .query(&[("q", place), ("units", "metric"), ("appid", self.api_key.as_str())])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            let message = error_message(&body).unwrap_or_else(|| {
                format!("request failed with status {}: {}", status, truncate_body(&body))
            });
            warn!(place, status = status.as_u16(), %message, "current conditions lookup failed");
            return Err(ApiError::Lookup { status: status.as_u16(), message });
        }

        let parsed: OwCurrentResponse =
            serde_json::from_str(&body).map_err(|e| ApiError::Malformed(e.to_string()))?;

        let weather = parsed
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::Malformed("response contained no weather entry".into()))?;

        Ok(WeatherSnapshot {
            place: parsed.name,
            country: parsed.sys.country,
            condition: Condition::from_tag(&weather.main),
            description: weather.description,
            temperature_c: parsed.main.temp,
            feels_like_c: parsed.main.feels_like,
            humidity_pct: parsed.main.humidity,
            wind_speed_mps: parsed.wind.speed,
            visibility_m: parsed.visibility,
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    sys: OwSys,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    #[serde(default)]
    visibility: Option<u32>,
}

/// Error payload, e.g. `{"cod":"404","message":"city not found"}`.
#[derive(Debug, Deserialize)]
struct OwError {
    message: Option<String>,
}

#[async_trait]
impl WeatherApiClient for OpenWeatherClient {
    async fn fetch_current_conditions(&self, place: &str) -> Result<WeatherSnapshot, ApiError> {
        self.fetch_current(place).await
    }
}

fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<OwError>(body)
        .ok()
        .and_then(|e| e.message)
        .filter(|m| !m.is_empty())
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn bucharest_body() -> serde_json::Value {
        serde_json::json!({
            "weather": [{ "id": 800, "main": "Clear", "description": "clear sky", "icon": "01d" }],
            "main": { "temp": 22.4, "feels_like": 21.9, "humidity": 40, "pressure": 1015 },
            "visibility": 10000,
            "wind": { "speed": 3.2, "deg": 90 },
            "sys": { "country": "RO" },
            "name": "Bucharest",
            "cod": 200
        })
    }

    #[tokio::test]
    async fn parses_current_conditions() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("q", "Bucharest"))
            .and(query_param("units", "metric"))
            .and(query_param("appid", "KEY"))
            .respond_with(ResponseTemplate::new(200).set_body_json(bucharest_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = OpenWeatherClient::with_base_url("KEY".into(), server.uri());
        let snap = client.fetch_current_conditions("Bucharest").await.unwrap();

        assert_eq!(snap.place, "Bucharest");
        assert_eq!(snap.country, "RO");
        assert_eq!(snap.condition, Condition::Clear);
        assert_eq!(snap.description, "clear sky");
        assert_eq!(snap.temperature_c, 22.4);
        assert_eq!(snap.feels_like_c, 21.9);
        assert_eq!(snap.humidity_pct, 40);
        assert_eq!(snap.wind_speed_mps, 3.2);
        assert_eq!(snap.visibility_m, Some(10000));
    }

    #[tokio::test]
    async fn missing_visibility_still_parses() {
        let mut body = bucharest_body();
        body.as_object_mut().unwrap().remove("visibility");

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let client = OpenWeatherClient::with_base_url("KEY".into(), server.uri());
        let snap = client.fetch_current_conditions("Bucharest").await.unwrap();

        assert_eq!(snap.place, "Bucharest");
        assert_eq!(snap.visibility_m, None);
    }

    #[tokio::test]
    async fn not_found_surfaces_provider_message() {
        let body = serde_json::json!({ "cod": "404", "message": "city not found" });
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(404).set_body_json(body))
            .mount(&server)
            .await;

        let client = OpenWeatherClient::with_base_url("KEY".into(), server.uri());
        let err = client.fetch_current_conditions("Nowhereistan").await.unwrap_err();

        assert_eq!(err, ApiError::Lookup { status: 404, message: "city not found".into() });
        assert_eq!(err.message(), "city not found");
    }

    #[tokio::test]
    async fn unexpected_error_payload_falls_back_to_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
            .mount(&server)
            .await;

        let client = OpenWeatherClient::with_base_url("KEY".into(), server.uri());
        let err = client.fetch_current_conditions("Bucharest").await.unwrap_err();

        let msg = err.message();
        assert!(msg.contains("502"), "{msg}");
        assert!(msg.contains("bad gateway"), "{msg}");
    }

    #[tokio::test]
    async fn malformed_success_body_is_an_error() {
        let server = MockServer::start().await;
        let body = serde_json::json!({ "name": "X" });
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let client = OpenWeatherClient::with_base_url("KEY".into(), server.uri());
        let err = client.fetch_current_conditions("X").await.unwrap_err();

        assert!(matches!(err, ApiError::Malformed(_)));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_transport_error() {
        let client = OpenWeatherClient::with_base_url("KEY".into(), "http://127.0.0.1:1");
        let err = client.fetch_current_conditions("Bucharest").await.unwrap_err();

        assert!(matches!(err, ApiError::Transport(_)));
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "ă".repeat(300);
        let out = truncate_body(&long);
        assert!(out.ends_with("..."));
        assert_eq!(out.chars().count(), 203);
    }
}
