use serde::{Deserialize, Serialize};

/// Primary condition category reported by the provider (`weather[0].main`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    Clear,
    Clouds,
    Haze,
    Rain,
    Drizzle,
    Snow,
    Thunderstorm,
    /// Any tag outside the known set, kept verbatim.
    Other(String),
}

impl Condition {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "Clear" => Condition::Clear,
            "Clouds" => Condition::Clouds,
            "Haze" => Condition::Haze,
            "Rain" => Condition::Rain,
            "Drizzle" => Condition::Drizzle,
            "Snow" => Condition::Snow,
            "Thunderstorm" => Condition::Thunderstorm,
            other => Condition::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Condition::Clear => "Clear",
            Condition::Clouds => "Clouds",
            Condition::Haze => "Haze",
            Condition::Rain => "Rain",
            Condition::Drizzle => "Drizzle",
            Condition::Snow => "Snow",
            Condition::Thunderstorm => "Thunderstorm",
            Condition::Other(tag) => tag.as_str(),
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current conditions for one completed request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub place: String,
    pub country: String,
    pub condition: Condition,
    pub description: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    /// Absent from some provider responses.
    pub visibility_m: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tags_parse_to_categories() {
        assert_eq!(Condition::from_tag("Clear"), Condition::Clear);
        assert_eq!(Condition::from_tag("Thunderstorm"), Condition::Thunderstorm);
        assert_eq!(Condition::from_tag("Clouds").to_string(), "Clouds");
    }

    #[test]
    fn unknown_tag_is_kept_as_other() {
        let c = Condition::from_tag("Mist");
        assert_eq!(c, Condition::Other("Mist".into()));
        assert_eq!(c.as_str(), "Mist");
    }
}
