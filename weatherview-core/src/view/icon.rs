use crate::Condition;

/// Icon shown next to the place name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    Cloudy,
    Haze,
    Rainy,
    Sunny,
    Drizzle,
    Snow,
    Thunderstorm,
}

impl Icon {
    /// Icon for a condition category. Unrecognised categories get no icon.
    pub fn for_condition(condition: &Condition) -> Option<Icon> {
        match condition {
            Condition::Clouds => Some(Icon::Cloudy),
            Condition::Haze => Some(Icon::Haze),
            Condition::Rain => Some(Icon::Rainy),
            Condition::Clear => Some(Icon::Sunny),
            Condition::Drizzle => Some(Icon::Drizzle),
            Condition::Snow => Some(Icon::Snow),
            Condition::Thunderstorm => Some(Icon::Thunderstorm),
            Condition::Other(_) => None,
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::Cloudy => "☁",
            Icon::Haze => "🌫",
            Icon::Rainy => "🌧",
            Icon::Sunny => "☀",
            Icon::Drizzle => "🌦",
            Icon::Snow => "❄",
            Icon::Thunderstorm => "⛈",
        }
    }

    /// Accent colour as RGB, for icons that have one.
    pub fn accent(&self) -> Option<(u8, u8, u8)> {
        match self {
            Icon::Rainy | Icon::Drizzle | Icon::Snow => Some((0x31, 0xca, 0xfb)),
            Icon::Sunny => Some((0xff, 0xde, 0x33)),
            Icon::Cloudy | Icon::Haze | Icon::Thunderstorm => None,
        }
    }
}
