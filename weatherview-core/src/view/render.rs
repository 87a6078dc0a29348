//! Pure derivation of what to show from a [`ViewState`].
//!
//! The calendar date is passed in rather than read from a clock so the
//! derivation stays deterministic.

use chrono::{Datelike, NaiveDate};

use crate::WeatherSnapshot;

use super::icon::Icon;
use super::state::{FetchState, ViewState};

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    /// Full-screen loader: no request has completed yet.
    Splash,
    Main(MainScreen),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MainScreen {
    /// Error message overlay, whatever the card shows.
    pub banner: Option<String>,
    pub shaking: bool,
    pub input: String,
    pub card: Card,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Card {
    Spinner,
    Conditions(ConditionsCard),
    /// The last request failed and nothing was ever loaded.
    Unavailable,
}

/// Display-ready fields of the weather card.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionsCard {
    pub icon: Option<Icon>,
    pub location: String,
    pub date: String,
    pub temperature: String,
    pub description: String,
    pub humidity: String,
    pub wind: String,
    pub visibility: String,
    pub feels_like: String,
    /// Shown from an earlier request because the latest one failed.
    pub stale: bool,
}

impl ConditionsCard {
    pub fn from_snapshot(snapshot: &WeatherSnapshot, today: NaiveDate) -> Self {
        Self {
            icon: Icon::for_condition(&snapshot.condition),
            location: format!("{}, {}", snapshot.place, snapshot.country),
            date: format!("{}/{}/{}", today.day(), today.month(), today.year()),
            temperature: truncate(snapshot.temperature_c),
            description: snapshot.description.clone(),
            humidity: format!("{}%", snapshot.humidity_pct),
            wind: format!("{} m/s", snapshot.wind_speed_mps),
            visibility: match snapshot.visibility_m {
                Some(meters) => format!("{}km", f64::from(meters) / 1000.0),
                None => "--km".to_string(),
            },
            feels_like: truncate(snapshot.feels_like_c),
            stale: false,
        }
    }
}

impl std::fmt::Display for ConditionsCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let icon = self.icon.map(|i| i.glyph()).unwrap_or(" ");
        writeln!(f, "{icon}  {}", self.location)?;
        writeln!(f, "   {}", self.date)?;
        writeln!(f)?;
        writeln!(f, "   {}°C  {}", self.temperature, self.description)?;
        writeln!(f)?;
        writeln!(f, "   Humidity    {:<10} Wind        {}", self.humidity, self.wind)?;
        write!(f, "   Visibility  {:<10} Feels like  {}°C", self.visibility, self.feels_like)
    }
}

/// Integer part toward zero, as whole degrees.
fn truncate(celsius: f64) -> String {
    let whole = celsius.trunc();
    // -0.4 truncates to -0; show it as 0
    if whole == 0.0 { "0".to_string() } else { format!("{whole}") }
}

pub fn render(state: &ViewState, today: NaiveDate) -> Screen {
    if !state.settled {
        return Screen::Splash;
    }

    let card = match &state.fetch {
        FetchState::Loading => Card::Spinner,
        FetchState::Loaded(snapshot) => {
            Card::Conditions(ConditionsCard::from_snapshot(snapshot, today))
        }
        FetchState::Failed(_) | FetchState::Idle => match &state.last_loaded {
            Some(snapshot) => {
                let mut card = ConditionsCard::from_snapshot(snapshot, today);
                card.stale = true;
                Card::Conditions(card)
            }
            None => Card::Unavailable,
        },
    };

    Screen::Main(MainScreen {
        banner: state.error_message().map(str::to_owned),
        shaking: state.is_shaking(),
        input: state.input.clone(),
        card,
    })
}
