use anyhow::Context;
use inquire::{CustomUserError, Password, PasswordDisplayMode, Text, validator::Validation};
use weatherview_core::Config;

/// Ask for the API key and startup place, returning the updated config.
///
/// An empty answer to the key prompt keeps the stored key.
pub fn prompt(mut config: Config) -> anyhow::Result<Config> {
    let has_key = config.api_key().is_ok();
    let help = if has_key {
        "Leave empty to keep the current key"
    } else {
        "Get one at https://openweathermap.org/api"
    };

    let key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message(help)
        .prompt()
        .context("Failed to read API key")?;

    if let Some(key) = normalize_key(&key) {
        config.set_api_key(key);
    } else if !has_key {
        anyhow::bail!("An API key is required.");
    }

    let place = Text::new("Place to show on startup:")
        .with_default(&config.default_place)
        .with_validator(|input: &str| -> Result<Validation, CustomUserError> {
            Ok(if input.trim().is_empty() {
                Validation::Invalid("Place must not be empty".into())
            } else {
                Validation::Valid
            })
        })
        .prompt()
        .context("Failed to read startup place")?;

    config.default_place = place.trim().to_string();
    Ok(config)
}

fn normalize_key(input: &str) -> Option<String> {
    let key = input.trim();
    (!key.is_empty()).then(|| key.to_string())
}
