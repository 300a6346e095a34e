use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::WeatherError;

/// One 3-hour forecast interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSample {
    /// Start of the interval, UTC.
    pub timestamp: DateTime<Utc>,
    /// Air temperature in degrees Celsius.
    pub temperature: f64,
    /// Wind speed in m/s.
    pub wind_speed: f64,
    /// Sky condition icon code, e.g. `"01d"`.
    pub icon: String,
}

/// A multi-day forecast as delivered by the data source: samples in ascending
/// timestamp order at nominal 3-hour spacing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// Display name of the forecast location.
    pub location_name: String,
    /// Whole hours east of UTC at the location, for local day boundaries.
    pub utc_offset_hours: i32,
    pub samples: Vec<WeatherSample>,
}

/// Return the display glyph for a condition icon code.
///
/// The mapping is exhaustive for the codes the data source emits (day/night
/// variants of nine conditions); anything else is a data-integrity error, not
/// a blank glyph.
pub fn icon_glyph(code: &str) -> Result<&'static str, WeatherError> {
    let glyph = match code {
        "01d" => "\u{2600}\u{fe0f}",         // BLACK SUN WITH RAYS - clear sky (day)
        "01n" => "\u{1f315}",                // FULL MOON SYMBOL - clear sky (night)
        "02d" | "02n" => "\u{1f324}",        // WHITE SUN WITH SMALL CLOUD - few clouds
        "03d" | "03n" => "\u{1f325}",        // WHITE SUN BEHIND CLOUD - scattered clouds
        "04d" | "04n" => "\u{2601}\u{fe0f}", // CLOUD - broken clouds
        "09d" | "09n" => "\u{1f327}",        // CLOUD WITH RAIN - shower rain
        "10d" | "10n" => "\u{1f326}",        // WHITE SUN BEHIND CLOUD WITH RAIN - rain
        "11d" | "11n" => "\u{1f329}",        // CLOUD WITH LIGHTNING - thunderstorm
        "13d" | "13n" => "\u{2744}\u{fe0f}", // SNOWFLAKE - snow
        "50d" | "50n" => "\u{1f4a8}",        // DASH SYMBOL - mist
        other => return Err(WeatherError::UnknownIcon(other.to_string())),
    };
    Ok(glyph)
}

/// Format a temperature for a chat message.
///
/// Positive values get an explicit `+` and zero a leading space: a message
/// line starting with a bare number or `/` can be read as a command by the
/// chat platform, so every temperature carries a sign or a space.
pub fn format_temp(value: i32) -> String {
    match value {
        0 => " 0".to_string(),
        v if v > 0 => format!("+{v}"),
        v => v.to_string(),
    }
}

/// Format a wind speed in m/s as whole km/h, e.g. `"18 km/h"`.
pub fn format_wind_kmh(meters_per_sec: f64) -> String {
    format!("{} km/h", (meters_per_sec * 3.6) as i32)
}
