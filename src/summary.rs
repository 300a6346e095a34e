use chrono::Duration;
use itertools::Itertools;

use crate::clock::Clock;
use crate::data::{format_temp, format_wind_kmh, icon_glyph, Forecast};
use crate::error::WeatherError;

/// Leading samples feeding the current-conditions summary: the next 27 hours
/// at nominal 3-hour spacing.
const CURRENT_WINDOW: usize = 9;

/// Samples per calendar day at nominal 3-hour spacing.
const SAMPLES_PER_DAY: usize = 8;

/// Lookup for the fixed UI strings appearing in message headers.
pub trait Localize {
    /// Display text for `key` in the consumer's language. The default passes
    /// the key through untranslated.
    fn text(&self, key: &str) -> String {
        key.to_string()
    }
}

/// Identity lookup: keys are already the English display strings.
pub struct Untranslated;

impl Localize for Untranslated {}

/// Build the current-conditions message.
///
/// The temperature range spans the first nine samples (27 hours); wind and
/// condition glyph come from the first sample alone. The header timestamp is
/// the injected clock's time, not the forecast location's.
pub fn current_message(
    forecast: &Forecast,
    clock: &impl Clock,
    lang: &impl Localize,
) -> Result<String, WeatherError> {
    let window = &forecast.samples[..forecast.samples.len().min(CURRENT_WINDOW)];
    let Some(first) = window.first() else {
        return Err(WeatherError::EmptyForecast);
    };

    let glyph = icon_glyph(&first.icon)?;
    let wind = format_wind_kmh(first.wind_speed);

    let now = first.temperature as i32;
    let (min, max) = window
        .iter()
        .map(|sample| sample.temperature as i32)
        .minmax()
        .into_option()
        .unwrap_or((now, now));

    let title = format!(
        "{} ({} {}):",
        lang.text("Now"),
        lang.text("Updated at"),
        clock.now().format("%H:%M")
    );

    Ok(format!(
        "{title}\n{glyph} {}°    {}°/{}°    {wind}",
        format_temp(now),
        format_temp(max),
        format_temp(min),
    ))
}

/// Build the daily forecast message: one line per full day of samples.
///
/// Samples are walked in order, bucketed eight at a time, and each full
/// bucket is reduced to a min/max temperature and average wind line. Samples
/// on the current local day or on the day five days out are left out
/// entirely, and a trailing bucket that never fills is dropped rather than
/// reported as a partial day.
pub fn daily_message(forecast: &Forecast, clock: &impl Clock) -> Result<String, WeatherError> {
    let offset = Duration::hours(forecast.utc_offset_hours as i64);
    let today = clock.now() + offset;
    let boundary = clock.now() + Duration::days(5) + offset;

    let mut message = format!(
        "{}{}\n\n",
        today.format("%d.%m  %H:%M  "),
        forecast.location_name
    );

    let mut temps: Vec<i32> = Vec::new();
    let mut winds: Vec<i32> = Vec::new();
    let mut icon: Option<String> = None;

    for sample in &forecast.samples {
        let local = sample.timestamp + offset;
        let local_day = local.date_naive();
        if local_day == today.date_naive() || local_day == boundary.date_naive() {
            continue;
        }

        temps.push(sample.temperature as i32);
        winds.push(sample.wind_speed as i32);

        // The bucket's face icon is its sixth sample's, midday at nominal
        // spacing.
        if temps.len() == 6 {
            icon = Some(sample.icon.clone());
        }

        if temps.len() == SAMPLES_PER_DAY {
            let glyph = icon_glyph(icon.as_deref().unwrap_or_default())?;
            // Divisor stays at the nominal bucket size.
            let wind = winds.iter().sum::<i32>() as f64 / SAMPLES_PER_DAY as f64;
            if let Some((min, max)) = temps.iter().copied().minmax().into_option() {
                message.push_str(&format!(
                    "{}   {}   {}°/{}°        {}\n",
                    local.format("%d.%m"),
                    glyph,
                    format_temp(max),
                    format_temp(min),
                    format_wind_kmh(wind),
                ));
            }
            temps.clear();
            winds.clear();
            icon = None;
        }
    }

    Ok(message)
}
