use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::data::{Forecast, WeatherSample};
use crate::error::WeatherError;

const FORECAST_API_BASE: &str = "https://api.openweathermap.org/data/2.5/forecast";

/// Intervals in a 5-day forecast at 3-hour spacing.
const FORECAST_INTERVALS: u32 = 40;

/// Remote source of forecast data.
///
/// Behind a trait so the cache and tests can substitute a canned source; the
/// real implementation is [`OpenWeatherMap`].
pub trait FetchForecast {
    /// Retrieve the 5-day/3-hour forecast for a location, with condition
    /// strings in `language`.
    fn fetch(&self, location_id: &str, language: &str) -> Result<Forecast, WeatherError>;
}

/// OpenWeatherMap 5-day/3-hour forecast API client.
pub struct OpenWeatherMap {
    client: reqwest::blocking::Client,
    api_key: String,
}

impl OpenWeatherMap {
    pub fn new(api_key: impl Into<String>) -> Self {
        OpenWeatherMap {
            client: reqwest::blocking::Client::new(),
            api_key: api_key.into(),
        }
    }
}

impl FetchForecast for OpenWeatherMap {
    fn fetch(&self, location_id: &str, language: &str) -> Result<Forecast, WeatherError> {
        #[derive(Serialize)]
        struct Query<'a> {
            id: &'a str,
            units: &'a str,
            lang: &'a str,
            cnt: u32,
            appid: &'a str,
        }

        tracing::debug!(location_id, "requesting forecast");

        let response = self
            .client
            .get(FORECAST_API_BASE)
            .query(&Query {
                id: location_id,
                units: "metric",
                lang: language,
                cnt: FORECAST_INTERVALS,
                appid: &self.api_key,
            })
            .send()?
            .error_for_status()?;

        let data: Response = response.json()?;
        Ok(convert(data))
    }
}

#[derive(Debug, Deserialize)]
struct Response {
    city: City,
    list: Vec<Entry>,
}

#[derive(Debug, Deserialize)]
struct City {
    name: String,
    /// Shift from UTC in seconds.
    timezone: i32,
}

#[derive(Debug, Deserialize)]
struct Entry {
    dt: i64,
    main: Main,
    wind: Wind,
    weather: Vec<Condition>,
}

#[derive(Debug, Deserialize)]
struct Main {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct Wind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct Condition {
    icon: String,
}

/// Flatten the wire response into the internal forecast shape.
fn convert(data: Response) -> Forecast {
    let samples = data
        .list
        .into_iter()
        .map(|entry| WeatherSample {
            timestamp: DateTime::from_timestamp(entry.dt, 0).expect("timestamp out of range"),
            temperature: entry.main.temp,
            wind_speed: entry.wind.speed,
            icon: entry
                .weather
                .into_iter()
                .next()
                .map(|c| c.icon)
                .unwrap_or_default(),
        })
        .collect();

    Forecast {
        location_name: data.city.name,
        // The source reports seconds; local day boundaries only need whole
        // hours, fractional offsets truncate.
        utc_offset_hours: data.city.timezone / 3600,
        samples,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORECAST_JSON: &str = r#"{
        "city": {"name": "Zagreb", "timezone": 7200},
        "list": [
            {
                "dt": 1742904000,
                "main": {"temp": 11.42},
                "wind": {"speed": 3.61},
                "weather": [{"icon": "04d"}]
            },
            {
                "dt": 1742914800,
                "main": {"temp": -0.58},
                "wind": {"speed": 1.2},
                "weather": [{"icon": "01n"}]
            }
        ]
    }"#;

    #[test]
    fn convert_flattens_response() {
        let response: Response = serde_json::from_str(FORECAST_JSON).unwrap();
        let forecast = convert(response);

        assert_eq!(forecast.location_name, "Zagreb");
        assert_eq!(forecast.utc_offset_hours, 2);
        assert_eq!(forecast.samples.len(), 2);

        let first = &forecast.samples[0];
        assert_eq!(first.timestamp.timestamp(), 1742904000);
        assert_eq!(first.temperature, 11.42);
        assert_eq!(first.wind_speed, 3.61);
        assert_eq!(first.icon, "04d");
        assert_eq!(forecast.samples[1].icon, "01n");
    }

    #[test]
    fn convert_truncates_fractional_offset() {
        let response: Response = serde_json::from_str(
            r#"{"city": {"name": "Mumbai", "timezone": 19800}, "list": []}"#,
        )
        .unwrap();
        // +05:30 keeps only the whole hours.
        assert_eq!(convert(response).utc_offset_hours, 5);
    }

    #[test]
    fn convert_missing_condition_yields_empty_icon() {
        let response: Response = serde_json::from_str(
            r#"{
                "city": {"name": "Nowhere", "timezone": 0},
                "list": [{"dt": 0, "main": {"temp": 1.0}, "wind": {"speed": 1.0}, "weather": []}]
            }"#,
        )
        .unwrap();
        assert_eq!(convert(response).samples[0].icon, "");
    }
}
