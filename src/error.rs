use thiserror::Error;

/// Errors surfaced by forecast retrieval and summarization.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The remote forecast source could not be reached, rejected the
    /// request, or returned data that failed to parse.
    #[error("forecast fetch failed")]
    Fetch(#[from] reqwest::Error),

    /// A summary was requested for a forecast with no samples.
    #[error("forecast contains no samples")]
    EmptyForecast,

    /// Condition code outside the data source's documented icon set.
    #[error("unknown weather icon code {0:?}")]
    UnknownIcon(String),
}
