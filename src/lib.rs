//! Chat-ready weather summaries.
//!
//! Fetches a 5-day/3-hour forecast for a location and reduces it to two
//! plain-text messages for a chat-style consumer: a current-conditions line
//! and a per-day rollup, each with a condition glyph, temperature range, and
//! wind speed.

pub mod cache;
pub mod clock;
pub mod data;
pub mod error;
pub mod fetch;
pub mod summary;

pub use data::{Forecast, WeatherSample};
pub use error::WeatherError;
