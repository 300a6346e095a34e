use std::collections::HashMap;

use parking_lot::Mutex;

use crate::data::Forecast;
use crate::error::WeatherError;
use crate::fetch::FetchForecast;

/// Namespace under which forecasts are filed in the store.
pub const FORECAST_NAMESPACE: &str = "weatherData";

/// Key-value store holding previously fetched forecasts.
///
/// Entry expiry and eviction are the store's own business: a `read` hit is
/// returned as-is, never revalidated here.
pub trait ForecastStore {
    fn read(&self, key: &str, namespace: &str) -> Option<Forecast>;
    fn write(&self, key: &str, forecast: &Forecast, namespace: &str);
}

/// In-process store keeping entries for the lifetime of the process.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<(String, String), Forecast>>,
}

impl ForecastStore for MemoryStore {
    fn read(&self, key: &str, namespace: &str) -> Option<Forecast> {
        self.entries
            .lock()
            .get(&(namespace.to_string(), key.to_string()))
            .cloned()
    }

    fn write(&self, key: &str, forecast: &Forecast, namespace: &str) {
        self.entries
            .lock()
            .insert((namespace.to_string(), key.to_string()), forecast.clone());
    }
}

/// Forecast access with a cache in front of the remote fetch, so repeated
/// requests for a location within the store's retention window cost one
/// remote call instead of one per request.
pub struct ForecastCache<F, S> {
    fetcher: F,
    store: S,
}

impl<F: FetchForecast, S: ForecastStore> ForecastCache<F, S> {
    pub fn new(fetcher: F, store: S) -> Self {
        ForecastCache { fetcher, store }
    }

    /// Return the forecast for a location, fetching and storing it on a
    /// store miss. Fetch failures propagate unchanged and leave the store
    /// untouched.
    pub fn get_forecast(
        &self,
        location_id: &str,
        language: &str,
    ) -> Result<Forecast, WeatherError> {
        if let Some(forecast) = self.store.read(location_id, FORECAST_NAMESPACE) {
            tracing::debug!(location_id, "forecast cache hit");
            return Ok(forecast);
        }

        tracing::debug!(location_id, "forecast cache miss");
        let forecast = self.fetcher.fetch(location_id, language)?;
        self.store.write(location_id, &forecast, FORECAST_NAMESPACE);
        Ok(forecast)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::data::WeatherSample;

    fn canned_forecast() -> Forecast {
        Forecast {
            location_name: "Zagreb".to_string(),
            utc_offset_hours: 1,
            samples: vec![WeatherSample {
                timestamp: Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap(),
                temperature: 7.3,
                wind_speed: 2.0,
                icon: "01d".to_string(),
            }],
        }
    }

    /// Counts fetches; fails every call when `fail` is set.
    struct CountingFetcher {
        calls: Cell<usize>,
        fail: bool,
    }

    impl CountingFetcher {
        fn new(fail: bool) -> Self {
            CountingFetcher {
                calls: Cell::new(0),
                fail,
            }
        }
    }

    impl FetchForecast for CountingFetcher {
        fn fetch(&self, _location_id: &str, _language: &str) -> Result<Forecast, WeatherError> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                Err(WeatherError::EmptyForecast)
            } else {
                Ok(canned_forecast())
            }
        }
    }

    #[test]
    fn miss_fetches_and_stores() {
        let cache = ForecastCache::new(CountingFetcher::new(false), MemoryStore::default());

        let forecast = cache.get_forecast("2761369", "en").unwrap();
        assert_eq!(forecast.location_name, "Zagreb");
        assert_eq!(cache.fetcher.calls.get(), 1);
        assert!(cache.store.read("2761369", FORECAST_NAMESPACE).is_some());
    }

    #[test]
    fn repeated_reads_fetch_once() {
        let cache = ForecastCache::new(CountingFetcher::new(false), MemoryStore::default());

        let first = cache.get_forecast("2761369", "en").unwrap();
        let second = cache.get_forecast("2761369", "en").unwrap();

        assert_eq!(cache.fetcher.calls.get(), 1);
        assert_eq!(first, second);
    }

    #[test]
    fn distinct_locations_fetch_separately() {
        let cache = ForecastCache::new(CountingFetcher::new(false), MemoryStore::default());

        cache.get_forecast("2761369", "en").unwrap();
        cache.get_forecast("524901", "en").unwrap();
        assert_eq!(cache.fetcher.calls.get(), 2);
    }

    #[test]
    fn fetch_failure_propagates_and_caches_nothing() {
        let cache = ForecastCache::new(CountingFetcher::new(true), MemoryStore::default());

        assert!(cache.get_forecast("2761369", "en").is_err());
        assert!(cache.store.read("2761369", FORECAST_NAMESPACE).is_none());

        // Not cached, so the next call hits the fetcher again.
        assert!(cache.get_forecast("2761369", "en").is_err());
        assert_eq!(cache.fetcher.calls.get(), 2);
    }

    #[test]
    fn memory_store_separates_namespaces() {
        let store = MemoryStore::default();
        store.write("key", &canned_forecast(), "weatherData");

        assert!(store.read("key", "weatherData").is_some());
        assert!(store.read("key", "somethingElse").is_none());
    }
}
