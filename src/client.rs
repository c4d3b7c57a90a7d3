//! SWPC client: fetch orchestration and response caching
//!
//! `SwpcClient` coordinates each retrieval: consult the in-memory TTL cache,
//! fall through to the HTTP transport on a miss, decode the payload, store
//! it, and hand it back. Raw-text report retrievals deliberately bypass the
//! cache; only structured results are cached.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use crate::cache::TtlCache;
use crate::data::{
    parse_forecast, parse_outlook, Hemisphere, KpForecast, OutlookPoint, OvationResponse,
    ParseError, ProbabilityGrid,
};
use crate::transport::{HttpTransport, Transport, TransportError};

/// Default SWPC hostname
pub const DEFAULT_HOST: &str = "services.swpc.noaa.gov";

/// Default cache TTL
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(120);

/// Resource path for the Ovation probability product
const OVATION_JSON_PATH: &str = "json/ovation_aurora_latest.json";

/// Resource path for the 3-day geomagnetic forecast
const FORECAST_PATH: &str = "text/3-day-forecast.txt";

/// Resource path for the 27-day outlook
const OUTLOOK_PATH: &str = "text/27-day-outlook.txt";

/// Cache key for the raw Ovation coordinate triples
const KEY_COORDINATES: &str = "json";

/// Cache key for the nested probability grid
const KEY_GRID: &str = "hash";

/// Cache key for the parsed 3-day forecast
const KEY_FORECAST: &str = "forecast";

/// Cache key for the parsed 27-day outlook
const KEY_OUTLOOK: &str = "outlook";

/// Errors that can occur during a client operation
#[derive(Debug, Error)]
pub enum SwpcError {
    /// Network or HTTP failure, propagated unchanged
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Report text did not match the expected layout
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The Ovation JSON payload could not be decoded
    #[error("failed to decode Ovation JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A report body was not valid UTF-8
    #[error("report body is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Saving a fetched image to disk failed
    #[error("failed to write image to {path}: {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Configuration accepted by `SwpcClient` at construction
#[derive(Debug, Clone)]
pub struct SwpcConfig {
    /// How long cached responses stay fresh; zero disables caching
    pub cache_ttl: Duration,
    /// SWPC hostname to fetch from
    pub host: String,
    /// Request timeout for the built-in HTTP transport
    pub timeout: Option<Duration>,
    /// User-agent header for the built-in HTTP transport
    pub agent: Option<String>,
}

impl Default for SwpcConfig {
    fn default() -> Self {
        Self {
            cache_ttl: DEFAULT_CACHE_TTL,
            host: DEFAULT_HOST.to_string(),
            timeout: None,
            agent: None,
        }
    }
}

/// One cached artifact, tagged by the shape it was decoded into
#[derive(Debug, Clone)]
enum CachedValue {
    Image(Vec<u8>),
    Coordinates(Vec<[i64; 3]>),
    Grid(ProbabilityGrid),
    Forecast(KpForecast),
    Outlook(Vec<OutlookPoint>),
}

/// Client for SWPC aurora products
///
/// Each instance owns its cache, so TTL behavior is independent across
/// instances. The cache lock is held only across a single get or set, never
/// across a transport await; two concurrent callers can therefore both miss
/// and fetch redundantly, which is harmless since `set` overwrites.
pub struct SwpcClient {
    transport: Arc<dyn Transport>,
    host: String,
    cache: Mutex<TtlCache<CachedValue>>,
}

impl SwpcClient {
    /// Creates a client with default configuration
    pub fn new() -> Result<Self, SwpcError> {
        Self::with_config(SwpcConfig::default())
    }

    /// Creates a client with the given configuration and the built-in
    /// reqwest transport
    pub fn with_config(config: SwpcConfig) -> Result<Self, SwpcError> {
        let transport = HttpTransport::new(config.timeout, config.agent.as_deref())?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Creates a client with an injected transport
    ///
    /// The config's `timeout` and `agent` only apply to the built-in
    /// transport and are ignored here.
    pub fn with_transport(config: SwpcConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            host: config.host,
            cache: Mutex::new(TtlCache::new(config.cache_ttl)),
        }
    }

    /// Fetches the latest Ovation aurora image for a hemisphere
    pub async fn image(&self, hemisphere: Hemisphere) -> Result<Vec<u8>, SwpcError> {
        let key = hemisphere.as_str();
        if let Some(CachedValue::Image(bytes)) = self.cached(key) {
            return Ok(bytes);
        }
        let path = format!("images/animations/ovation/{hemisphere}/latest.jpg");
        let bytes = self.fetch_bytes(&path).await?;
        self.store(key, CachedValue::Image(bytes.clone()));
        Ok(bytes)
    }

    /// Fetches the latest Ovation image and writes it to `path`
    ///
    /// Overwrites any existing file. A write failure is fatal to this call
    /// only; the fetched bytes remain cached.
    pub async fn save_image(
        &self,
        hemisphere: Hemisphere,
        path: &Path,
    ) -> Result<(), SwpcError> {
        let bytes = self.image(hemisphere).await?;
        tokio::fs::write(path, bytes)
            .await
            .map_err(|source| SwpcError::FileWrite {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Fetches the Ovation grid as raw `[longitude, latitude, aurora]`
    /// triples
    pub async fn coordinates(&self) -> Result<Vec<[i64; 3]>, SwpcError> {
        if let Some(CachedValue::Coordinates(coordinates)) = self.cached(KEY_COORDINATES) {
            return Ok(coordinates);
        }
        let response = self.fetch_ovation().await?;
        self.store(
            KEY_COORDINATES,
            CachedValue::Coordinates(response.coordinates.clone()),
        );
        Ok(response.coordinates)
    }

    /// Fetches the Ovation grid as a nested longitude/latitude map
    pub async fn grid(&self) -> Result<ProbabilityGrid, SwpcError> {
        if let Some(CachedValue::Grid(grid)) = self.cached(KEY_GRID) {
            return Ok(grid);
        }
        let response = self.fetch_ovation().await?;
        let grid = ProbabilityGrid::from_coordinates(&response.coordinates);
        self.store(KEY_GRID, CachedValue::Grid(grid.clone()));
        Ok(grid)
    }

    /// Returns the aurora probability at a grid coordinate
    ///
    /// Coordinates absent from the grid yield `0`.
    pub async fn probability_at(&self, longitude: i64, latitude: i64) -> Result<i64, SwpcError> {
        let grid = self.grid().await?;
        Ok(grid.probability_at(longitude, latitude))
    }

    /// Fetches and parses the 3-day Kp forecast
    pub async fn forecast(&self) -> Result<KpForecast, SwpcError> {
        if let Some(CachedValue::Forecast(forecast)) = self.cached(KEY_FORECAST) {
            return Ok(forecast);
        }
        let text = self.fetch_text(FORECAST_PATH).await?;
        let forecast = parse_forecast(&text)?;
        self.store(KEY_FORECAST, CachedValue::Forecast(forecast.clone()));
        Ok(forecast)
    }

    /// Fetches the 3-day forecast as raw report text
    ///
    /// Raw-text retrieval always goes to the transport; only structured
    /// results are cached.
    pub async fn forecast_text(&self) -> Result<String, SwpcError> {
        self.fetch_text(FORECAST_PATH).await
    }

    /// Fetches and parses the 27-day outlook
    pub async fn outlook(&self) -> Result<Vec<OutlookPoint>, SwpcError> {
        if let Some(CachedValue::Outlook(points)) = self.cached(KEY_OUTLOOK) {
            return Ok(points);
        }
        let text = self.fetch_text(OUTLOOK_PATH).await?;
        let points = parse_outlook(&text)?;
        self.store(KEY_OUTLOOK, CachedValue::Outlook(points.clone()));
        Ok(points)
    }

    /// Fetches the 27-day outlook as raw report text, bypassing the cache
    pub async fn outlook_text(&self) -> Result<String, SwpcError> {
        self.fetch_text(OUTLOOK_PATH).await
    }

    /// Fetches and decodes the Ovation JSON product
    async fn fetch_ovation(&self) -> Result<OvationResponse, SwpcError> {
        let body = self.fetch_bytes(OVATION_JSON_PATH).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Fetches a resource as raw bytes
    async fn fetch_bytes(&self, path: &str) -> Result<Vec<u8>, SwpcError> {
        let url = format!("https://{}/{}", self.host, path);
        let response = self.transport.fetch(&url).await?;
        Ok(response.body)
    }

    /// Fetches a resource and decodes it as UTF-8 text
    async fn fetch_text(&self, path: &str) -> Result<String, SwpcError> {
        let body = self.fetch_bytes(path).await?;
        Ok(String::from_utf8(body)?)
    }

    /// Cache lookup with hit/miss logging
    fn cached(&self, key: &str) -> Option<CachedValue> {
        let hit = self.lock_cache().get(key);
        match hit {
            Some(value) => {
                debug!(key, "cache hit");
                Some(value)
            }
            None => {
                debug!(key, "cache miss");
                None
            }
        }
    }

    /// Stores a freshly fetched value
    fn store(&self, key: &str, value: CachedValue) {
        self.lock_cache().set(key, value);
    }

    fn lock_cache(&self) -> MutexGuard<'_, TtlCache<CachedValue>> {
        self.cache.lock().expect("cache mutex poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SwpcConfig::default();

        assert_eq!(config.cache_ttl, Duration::from_secs(120));
        assert_eq!(config.host, "services.swpc.noaa.gov");
        assert!(config.timeout.is_none());
        assert!(config.agent.is_none());
    }

    #[test]
    fn test_client_builds_with_default_config() {
        assert!(SwpcClient::new().is_ok());
    }
}
