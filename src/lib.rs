//! Auroracast - NOAA SWPC aurora-forecast client
//!
//! Fetches Ovation aurora imagery and probability grids, the 3-day
//! geomagnetic Kp forecast, and the 27-day solar-flux/A-index/Kp outlook
//! from the NOAA Space Weather Prediction Center, caching responses in
//! memory for a configurable TTL and parsing the textual reports into
//! structured time series.

pub mod cache;
pub mod cli;
pub mod client;
pub mod data;
pub mod transport;

pub use client::{SwpcClient, SwpcConfig, SwpcError};
pub use data::{kp_to_g, GScale, Hemisphere, KpForecast, OutlookPoint, ProbabilityGrid};
