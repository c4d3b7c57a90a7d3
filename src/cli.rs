//! Command-line interface parsing for auroracast
//!
//! This module handles parsing of CLI arguments using clap, including the
//! global fetch options (host, cache TTL, timeout, user-agent) that map onto
//! the client configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::client::SwpcConfig;
use crate::data::Hemisphere;

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The specified hemisphere name is not recognized
    #[error("Invalid hemisphere: '{0}'. Valid hemispheres: north, south")]
    InvalidHemisphere(String),
}

/// Auroracast - NOAA SWPC aurora conditions from the command line
#[derive(Parser, Debug)]
#[command(name = "auroracast")]
#[command(about = "Aurora forecasts, Ovation probabilities, and imagery from NOAA SWPC")]
#[command(version)]
pub struct Cli {
    /// SWPC hostname to fetch from
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Cache TTL in seconds; 0 disables caching
    #[arg(long, value_name = "SECONDS")]
    pub ttl: Option<u64>,

    /// HTTP request timeout in seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// User-agent header sent with requests
    #[arg(long, value_name = "STRING")]
    pub agent: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands for each SWPC product
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the 3-day Kp forecast as a timestamped table
    Forecast {
        /// Print the raw report text instead of the parsed table
        #[arg(long)]
        raw: bool,
    },
    /// Print the 27-day solar-flux/A-index/Kp outlook
    Outlook {
        /// Print the raw report text instead of the parsed table
        #[arg(long)]
        raw: bool,
    },
    /// Print the aurora probability at an Ovation grid coordinate
    Probability {
        /// Grid longitude (0-359)
        longitude: i64,
        /// Grid latitude (-90-90)
        #[arg(allow_hyphen_values = true)]
        latitude: i64,
    },
    /// Save the latest Ovation aurora image for a hemisphere
    Image {
        /// Hemisphere to fetch: north or south
        hemisphere: String,
        /// Output file path (default: aurora-<hemisphere>.jpg)
        #[arg(long, short, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

/// Parses a hemisphere string argument into a Hemisphere enum.
///
/// # Arguments
/// * `s` - The hemisphere string from CLI
///
/// # Returns
/// * `Ok(Hemisphere)` if the string matches a valid hemisphere
/// * `Err(CliError::InvalidHemisphere)` if the string doesn't match
pub fn parse_hemisphere_arg(s: &str) -> Result<Hemisphere, CliError> {
    Hemisphere::from_str(s).ok_or_else(|| CliError::InvalidHemisphere(s.to_string()))
}

impl Cli {
    /// Builds the client configuration from the global CLI options
    ///
    /// Options left unset fall back to the client defaults.
    pub fn to_config(&self) -> SwpcConfig {
        let defaults = SwpcConfig::default();
        SwpcConfig {
            cache_ttl: self
                .ttl
                .map(Duration::from_secs)
                .unwrap_or(defaults.cache_ttl),
            host: self.host.clone().unwrap_or(defaults.host),
            timeout: self.timeout.map(Duration::from_secs),
            agent: self.agent.clone(),
        }
    }
}
