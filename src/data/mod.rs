//! Core data models and report parsers for auroracast
//!
//! This module contains the types produced by the SWPC report parsers, the
//! Ovation probability-grid model, and the Kp-to-G-scale conversion used
//! throughout the application.

pub mod forecast;
pub mod outlook;
pub mod ovation;

pub use forecast::{parse_forecast, parse_forecast_with_reference, resolve_year, KpForecast};
pub use outlook::{parse_outlook, OutlookPoint};
pub use ovation::{OvationResponse, ProbabilityGrid};

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when report text does not match the expected fixed layout
///
/// These are not recoverable locally: a parse failure means the upstream
/// product layout has changed and the result would be meaningless.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The 3-day forecast contained no three-date header row
    #[error("no forecast header row found in report text")]
    MissingHeader,

    /// A value in a recognized data row failed to parse as a number
    #[error("malformed numeric value in report: '{0}'")]
    MalformedNumber(String),

    /// A recognized date did not form a real calendar date
    #[error("invalid date in report: {0}")]
    InvalidDate(String),
}

/// Hemisphere selector for Ovation aurora imagery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hemisphere {
    North,
    South,
}

impl Hemisphere {
    /// Returns the lowercase name used in SWPC URLs and cache keys
    pub fn as_str(&self) -> &'static str {
        match self {
            Hemisphere::North => "north",
            Hemisphere::South => "south",
        }
    }

    /// Parses a hemisphere name, case-insensitively
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "north" => Some(Hemisphere::North),
            "south" => Some(Hemisphere::South),
            _ => None,
        }
    }
}

impl fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// NOAA geomagnetic storm scale derived from Kp
///
/// `GScale::None` represents sub-storm activity and displays as `"0"`,
/// matching the scale's conventional notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GScale {
    None,
    G1,
    G2,
    G3,
    G4,
    G5,
}

impl fmt::Display for GScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GScale::None => "0",
            GScale::G1 => "G1",
            GScale::G2 => "G2",
            GScale::G3 => "G3",
            GScale::G4 => "G4",
            GScale::G5 => "G5",
        };
        f.write_str(label)
    }
}

/// Converts a Kp index to its NOAA G-scale level
///
/// An unset Kp or anything below 4.5 is sub-storm (`GScale::None`).
pub fn kp_to_g(kp: Option<f64>) -> GScale {
    let kp = match kp {
        Some(kp) => kp,
        None => return GScale::None,
    };
    match kp {
        kp if kp >= 9.0 => GScale::G5,
        kp if kp >= 7.5 => GScale::G4,
        kp if kp >= 6.5 => GScale::G3,
        kp if kp >= 5.5 => GScale::G2,
        kp if kp >= 4.5 => GScale::G1,
        _ => GScale::None,
    }
}

/// Maps a three-letter English month abbreviation to its number
///
/// Both report formats date their rows with these abbreviations.
pub(crate) fn month_number(token: &str) -> Option<u32> {
    match token {
        "Jan" => Some(1),
        "Feb" => Some(2),
        "Mar" => Some(3),
        "Apr" => Some(4),
        "May" => Some(5),
        "Jun" => Some(6),
        "Jul" => Some(7),
        "Aug" => Some(8),
        "Sep" => Some(9),
        "Oct" => Some(10),
        "Nov" => Some(11),
        "Dec" => Some(12),
        _ => None,
    }
}
