//! Ovation aurora-probability product model
//!
//! The SWPC publishes the Ovation model output as a JSON document whose
//! `coordinates` array holds one `[longitude, latitude, aurora]` triple per
//! grid cell, with the aurora value being a visibility probability in
//! percent. This module decodes that document and builds the nested
//! longitude-to-latitude lookup used for point queries.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The Ovation JSON product as served by SWPC
#[derive(Debug, Clone, Deserialize)]
pub struct OvationResponse {
    /// When the underlying observation was made
    #[serde(rename = "Observation Time")]
    pub observation_time: DateTime<Utc>,
    /// The model's valid time
    #[serde(rename = "Forecast Time")]
    pub forecast_time: DateTime<Utc>,
    /// Grid cells as `[longitude, latitude, aurora probability]` triples
    pub coordinates: Vec<[i64; 3]>,
}

/// Nested longitude-to-latitude map of aurora probabilities
///
/// Indexing order is longitude first, then latitude; that order is a fixed
/// contract of the product and its consumers. A coordinate absent from the
/// grid has probability zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityGrid {
    cells: HashMap<i64, HashMap<i64, i64>>,
}

impl ProbabilityGrid {
    /// Builds the grid from Ovation coordinate triples
    ///
    /// Later triples for the same cell overwrite earlier ones.
    pub fn from_coordinates(coordinates: &[[i64; 3]]) -> Self {
        let mut cells: HashMap<i64, HashMap<i64, i64>> = HashMap::new();
        for [longitude, latitude, probability] in coordinates {
            cells
                .entry(*longitude)
                .or_default()
                .insert(*latitude, *probability);
        }
        Self { cells }
    }

    /// Returns the aurora probability at a grid coordinate
    ///
    /// Coordinates outside the grid yield `0`, never an error.
    pub fn probability_at(&self, longitude: i64, latitude: i64) -> i64 {
        self.cells
            .get(&longitude)
            .and_then(|column| column.get(&latitude))
            .copied()
            .unwrap_or(0)
    }

    /// Number of grid cells with a recorded probability
    pub fn len(&self) -> usize {
        self.cells.values().map(HashMap::len).sum()
    }

    /// True when the grid holds no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Trimmed-down Ovation product in the real SWPC shape
    const SAMPLE_OVATION: &str = r#"{
        "Observation Time": "2025-07-03T20:35:00Z",
        "Forecast Time": "2025-07-03T21:31:00Z",
        "Data Format": "[Longitude, Latitude, Aurora]",
        "coordinates": [
            [0, -90, 3],
            [0, -89, 4],
            [1, -90, 2],
            [225, 64, 38],
            [226, 64, 41],
            [359, 89, 0]
        ]
    }"#;

    #[test]
    fn test_decode_ovation_product() {
        let response: OvationResponse =
            serde_json::from_str(SAMPLE_OVATION).expect("Failed to parse Ovation JSON");

        assert_eq!(response.coordinates.len(), 6);
        assert_eq!(response.coordinates[0], [0, -90, 3]);
        assert_eq!(
            response.observation_time,
            "2025-07-03T20:35:00Z".parse::<DateTime<Utc>>().unwrap()
        );
        assert!(response.forecast_time > response.observation_time);
    }

    #[test]
    fn test_grid_lookup_by_longitude_then_latitude() {
        let response: OvationResponse = serde_json::from_str(SAMPLE_OVATION).unwrap();
        let grid = ProbabilityGrid::from_coordinates(&response.coordinates);

        assert_eq!(grid.probability_at(225, 64), 38);
        assert_eq!(grid.probability_at(226, 64), 41);
        assert_eq!(grid.probability_at(0, -90), 3);
    }

    #[test]
    fn test_missing_coordinate_yields_zero() {
        let grid = ProbabilityGrid::from_coordinates(&[[10, 50, 7]]);

        // Known longitude, unknown latitude
        assert_eq!(grid.probability_at(10, 51), 0);
        // Unknown longitude entirely
        assert_eq!(grid.probability_at(11, 50), 0);
        // Swapped indexing order must not find the cell
        assert_eq!(grid.probability_at(50, 10), 0);
    }

    #[test]
    fn test_duplicate_cells_overwrite() {
        let grid = ProbabilityGrid::from_coordinates(&[[10, 50, 7], [10, 50, 9]]);

        assert_eq!(grid.probability_at(10, 50), 9);
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn test_empty_grid() {
        let grid = ProbabilityGrid::from_coordinates(&[]);

        assert!(grid.is_empty());
        assert_eq!(grid.probability_at(0, 0), 0);
    }
}
