//! Parser for the SWPC 27-day space weather outlook product
//!
//! The outlook is a text table with one row per calendar day: a dated line
//! carrying the predicted 10.7 cm radio flux, planetary A index, and largest
//! Kp index. Lines starting with `:` or `#` are product metadata and column
//! headers. Unlike the 3-day forecast, outlook rows carry a full
//! four-digit year, so no year resolution is needed.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::ParseError;

/// One day of the 27-day outlook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlookPoint {
    /// Midnight UTC on the forecast day
    pub timestamp: DateTime<Utc>,
    /// Predicted 10.7 cm radio flux in solar flux units
    pub flux: f64,
    /// Predicted planetary A index
    pub ap: f64,
    /// Predicted largest Kp index
    pub kp: f64,
}

/// Parses a 27-day outlook report into one point per data row
///
/// Points are returned in document order, which is chronological for
/// well-formed input; no re-sorting is performed.
pub fn parse_outlook(text: &str) -> Result<Vec<OutlookPoint>, ParseError> {
    let mut points = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with(':') || trimmed.starts_with('#') {
            continue;
        }
        if let Some(point) = parse_outlook_row(trimmed)? {
            points.push(point);
        }
    }

    Ok(points)
}

/// Recognizes a `YYYY Mon DD flux ap kp` row
///
/// Lines of any other shape are skipped; once the leading date matches, the
/// three remaining values must parse as numbers or the layout has drifted.
fn parse_outlook_row(line: &str) -> Result<Option<OutlookPoint>, ParseError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != 6 {
        return Ok(None);
    }
    if tokens[0].len() != 4 || !tokens[0].chars().all(|c| c.is_ascii_digit()) {
        return Ok(None);
    }
    let month = match super::month_number(tokens[1]) {
        Some(m) => m,
        None => return Ok(None),
    };
    if tokens[2].len() != 2 || !tokens[2].chars().all(|c| c.is_ascii_digit()) {
        return Ok(None);
    }

    let year: i32 = tokens[0]
        .parse()
        .map_err(|_| ParseError::MalformedNumber(tokens[0].to_string()))?;
    let day: u32 = tokens[2]
        .parse()
        .map_err(|_| ParseError::MalformedNumber(tokens[2].to_string()))?;
    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| ParseError::InvalidDate(format!("{} {} {}", tokens[0], tokens[1], tokens[2])))?;

    let mut values = [0.0f64; 3];
    for (slot, token) in values.iter_mut().zip(&tokens[3..]) {
        *slot = token
            .parse()
            .map_err(|_| ParseError::MalformedNumber(token.to_string()))?;
    }

    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| ParseError::InvalidDate(date.to_string()))?;
    Ok(Some(OutlookPoint {
        timestamp: Utc.from_utc_datetime(&midnight),
        flux: values[0],
        ap: values[1],
        kp: values[2],
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc_midnight(y: i32, mo: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, 0, 0, 0).unwrap()
    }

    /// Full 27-row outlook product in the real SWPC layout
    const SAMPLE_OUTLOOK: &str = ":Product: 27-day Space Weather Outlook Table 27DO.txt
:Issued: 2025 Mar 24 0315 UTC
# Prepared by the US Dept. of Commerce, NOAA, Space Weather Prediction Center
# Product description and SWPC contact on the Web
# https://www.swpc.noaa.gov/content/subscription-services
#
#      27-day Space Weather Outlook Table
#                Issued 2025-03-24
#
#   UTC      Radio Flux   Planetary   Largest
#  Date       10.7 cm      A Index    Kp Index
2025 Mar 24     170          20          5
2025 Mar 25     175          12          4
2025 Mar 26     175           8          3
2025 Mar 27     175           5          2
2025 Mar 28     170           5          2
2025 Mar 29     170           8          3
2025 Mar 30     165          10          3
2025 Mar 31     165           5          2
2025 Apr 01     160           5          2
2025 Apr 02     160           5          2
2025 Apr 03     155           8          3
2025 Apr 04     155          12          4
2025 Apr 05     150          15          4
2025 Apr 06     150          10          3
2025 Apr 07     150           8          3
2025 Apr 08     155           5          2
2025 Apr 09     155           5          2
2025 Apr 10     160           5          2
2025 Apr 11     160           8          3
2025 Apr 12     165           8          3
2025 Apr 13     165           5          2
2025 Apr 14     170           5          2
2025 Apr 15     170           5          2
2025 Apr 16     175           8          3
2025 Apr 17     175          10          3
2025 Apr 18     175          12          4
2025 Apr 19     170          20          5
";

    #[test]
    fn test_sample_row_produces_expected_point() {
        let points = parse_outlook("2025 Mar 24     170          20          5\n").unwrap();

        assert_eq!(points.len(), 1);
        assert_eq!(
            points[0],
            OutlookPoint {
                timestamp: utc_midnight(2025, 3, 24),
                flux: 170.0,
                ap: 20.0,
                kp: 5.0,
            }
        );
    }

    #[test]
    fn test_full_product_yields_27_points_in_document_order() {
        let points = parse_outlook(SAMPLE_OUTLOOK).unwrap();

        assert_eq!(points.len(), 27);
        assert_eq!(points[0].timestamp, utc_midnight(2025, 3, 24));
        assert_eq!(points[26].timestamp, utc_midnight(2025, 4, 19));
        for pair in points.windows(2) {
            assert!(pair[0].timestamp < pair[1].timestamp);
        }
    }

    #[test]
    fn test_comment_and_header_lines_are_skipped() {
        let header_only = ":Product: 27-day Space Weather Outlook Table\n\
                           #   UTC      Radio Flux   Planetary   Largest\n\
                           #  Date       10.7 cm      A Index    Kp Index\n";

        let points = parse_outlook(header_only).unwrap();

        assert!(points.is_empty());
    }

    #[test]
    fn test_malformed_flux_is_fatal() {
        let result = parse_outlook("2025 Mar 24     ???          20          5\n");

        match result {
            Err(ParseError::MalformedNumber(token)) => assert_eq!(token, "???"),
            other => panic!("expected MalformedNumber, got {:?}", other),
        }
    }

    #[test]
    fn test_impossible_date_is_fatal() {
        let result = parse_outlook("2025 Feb 30     170          20          5\n");

        assert!(matches!(result, Err(ParseError::InvalidDate(_))));
    }

    #[test]
    fn test_prose_line_is_skipped() {
        let text = "Forecast of Solar and Geomagnetic Activity\n\
                    2025 Mar 24     170          20          5\n";

        let points = parse_outlook(text).unwrap();

        assert_eq!(points.len(), 1);
    }
}
