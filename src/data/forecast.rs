//! Parser for the SWPC 3-day geomagnetic forecast product
//!
//! The report is a fixed-width text table: a header row naming three
//! consecutive dates (`Jul 03       Jul 04       Jul 05`) followed by eight
//! rows of 3-hour UT buckets with one predicted Kp value per date, optionally
//! annotated with a NOAA G-scale level in parentheses. This module turns that
//! table into a mapping from UTC timestamp to Kp value.
//!
//! Report dates carry no year. The year is resolved relative to a reference
//! date on the assumption that the report is always close to "now": a January
//! report date seen in December belongs to next year, and a December date
//! seen in January belongs to last year.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};

use super::{month_number, ParseError};

/// Kp forecast time series: one entry per (date, 3-hour bucket) cell
pub type KpForecast = BTreeMap<DateTime<Utc>, f64>;

/// Line scanner state for the forecast table
#[derive(Clone, Copy)]
enum ScanState {
    /// Looking for the three-date header row
    SeekingHeader,
    /// Header found; collecting UT-bucket data rows for these dates
    ReadingRows([NaiveDate; 3]),
}

/// Parses a 3-day forecast report, resolving years against today's UTC date
pub fn parse_forecast(text: &str) -> Result<KpForecast, ParseError> {
    parse_forecast_with_reference(text, Utc::now().date_naive())
}

/// Parses a 3-day forecast report with an explicit reference date
///
/// The reference date only drives year resolution for the year-less header
/// dates; tests pass a fixed date for deterministic output.
pub fn parse_forecast_with_reference(
    text: &str,
    reference: NaiveDate,
) -> Result<KpForecast, ParseError> {
    let mut state = ScanState::SeekingHeader;
    let mut forecast = KpForecast::new();

    for line in text.lines() {
        match state {
            ScanState::SeekingHeader => {
                if let Some(dates) = parse_header(line, reference)? {
                    state = ScanState::ReadingRows(dates);
                }
            }
            ScanState::ReadingRows(dates) => {
                if let Some((hour, values)) = parse_data_row(line)? {
                    for (date, kp) in dates.iter().zip(values) {
                        let start = date
                            .and_hms_opt(hour, 0, 0)
                            .ok_or_else(|| ParseError::InvalidDate(format!("{date} {hour:02}:00")))?;
                        forecast.insert(Utc.from_utc_datetime(&start), kp);
                    }
                }
            }
        }
    }

    if matches!(state, ScanState::SeekingHeader) {
        return Err(ParseError::MissingHeader);
    }

    Ok(forecast)
}

/// Resolves a year-less report month against a reference date
///
/// Assumes the report date is near the reference: January dates seen in
/// December roll forward a year, December dates seen in January roll back.
pub fn resolve_year(month: u32, reference: NaiveDate) -> i32 {
    match (reference.month(), month) {
        (12, 1) => reference.year() + 1,
        (1, 12) => reference.year() - 1,
        _ => reference.year(),
    }
}

/// Recognizes the three-date header row and resolves its dates
///
/// The header tokenizes to exactly three `<Mon> <DD>` pairs. Any other line
/// shape is not the header (returns `Ok(None)`); a recognized pair that does
/// not form a real calendar date is fatal.
fn parse_header(
    line: &str,
    reference: NaiveDate,
) -> Result<Option<[NaiveDate; 3]>, ParseError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != 6 {
        return Ok(None);
    }

    let mut dates = [NaiveDate::MIN; 3];
    for (i, pair) in tokens.chunks(2).enumerate() {
        let month = match month_number(pair[0]) {
            Some(m) => m,
            None => return Ok(None),
        };
        if pair[1].len() != 2 || !pair[1].chars().all(|c| c.is_ascii_digit()) {
            return Ok(None);
        }
        let day: u32 = pair[1].parse().map_err(|_| ParseError::MalformedNumber(pair[1].to_string()))?;
        let year = resolve_year(month, reference);
        dates[i] = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| ParseError::InvalidDate(format!("{} {}", pair[0], pair[1])))?;
    }

    Ok(Some(dates))
}

/// Recognizes a `HH-HHUT` data row and extracts its three Kp values
///
/// Parenthesized G-scale annotations after a value are stripped. Lines whose
/// first token is not a UT bucket label are skipped; once the label matches,
/// any remaining token that should be numeric but fails to parse is fatal,
/// since it means the table layout has changed.
fn parse_data_row(line: &str) -> Result<Option<(u32, [f64; 3])>, ParseError> {
    let mut tokens = line.split_whitespace();
    let hour = match tokens.next().and_then(parse_bucket_label) {
        Some(h) => h,
        None => return Ok(None),
    };

    let mut values = Vec::with_capacity(3);
    for token in tokens {
        if token.starts_with('(') && token.ends_with(')') {
            continue;
        }
        let kp: f64 = token
            .parse()
            .map_err(|_| ParseError::MalformedNumber(token.to_string()))?;
        values.push(kp);
    }

    match <[f64; 3]>::try_from(values) {
        Ok(values) => Ok(Some((hour, values))),
        // A UT-labelled row without exactly three values belongs to some
        // other section of the report.
        Err(_) => Ok(None),
    }
}

/// Parses a 3-hour bucket label like `00-03UT`, returning its start hour
fn parse_bucket_label(token: &str) -> Option<u32> {
    let range = token.strip_suffix("UT")?;
    let (start, end) = range.split_once('-')?;
    if start.len() != 2 || end.len() != 2 {
        return None;
    }
    end.parse::<u32>().ok().filter(|h| *h < 24)?;
    start.parse().ok().filter(|h| *h < 24)
}
