//! Conversion of a loosely-typed price frame into typed bars.
//!
//! The frame comes from whatever the data collaborator produced (CSV,
//! Parquet, an in-memory polars frame). Column names are matched
//! case-insensitively and numeric columns are coerced with non-strict casts,
//! so unparsable cells become NaN instead of errors. Only a missing close or
//! date column, or a broken date index, is fatal.

use chrono::{DateTime, NaiveDate};
use polars::prelude::*;
use thiserror::Error;

use crate::domain::Bar;

const DATE_COLUMNS: [&str; 4] = ["date", "datetime", "timestamp", "time"];

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("missing required field '{0}'")]
    MissingField(String),

    #[error("invalid date at row {row}: {value}")]
    InvalidDate { row: usize, value: String },

    #[error("dates not strictly ascending at row {row} ({date})")]
    UnorderedDates { row: usize, date: NaiveDate },

    #[error("polars error: {0}")]
    Polars(#[from] PolarsError),
}

fn find_column<'a>(df: &'a DataFrame, name: &str) -> Option<&'a Series> {
    df.get_columns()
        .iter()
        .find(|c| c.name().as_str().eq_ignore_ascii_case(name))
        .map(|c| c.as_materialized_series())
}

/// Numeric column as f64, NaN for nulls and failed coercions. `None` if absent.
fn numeric_column(df: &DataFrame, name: &str) -> Result<Option<Vec<f64>>, FrameError> {
    let Some(series) = find_column(df, name) else {
        return Ok(None);
    };
    let cast = series.cast(&DataType::Float64)?;
    let values = cast
        .f64()?
        .into_iter()
        .map(|v| v.unwrap_or(f64::NAN))
        .collect();
    Ok(Some(values))
}

fn parse_date_str(row: usize, raw: Option<&str>) -> Result<NaiveDate, FrameError> {
    let invalid = || FrameError::InvalidDate {
        row,
        value: raw.unwrap_or("null").to_string(),
    };
    let text = raw.ok_or_else(invalid)?.trim();
    let day = text.get(..10).unwrap_or(text);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(|_| invalid())
}

fn date_column(df: &DataFrame) -> Result<Vec<NaiveDate>, FrameError> {
    let series = DATE_COLUMNS
        .iter()
        .find_map(|name| find_column(df, name))
        .ok_or_else(|| FrameError::MissingField("date".into()))?;

    match series.dtype() {
        DataType::Date => {
            let epoch = DateTime::<chrono::Utc>::UNIX_EPOCH.date_naive();
            let days = series.cast(&DataType::Int32)?;
            days.i32()?
                .into_iter()
                .enumerate()
                .map(|(row, d)| {
                    d.and_then(|d| epoch.checked_add_signed(chrono::Duration::days(d as i64)))
                        .ok_or_else(|| FrameError::InvalidDate {
                            row,
                            value: format!("{d:?}"),
                        })
                })
                .collect()
        }
        DataType::Datetime(_, Some(_)) => {
            // calendar day in the column's own zone, not UTC
            let local = series.datetime()?.to_string("%Y-%m-%d")?;
            (&local)
                .into_iter()
                .enumerate()
                .map(|(row, s)| parse_date_str(row, s))
                .collect()
        }
        DataType::Datetime(unit, None) => {
            let unit = *unit;
            let raw = series.cast(&DataType::Int64)?;
            raw.i64()?
                .into_iter()
                .enumerate()
                .map(|(row, v)| {
                    let dt = v.and_then(|v| match unit {
                        TimeUnit::Milliseconds => DateTime::from_timestamp_millis(v),
                        TimeUnit::Microseconds => DateTime::from_timestamp_micros(v),
                        TimeUnit::Nanoseconds => Some(DateTime::from_timestamp_nanos(v)),
                    });
                    dt.map(|dt| dt.date_naive())
                        .ok_or_else(|| FrameError::InvalidDate {
                            row,
                            value: format!("{v:?}"),
                        })
                })
                .collect()
        }
        _ => {
            let text = series.cast(&DataType::String)?;
            text.str()?
                .into_iter()
                .enumerate()
                .map(|(row, s)| parse_date_str(row, s))
                .collect()
        }
    }
}

/// Build typed bars from a price frame.
///
/// - `close` missing → `FrameError::MissingField("close")`
/// - `open`/`high`/`low` missing → NaN
/// - `volume` missing or NaN → 0
pub fn bars_from_frame(df: &DataFrame) -> Result<Vec<Bar>, FrameError> {
    let close = numeric_column(df, "close")?.ok_or_else(|| FrameError::MissingField("close".into()))?;
    let dates = date_column(df)?;
    let n = df.height();
    let nan_column = || vec![f64::NAN; n];

    let open = numeric_column(df, "open")?.unwrap_or_else(nan_column);
    let high = numeric_column(df, "high")?.unwrap_or_else(nan_column);
    let low = numeric_column(df, "low")?.unwrap_or_else(nan_column);
    let volume = numeric_column(df, "volume")?.unwrap_or_else(|| vec![0.0; n]);

    for (row, pair) in dates.windows(2).enumerate() {
        if pair[1] <= pair[0] {
            return Err(FrameError::UnorderedDates {
                row: row + 1,
                date: pair[1],
            });
        }
    }

    let bars = (0..n)
        .map(|i| Bar {
            date: dates[i],
            open: open[i],
            high: high[i],
            low: low[i],
            close: close[i],
            volume: if volume[i].is_nan() { 0.0 } else { volume[i] },
        })
        .collect();
    Ok(bars)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_frame() -> DataFrame {
        df!(
            "Date" => &["2024-01-02", "2024-01-03", "2024-01-04"],
            "Open" => &[100.0, 101.0, 102.0],
            "High" => &[101.0, 102.0, 103.0],
            "Low" => &[99.0, 100.0, 101.0],
            "Close" => &[100.5, 101.5, 102.5],
            "Volume" => &[1000i64, 1100, 1200]
        )
        .unwrap()
    }

    #[test]
    fn converts_standard_columns() {
        let bars = bars_from_frame(&sample_frame()).unwrap();
        assert_eq!(bars.len(), 3);
        assert_eq!(bars[0].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(bars[2].close, 102.5);
        assert_eq!(bars[1].volume, 1100.0);
    }

    #[test]
    fn missing_close_is_structural_error() {
        let df = sample_frame().drop("Close").unwrap();
        let err = bars_from_frame(&df).unwrap_err();
        assert!(matches!(err, FrameError::MissingField(ref f) if f == "close"));
    }

    #[test]
    fn missing_volume_is_zero_filled() {
        let df = sample_frame().drop("Volume").unwrap();
        let bars = bars_from_frame(&df).unwrap();
        assert!(bars.iter().all(|b| b.volume == 0.0));
    }

    #[test]
    fn missing_high_low_become_nan() {
        let df = sample_frame().drop("High").unwrap().drop("Low").unwrap();
        let bars = bars_from_frame(&df).unwrap();
        assert!(bars[0].high.is_nan());
        assert!(bars[0].low.is_nan());
        assert_eq!(bars[0].close, 100.5);
    }

    #[test]
    fn unparsable_numbers_become_nan() {
        let df = df!(
            "date" => &["2024-01-02", "2024-01-03"],
            "close" => &["10.5", "n/a"],
            "volume" => &["100", "oops"]
        )
        .unwrap();
        let bars = bars_from_frame(&df).unwrap();
        assert_eq!(bars[0].close, 10.5);
        assert!(bars[1].close.is_nan());
        assert_eq!(bars[1].volume, 0.0);
    }

    #[test]
    fn timestamp_strings_keep_the_day() {
        let df = df!(
            "Date" => &["2024-01-02 00:00:00+05:30", "2024-01-03 00:00:00+05:30"],
            "Close" => &[1.0, 2.0]
        )
        .unwrap();
        let bars = bars_from_frame(&df).unwrap();
        assert_eq!(bars[1].date, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
    }

    #[test]
    fn zoned_timestamps_keep_the_exchange_day() {
        // 2024-01-02 and 2024-01-03 at midnight IST, i.e. 18:30 UTC the day before
        let stamps = Series::new("date".into(), &[1_704_133_800_000i64, 1_704_220_200_000]);
        let zoned = stamps
            .cast(&DataType::Datetime(TimeUnit::Milliseconds, Some("Asia/Kolkata".into())))
            .unwrap();
        let df = DataFrame::new(vec![
            zoned.into(),
            Series::new("close".into(), &[10.0, 11.0]).into(),
        ])
        .unwrap();
        let bars = bars_from_frame(&df).unwrap();
        assert_eq!(bars[0].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(bars[1].date, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
    }

    #[test]
    fn rejects_unordered_dates() {
        let df = df!(
            "Date" => &["2024-01-03", "2024-01-02"],
            "Close" => &[1.0, 2.0]
        )
        .unwrap();
        assert!(matches!(
            bars_from_frame(&df),
            Err(FrameError::UnorderedDates { row: 1, .. })
        ));
    }

    #[test]
    fn missing_date_column() {
        let df = df!("Close" => &[1.0, 2.0]).unwrap();
        assert!(matches!(
            bars_from_frame(&df),
            Err(FrameError::MissingField(ref f)) if f == "date"
        ));
    }
}
