pub mod export;

use chrono::TimeZone;
use serde::{Deserialize, Serialize};

use crate::aggregate::{LabelSeries, PercentileMap};
use crate::error::Jtl2JsonError;
use crate::jtl::{field, format_datetime_in, JtlRow, TIMESTAMP_COLUMN};

/// Summary of one JTL result file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Identifier of the source, conventionally the input file path.
    #[serde(rename = "testname")]
    pub test_name: String,
    /// Start of the run, formatted as `Nov-14-23 10:13pm`.
    #[serde(rename = "datetime")]
    pub date_time: String,
    /// 90th-percentile elapsed time (ms) per label.
    #[serde(rename = "ninetiethpercentiles")]
    pub ninetieth_percentiles: PercentileMap,
    /// Every recorded elapsed time (ms) per label, in row order.
    #[serde(rename = "responsetimes")]
    pub response_times: LabelSeries,
}

impl Report {
    /// Labels covered by the report, in key order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.response_times.keys().map(String::as_str)
    }

    /// Total number of samples across all labels.
    pub fn sample_count(&self) -> usize {
        self.response_times.values().map(Vec::len).sum()
    }
}

/// Build a [`Report`] from the parsed rows and the aggregated data.
///
/// The datetime comes from the first field of the first row, formatted in
/// `tz`. An empty row sequence has no timestamp and is rejected.
pub fn assemble<Tz>(
    test_name: impl Into<String>,
    rows: &[JtlRow],
    response_times: LabelSeries,
    ninetieth_percentiles: PercentileMap,
    tz: &Tz,
) -> Result<Report, Jtl2JsonError>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let first = rows.first().ok_or(Jtl2JsonError::EmptyInput)?;
    let timestamp = field(first, TIMESTAMP_COLUMN, 1)?;
    let date_time = format_datetime_in(timestamp, tz)?;

    Ok(Report {
        test_name: test_name.into(),
        date_time,
        ninetieth_percentiles,
        response_times,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
