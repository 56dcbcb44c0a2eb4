//! End-to-end conversion of a JTL file into a [`Report`].
//!
//! Protocol-level (HTTP/API samplers) and browser-level (WebDriver samplers)
//! result files share the same layout, so both adapters run the same pipeline.

use std::fmt;
use std::io::Read;
use std::path::Path;

use chrono::{Local, TimeZone};

use crate::aggregate::{map_response_times, ninetieth_percentiles};
use crate::error::Jtl2JsonError;
use crate::jtl::{read_file, read_rows, JtlRow};
use crate::results::{assemble, Report};

/// Which kind of JMeter test produced the result file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// HTTP/API samplers.
    #[default]
    Protocol,
    /// Selenium WebDriver samplers.
    Browser,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Protocol => write!(f, "protocol"),
            Mode::Browser => write!(f, "browser"),
        }
    }
}

impl Mode {
    /// Convert a file, formatting the datetime in the local timezone.
    pub fn convert(self, path: impl AsRef<Path>) -> Result<Report, Jtl2JsonError> {
        self.convert_in(path, &Local)
    }

    /// Convert a file, formatting the datetime in `tz`.
    pub fn convert_in<Tz>(self, path: impl AsRef<Path>, tz: &Tz) -> Result<Report, Jtl2JsonError>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        tracing::debug!(mode = %self, "converting result file");
        convert_file(path, tz)
    }
}

/// Protocol-level results to [`Report`]. The test name is the path.
pub fn protocol_to_report(path: impl AsRef<Path>) -> Result<Report, Jtl2JsonError> {
    Mode::Protocol.convert(path)
}

/// Browser-level results to [`Report`]. The test name is the path.
pub fn browser_to_report(path: impl AsRef<Path>) -> Result<Report, Jtl2JsonError> {
    Mode::Browser.convert(path)
}

/// Read and convert a file, using its path as the test name.
pub fn convert_file<Tz>(path: impl AsRef<Path>, tz: &Tz) -> Result<Report, Jtl2JsonError>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let path = path.as_ref();
    let rows = read_file(path)?;
    convert_rows(path.display().to_string(), &rows, tz)
}

/// Read and convert an already opened stream.
pub fn convert_reader<R, Tz>(
    test_name: impl Into<String>,
    reader: R,
    tz: &Tz,
) -> Result<Report, Jtl2JsonError>
where
    R: Read,
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let rows = read_rows(reader)?;
    convert_rows(test_name, &rows, tz)
}

/// Run the pipeline on parsed rows: group, compute percentiles, assemble.
pub fn convert_rows<Tz>(
    test_name: impl Into<String>,
    rows: &[JtlRow],
    tz: &Tz,
) -> Result<Report, Jtl2JsonError>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    if rows.is_empty() {
        return Err(Jtl2JsonError::EmptyInput);
    }

    let response_times = map_response_times(rows)?;
    let percentiles = ninetieth_percentiles(&response_times)?;
    let report = assemble(test_name, rows, response_times, percentiles, tz)?;

    tracing::debug!(
        test_name = %report.test_name,
        labels = report.response_times.len(),
        samples = report.sample_count(),
        "assembled report"
    );
    Ok(report)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
