use std::path::Path;

use crate::error::Jtl2JsonError;

use super::Report;

/// Export a report as compact JSON.
pub fn export_json(report: &Report) -> Result<String, Jtl2JsonError> {
    Ok(serde_json::to_string(report)?)
}

/// Export a report as pretty-printed JSON.
pub fn export_json_pretty(report: &Report) -> Result<String, Jtl2JsonError> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Parse a previously exported report.
pub fn import_json(json: &str) -> Result<Report, Jtl2JsonError> {
    Ok(serde_json::from_str(json)?)
}

/// Write a report to disk, compact or pretty-printed.
pub fn write_report(report: &Report, path: impl AsRef<Path>, pretty: bool) -> Result<(), Jtl2JsonError> {
    let content = if pretty {
        export_json_pretty(report)?
    } else {
        export_json(report)?
    };
    std::fs::write(path.as_ref(), content)?;
    Ok(())
}
