use std::collections::BTreeMap;

use crate::error::Jtl2JsonError;
use crate::jtl::{field, JtlRow, ELAPSED_COLUMN, LABEL_COLUMN};

/// Elapsed times (ms) grouped by sampler label, in row order.
pub type LabelSeries = BTreeMap<String, Vec<i64>>;

/// 90th-percentile elapsed time (ms) per sampler label.
pub type PercentileMap = BTreeMap<String, i64>;

/// Labels that never carry measured data: JMeter setup samplers and the
/// header row's `label` column name.
pub const EXCLUDED_LABELS: [&str; 3] = ["Setup Sampler", "Setup Request", "label"];

/// Whether rows with this label are left out of the report. Matching uses
/// Unicode simple case folding, so `ſetup ſampler` (U+017F) is excluded too.
pub fn is_excluded_label(label: &str) -> bool {
    EXCLUDED_LABELS
        .iter()
        .any(|excluded| equal_fold(excluded, label))
}

/// Case-insensitive comparison under simple (one-to-one) case folding.
fn equal_fold(a: &str, b: &str) -> bool {
    a.chars().map(fold_char).eq(b.chars().map(fold_char))
}

/// Map a char to a canonical member of its simple case-fold class. Chars
/// whose case mapping expands to several chars fold to themselves.
fn fold_char(c: char) -> char {
    let mut upper = c.to_uppercase();
    let u = match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    };
    let mut lower = u.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => u,
    }
}

// ---------------------------------------------------------------------------
// LabelAggregator
// ---------------------------------------------------------------------------

/// Collects elapsed times per label for a single report.
///
/// Owned by one pipeline run; nothing is shared between files.
#[derive(Debug, Default)]
pub struct LabelAggregator {
    series: LabelSeries,
    skipped: usize,
}

impl LabelAggregator {
    pub fn new() -> Self {
        Self {
            series: BTreeMap::new(),
            skipped: 0,
        }
    }

    /// Record one row. The elapsed field must be an integer even on rows
    /// whose label is excluded. `row_number` is one-based.
    pub fn record_row(&mut self, row: &[String], row_number: usize) -> Result<(), Jtl2JsonError> {
        let label = field(row, LABEL_COLUMN, row_number)?;
        let raw = field(row, ELAPSED_COLUMN, row_number)?;
        let elapsed: i64 = raw.parse().map_err(|e| {
            Jtl2JsonError::Parse(format!(
                "row {row_number}: elapsed '{raw}' is not an integer: {e}"
            ))
        })?;

        if is_excluded_label(label) {
            self.skipped += 1;
            return Ok(());
        }

        self.record(label, elapsed);
        Ok(())
    }

    /// Append an elapsed time to the series for `label`.
    pub fn record(&mut self, label: &str, elapsed_ms: i64) {
        self.series
            .entry(label.to_string())
            .or_default()
            .push(elapsed_ms);
    }

    /// Number of rows dropped because of an excluded label.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn into_series(self) -> LabelSeries {
        self.series
    }
}

/// Group the elapsed times of every row by label.
///
/// Any row with a non-integer elapsed field fails the whole call.
pub fn map_response_times(rows: &[JtlRow]) -> Result<LabelSeries, Jtl2JsonError> {
    let mut aggregator = LabelAggregator::new();
    for (i, row) in rows.iter().enumerate() {
        aggregator.record_row(row, i + 1)?;
    }

    tracing::debug!(
        labels = aggregator.series.len(),
        skipped = aggregator.skipped(),
        "grouped response times by label"
    );
    Ok(aggregator.into_series())
}

// ---------------------------------------------------------------------------
// Percentiles
// ---------------------------------------------------------------------------

/// Zero-based index of the 90th percentile in a sorted series of length `n`:
/// `floor(0.9 * n)`, nearest rank truncated toward zero with no
/// interpolation. For `n == 10` this is the maximum.
pub fn ninetieth_percentile_index(n: usize) -> usize {
    n * 9 / 10
}

/// 90th-percentile value of one label's series.
pub fn ninetieth_percentile(label: &str, values: &[i64]) -> Result<i64, Jtl2JsonError> {
    if values.is_empty() {
        tracing::warn!(label, "percentile requested for empty series");
        return Err(Jtl2JsonError::EmptySeries(label.to_string()));
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    Ok(sorted[ninetieth_percentile_index(sorted.len())])
}

/// Compute the 90th percentile for every label. The result has exactly the
/// same keys as `series`; an empty series fails the call.
pub fn ninetieth_percentiles(series: &LabelSeries) -> Result<PercentileMap, Jtl2JsonError> {
    let mut percentiles = BTreeMap::new();
    for (label, values) in series {
        percentiles.insert(label.clone(), ninetieth_percentile(label, values)?);
    }
    Ok(percentiles)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
