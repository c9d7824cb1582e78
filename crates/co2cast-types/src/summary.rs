//! Descriptive statistics result types.

use serde::{Deserialize, Serialize};

/// A descriptive statistic reported for each numeric field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Statistic {
    /// Number of defined values.
    Count,
    /// Arithmetic mean.
    Mean,
    /// Sample standard deviation.
    Std,
    /// Minimum.
    Min,
    /// 25th percentile.
    P25,
    /// Median.
    P50,
    /// 75th percentile.
    P75,
    /// Maximum.
    Max,
}

impl Statistic {
    /// Returns the display label of the statistic.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::Mean => "mean",
            Self::Std => "std",
            Self::Min => "min",
            Self::P25 => "25%",
            Self::P50 => "50%",
            Self::P75 => "75%",
            Self::Max => "max",
        }
    }

    /// Returns all statistics in report order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Count,
            Self::Mean,
            Self::Std,
            Self::Min,
            Self::P25,
            Self::P50,
            Self::P75,
            Self::Max,
        ]
    }
}

impl std::fmt::Display for Statistic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Statistics of a single numeric field.
///
/// Every statistic is `None` when the field has no defined values; `std` is
/// also `None` when fewer than two values are defined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSummary {
    /// Field name.
    pub field: String,
    /// Number of defined values.
    pub count: Option<usize>,
    /// Arithmetic mean.
    pub mean: Option<f64>,
    /// Sample standard deviation (divisor n - 1).
    pub std: Option<f64>,
    /// Minimum value.
    pub min: Option<f64>,
    /// 25th percentile.
    #[serde(rename = "25%")]
    pub p25: Option<f64>,
    /// Median.
    #[serde(rename = "50%")]
    pub p50: Option<f64>,
    /// 75th percentile.
    #[serde(rename = "75%")]
    pub p75: Option<f64>,
    /// Maximum value.
    pub max: Option<f64>,
}

impl FieldSummary {
    /// Creates a summary with every statistic undefined.
    #[must_use]
    pub fn undefined(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            count: None,
            mean: None,
            std: None,
            min: None,
            p25: None,
            p50: None,
            p75: None,
            max: None,
        }
    }

    /// Returns the value of a statistic.
    #[must_use]
    pub fn get(&self, statistic: Statistic) -> Option<f64> {
        match statistic {
            Statistic::Count => self.count.map(|c| c as f64),
            Statistic::Mean => self.mean,
            Statistic::Std => self.std,
            Statistic::Min => self.min,
            Statistic::P25 => self.p25,
            Statistic::P50 => self.p50,
            Statistic::P75 => self.p75,
            Statistic::Max => self.max,
        }
    }

    /// Returns true if no statistic is defined.
    #[must_use]
    pub fn is_undefined(&self) -> bool {
        Statistic::all().iter().all(|s| self.get(*s).is_none())
    }
}

/// Statistics of every numeric field of a series.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SummaryResult {
    fields: Vec<FieldSummary>,
}

impl SummaryResult {
    /// Creates a summary from per-field statistics.
    #[must_use]
    pub const fn new(fields: Vec<FieldSummary>) -> Self {
        Self { fields }
    }

    /// Returns the statistics of a field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldSummary> {
        self.fields.iter().find(|s| s.field == field)
    }

    /// Returns an iterator over the per-field statistics.
    pub fn iter(&self) -> impl Iterator<Item = &FieldSummary> {
        self.fields.iter()
    }

    /// Returns the number of summarized fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no field was summarized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns true if every statistic of every field is undefined.
    #[must_use]
    pub fn is_undefined(&self) -> bool {
        self.fields.iter().all(FieldSummary::is_undefined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undefined_summary() {
        let summary = SummaryResult::new(vec![FieldSummary::undefined("co2")]);
        assert!(summary.is_undefined());
        assert!(summary.get("co2").unwrap().get(Statistic::Mean).is_none());
        assert!(summary.get("other").is_none());
    }

    #[test]
    fn test_statistic_labels() {
        let labels: Vec<_> = Statistic::all().iter().map(Statistic::label).collect();
        assert_eq!(
            labels,
            vec!["count", "mean", "std", "min", "25%", "50%", "75%", "max"]
        );
    }

    #[test]
    fn test_serialized_field_names() {
        let mut stats = FieldSummary::undefined("co2");
        stats.count = Some(1);
        stats.p25 = Some(2.5);
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"25%\":2.5"));
        assert!(json.contains("\"count\":1"));
    }
}
