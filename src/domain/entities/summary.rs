use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::entities::column::NUMERIC_COLUMNS;
use crate::domain::entities::row::CellValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Metric {
    Mean,
    Median,
    Mode,
    Sum,
    Deviation,
    Skewness,
    Kurtosis,
    Q1,
    Q2,
    Q3,
}

impl Metric {
    pub const ALL: [Metric; 10] = [
        Metric::Mean,
        Metric::Median,
        Metric::Mode,
        Metric::Sum,
        Metric::Deviation,
        Metric::Skewness,
        Metric::Kurtosis,
        Metric::Q1,
        Metric::Q2,
        Metric::Q3,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Metric::Mean => "mean",
            Metric::Median => "median",
            Metric::Mode => "mode",
            Metric::Sum => "sum",
            Metric::Deviation => "deviation",
            Metric::Skewness => "skewness",
            Metric::Kurtosis => "kurtosis",
            Metric::Q1 => "Q1",
            Metric::Q2 => "Q2",
            Metric::Q3 => "Q3",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Metric::ALL.into_iter().find(|metric| metric.key() == key)
    }

    pub fn label_key(self) -> &'static str {
        match self {
            Metric::Mean => "stats_mean",
            Metric::Median => "stats_median",
            Metric::Mode => "stats_mode",
            Metric::Sum => "stats_sum",
            Metric::Deviation => "stats_std_dev",
            Metric::Skewness => "stats_skewness",
            Metric::Kurtosis => "stats_kurtosis",
            Metric::Q1 => "stats_q1",
            Metric::Q2 => "stats_q2",
            Metric::Q3 => "stats_q3",
        }
    }

    pub fn label_fallback(self) -> &'static str {
        match self {
            Metric::Mean => "Mean",
            Metric::Median => "Median",
            Metric::Mode => "Mode",
            Metric::Sum => "Sum",
            Metric::Deviation => "Std. deviation",
            Metric::Skewness => "Skewness",
            Metric::Kurtosis => "Kurtosis",
            Metric::Q1 => "Quartile Q1",
            Metric::Q2 => "Quartile Q2",
            Metric::Q3 => "Quartile Q3",
        }
    }
}

/// Per-mode statistics computed by the backend, `metric -> column -> value`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SummarySnapshot {
    values: BTreeMap<Metric, BTreeMap<String, CellValue>>,
}

impl<'de> Deserialize<'de> for SummarySnapshot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = BTreeMap::<String, BTreeMap<String, CellValue>>::deserialize(deserializer)?;
        let values = raw
            .into_iter()
            .filter_map(|(key, columns)| Metric::from_key(&key).map(|metric| (metric, columns)))
            .collect();
        Ok(Self { values })
    }
}

impl SummarySnapshot {
    pub fn insert(&mut self, metric: Metric, column: &str, value: CellValue) {
        self.values
            .entry(metric)
            .or_default()
            .insert(column.to_string(), value);
    }

    pub fn get(&self, metric: Metric, column: &str) -> Option<&CellValue> {
        self.values.get(&metric).and_then(|columns| columns.get(column))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DiffCell {
    Delta(f64),
    NotComparable,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiffEntry {
    pub delta: DiffCell,
    pub normal: Option<CellValue>,
    pub prognosis: Option<CellValue>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DiffTable {
    cells: BTreeMap<(Metric, String), DiffEntry>,
}

impl DiffTable {
    /// `prognosis - normal` for every metric and catalog column. Only JSON
    /// numbers on both sides are differenced.
    pub fn between(normal: &SummarySnapshot, prognosis: &SummarySnapshot) -> Self {
        let mut cells = BTreeMap::new();
        for metric in Metric::ALL {
            for column in NUMERIC_COLUMNS.iter() {
                let normal_value = normal.get(metric, column.key).cloned();
                let prognosis_value = prognosis.get(metric, column.key).cloned();
                let delta = match (&normal_value, &prognosis_value) {
                    (Some(CellValue::Number(n)), Some(CellValue::Number(p)))
                        if n.is_finite() && p.is_finite() =>
                    {
                        DiffCell::Delta(p - n)
                    }
                    _ => DiffCell::NotComparable,
                };
                cells.insert(
                    (metric, column.key.to_string()),
                    DiffEntry {
                        delta,
                        normal: normal_value,
                        prognosis: prognosis_value,
                    },
                );
            }
        }
        Self { cells }
    }

    pub fn get(&self, metric: Metric, column: &str) -> Option<&DiffEntry> {
        self.cells.get(&(metric, column.to_string()))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quartiles {
    #[serde(rename = "Q1")]
    pub q1: f64,
    #[serde(rename = "Q2")]
    pub q2: f64,
    #[serde(rename = "Q3")]
    pub q3: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatKind {
    Mean,
    Median,
    Mode,
    Sum,
    Deviation,
    Skewness,
    Kurtosis,
    Quartiles,
}

impl StatKind {
    pub fn endpoint(self) -> &'static str {
        match self {
            StatKind::Mean => "/mean",
            StatKind::Median => "/median",
            StatKind::Mode => "/mode",
            StatKind::Sum => "/sum",
            StatKind::Deviation => "/deviation",
            StatKind::Skewness => "/skewness",
            StatKind::Kurtosis => "/kurtosis",
            StatKind::Quartiles => "/quartiles",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColumnStats {
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub mode: Option<CellValue>,
    pub sum: Option<f64>,
    pub deviation: Option<f64>,
    pub skewness: Option<f64>,
    pub kurtosis: Option<f64>,
    pub quartiles: Option<Quartiles>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NumericGeneration {
    #[serde(default)]
    pub samples: Vec<f64>,
    pub mu: f64,
    pub sigma: f64,
    pub distribution: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CategoricalGeneration {
    #[serde(default)]
    pub samples: Vec<CellValue>,
    #[serde(default)]
    pub choices: Vec<CellValue>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PrognosisDetails {
    pub source_rows: u64,
    pub total_count: u64,
    #[serde(default)]
    pub numeric: BTreeMap<String, NumericGeneration>,
    #[serde(default)]
    pub categorical: BTreeMap<String, CategoricalGeneration>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_ignores_unknown_metrics() {
        let snapshot: SummarySnapshot = serde_json::from_str(
            r#"{"mean":{"income":1000},"Q1":{"income":500},"variance":{"income":3}}"#,
        )
        .expect("snapshot should deserialize");

        assert_eq!(
            snapshot.get(Metric::Mean, "income"),
            Some(&CellValue::Number(1000.0))
        );
        assert_eq!(
            snapshot.get(Metric::Q1, "income"),
            Some(&CellValue::Number(500.0))
        );
    }

    #[test]
    fn diff_marks_missing_operands_not_comparable() {
        let mut normal = SummarySnapshot::default();
        normal.insert(Metric::Sum, "points", CellValue::Number(10.0));
        let prognosis = SummarySnapshot::default();

        let table = DiffTable::between(&normal, &prognosis);
        let entry = table.get(Metric::Sum, "points").expect("cell should exist");

        assert_eq!(entry.delta, DiffCell::NotComparable);
        assert_eq!(entry.normal, Some(CellValue::Number(10.0)));
        assert_eq!(entry.prognosis, None);
        assert_eq!(table.len(), Metric::ALL.len() * NUMERIC_COLUMNS.len());
    }

    #[test]
    fn prognosis_details_deserialize() {
        let details: PrognosisDetails = serde_json::from_str(
            r#"{"source_rows":50,"total_count":500,
                "numeric":{"income":{"samples":[1.0,2.0],"mu":1.5,"sigma":0.5,"distribution":"normal"}},
                "categorical":{"city":{"samples":["Warsaw"],"choices":["Warsaw","Berlin"]}}}"#,
        )
        .expect("details should deserialize");

        assert_eq!(details.source_rows, 50);
        assert_eq!(details.numeric["income"].mu, 1.5);
        assert_eq!(details.categorical["city"].choices.len(), 2);
    }
}
