use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::entities::dataset::Mode;
use crate::i18n::collation::TextCollator;

pub const NAME_COLUMN: &str = "name";
pub const DATASET_COLUMN: &str = "dataset";
pub const DATASET_CODE_COLUMN: &str = "dataset_code";

/// A single cell as delivered by the backend. JSON values that are neither
/// scalars nor null are kept as their textual JSON form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl CellValue {
    /// Numeric view of the cell. Only finite numbers and text that trims to a
    /// finite decimal count; booleans, null and blank text are not numbers.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(value) if value.is_finite() => Some(*value),
            CellValue::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
            }
            _ => None,
        }
    }

    /// Loose boolean reading used for display. Accepts the yes/no spellings
    /// of every supported UI language.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Bool(value) => Some(*value),
            CellValue::Number(value) if *value == 1.0 => Some(true),
            CellValue::Number(value) if *value == 0.0 => Some(false),
            CellValue::Text(text) => parse_bool_text(text),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Plain, non-localized text of the value.
    pub fn plain_text(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Bool(value) => value.to_string(),
            CellValue::Number(value) => format_plain_number(*value),
            CellValue::Text(text) => text.clone(),
            CellValue::Other(value) => value.to_string(),
        }
    }
}

const TRUE_WORDS: [&str; 8] = ["true", "yes", "y", "1", "tak", "ja", "是", "예"];
const FALSE_WORDS: [&str; 8] = ["false", "no", "n", "0", "nie", "nein", "否", "아니오"];

fn parse_bool_text(text: &str) -> Option<bool> {
    let lowered = text.trim().to_lowercase();
    if TRUE_WORDS.contains(&lowered.as_str()) {
        Some(true)
    } else if FALSE_WORDS.contains(&lowered.as_str()) {
        Some(false)
    } else {
        None
    }
}

pub fn format_plain_number(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetCode {
    Normal,
    Prognosis,
}

impl DatasetCode {
    pub fn as_str(self) -> &'static str {
        match self {
            DatasetCode::Normal => "normal",
            DatasetCode::Prognosis => "prognosis",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "normal" => Some(DatasetCode::Normal),
            "prognosis" => Some(DatasetCode::Prognosis),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    cells: BTreeMap<String, CellValue>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: &str, value: CellValue) -> Self {
        self.cells.insert(column.to_string(), value);
        self
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells.get(column)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.cells.contains_key(column)
    }

    fn text_of(&self, column: &str) -> Option<String> {
        self.get(column)
            .filter(|value| !value.is_null())
            .map(|value| value.plain_text().trim().to_lowercase())
    }

    /// Code used for filtering: the explicit `dataset_code`, or `normal` when
    /// the whole table is the normal dataset.
    pub fn filter_code(&self, mode: Mode) -> String {
        self.text_of(DATASET_CODE_COLUMN).unwrap_or_else(|| {
            if mode == Mode::Normal {
                DatasetCode::Normal.as_str().to_string()
            } else {
                String::new()
            }
        })
    }

    /// Code used for ordering by the synthetic `dataset` column. Outside the
    /// normal mode a missing code falls back to the display label.
    pub fn sort_code(&self, mode: Mode) -> String {
        self.text_of(DATASET_CODE_COLUMN).unwrap_or_else(|| {
            if mode == Mode::Normal {
                DatasetCode::Normal.as_str().to_string()
            } else {
                self.text_of(DATASET_COLUMN).unwrap_or_default()
            }
        })
    }

    pub fn dataset_code(&self, mode: Mode) -> Option<DatasetCode> {
        DatasetCode::parse(&self.filter_code(mode))
    }
}

/// Ordering between two optional cells: numeric when both normalize to
/// numbers, otherwise collated text for the active language.
pub fn compare_cells(
    left: Option<&CellValue>,
    right: Option<&CellValue>,
    collator: &TextCollator,
) -> Ordering {
    let left_number = left.and_then(CellValue::as_number);
    let right_number = right.and_then(CellValue::as_number);
    if let (Some(a), Some(b)) = (left_number, right_number) {
        return a.partial_cmp(&b).unwrap_or(Ordering::Equal);
    }

    let left_text = left.map(CellValue::plain_text).unwrap_or_default();
    let right_text = right.map(CellValue::plain_text).unwrap_or_default();
    collator.compare(&left_text, &right_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;

    #[test]
    fn numeric_text_is_numeric_but_blank_and_bool_are_not() {
        assert_eq!(CellValue::Text(" 42.5 ".into()).as_number(), Some(42.5));
        assert_eq!(CellValue::Text("".into()).as_number(), None);
        assert_eq!(CellValue::Text("NaN".into()).as_number(), None);
        assert_eq!(CellValue::Bool(true).as_number(), None);
        assert_eq!(CellValue::Null.as_number(), None);
    }

    #[test]
    fn loose_bool_accepts_localized_words() {
        assert_eq!(CellValue::Text("Tak".into()).as_bool(), Some(true));
        assert_eq!(CellValue::Text("nein".into()).as_bool(), Some(false));
        assert_eq!(CellValue::Text("아니오".into()).as_bool(), Some(false));
        assert_eq!(CellValue::Number(1.0).as_bool(), Some(true));
        assert_eq!(CellValue::Number(2.0).as_bool(), None);
        assert_eq!(CellValue::Text("Warsaw".into()).as_bool(), None);
    }

    #[test]
    fn rows_deserialize_from_untyped_json() {
        let row: Row = serde_json::from_str(
            r#"{"name":"Ann","income":1200.5,"loan_approved":true,"city":null,"dataset_code":"Prognosis"}"#,
        )
        .expect("row should deserialize");

        assert_eq!(row.get("income"), Some(&CellValue::Number(1200.5)));
        assert_eq!(row.get("loan_approved"), Some(&CellValue::Bool(true)));
        assert_eq!(row.get("city"), Some(&CellValue::Null));
        assert_eq!(row.dataset_code(Mode::Merged), Some(DatasetCode::Prognosis));
    }

    #[test]
    fn missing_dataset_code_defaults_to_normal_only_in_normal_mode() {
        let row = Row::new().with(DATASET_COLUMN, CellValue::Text("Prognosis".into()));

        assert_eq!(row.filter_code(Mode::Normal), "normal");
        assert_eq!(row.filter_code(Mode::Merged), "");
        assert_eq!(row.sort_code(Mode::Merged), "prognosis");
    }

    #[test]
    fn compare_prefers_numbers_then_text() {
        let collator = TextCollator::for_language(Language::En);
        let ten = CellValue::Text("10".into());
        let nine = CellValue::Number(9.0);
        assert_eq!(
            compare_cells(Some(&ten), Some(&nine), &collator),
            Ordering::Greater
        );

        let lower = CellValue::Text("apple".into());
        let upper = CellValue::Text("Banana".into());
        assert_eq!(
            compare_cells(Some(&lower), Some(&upper), &collator),
            Ordering::Less
        );
        assert_eq!(compare_cells(None, Some(&upper), &collator), Ordering::Less);
    }
}
