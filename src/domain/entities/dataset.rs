use serde::{Deserialize, Serialize};

use crate::domain::entities::row::{DatasetCode, Row};
use crate::i18n::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Normal,
    Prognosis,
    Merged,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Normal, Mode::Prognosis, Mode::Merged];

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Normal => "normal",
            Mode::Prognosis => "prognosis",
            Mode::Merged => "merged",
        }
    }

    pub fn label_key(self) -> &'static str {
        match self {
            Mode::Normal => "ui_mode_normal",
            Mode::Prognosis => "ui_mode_prognosis",
            Mode::Merged => "ui_mode_merged",
        }
    }

    pub fn label_fallback(self) -> &'static str {
        match self {
            Mode::Normal => "Normalne",
            Mode::Prognosis => "Prognoza",
            Mode::Merged => "Połączone",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Page {
    pub data: Vec<Row>,
    #[serde(default)]
    pub has_next: bool,
    #[serde(default)]
    pub has_prev: bool,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub per_page: u32,
    pub page: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageQuery {
    pub page: u32,
    pub language: Language,
    pub mode: Mode,
}

impl PageQuery {
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("page", self.page.to_string()),
            ("language", self.language.code().to_string()),
            ("mode", self.mode.as_str().to_string()),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn apply(self, ordering: std::cmp::Ordering) -> std::cmp::Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Asc => " ▲",
            SortDirection::Desc => " ▼",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SortState {
    pub key: Option<String>,
    pub direction: SortDirection,
}

impl SortState {
    pub fn by(key: &str, direction: SortDirection) -> Self {
        Self {
            key: Some(key.to_string()),
            direction,
        }
    }

    /// Header click: the active key flips direction, any other key starts
    /// ascending. `dataset_code` is never a sort key.
    pub fn toggled(&self, key: &str) -> Self {
        if key == crate::domain::entities::row::DATASET_CODE_COLUMN {
            return self.clone();
        }
        if self.key.as_deref() == Some(key) {
            Self {
                key: self.key.clone(),
                direction: self.direction.flipped(),
            }
        } else {
            Self::by(key, SortDirection::Asc)
        }
    }

    /// Header text for `column`, with the direction arrow when it is the
    /// active sort key.
    pub fn header_label(&self, column: &str, label: String) -> String {
        if self.key.as_deref() == Some(column) {
            format!("{label}{}", self.direction.arrow())
        } else {
            label
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DatasetFilter {
    #[default]
    All,
    Only(DatasetCode),
}

impl DatasetFilter {
    /// Badge click in merged mode: selecting the active code clears the filter.
    pub fn toggled(self, code: DatasetCode) -> Self {
        if self == DatasetFilter::Only(code) {
            DatasetFilter::All
        } else {
            DatasetFilter::Only(code)
        }
    }
}
