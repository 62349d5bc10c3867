use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericColumn {
    pub key: &'static str,
    pub label_key: &'static str,
    pub fallback: &'static str,
}

pub const NUMERIC_COLUMNS: [NumericColumn; 5] = [
    NumericColumn {
        key: "credit_score",
        label_key: "data_col_credit_score",
        fallback: "Credit score",
    },
    NumericColumn {
        key: "income",
        label_key: "data_col_income",
        fallback: "Income",
    },
    NumericColumn {
        key: "loan_amount",
        label_key: "data_col_loan_amount",
        fallback: "Loan amount",
    },
    NumericColumn {
        key: "points",
        label_key: "data_col_points",
        fallback: "Points",
    },
    NumericColumn {
        key: "years_employed",
        label_key: "data_col_years_employed",
        fallback: "Years employed",
    },
];

pub fn numeric_column(key: &str) -> Option<&'static NumericColumn> {
    NUMERIC_COLUMNS.iter().find(|column| column.key == key)
}

/// Label keys for every column the backend is known to return.
pub fn column_label_key(key: &str) -> Option<&'static str> {
    match key {
        "city" => Some("data_col_city"),
        "name" => Some("data_col_name"),
        "loan_approved" => Some("data_col_loan_approved"),
        "dataset" => Some("data_col_dataset"),
        other => numeric_column(other).map(|column| column.label_key),
    }
}

/// Which catalog columns are rendered. Keys outside the numeric catalog are
/// rejected so the selection can never name a column the table cannot show.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnSelection {
    selected: BTreeSet<&'static str>,
}

impl Default for ColumnSelection {
    fn default() -> Self {
        Self::all()
    }
}

impl ColumnSelection {
    pub fn all() -> Self {
        Self {
            selected: NUMERIC_COLUMNS.iter().map(|column| column.key).collect(),
        }
    }

    pub fn none() -> Self {
        Self {
            selected: BTreeSet::new(),
        }
    }

    pub fn from_keys<'a>(keys: impl IntoIterator<Item = &'a str>) -> Self {
        let mut selection = Self::none();
        for key in keys {
            selection.set(key, true);
        }
        selection
    }

    pub fn contains(&self, key: &str) -> bool {
        self.selected.contains(key)
    }

    pub fn set(&mut self, key: &str, selected: bool) -> bool {
        let Some(column) = numeric_column(key) else {
            return false;
        };
        if selected {
            self.selected.insert(column.key)
        } else {
            self.selected.remove(column.key)
        }
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Selected keys in catalog order.
    pub fn in_catalog_order(&self) -> Vec<&'static str> {
        NUMERIC_COLUMNS
            .iter()
            .map(|column| column.key)
            .filter(|key| self.selected.contains(key))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_ignores_unknown_columns_and_keeps_catalog_order() {
        let mut selection = ColumnSelection::none();
        assert!(selection.set("years_employed", true));
        assert!(selection.set("credit_score", true));
        assert!(!selection.set("city", true));

        assert_eq!(
            selection.in_catalog_order(),
            vec!["credit_score", "years_employed"]
        );
    }

    #[test]
    fn default_selection_is_the_full_catalog() {
        assert_eq!(ColumnSelection::default().len(), NUMERIC_COLUMNS.len());
    }
}
