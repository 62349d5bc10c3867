use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::domain::entities::column::{ColumnSelection, NUMERIC_COLUMNS};
use crate::infra::sqlite::queries::{
    load_column_selection, load_preference, upsert_column_selection, upsert_preference,
};
use crate::infra::sqlite::schema::init_db;
use crate::usecase::ports::prefs::{PreferencesStore, PrefsError};

pub struct SqlitePreferences {
    pub db_path: PathBuf,
}

impl SqlitePreferences {
    pub fn open(db_path: PathBuf) -> Result<Self, PrefsError> {
        init_db(&db_path).map_err(|err| PrefsError::Message(err.to_string()))?;
        Ok(Self { db_path })
    }
}

impl PreferencesStore for SqlitePreferences {
    fn load_value(&self, key: &str) -> Result<Option<String>, PrefsError> {
        load_preference(&self.db_path, key).map_err(|err| PrefsError::Message(err.to_string()))
    }

    fn save_value(&self, key: &str, value: &str) -> Result<(), PrefsError> {
        upsert_preference(&self.db_path, key, value)
            .map_err(|err| PrefsError::Message(err.to_string()))
    }

    fn load_column_selection(&self, view: &str) -> Result<Option<ColumnSelection>, PrefsError> {
        let stored = load_column_selection(&self.db_path, view)
            .map_err(|err| PrefsError::Message(err.to_string()))?;
        if stored.is_empty() {
            return Ok(None);
        }
        // Columns missing from the stored set (added to the catalog later)
        // default to selected.
        let mut selection = ColumnSelection::all();
        for (column_key, selected) in stored {
            selection.set(&column_key, selected);
        }
        Ok(Some(selection))
    }

    fn save_column_selection(
        &self,
        view: &str,
        selection: &ColumnSelection,
    ) -> Result<(), PrefsError> {
        let flags: BTreeMap<String, bool> = NUMERIC_COLUMNS
            .iter()
            .map(|column| (column.key.to_string(), selection.contains(column.key)))
            .collect();
        upsert_column_selection(&self.db_path, view, &flags)
            .map_err(|err| PrefsError::Message(err.to_string()))
    }
}
