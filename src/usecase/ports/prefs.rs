use crate::domain::entities::column::ColumnSelection;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrefsError {
    Message(String),
}

impl std::fmt::Display for PrefsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrefsError::Message(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for PrefsError {}

/// Durable key/value storage for UI preferences.
pub trait PreferencesStore: Send + Sync {
    fn load_value(&self, key: &str) -> Result<Option<String>, PrefsError>;
    fn save_value(&self, key: &str, value: &str) -> Result<(), PrefsError>;

    /// `Ok(None)` means nothing was stored for `view` yet.
    fn load_column_selection(&self, view: &str) -> Result<Option<ColumnSelection>, PrefsError>;
    fn save_column_selection(
        &self,
        view: &str,
        selection: &ColumnSelection,
    ) -> Result<(), PrefsError>;
}
