use std::collections::HashMap;
use std::sync::OnceLock;

use tracing::warn;

use super::Language;

type Table = HashMap<String, String>;

static TABLES: OnceLock<HashMap<Language, Table>> = OnceLock::new();

fn source(language: Language) -> &'static str {
    match language {
        Language::Pl => include_str!("../../assets/translations/pl.json"),
        Language::En => include_str!("../../assets/translations/en.json"),
        Language::De => include_str!("../../assets/translations/de.json"),
        Language::Zh => include_str!("../../assets/translations/zh.json"),
        Language::Ko => include_str!("../../assets/translations/ko.json"),
    }
}

fn parse(language: Language) -> Table {
    match serde_json::from_str::<Table>(source(language)) {
        Ok(table) => table,
        Err(err) => {
            warn!(language = %language, error = %err, "translation table is malformed");
            Table::new()
        }
    }
}

fn tables() -> &'static HashMap<Language, Table> {
    TABLES.get_or_init(|| {
        Language::ALL
            .into_iter()
            .map(|language| (language, parse(language)))
            .collect()
    })
}

pub(super) fn lookup(language: Language, key: &str) -> Option<&'static str> {
    tables()
        .get(&language)
        .and_then(|table| table.get(key))
        .map(String::as_str)
}
