//! Localized UI text and the process-wide language selection.
//!
//! String tables are bundled JSON files parsed once on first use. The active
//! language lives in a [`LanguageStore`] that callers own and pass around;
//! changing it persists the choice and notifies subscribers synchronously.

pub mod collation;
mod tables;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::usecase::ports::prefs::PreferencesStore;

pub const LANGUAGE_STORAGE_KEY: &str = "app_language";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    Pl,
    En,
    De,
    Zh,
    Ko,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::Pl,
        Language::En,
        Language::De,
        Language::Zh,
        Language::Ko,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Language::Pl => "pl",
            Language::En => "en",
            Language::De => "de",
            Language::Zh => "zh",
            Language::Ko => "ko",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Language::Pl => "Polski",
            Language::En => "English",
            Language::De => "Deutsch",
            Language::Zh => "中文",
            Language::Ko => "한국어",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Language::ALL
            .into_iter()
            .find(|language| language.code() == code.trim())
    }

    pub fn number_locale(self) -> num_format::Locale {
        match self {
            Language::Pl => num_format::Locale::pl,
            Language::En => num_format::Locale::en,
            Language::De => num_format::Locale::de,
            Language::Zh => num_format::Locale::zh,
            Language::Ko => num_format::Locale::ko,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translator {
    language: Language,
}

impl Translator {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Looks `key` up in the active table, then falls back to `fallback`,
    /// then to the key itself.
    pub fn t(&self, key: &str, fallback: Option<&str>) -> String {
        match tables::lookup(self.language, key) {
            Some(text) => text.to_string(),
            None => fallback.unwrap_or(key).to_string(),
        }
    }

    pub fn t_or(&self, key: &str, fallback: &str) -> String {
        self.t(key, Some(fallback))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn Fn(Language)>;

pub struct LanguageStore {
    language: Language,
    prefs: Option<Arc<dyn PreferencesStore>>,
    listeners: HashMap<SubscriptionId, Listener>,
    next_subscription: u64,
}

impl fmt::Debug for LanguageStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LanguageStore")
            .field("language", &self.language)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl LanguageStore {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            prefs: None,
            listeners: HashMap::new(),
            next_subscription: 0,
        }
    }

    /// Restores the persisted language. Missing, unreadable or unsupported
    /// values fall back to the default without error.
    pub fn restore(prefs: Arc<dyn PreferencesStore>) -> Self {
        let language = match prefs.load_value(LANGUAGE_STORAGE_KEY) {
            Ok(Some(code)) => Language::from_code(&code).unwrap_or_else(|| {
                debug!(stored = %code, "unsupported stored language, using default");
                Language::default()
            }),
            Ok(None) => Language::default(),
            Err(err) => {
                warn!(error = %err, "failed to read stored language");
                Language::default()
            }
        };
        let mut store = Self::new(language);
        store.prefs = Some(prefs);
        store
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn translator(&self) -> Translator {
        Translator::new(self.language)
    }

    /// Returns `false` when `language` is already active.
    pub fn set_language(&mut self, language: Language) -> bool {
        if language == self.language {
            return false;
        }
        self.language = language;

        if let Some(prefs) = &self.prefs {
            if let Err(err) = prefs.save_value(LANGUAGE_STORAGE_KEY, language.code()) {
                warn!(error = %err, language = %language, "failed to persist language");
            }
        }
        for listener in self.listeners.values() {
            listener(language);
        }
        true
    }

    pub fn set_language_code(&mut self, code: &str) -> bool {
        match Language::from_code(code) {
            Some(language) => self.set_language(language),
            None => false,
        }
    }

    pub fn subscribe(&mut self, listener: impl Fn(Language) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.insert(id, Box::new(listener));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(&id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn translator_falls_back_to_fallback_then_key() {
        let t = Translator::new(Language::En);

        assert_eq!(t.t("unknown_key", Some("Fallback")), "Fallback");
        assert_eq!(t.t("unknown_key", None), "unknown_key");
        assert_eq!(t.t("ui_next", Some("ignored")), "Next");
    }

    #[test]
    fn every_language_has_a_table() {
        for language in Language::ALL {
            let t = Translator::new(language);
            assert_ne!(
                t.t("ui_tab_data", None),
                "ui_tab_data",
                "missing ui_tab_data for {language}"
            );
        }
    }

    #[test]
    fn store_notifies_subscribers_once_per_change() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut store = LanguageStore::new(Language::Pl);
        let sink = seen.clone();
        let id = store.subscribe(move |language| sink.borrow_mut().push(language));

        assert!(store.set_language(Language::De));
        assert!(!store.set_language(Language::De));
        assert!(store.unsubscribe(id));
        assert!(store.set_language(Language::Ko));

        assert_eq!(*seen.borrow(), vec![Language::De]);
        assert_eq!(store.translator().language(), Language::Ko);
    }

    #[test]
    fn unknown_language_code_is_ignored() {
        let mut store = LanguageStore::new(Language::Pl);
        assert!(!store.set_language_code("fr"));
        assert_eq!(store.language(), Language::Pl);
    }
}
