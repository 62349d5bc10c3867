use std::sync::Arc;

use anyhow::Result;
use dioxus::prelude::*;
use tracing::info;

use crate::config::ApiConfig;
use crate::domain::entities::dataset::Mode;
use crate::domain::projection::ViewOptions;
use crate::i18n::{Language, LanguageStore, Translator};
use crate::infra::http::client::HttpClient;
use crate::infra::images::object_url::ObjectUrlRegistry;
use crate::infra::sqlite::repo::SqlitePreferences;
use crate::platform::desktop::paths::default_db_path;
use crate::usecase::ports::prefs::PreferencesStore;
use crate::usecase::services::table_view::{restore_selection, HeaderLabels, TableViewModel, DATA_VIEW};

/// Long-lived collaborators shared by every view.
#[derive(Clone)]
pub struct Services {
    pub client: HttpClient,
    pub prefs: Arc<dyn PreferencesStore>,
    pub registry: ObjectUrlRegistry,
}

impl PartialEq for Services {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.prefs, &other.prefs) && self.client.base_url() == other.client.base_url()
    }
}

impl Services {
    pub fn init() -> Result<Self> {
        let config = ApiConfig::from_env();
        info!(base_url = %config.base_url, "using dashboard api");
        let client = HttpClient::new(&config)?;
        let prefs = SqlitePreferences::open(default_db_path()?)?;
        Ok(Self {
            client,
            prefs: Arc::new(prefs),
            registry: ObjectUrlRegistry::new(),
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Data,
    Statistics,
    Charts,
    Chernoff,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Data, Tab::Statistics, Tab::Charts, Tab::Chernoff];

    pub fn label_key(self) -> &'static str {
        match self {
            Tab::Data => "ui_tab_data",
            Tab::Statistics => "ui_tab_statistics",
            Tab::Charts => "ui_tab_charts",
            Tab::Chernoff => "ui_tab_chernoff",
        }
    }
}

#[derive(Clone, Copy)]
pub struct AppState {
    pub language_store: Signal<LanguageStore>,
    /// Mirror of the store's language, kept current through a subscription.
    pub language: Signal<Language>,
    pub tab: Signal<Tab>,
    pub table: Signal<TableViewModel>,
    pub table_mode: Signal<Mode>,
    pub headers: Signal<HeaderLabels>,
    pub view_options: Signal<ViewOptions>,
    pub status: Signal<String>,
}

impl AppState {
    pub fn new(prefs: Arc<dyn PreferencesStore>) -> Self {
        let store_prefs = prefs.clone();
        let mut language_store = use_signal(move || LanguageStore::restore(store_prefs));
        let language = use_signal(|| language_store.peek().language());
        use_hook(move || {
            language_store.write().subscribe(move |next| {
                let mut mirror = language;
                mirror.set(next);
            })
        });

        let initial_language = *language.peek();
        Self {
            language_store,
            language,
            tab: use_signal(Tab::default),
            table: use_signal(move || TableViewModel::new(initial_language, Mode::Normal)),
            table_mode: use_signal(|| Mode::Normal),
            headers: use_signal(HeaderLabels::default),
            view_options: use_signal(move || ViewOptions {
                selection: restore_selection(prefs.as_ref(), DATA_VIEW),
                ..ViewOptions::default()
            }),
            status: use_signal(String::new),
        }
    }

    /// Translator for the current language. Reading it subscribes the caller.
    pub fn translator(&self) -> Translator {
        Translator::new((self.language)())
    }
}
