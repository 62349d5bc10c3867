use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::domain::entities::column::ColumnSelection;
use crate::domain::entities::dataset::{Mode, Page, PageQuery};
use crate::domain::entities::row::Row;
use crate::i18n::Language;
use crate::usecase::ports::prefs::PreferencesStore;
use crate::usecase::ports::remote::{FetchError, RemoteClient};
use crate::usecase::services::dispatch::{RequestTracker, Ticket};

pub const DATA_VIEW: &str = "data";

#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(FetchError),
}

/// A page fetch the caller must perform and hand back to
/// [`TableViewModel::settle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub ticket: Ticket,
    pub query: PageQuery,
}

/// Paging state of the data table. Mutators return the request to run; a
/// settled response is applied only when it is the latest one dispatched and
/// still matches the current language and mode.
#[derive(Debug, Default)]
pub struct TableViewModel {
    language: Language,
    mode: Mode,
    /// Page of the latest request.
    page: u32,
    /// Page the rows on screen belong to.
    loaded_page: u32,
    state: LoadState,
    rows: Vec<Row>,
    has_next: bool,
    has_prev: bool,
    total: u64,
    loaded_for: Option<(Language, Mode)>,
    rows_revision: u64,
    tracker: RequestTracker,
}

impl TableViewModel {
    pub fn new(language: Language, mode: Mode) -> Self {
        Self {
            language,
            mode,
            page: 1,
            loaded_page: 1,
            ..Self::default()
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn current_page(&self) -> u32 {
        self.loaded_page
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading)
    }

    pub fn error(&self) -> Option<&FetchError> {
        match &self.state {
            LoadState::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Bumped every time `rows` is replaced or cleared.
    pub fn rows_revision(&self) -> u64 {
        self.rows_revision
    }

    pub fn has_next(&self) -> bool {
        self.has_next
    }

    pub fn has_prev(&self) -> bool {
        self.has_prev
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Rows from an earlier successful load kept on screen after a failure.
    pub fn is_stale(&self) -> bool {
        self.error().is_some() && !self.rows.is_empty()
    }

    pub fn mount(&mut self) -> PageRequest {
        self.page = 1;
        self.dispatch()
    }

    pub fn set_language(&mut self, language: Language) -> Option<PageRequest> {
        if language == self.language {
            return None;
        }
        self.language = language;
        self.page = 1;
        Some(self.dispatch())
    }

    pub fn set_mode(&mut self, mode: Mode) -> Option<PageRequest> {
        if mode == self.mode {
            return None;
        }
        self.mode = mode;
        self.page = 1;
        Some(self.dispatch())
    }

    pub fn next_page(&mut self) -> Option<PageRequest> {
        self.go_to_page(self.loaded_page.saturating_add(1))
    }

    pub fn prev_page(&mut self) -> Option<PageRequest> {
        self.go_to_page(self.loaded_page.saturating_sub(1))
    }

    pub fn go_to_page(&mut self, page: u32) -> Option<PageRequest> {
        if page < 1 {
            debug!(page, "rejected page below 1");
            return None;
        }
        if page > self.loaded_page && !self.has_next {
            debug!(page, current = self.loaded_page, "rejected move past last page");
            return None;
        }
        self.page = page;
        Some(self.dispatch())
    }

    pub fn reload(&mut self) -> PageRequest {
        self.dispatch()
    }

    fn dispatch(&mut self) -> PageRequest {
        let ticket = self.tracker.dispatch();
        self.state = LoadState::Loading;
        PageRequest {
            ticket,
            query: PageQuery {
                page: self.page,
                language: self.language,
                mode: self.mode,
            },
        }
    }

    /// Applies a finished fetch. Returns `false` when the response was stale
    /// and dropped.
    pub fn settle(&mut self, request: &PageRequest, result: Result<Page, FetchError>) -> bool {
        let query = request.query;
        if !self.tracker.is_current(request.ticket)
            || query.language != self.language
            || query.mode != self.mode
        {
            debug!(page = query.page, "dropping superseded page response");
            return false;
        }

        match result {
            Ok(page) => {
                info!(
                    page = query.page,
                    rows = page.data.len(),
                    mode = query.mode.as_str(),
                    "page loaded"
                );
                self.rows = page.data;
                self.has_next = page.has_next;
                self.has_prev = page.has_prev;
                self.total = page.total;
                self.page = query.page;
                self.loaded_page = query.page;
                self.loaded_for = Some((query.language, query.mode));
                self.rows_revision += 1;
                self.state = LoadState::Loaded;
            }
            Err(err) => {
                warn!(page = query.page, error = %err, "page fetch failed");
                if self.loaded_for == Some((self.language, self.mode)) {
                    self.page = self.loaded_page;
                } else {
                    self.clear_rows();
                    self.loaded_page = self.page;
                }
                self.state = LoadState::Failed(err);
            }
        }
        true
    }

    fn clear_rows(&mut self) {
        self.rows.clear();
        self.has_next = false;
        self.has_prev = false;
        self.total = 0;
        self.loaded_for = None;
        self.rows_revision += 1;
    }
}

pub async fn load_page<C: RemoteClient>(client: &C, query: &PageQuery) -> Result<Page, FetchError> {
    client
        .get_envelope::<Page>("/data", &query.params())
        .await?
        .into_result()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderRequest {
    pub ticket: Ticket,
    pub language: Language,
}

/// Server-localized column headers for one language. Anything missing falls
/// back to the raw column id.
#[derive(Debug, Default)]
pub struct HeaderLabels {
    language: Option<Language>,
    labels: BTreeMap<String, String>,
    tracker: RequestTracker,
}

impl HeaderLabels {
    pub fn request(&mut self, language: Language) -> HeaderRequest {
        HeaderRequest {
            ticket: self.tracker.dispatch(),
            language,
        }
    }

    pub fn settle(
        &mut self,
        request: &HeaderRequest,
        result: Result<BTreeMap<String, String>, FetchError>,
    ) -> bool {
        if !self.tracker.is_current(request.ticket) {
            return false;
        }
        self.language = Some(request.language);
        self.labels = result.unwrap_or_else(|err| {
            warn!(language = %request.language, error = %err, "header labels unavailable");
            BTreeMap::new()
        });
        true
    }

    pub fn language(&self) -> Option<Language> {
        self.language
    }

    pub fn label(&self, column: &str) -> String {
        self.labels
            .get(column)
            .filter(|label| !label.trim().is_empty())
            .cloned()
            .unwrap_or_else(|| column.to_string())
    }
}

pub async fn load_header_labels<C: RemoteClient>(
    client: &C,
    language: Language,
) -> Result<BTreeMap<String, String>, FetchError> {
    let params = [("language", language.code().to_string())];
    Ok(client
        .get_envelope::<BTreeMap<String, String>>("/headers-localized", &params)
        .await?
        .into_optional()?
        .unwrap_or_default())
}

/// Stored column selection for `view`, or all columns when nothing usable
/// was stored.
pub fn restore_selection(prefs: &dyn PreferencesStore, view: &str) -> ColumnSelection {
    match prefs.load_column_selection(view) {
        Ok(Some(selection)) => selection,
        Ok(None) => ColumnSelection::all(),
        Err(err) => {
            warn!(view, error = %err, "failed to load column selection");
            ColumnSelection::all()
        }
    }
}

pub fn persist_selection(prefs: &dyn PreferencesStore, view: &str, selection: &ColumnSelection) {
    if let Err(err) = prefs.save_column_selection(view, selection) {
        warn!(view, error = %err, "failed to save column selection");
    }
}
