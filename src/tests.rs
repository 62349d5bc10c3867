use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use dioxus::prelude::VirtualDom;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::app::{Dashboard, DashboardProps};
use crate::config::ApiConfig;
use crate::domain::entities::chart::{ChartParams, CHARTS};
use crate::domain::entities::column::ColumnSelection;
use crate::domain::entities::dataset::{DatasetFilter, Mode, SortDirection, SortState};
use crate::domain::entities::row::{CellValue, DatasetCode, Row};
use crate::domain::entities::summary::{DiffCell, Metric, Quartiles};
use crate::domain::projection::{filter_rows, project, visible_columns, Projector, ViewOptions};
use crate::i18n::{Language, LanguageStore, Translator, LANGUAGE_STORAGE_KEY};
use crate::infra::http::client::HttpClient;
use crate::infra::images::object_url::ObjectUrlRegistry;
use crate::infra::sqlite::repo::SqlitePreferences;
use crate::ui::state::app_state::Services;
use crate::usecase::ports::prefs::PreferencesStore;
use crate::usecase::ports::remote::{Binary, Envelope, FetchError, QueryParams, RemoteClient};
use crate::usecase::services::chart_fetcher::{fetch_chart, load_chart_description, ImagePanel};
use crate::usecase::services::column_stats::{fetch_column_stats, StatsQuery};
use crate::usecase::services::export_service::{
    default_file_name, export_projection_csv, projection_table,
};
use crate::usecase::services::prognosis::{fetch_prognosis_process, process_summary};
use crate::usecase::services::stats_diff::fetch_diff;
use crate::usecase::services::table_view::{
    load_header_labels, load_page, restore_selection, HeaderLabels, LoadState, TableViewModel,
    DATA_VIEW,
};

fn unique_test_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("loan-dashboard-{prefix}-{nanos}"))
}

enum Reply {
    Json(Value),
    Bytes(Vec<u8>, &'static str),
    Fail(FetchError),
}

struct Route {
    reply: Reply,
    delay: Duration,
}

/// In-memory backend. Routes match on `path?k=v&...` first, then on the bare
/// path. Every call is recorded.
#[derive(Default)]
struct FakeRemote {
    routes: HashMap<String, Route>,
    calls: RefCell<Vec<String>>,
}

fn request_key(path: &str, params: &QueryParams) -> String {
    if params.is_empty() {
        return path.to_string();
    }
    let query = params
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&");
    format!("{path}?{query}")
}

impl FakeRemote {
    fn reply(mut self, key: &str, reply: Reply) -> Self {
        self.routes.insert(
            key.to_string(),
            Route {
                reply,
                delay: Duration::ZERO,
            },
        );
        self
    }

    fn json(self, key: &str, body: Value) -> Self {
        self.reply(key, Reply::Json(body))
    }

    fn delayed_json(mut self, key: &str, body: Value, delay_ms: u64) -> Self {
        self.routes.insert(
            key.to_string(),
            Route {
                reply: Reply::Json(body),
                delay: Duration::from_millis(delay_ms),
            },
        );
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    async fn route(&self, path: &str, params: &QueryParams) -> Result<&Reply, FetchError> {
        let key = request_key(path, params);
        self.calls.borrow_mut().push(key.clone());
        let route = self
            .routes
            .get(&key)
            .or_else(|| self.routes.get(path))
            .ok_or_else(|| FetchError::Status {
                status: 404,
                error: None,
            })?;
        if !route.delay.is_zero() {
            tokio::time::sleep(route.delay).await;
        }
        Ok(&route.reply)
    }
}

impl RemoteClient for FakeRemote {
    async fn get_envelope<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &QueryParams,
    ) -> Result<Envelope<T>, FetchError> {
        match self.route(path, params).await? {
            Reply::Json(body) => serde_json::from_value(body.clone())
                .map_err(|err| FetchError::Decode(err.to_string())),
            Reply::Bytes(..) => Err(FetchError::Decode("expected json".to_string())),
            Reply::Fail(err) => Err(err.clone()),
        }
    }

    async fn get_binary(&self, path: &str, params: &QueryParams) -> Result<Binary, FetchError> {
        match self.route(path, params).await? {
            Reply::Bytes(bytes, content_type) => Ok(Binary {
                bytes: bytes.clone(),
                content_type: Some(content_type.to_string()),
            }),
            Reply::Json(_) => Err(FetchError::Decode("expected image".to_string())),
            Reply::Fail(err) => Err(err.clone()),
        }
    }
}

fn ok(result: Value) -> Value {
    json!({ "success": true, "result": result })
}

fn page_body(page: u32, names: &[&str], has_next: bool) -> Value {
    let data: Vec<Value> = names
        .iter()
        .map(|name| json!({ "name": name, "income": 1000, "dataset": "Normal" }))
        .collect();
    ok(json!({
        "data": data,
        "page": page,
        "has_next": has_next,
        "has_prev": page > 1,
        "total": 40,
        "per_page": 20,
    }))
}

fn names(table: &TableViewModel) -> Vec<String> {
    table
        .rows()
        .iter()
        .filter_map(|row| row.get("name").map(CellValue::plain_text))
        .collect()
}

fn loan_row(name: &str, income: f64, code: &str) -> Row {
    Row::new()
        .with("name", CellValue::Text(name.to_string()))
        .with("income", CellValue::Number(income))
        .with("dataset", CellValue::Text(code.to_string()))
        .with("dataset_code", CellValue::Text(code.to_string()))
}

fn merged_rows() -> Vec<Row> {
    vec![
        loan_row("a", 3000.0, "normal"),
        loan_row("b", 1000.0, "prognosis"),
        loan_row("c", 2000.0, "normal"),
        loan_row("d", 1000.0, "normal"),
        loan_row("e", 2000.0, "prognosis"),
    ]
}

fn row_names(rows: &[Row]) -> Vec<String> {
    rows.iter()
        .filter_map(|row| row.get("name").map(CellValue::plain_text))
        .collect()
}

#[test]
fn projection_is_deterministic_and_sort_is_stable() {
    let rows = merged_rows();
    let options = ViewOptions {
        sort: SortState::by("income", SortDirection::Asc),
        ..ViewOptions::default()
    };

    let first = project(&rows, Mode::Merged, Language::En, &options);
    let second = project(&rows, Mode::Merged, Language::En, &options);

    assert_eq!(first, second);
    // ties keep their incoming order
    assert_eq!(row_names(&first.rows), vec!["b", "d", "c", "e", "a"]);

    let descending = project(
        &rows,
        Mode::Merged,
        Language::En,
        &ViewOptions {
            sort: SortState::by("income", SortDirection::Desc),
            ..ViewOptions::default()
        },
    );
    assert_eq!(row_names(&descending.rows), vec!["a", "c", "e", "b", "d"]);
}

#[test]
fn dataset_sort_orders_by_code_rank() {
    let rows = merged_rows();
    let ascending = project(
        &rows,
        Mode::Merged,
        Language::En,
        &ViewOptions {
            sort: SortState::by("dataset", SortDirection::Asc),
            ..ViewOptions::default()
        },
    );

    assert_eq!(row_names(&ascending.rows), vec!["b", "e", "a", "c", "d"]);
}

#[test]
fn dataset_filter_is_idempotent() {
    let rows = merged_rows();
    let filter = DatasetFilter::Only(DatasetCode::Prognosis);

    let once = filter_rows(&rows, Mode::Merged, filter);
    let twice = filter_rows(&once, Mode::Merged, filter);

    assert_eq!(row_names(&once), vec!["b", "e"]);
    assert_eq!(once, twice);
    assert_eq!(filter_rows(&rows, Mode::Merged, DatasetFilter::All), rows);
}

#[test]
fn visible_columns_follow_selection_in_catalog_order() {
    let rows = merged_rows();
    let selection = ColumnSelection::from_keys(["income"]);

    assert_eq!(
        visible_columns(&rows, &selection),
        vec!["name", "dataset", "income"]
    );

    let nameless = vec![Row::new().with("income", CellValue::Number(1.0))];
    assert_eq!(
        visible_columns(&nameless, &ColumnSelection::from_keys(["points", "income"])),
        vec!["dataset", "income", "points"]
    );
    assert!(visible_columns(&[], &selection).is_empty());
}

#[test]
fn projector_recomputes_only_on_relevant_change() {
    let rows = merged_rows();
    let mut projector = Projector::default();
    let mut options = ViewOptions::default();

    projector.project(1, &rows, Mode::Merged, Language::En, &options);
    projector.project(1, &rows, Mode::Merged, Language::En, &options);
    assert_eq!(projector.computations(), 1);

    options.filter = DatasetFilter::Only(DatasetCode::Normal);
    let filtered = projector
        .project(1, &rows, Mode::Merged, Language::En, &options)
        .clone();
    assert_eq!(projector.computations(), 2);
    assert_eq!(row_names(&filtered.rows), vec!["a", "c", "d"]);

    projector.project(2, &rows, Mode::Merged, Language::En, &options);
    projector.project(2, &rows, Mode::Prognosis, Language::En, &options);
    assert_eq!(projector.computations(), 4);
}

#[test]
fn text_sort_follows_active_language_collation() {
    let rows: Vec<Row> = ["Zakopane", "Łódź", "Lublin"]
        .into_iter()
        .map(|city| loan_row(city, 1000.0, "normal"))
        .collect();
    let options = ViewOptions {
        sort: SortState::by("name", SortDirection::Asc),
        ..ViewOptions::default()
    };
    let mut projector = Projector::default();

    let polish = projector
        .project(1, &rows, Mode::Normal, Language::Pl, &options)
        .clone();
    assert_eq!(row_names(&polish.rows), vec!["Lublin", "Łódź", "Zakopane"]);

    projector.project(1, &rows, Mode::Normal, Language::En, &options);
    assert_eq!(projector.computations(), 2);
}

#[tokio::test]
async fn slower_earlier_page_response_is_discarded() {
    let client = FakeRemote::default()
        .json(
            "/data?page=1&language=en&mode=normal",
            page_body(1, &["p1"], true),
        )
        .delayed_json(
            "/data?page=2&language=en&mode=normal",
            page_body(2, &["p2"], true),
            5,
        );
    let table = RefCell::new(TableViewModel::new(Language::En, Mode::Normal));

    let mount = table.borrow_mut().mount();
    let result = load_page(&client, &mount.query).await;
    assert!(table.borrow_mut().settle(&mount, result));
    assert_eq!(names(&table.borrow()), vec!["p1"]);

    // Page 2 is dispatched first but answers quickly; the reload of page 1 is
    // dispatched last and must win even though it answers later.
    let client = FakeRemote::default()
        .delayed_json(
            "/data?page=1&language=en&mode=normal",
            page_body(1, &["p1-reloaded"], true),
            60,
        )
        .delayed_json(
            "/data?page=2&language=en&mode=normal",
            page_body(2, &["p2"], true),
            5,
        );
    let to_second = table
        .borrow_mut()
        .next_page()
        .expect("next page should be allowed");
    let back_to_first = table.borrow_mut().go_to_page(1).expect("page 1 should be allowed");

    let fast = async {
        let result = load_page(&client, &to_second.query).await;
        table.borrow_mut().settle(&to_second, result)
    };
    let slow = async {
        let result = load_page(&client, &back_to_first.query).await;
        table.borrow_mut().settle(&back_to_first, result)
    };
    let (fast_applied, slow_applied) = tokio::join!(fast, slow);

    assert!(!fast_applied, "superseded page 2 should be dropped");
    assert!(slow_applied);
    let table = table.borrow();
    assert_eq!(table.current_page(), 1);
    assert_eq!(names(&table), vec!["p1-reloaded"]);
    assert_eq!(table.state(), &LoadState::Loaded);
}

#[tokio::test]
async fn response_for_previous_language_is_ignored() {
    let client = FakeRemote::default()
        .json(
            "/data?page=1&language=pl&mode=normal",
            page_body(1, &["polski"], false),
        )
        .json(
            "/data?page=1&language=en&mode=normal",
            page_body(1, &["english"], false),
        );
    let mut table = TableViewModel::new(Language::Pl, Mode::Normal);

    let polish = table.mount();
    let english = table
        .set_language(Language::En)
        .expect("language change should dispatch");
    assert!(table.set_language(Language::En).is_none());

    let english_result = load_page(&client, &english.query).await;
    assert!(table.settle(&english, english_result));
    let polish_result = load_page(&client, &polish.query).await;
    assert!(!table.settle(&polish, polish_result));

    assert_eq!(names(&table), vec!["english"]);
    assert_eq!(table.language(), Language::En);
}

#[tokio::test]
async fn pagination_respects_boundaries() {
    let client = FakeRemote::default().json(
        "/data?page=1&language=en&mode=merged",
        page_body(1, &["only"], false),
    );
    let mut table = TableViewModel::new(Language::En, Mode::Merged);

    let request = table.mount();
    let result = load_page(&client, &request.query).await;
    table.settle(&request, result);

    assert!(table.next_page().is_none());
    assert!(table.prev_page().is_none());
    assert!(table.go_to_page(0).is_none());
    assert_eq!(table.current_page(), 1);
    assert_eq!(client.calls().len(), 1);
}

#[tokio::test]
async fn failed_page_keeps_rows_only_for_same_view() {
    let client = FakeRemote::default()
        .json(
            "/data?page=1&language=en&mode=normal",
            page_body(1, &["kept"], true),
        )
        .reply(
            "/data?page=2&language=en&mode=normal",
            Reply::Fail(FetchError::Transport("timed out".to_string())),
        )
        .reply(
            "/data?page=1&language=en&mode=prognosis",
            Reply::Fail(FetchError::Transport("timed out".to_string())),
        );
    let mut table = TableViewModel::new(Language::En, Mode::Normal);

    let request = table.mount();
    let result = load_page(&client, &request.query).await;
    table.settle(&request, result);

    let request = table.next_page().expect("next page should be allowed");
    let result = load_page(&client, &request.query).await;
    table.settle(&request, result);
    assert!(table.is_stale());
    assert_eq!(names(&table), vec!["kept"]);

    let request = table.set_mode(Mode::Prognosis).expect("mode change should dispatch");
    let result = load_page(&client, &request.query).await;
    table.settle(&request, result);
    assert!(table.rows().is_empty());
    assert!(matches!(table.error(), Some(FetchError::Transport(_))));
}

#[tokio::test]
async fn failed_page_leaves_position_on_loaded_page() {
    let client = FakeRemote::default()
        .json(
            "/data?page=1&language=en&mode=normal",
            page_body(1, &["first"], true),
        )
        .reply(
            "/data?page=2&language=en&mode=normal",
            Reply::Fail(FetchError::Transport("timed out".to_string())),
        );
    let mut table = TableViewModel::new(Language::En, Mode::Normal);

    let request = table.mount();
    let result = load_page(&client, &request.query).await;
    table.settle(&request, result);

    let request = table.next_page().expect("next page should be allowed");
    assert_eq!(request.query.page, 2);
    let result = load_page(&client, &request.query).await;
    assert!(table.settle(&request, result));

    assert_eq!(table.current_page(), 1);
    assert_eq!(names(&table), vec!["first"]);
    assert!(table.prev_page().is_none());

    let retry = table.next_page().expect("next page should still be allowed");
    assert_eq!(retry.query.page, 2);
    let reload = table.reload();
    assert_eq!(reload.query.page, 1);
}

#[tokio::test]
async fn diff_subtracts_normal_from_prognosis() {
    let client = FakeRemote::default()
        .json(
            "/summary?mode=normal",
            ok(json!({
                "mean": { "income": 1000, "points": 5 },
                "mode": { "income": "A" },
            })),
        )
        .json(
            "/summary?mode=prognosis",
            ok(json!({
                "mean": { "income": 1200, "points": 5 },
                "mode": { "income": "A" },
            })),
        );

    let diff = fetch_diff(&client).await.expect("diff should succeed");

    let income = diff.get(Metric::Mean, "income").expect("cell should exist");
    assert_eq!(income.delta, DiffCell::Delta(200.0));
    assert_eq!(income.normal, Some(CellValue::Number(1000.0)));
    assert_eq!(
        diff.get(Metric::Mean, "points").map(|entry| entry.delta),
        Some(DiffCell::Delta(0.0))
    );
    assert_eq!(
        diff.get(Metric::Mode, "income").map(|entry| entry.delta),
        Some(DiffCell::NotComparable)
    );
}

#[tokio::test]
async fn diff_fails_when_either_summary_fails() {
    let client = FakeRemote::default()
        .json("/summary?mode=normal", ok(json!({ "mean": { "income": 1 } })))
        .json(
            "/summary?mode=prognosis",
            json!({ "success": false, "error": "no prognosis data" }),
        );

    let err = fetch_diff(&client).await.expect_err("diff should fail");

    assert_eq!(err, FetchError::Domain("no prognosis data".to_string()));
}

#[tokio::test]
async fn column_stats_are_collected_in_order() {
    let client = FakeRemote::default()
        .json("/mean", ok(json!(10.5)))
        .json("/median", ok(json!(10)))
        .json("/mode", ok(Value::Null))
        .json("/sum", ok(json!(105)))
        .json("/deviation", ok(json!(2.5)))
        .json("/skewness", ok(json!(-0.1)))
        .json("/kurtosis", ok(json!(3)))
        .json("/quartiles", ok(json!({ "Q1": 5, "Q2": 10, "Q3": 15 })));
    let query = StatsQuery {
        column: "income".to_string(),
        language: Language::De,
        mode: Mode::Prognosis,
    };

    let stats = fetch_column_stats(&client, &query)
        .await
        .expect("stats should load");

    assert_eq!(stats.mean, Some(10.5));
    assert_eq!(stats.mode, Some(CellValue::Null));
    assert_eq!(
        stats.quartiles,
        Some(Quartiles {
            q1: 5.0,
            q2: 10.0,
            q3: 15.0
        })
    );
    let calls = client.calls();
    assert_eq!(calls.len(), 8);
    assert_eq!(
        calls[0],
        "/mean?column_name=income&language=de&mode=prognosis"
    );
    assert!(calls[7].starts_with("/quartiles?"));
}

#[tokio::test]
async fn first_failing_statistic_stops_the_rest() {
    let client = FakeRemote::default()
        .json("/mean", ok(json!(1)))
        .json(
            "/median",
            json!({ "success": false, "error": "Kolumna nie istnieje" }),
        )
        .json("/mode", ok(json!(1)));
    let query = StatsQuery {
        column: "income".to_string(),
        language: Language::Pl,
        mode: Mode::Normal,
    };

    let err = fetch_column_stats(&client, &query)
        .await
        .expect_err("stats should fail");

    assert_eq!(
        err.user_message(&Translator::new(Language::En)),
        "Kolumna nie istnieje"
    );
    assert_eq!(client.calls().len(), 2);
}

#[tokio::test]
async fn structured_status_error_is_shown_verbatim() {
    let client = FakeRemote::default().reply(
        "/data",
        Reply::Fail(FetchError::Status {
            status: 500,
            error: Some("Database offline".to_string()),
        }),
    );
    let mut table = TableViewModel::new(Language::En, Mode::Normal);

    let request = table.mount();
    let result = load_page(&client, &request.query).await;
    table.settle(&request, result);

    let t = Translator::new(Language::En);
    let message = table.error().map(|err| err.user_message(&t));
    assert_eq!(message.as_deref(), Some("Database offline"));
}

#[tokio::test]
async fn chart_images_release_previous_handles() {
    let client = FakeRemote::default()
        .reply("/income-hist", Reply::Bytes(vec![1, 2, 3], "image/png"))
        .reply("/loan-pie", Reply::Bytes(vec![4, 5], "image/png"))
        .reply(
            "/corr-heatmap",
            Reply::Fail(FetchError::Status {
                status: 500,
                error: None,
            }),
        );
    let registry = ObjectUrlRegistry::new();
    let params = ChartParams::for_language(Language::En);
    let mut panel = ImagePanel::default();

    let ticket = panel.begin();
    panel.settle(ticket, fetch_chart(&client, "income-hist", &params).await, &registry);
    let first_url = panel.image().map(|image| image.url()).expect("image should be set");
    assert_eq!(registry.live_count(), 1);

    let ticket = panel.begin();
    panel.settle(ticket, fetch_chart(&client, "loan-pie", &params).await, &registry);
    assert_eq!(registry.live_count(), 1);
    assert_eq!(registry.revoked_count(), 1);
    let second_url = panel.image().map(|image| image.url()).expect("image should be set");
    assert_ne!(first_url, second_url);
    assert_eq!(panel.image().map(|image| image.bytes().to_vec()), Some(vec![4, 5]));

    let ticket = panel.begin();
    panel.settle(ticket, fetch_chart(&client, "corr-heatmap", &params).await, &registry);
    assert!(panel.image().is_none());
    assert!(panel.error().is_some());
    assert_eq!(registry.live_count(), 0);
    assert_eq!(registry.revoked_count(), 2);

    let ticket = panel.begin();
    panel.settle(ticket, fetch_chart(&client, "income-hist", &params).await, &registry);
    drop(panel);
    assert_eq!(registry.live_count(), 0);
    assert_eq!(registry.revoked_count(), 3);
}

#[tokio::test]
async fn superseded_image_is_never_registered() {
    let client = FakeRemote::default()
        .reply("/income-hist", Reply::Bytes(vec![1], "image/png"))
        .reply("/loan-pie", Reply::Bytes(vec![2], "image/png"));
    let registry = ObjectUrlRegistry::new();
    let params = ChartParams::for_language(Language::En);
    let mut panel = ImagePanel::default();

    let stale = panel.begin();
    let current = panel.begin();
    let applied = panel.settle(stale, fetch_chart(&client, "income-hist", &params).await, &registry);
    assert!(!applied);
    assert_eq!(registry.live_count(), 0);

    panel.settle(current, fetch_chart(&client, "loan-pie", &params).await, &registry);
    assert_eq!(panel.image().map(|image| image.bytes().to_vec()), Some(vec![2]));
}

#[tokio::test]
async fn unknown_chart_fails_without_request() {
    let client = FakeRemote::default();
    let params = ChartParams::for_language(Language::Pl);

    let err = fetch_chart(&client, "no-such-chart", &params)
        .await
        .expect_err("unknown chart should fail");

    assert_eq!(err, FetchError::UnknownChart("no-such-chart".to_string()));
    assert!(client.calls().is_empty());
    assert_eq!(
        err.user_message(&Translator::new(Language::En)),
        "Unknown chart."
    );
}

#[tokio::test]
async fn chart_description_sends_optional_params() {
    let client = FakeRemote::default().json(
        "/chart-description",
        ok(json!({ "description": "Histogram of incomes." })),
    );
    let params = ChartParams {
        column: Some("income".to_string()),
        compare: Some(true),
        ..ChartParams::for_language(Language::En)
    };

    let description = load_chart_description(&client, "income-hist", &params)
        .await
        .expect("description should load");

    assert_eq!(description, "Histogram of incomes.");
    assert_eq!(
        client.calls(),
        vec!["/chart-description?chart=income-hist&language=en&column=income&compare=true"]
    );
}

#[tokio::test]
async fn header_labels_fall_back_to_column_ids() {
    let client = FakeRemote::default()
        .json(
            "/headers-localized?language=de",
            ok(json!({ "income": "Einkommen", "city": "" })),
        )
        .reply(
            "/headers-localized?language=ko",
            Reply::Fail(FetchError::Transport("offline".to_string())),
        );
    let mut labels = HeaderLabels::default();

    let request = labels.request(Language::De);
    let result = load_header_labels(&client, Language::De).await;
    labels.settle(&request, result);
    assert_eq!(labels.label("income"), "Einkommen");
    assert_eq!(labels.label("city"), "city");
    assert_eq!(labels.label("points"), "points");

    let request = labels.request(Language::Ko);
    let result = load_header_labels(&client, Language::Ko).await;
    labels.settle(&request, result);
    assert_eq!(labels.language(), Some(Language::Ko));
    assert_eq!(labels.label("income"), "income");
}

#[tokio::test]
async fn prognosis_summary_substitutes_row_count() {
    let client = FakeRemote::default().json(
        "/prognosis-process",
        ok(json!({
            "source_rows": 100,
            "total_count": 200,
            "numeric": {
                "income": { "samples": [1.0, 2.0], "mu": 1.5, "sigma": 0.5, "distribution": "normal" }
            },
            "categorical": {
                "city": { "samples": ["Gdansk"], "choices": ["Gdansk", "Krakow"] }
            }
        })),
    );

    let details = fetch_prognosis_process(&client)
        .await
        .expect("process details should load");

    assert_eq!(details.total_count, 200);
    assert_eq!(details.numeric["income"].mu, 1.5);
    assert_eq!(details.categorical["city"].choices.len(), 2);
    assert_eq!(
        process_summary(&Translator::new(Language::En), &details),
        "Based on the first 100 records."
    );
}

#[test]
fn every_chart_label_is_translated_in_every_language() {
    for language in Language::ALL {
        let t = Translator::new(language);
        for chart in CHARTS {
            let label = t.t(chart.label_key, Some(chart.id));
            assert_ne!(label, chart.id, "missing {} for {language}", chart.label_key);
            assert!(!label.trim().is_empty());
        }
    }

    let english = Translator::new(Language::En);
    assert_eq!(
        english.t("chart_loan_pie_label", Some("loan-pie")),
        "Loan decisions"
    );
    assert_eq!(english.t("chart_never_defined_label", Some("x")), "x");
    assert_eq!(english.t("never_defined", None), "never_defined");
}

#[test]
fn preferences_round_trip_through_sqlite() {
    let temp_dir = unique_test_dir("prefs");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let db_path = temp_dir.join("preferences.sqlite");

    let prefs = SqlitePreferences::open(db_path.clone()).expect("should open preferences");
    assert_eq!(
        prefs.load_value(LANGUAGE_STORAGE_KEY).expect("should load"),
        None
    );
    assert!(prefs
        .load_column_selection(DATA_VIEW)
        .expect("should load selection")
        .is_none());

    let selection = ColumnSelection::from_keys(["income", "points"]);
    prefs
        .save_column_selection(DATA_VIEW, &selection)
        .expect("should save selection");
    prefs
        .save_value(LANGUAGE_STORAGE_KEY, "de")
        .expect("should save language");
    prefs
        .save_value(LANGUAGE_STORAGE_KEY, "ko")
        .expect("should overwrite language");

    let reopened = SqlitePreferences::open(db_path).expect("should reopen preferences");
    assert_eq!(
        reopened.load_value(LANGUAGE_STORAGE_KEY).expect("should load"),
        Some("ko".to_string())
    );
    assert_eq!(restore_selection(&reopened, DATA_VIEW), selection);
    assert_eq!(restore_selection(&reopened, "charts"), ColumnSelection::all());

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn language_store_restores_and_persists_choice() {
    let temp_dir = unique_test_dir("language");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let db_path = temp_dir.join("preferences.sqlite");

    let prefs: Arc<dyn PreferencesStore> =
        Arc::new(SqlitePreferences::open(db_path.clone()).expect("should open preferences"));
    prefs
        .save_value(LANGUAGE_STORAGE_KEY, "xx")
        .expect("should save language");
    let mut store = LanguageStore::restore(prefs.clone());
    assert_eq!(store.language(), Language::Pl);

    assert!(store.set_language(Language::Zh));
    let restored = LanguageStore::restore(prefs);
    assert_eq!(restored.language(), Language::Zh);
    assert_eq!(restored.translator().language(), Language::Zh);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn dashboard_builds_its_state_on_first_render() {
    let temp_dir = unique_test_dir("dashboard");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let prefs = SqlitePreferences::open(temp_dir.join("preferences.sqlite"))
        .expect("should open preferences");
    prefs
        .save_value(LANGUAGE_STORAGE_KEY, "de")
        .expect("should save language");
    let services = Services {
        client: HttpClient::new(&ApiConfig::default()).expect("should build client"),
        prefs: Arc::new(prefs),
        registry: ObjectUrlRegistry::new(),
    };

    let mut dom = VirtualDom::new_with_props(Dashboard, DashboardProps { services });
    dom.rebuild_in_place();
    drop(dom);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn csv_export_uses_labels_and_plain_values() {
    let temp_dir = unique_test_dir("export");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let path = temp_dir.join("loans.csv");

    let rows = vec![
        loan_row("Anna, K.", 1234.5, "normal"),
        Row::new()
            .with("name", CellValue::Text("Bob".to_string()))
            .with("income", CellValue::Null)
            .with("dataset", CellValue::Text("Prognosis".to_string())),
    ];
    let options = ViewOptions {
        selection: ColumnSelection::from_keys(["income"]),
        ..ViewOptions::default()
    };
    let projection = project(&rows, Mode::Merged, Language::En, &options);
    let mut labels = HeaderLabels::default();
    let request = labels.request(Language::En);
    let translated: BTreeMap<String, String> =
        [("income".to_string(), "Income".to_string())].into_iter().collect();
    labels.settle(&request, Ok(translated));

    let table = projection_table(&projection, &labels);
    assert_eq!(table.headers, vec!["name", "dataset", "Income"]);

    let written = export_projection_csv(&path, &projection, &labels).expect("export should succeed");
    assert_eq!(written, 2);

    let content = fs::read_to_string(&path).expect("should read export");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines,
        vec![
            "name,dataset,Income",
            "\"Anna, K.\",normal,1234.5",
            "Bob,Prognosis,",
        ]
    );

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn export_file_names_carry_a_timestamp() {
    let now = chrono::NaiveDate::from_ymd_opt(2024, 3, 9)
        .and_then(|date| date.and_hms_opt(14, 5, 7))
        .expect("timestamp should be valid");

    assert_eq!(
        default_file_name("loan-data", "csv", now),
        "loan-data-20240309-140507.csv"
    );
}
