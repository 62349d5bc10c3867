use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use rfd::FileDialog;

use crate::domain::entities::column::{column_label_key, numeric_column, NUMERIC_COLUMNS};
use crate::domain::entities::dataset::{DatasetFilter, Mode};
use crate::domain::entities::row::{DatasetCode, Row, DATASET_COLUMN};
use crate::domain::projection::{Projection, Projector};
use crate::i18n::Translator;
use crate::infra::http::client::HttpClient;
use crate::platform::desktop::paths::default_export_dir;
use crate::ui::format::format_cell_value;
use crate::ui::state::app_state::{AppState, Services};
use crate::ui::styles::{
    dataset_badge_style, table_cell_style, table_container_style, table_header_cell_style,
};
use crate::ui::views::{ErrorBox, ModeSwitch};
use crate::usecase::services::export_service::{default_file_name, export_projection_csv};
use crate::usecase::services::table_view::{
    load_page, persist_selection, PageRequest, TableViewModel, DATA_VIEW,
};

/// Runs `request` and hands the result back to the table. Superseded
/// responses are dropped by the view model.
pub fn run_page_request(mut table: Signal<TableViewModel>, client: HttpClient, request: PageRequest) {
    spawn(async move {
        let result = load_page(&client, &request.query).await;
        table.write().settle(&request, result);
    });
}

fn dataset_label(row: &Row, mode: Mode, t: &Translator) -> String {
    let explicit = row
        .get(DATASET_COLUMN)
        .map(|value| value.plain_text())
        .filter(|label| !label.trim().is_empty());
    explicit.unwrap_or_else(|| match row.dataset_code(mode) {
        Some(DatasetCode::Normal) => t.t_or("ui_mode_normal", "Normal"),
        Some(DatasetCode::Prognosis) => t.t_or("ui_mode_prognosis", "Prognosis"),
        None => "-".to_string(),
    })
}

#[component]
pub fn DataTab(services: Services) -> Element {
    let mut state = use_context::<AppState>();
    let t = state.translator();
    let projector = use_hook(|| Rc::new(RefCell::new(Projector::default())));

    let projection = use_memo(move || {
        let table = state.table.read();
        let options = state.view_options.read();
        projector
            .borrow_mut()
            .project(
                table.rows_revision(),
                table.rows(),
                table.mode(),
                table.language(),
                &options,
            )
            .clone()
    });

    let table = state.table.read();
    let options = state.view_options.read().clone();
    let mode = table.mode();
    let loading = table.is_loading();
    let page = table.current_page();
    let has_next = table.has_next();
    let has_prev = table.has_prev() || page > 1;
    let total = table.total();
    let error = table.error().map(|err| err.user_message(&t));
    let stale = table.is_stale();
    drop(table);

    let selected_mode = (state.table_mode)();
    let projection_snapshot: Projection = projection.read().clone();
    let row_count = projection_snapshot.rows.len();
    let client_for_prev = services.client.clone();
    let client_for_next = services.client.clone();
    let client_for_reload = services.client.clone();
    let prefs = services.prefs.clone();

    let active_filter_text = t.t_or("active_filter", "Active filter:");
    let page_text = t.t_or("data_page", "Page");
    let on_page_text = t.t_or("data_on_page", "On page:");
    let filter_label = match options.filter {
        DatasetFilter::All => None,
        DatasetFilter::Only(DatasetCode::Normal) => Some(t.t_or("ui_mode_normal", "Normal")),
        DatasetFilter::Only(DatasetCode::Prognosis) => {
            Some(t.t_or("ui_mode_prognosis", "Prognosis"))
        }
    };

    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 8px; flex: 1; min-height: 0;",
            div {
                style: "display: flex; gap: 12px; align-items: center; flex-wrap: wrap;",
                ModeSwitch {
                    mode: selected_mode,
                    on_change: move |next: Mode| state.table_mode.set(next),
                }
                details {
                    summary { {t.t_or("data_select_columns", "Select columns")} }
                    div {
                        style: "display: flex; flex-direction: column; gap: 4px; padding: 6px;",
                        for column in NUMERIC_COLUMNS {
                            label {
                                key: "{column.key}",
                                input {
                                    r#type: "checkbox",
                                    checked: options.selection.contains(column.key),
                                    onchange: {
                                        let prefs = prefs.clone();
                                        move |_| {
                                            let mut options = state.view_options.write();
                                            let selected = options.selection.contains(column.key);
                                            options.selection.set(column.key, !selected);
                                            persist_selection(prefs.as_ref(), DATA_VIEW, &options.selection);
                                        }
                                    },
                                }
                                " "
                                {t.t_or(column.label_key, column.fallback)}
                            }
                        }
                    }
                }
                if let Some(label) = filter_label {
                    button {
                        title: t.t_or("click_to_clear_filter", "Click to clear the filter"),
                        onclick: move |_| state.view_options.write().filter = DatasetFilter::All,
                        "{active_filter_text} {label} ✕"
                    }
                }
                button {
                    disabled: loading,
                    onclick: move |_| {
                        let request = state.table.write().reload();
                        run_page_request(state.table, client_for_reload.clone(), request);
                    },
                    {t.t_or("ui_refresh", "Refresh")}
                }
                button {
                    disabled: row_count == 0,
                    onclick: move |_| {
                        let t = state.translator();
                        let file_name = default_file_name(
                            "loan-data",
                            "csv",
                            chrono::Local::now().naive_local(),
                        );
                        let mut dialog = FileDialog::new()
                            .add_filter("CSV", &["csv"])
                            .set_file_name(file_name);
                        if let Some(dir) = default_export_dir() {
                            dialog = dialog.set_directory(dir);
                        }
                        let Some(path) = dialog.save_file() else {
                            state.status.set(t.t_or("ui_export_cancelled", "Export cancelled"));
                            return;
                        };
                        let result = export_projection_csv(&path, &projection.read(), &state.headers.read());
                        let message = match result {
                            Ok(rows) => format!(
                                "{} {} ({rows})",
                                t.t_or("ui_export_done", "Saved to"),
                                path.display()
                            ),
                            Err(err) => format!("{}: {err:#}", t.t_or("ui_export_failed", "Export failed")),
                        };
                        state.status.set(message);
                    },
                    {t.t_or("ui_export_csv", "Export CSV")}
                }
            }

            if let Some(message) = error {
                ErrorBox { message }
            }
            if stale {
                span { style: "color: #8a5300;", {t.t_or("data_stale_rows", "Showing previously loaded rows.")} }
            }

            div {
                style: table_container_style(),
                if loading && row_count == 0 {
                    p { style: "padding: 12px;", {t.t_or("ui_loading", "Loading...")} }
                }
                table {
                    style: "border-collapse: collapse; width: 100%;",
                    thead {
                        tr {
                            for column in projection_snapshot.columns.clone() {
                                th {
                                    key: "{column}",
                                    style: table_header_cell_style(),
                                    title: t.t_or("click_to_sort", "Click to sort"),
                                    onclick: {
                                        let column = column.clone();
                                        move |_| {
                                            let mut options = state.view_options.write();
                                            options.sort = options.sort.toggled(&column);
                                        }
                                    },
                                    {options.sort.header_label(&column, header_text(&state, &t, &column))}
                                }
                            }
                        }
                    }
                    tbody {
                        for (idx, row) in projection_snapshot.rows.iter().enumerate() {
                            tr {
                                key: "{idx}",
                                for column in projection_snapshot.columns.iter() {
                                    if column == DATASET_COLUMN {
                                        td {
                                            style: table_cell_style(false),
                                            DatasetBadge {
                                                label: dataset_label(row, mode, &t),
                                                code: row.dataset_code(mode),
                                                clickable: mode == Mode::Merged,
                                            }
                                        }
                                    } else {
                                        td {
                                            style: table_cell_style(numeric_column(column).is_some()),
                                            {format_cell_value(row.get(column), &t)}
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }

            div {
                style: "display: flex; gap: 12px; align-items: center; padding: 6px 0;",
                button {
                    disabled: loading || !has_prev,
                    onclick: move |_| {
                        let request = state.table.write().prev_page();
                        if let Some(request) = request {
                            run_page_request(state.table, client_for_prev.clone(), request);
                        }
                    },
                    {t.t_or("ui_prev", "Previous")}
                }
                span { "{page_text} {page}" }
                button {
                    disabled: loading || !has_next,
                    onclick: move |_| {
                        let request = state.table.write().next_page();
                        if let Some(request) = request {
                            run_page_request(state.table, client_for_next.clone(), request);
                        }
                    },
                    {t.t_or("ui_next", "Next")}
                }
                span { "{on_page_text} {row_count} / {total}" }
            }
        }
    }
}

fn header_text(state: &AppState, t: &Translator, column: &str) -> String {
    let server_label = state.headers.read().label(column);
    if server_label == column {
        column_label_key(column)
            .map(|key| t.t(key, Some(column)))
            .unwrap_or(server_label)
    } else {
        server_label
    }
}

#[component]
fn DatasetBadge(label: String, code: Option<DatasetCode>, clickable: bool) -> Element {
    let mut state = use_context::<AppState>();
    let t = state.translator();
    let title = if clickable {
        t.t_or("click_to_filter", "Click to filter")
    } else {
        String::new()
    };

    rsx! {
        span {
            style: dataset_badge_style(code),
            title: "{title}",
            onclick: move |_| {
                if let (true, Some(code)) = (clickable, code) {
                    let mut options = state.view_options.write();
                    options.filter = options.filter.toggled(code);
                }
            },
            "{label}"
        }
    }
}
