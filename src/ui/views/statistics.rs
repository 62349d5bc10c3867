use dioxus::prelude::*;

use crate::domain::entities::column::{numeric_column, NUMERIC_COLUMNS};
use crate::domain::entities::dataset::Mode;
use crate::domain::entities::summary::{ColumnStats, DiffCell, DiffTable, Metric, PrognosisDetails, SummarySnapshot};
use crate::i18n::Translator;
use crate::ui::format::{format_cell_value, format_number, format_signed, MISSING};
use crate::ui::state::app_state::{AppState, Services};
use crate::ui::styles::{table_cell_style, table_header_cell_style};
use crate::ui::views::{load_panel, ErrorBox, ModeSwitch};
use crate::usecase::services::column_stats::{fetch_column_stats, ColumnStatsPanel, StatsQuery};
use crate::usecase::services::dispatch::PanelState;
use crate::usecase::services::prognosis::{fetch_prognosis_process, process_summary, PrognosisPanel};
use crate::usecase::services::stats_diff::{fetch_diff, fetch_summary, DiffPanel, SummaryPanel};

const NO_COLUMN: &str = "";

fn optional_number(value: Option<f64>, t: &Translator) -> String {
    value
        .map(|value| format_number(value, t.language()))
        .unwrap_or_else(|| MISSING.to_string())
}

fn stats_rows(stats: &ColumnStats, t: &Translator) -> Vec<(String, String)> {
    let label = |metric: Metric| t.t_or(metric.label_key(), metric.label_fallback());
    let mode = match &stats.mode {
        Some(value) if !value.is_null() => format_cell_value(Some(value), t),
        _ => t.t_or("stats_none", "none"),
    };
    let quartiles = stats
        .quartiles
        .map(|q| {
            format!(
                "Q1 {} · Q2 {} · Q3 {}",
                format_number(q.q1, t.language()),
                format_number(q.q2, t.language()),
                format_number(q.q3, t.language())
            )
        })
        .unwrap_or_else(|| MISSING.to_string());

    vec![
        (label(Metric::Mean), optional_number(stats.mean, t)),
        (label(Metric::Median), optional_number(stats.median, t)),
        (label(Metric::Mode), mode),
        (label(Metric::Sum), optional_number(stats.sum, t)),
        (label(Metric::Deviation), optional_number(stats.deviation, t)),
        (label(Metric::Skewness), optional_number(stats.skewness, t)),
        (label(Metric::Kurtosis), optional_number(stats.kurtosis, t)),
        (t.t_or("stats_quartiles", "Quartiles"), quartiles),
    ]
}

#[component]
pub fn StatisticsTab(services: Services) -> Element {
    let state = use_context::<AppState>();
    let t = state.translator();

    let mut column = use_signal(|| None::<&'static str>);
    let mut mode = use_signal(|| Mode::Normal);
    let stats = use_signal(ColumnStatsPanel::default);
    let summary = use_signal(SummaryPanel::default);
    let diff = use_signal(DiffPanel::default);
    let prognosis = use_signal(PrognosisPanel::default);

    let client = services.client.clone();
    use_effect(move || {
        let language = (state.language)();
        let mode = mode();
        let Some(column) = column() else {
            let mut stats = stats;
            stats.write().clear();
            return;
        };
        let query = StatsQuery {
            column: column.to_string(),
            language,
            mode,
        };
        let client = client.clone();
        load_panel(stats, async move { fetch_column_stats(&client, &query).await });
    });

    let client = services.client.clone();
    use_effect(move || {
        let mode = mode();
        let client = client.clone();
        load_panel(summary, async move { fetch_summary(&client, mode).await });
    });

    let client = services.client.clone();
    use_effect(move || {
        let client = client.clone();
        load_panel(diff, async move { fetch_diff(&client).await });
    });

    let client = services.client.clone();
    use_effect(move || {
        let client = client.clone();
        load_panel(prognosis, async move { fetch_prognosis_process(&client).await });
    });

    let refresh_client = services.client.clone();
    let selected = column().unwrap_or(NO_COLUMN);

    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 16px; overflow: auto; flex: 1; min-height: 0; padding-bottom: 16px;",
            section {
                div {
                    style: "display: flex; gap: 12px; align-items: center; flex-wrap: wrap;",
                    label { {t.t_or("stats_select_column", "Column")} }
                    select {
                        value: "{selected}",
                        onchange: move |event: Event<FormData>| {
                            let value = event.value();
                            column.set(numeric_column(&value).map(|column| column.key));
                        },
                        option { value: NO_COLUMN, {t.t_or("stats_select_placeholder", "-- select --")} }
                        for candidate in NUMERIC_COLUMNS {
                            option {
                                key: "{candidate.key}",
                                value: candidate.key,
                                selected: candidate.key == selected,
                                {t.t_or(candidate.label_key, candidate.fallback)}
                            }
                        }
                    }
                    ModeSwitch { mode: mode(), on_change: move |next: Mode| mode.set(next) }
                }
                ColumnStatsView { panel: stats }
            }

            section {
                h3 { {t.t_or("stats_summary_header", "Summary")} }
                SummaryView { panel: summary }
            }

            section {
                div {
                    style: "display: flex; gap: 12px; align-items: center;",
                    h3 { {t.t_or("stats_diff_header", "Differences vs. normal")} }
                    button {
                        disabled: diff.read().is_loading(),
                        onclick: move |_| {
                            let client = refresh_client.clone();
                            load_panel(diff, async move { fetch_diff(&client).await });
                        },
                        {t.t_or("ui_refresh", "Refresh")}
                    }
                }
                p { style: "color: #555;", {t.t_or("stats_diff_explain_rule", "Values = Prognosis - Normal.")} }
                DiffView { panel: diff }
            }

            section {
                h3 { {t.t_or("prognosis_process_header", "How the prognosis data was created")} }
                PrognosisView { panel: prognosis }
            }
        }
    }
}

#[component]
fn ColumnStatsView(panel: Signal<ColumnStatsPanel>) -> Element {
    let state = use_context::<AppState>();
    let t = state.translator();
    let panel = panel.read();

    match panel.state() {
        PanelState::Idle => rsx! {},
        PanelState::Loading => rsx! { p { {t.t_or("stats_loading", "Loading parameters...")} } },
        PanelState::Failed(err) => rsx! { ErrorBox { message: err.user_message(&t) } },
        PanelState::Ready(stats) => {
            let rows = stats_rows(stats, &t);
            rsx! {
                table {
                    style: "border-collapse: collapse; margin-top: 8px;",
                    tbody {
                        for (label, value) in rows {
                            tr {
                                key: "{label}",
                                th { style: table_cell_style(false), "{label}" }
                                td { style: table_cell_style(true), "{value}" }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn summary_cell(snapshot: &SummarySnapshot, metric: Metric, column: &str, t: &Translator) -> String {
    format_cell_value(snapshot.get(metric, column), t)
}

#[component]
fn SummaryView(panel: Signal<SummaryPanel>) -> Element {
    let state = use_context::<AppState>();
    let t = state.translator();
    let panel = panel.read();

    match panel.state() {
        PanelState::Idle => rsx! {},
        PanelState::Loading => rsx! { p { {t.t_or("ui_loading", "Loading...")} } },
        PanelState::Failed(err) => rsx! { ErrorBox { message: err.user_message(&t) } },
        PanelState::Ready(snapshot) if snapshot.is_empty() => {
            rsx! { p { {t.t_or("stats_none", "none")} } }
        }
        PanelState::Ready(snapshot) => rsx! {
            table {
                style: "border-collapse: collapse;",
                thead {
                    tr {
                        th { style: table_header_cell_style() }
                        for column in NUMERIC_COLUMNS {
                            th { key: "{column.key}", style: table_header_cell_style(), {t.t_or(column.label_key, column.fallback)} }
                        }
                    }
                }
                tbody {
                    for metric in Metric::ALL {
                        tr {
                            key: "{metric.key()}",
                            th { style: table_cell_style(false), {t.t_or(metric.label_key(), metric.label_fallback())} }
                            for column in NUMERIC_COLUMNS {
                                td { key: "{column.key}", style: table_cell_style(true), {summary_cell(snapshot, metric, column.key, &t)} }
                            }
                        }
                    }
                }
            }
        },
    }
}

fn diff_cell(table: &DiffTable, metric: Metric, column: &str, t: &Translator) -> (String, String) {
    let Some(entry) = table.get(metric, column) else {
        return (MISSING.to_string(), String::new());
    };
    let delta = match entry.delta {
        DiffCell::Delta(value) => format_signed(value, t.language()),
        DiffCell::NotComparable => t.t_or("stats_diff_not_comparable", "n/a"),
    };
    let detail = format!(
        "{}: {} · {}: {}",
        t.t_or("stats_diff_cell_abs", "Prognosis"),
        format_cell_value(entry.prognosis.as_ref(), t),
        t.t_or("stats_diff_cell_base", "Normal"),
        format_cell_value(entry.normal.as_ref(), t)
    );
    (delta, detail)
}

#[component]
fn DiffView(panel: Signal<DiffPanel>) -> Element {
    let state = use_context::<AppState>();
    let t = state.translator();
    let panel = panel.read();

    match panel.state() {
        PanelState::Idle => rsx! {},
        PanelState::Loading => rsx! { p { {t.t_or("ui_loading", "Loading...")} } },
        PanelState::Failed(err) => rsx! { ErrorBox { message: err.user_message(&t) } },
        PanelState::Ready(diff_table) => rsx! {
            table {
                style: "border-collapse: collapse;",
                thead {
                    tr {
                        th { style: table_header_cell_style() }
                        for column in NUMERIC_COLUMNS {
                            th { key: "{column.key}", style: table_header_cell_style(), {t.t_or(column.label_key, column.fallback)} }
                        }
                    }
                }
                tbody {
                    for metric in Metric::ALL {
                        tr {
                            key: "{metric.key()}",
                            th { style: table_cell_style(false), {t.t_or(metric.label_key(), metric.label_fallback())} }
                            for column in NUMERIC_COLUMNS {
                                {
                                    let (delta, detail) = diff_cell(diff_table, metric, column.key, &t);
                                    rsx! {
                                        td {
                                            key: "{column.key}",
                                            style: table_cell_style(true),
                                            title: "{detail}",
                                            "{delta}"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
    }
}

fn prognosis_rows(details: &PrognosisDetails, t: &Translator) -> (Vec<(String, String)>, Vec<(String, String)>) {
    let column_label = |key: &str| {
        numeric_column(key)
            .map(|column| t.t_or(column.label_key, column.fallback))
            .unwrap_or_else(|| key.to_string())
    };
    let numeric = details
        .numeric
        .iter()
        .map(|(key, generation)| {
            (
                column_label(key),
                format!(
                    "{} · μ = {} · σ = {}",
                    generation.distribution,
                    format_number(generation.mu, t.language()),
                    format_number(generation.sigma, t.language())
                ),
            )
        })
        .collect();
    let categorical = details
        .categorical
        .iter()
        .map(|(key, generation)| {
            let choices = generation
                .choices
                .iter()
                .map(|choice| format_cell_value(Some(choice), t))
                .collect::<Vec<_>>()
                .join(", ");
            (column_label(key), choices)
        })
        .collect();
    (numeric, categorical)
}

#[component]
fn PrognosisView(panel: Signal<PrognosisPanel>) -> Element {
    let state = use_context::<AppState>();
    let t = state.translator();
    let panel = panel.read();

    match panel.state() {
        PanelState::Idle => rsx! {},
        PanelState::Loading => rsx! { p { {t.t_or("ui_loading", "Loading...")} } },
        PanelState::Failed(err) => rsx! { ErrorBox { message: err.user_message(&t) } },
        PanelState::Ready(details) => {
            let (numeric, categorical) = prognosis_rows(details, &t);
            rsx! {
                p { {process_summary(&t, details)} }
                h4 { {t.t_or("prognosis_numeric_params", "Numeric parameters")} }
                ul {
                    for (label, text) in numeric {
                        li { key: "{label}", "{label}: {text}" }
                    }
                }
                h4 { {t.t_or("prognosis_categorical_params", "Categorical parameters")} }
                ul {
                    for (label, text) in categorical {
                        li { key: "{label}", "{label}: {text}" }
                    }
                }
            }
        }
    }
}
