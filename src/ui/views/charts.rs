use dioxus::prelude::*;
use rfd::FileDialog;

use crate::domain::entities::chart::{find_chart, ChartParams, CHARTS};
use crate::domain::entities::column::{numeric_column, NUMERIC_COLUMNS};
use crate::domain::entities::dataset::Mode;
use crate::platform::desktop::paths::default_export_dir;
use crate::ui::state::app_state::{AppState, Services};
use crate::ui::views::{load_image, load_panel, ImageView, ModeSwitch};
use crate::usecase::services::chart_fetcher::{
    fetch_chart, load_chart_description, DescriptionPanel, ImagePanel,
};
use crate::usecase::services::dispatch::PanelState;
use crate::usecase::services::export_service::{default_file_name, image_extension, save_image};

const NO_COLUMN: &str = "";

#[component]
pub fn ChartsTab(services: Services) -> Element {
    let mut state = use_context::<AppState>();
    let t = state.translator();

    let mut chart_id = use_signal(|| CHARTS[0].id.to_string());
    let mut mode = use_signal(|| Mode::Normal);
    let mut compare = use_signal(|| false);
    let mut column = use_signal(|| None::<&'static str>);
    let image = use_signal(ImagePanel::default);
    let description = use_signal(DescriptionPanel::default);

    let client = services.client.clone();
    let registry = services.registry.clone();
    use_effect(move || {
        let id = chart_id();
        let params = ChartParams {
            mode: Some(mode()),
            column: column().map(str::to_string),
            compare: compare().then_some(true),
            ..ChartParams::for_language((state.language)())
        };

        let image_client = client.clone();
        let image_id = id.clone();
        let image_params = params.clone();
        load_image(image, registry.clone(), async move {
            fetch_chart(&image_client, &image_id, &image_params).await
        });

        let client = client.clone();
        load_panel(description, async move {
            load_chart_description(&client, &id, &params).await
        });
    });

    let selected_id = chart_id();
    let definition = find_chart(&selected_id);
    let alt = definition
        .map(|chart| t.t(chart.label_key, Some(chart.id)))
        .unwrap_or_else(|| selected_id.clone());
    let local_description = definition
        .and_then(|chart| chart.description_key)
        .map(|key| t.t(key, Some("")))
        .unwrap_or_default();
    let description_text = match description.read().state() {
        PanelState::Ready(text) if !text.trim().is_empty() => text.clone(),
        PanelState::Loading => t.t_or("chart_desc_loading", "Loading description..."),
        _ => local_description,
    };
    let description_error = match description.read().state() {
        PanelState::Failed(err) => Some(err.user_message(&t)),
        _ => None,
    };
    let has_image = image.read().image().is_some();
    let selected_column = column().unwrap_or(NO_COLUMN);

    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 12px; flex: 1; min-height: 0; overflow: auto;",
            div {
                style: "display: flex; gap: 12px; align-items: center; flex-wrap: wrap;",
                label { {t.t_or("chart_select", "Chart")} }
                select {
                    value: "{selected_id}",
                    onchange: move |event: Event<FormData>| chart_id.set(event.value()),
                    for chart in CHARTS {
                        option {
                            key: "{chart.id}",
                            value: chart.id,
                            selected: chart.id == selected_id,
                            {t.t(chart.label_key, Some(chart.id))}
                        }
                    }
                }
                ModeSwitch { mode: mode(), on_change: move |next: Mode| mode.set(next) }
                label { {t.t_or("stats_select_column", "Column")} }
                select {
                    value: "{selected_column}",
                    onchange: move |event: Event<FormData>| {
                        let value = event.value();
                        column.set(numeric_column(&value).map(|column| column.key));
                    },
                    option { value: NO_COLUMN, {t.t_or("stats_select_placeholder", "-- select --")} }
                    for candidate in NUMERIC_COLUMNS {
                        option {
                            key: "{candidate.key}",
                            value: candidate.key,
                            selected: candidate.key == selected_column,
                            {t.t_or(candidate.label_key, candidate.fallback)}
                        }
                    }
                }
                label {
                    input {
                        r#type: "checkbox",
                        checked: compare(),
                        onchange: move |_| compare.set(!compare()),
                    }
                    " "
                    {t.t_or("chart_compare_overlay", "Compare (Normal vs Prognosis overlay)")}
                }
                button {
                    disabled: !has_image,
                    onclick: move |_| {
                        let t = state.translator();
                        let panel = image.read();
                        let Some(current) = panel.image() else {
                            return;
                        };
                        let file_name = default_file_name(
                            &chart_id.peek(),
                            image_extension(current.content_type()),
                            chrono::Local::now().naive_local(),
                        );
                        let mut dialog = FileDialog::new().set_file_name(file_name);
                        if let Some(dir) = default_export_dir() {
                            dialog = dialog.set_directory(dir);
                        }
                        let Some(path) = dialog.save_file() else {
                            state.status.set(t.t_or("ui_export_cancelled", "Export cancelled"));
                            return;
                        };
                        let message = match save_image(&path, current.bytes()) {
                            Ok(()) => format!("{} {}", t.t_or("ui_export_done", "Saved to"), path.display()),
                            Err(err) => format!("{}: {err:#}", t.t_or("ui_export_failed", "Export failed")),
                        };
                        state.status.set(message);
                    },
                    {t.t_or("ui_save_image", "Save image")}
                }
            }

            if !description_text.is_empty() {
                small { style: "color: #555;", "{description_text}" }
            }
            if let Some(message) = description_error {
                small { style: "color: #a61b1b;", "{message}" }
            }

            ImageView { panel: image, alt }
        }
    }
}
