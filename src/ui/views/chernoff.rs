use dioxus::prelude::*;

use crate::domain::entities::chart::{ArtifactKind, ChartParams};
use crate::domain::entities::column::{numeric_column, NUMERIC_COLUMNS};
use crate::domain::entities::dataset::Mode;
use crate::ui::state::app_state::{AppState, Services};
use crate::ui::views::{load_image, ImageView, ModeSwitch};
use crate::usecase::services::chart_fetcher::{fetch_artifact, ImagePanel};

const ALL_FACES: &str = "all";

#[component]
pub fn ChernoffTab(services: Services) -> Element {
    let state = use_context::<AppState>();
    let t = state.translator();

    let mut mode = use_signal(|| Mode::Normal);
    // None renders every column
    let mut face = use_signal(|| None::<&'static str>);
    let mut compare = use_signal(|| false);
    let mut refresh = use_signal(|| 0_u32);
    let faces = use_signal(ImagePanel::default);
    let legend = use_signal(ImagePanel::default);
    let quantiles = use_signal(ImagePanel::default);

    let client = services.client.clone();
    let registry = services.registry.clone();
    use_effect(move || {
        refresh();
        let params = ChartParams {
            mode: Some(mode()),
            face: face().map(str::to_string),
            ..ChartParams::for_language((state.language)())
        };
        let client = client.clone();
        load_image(faces, registry.clone(), async move {
            fetch_artifact(&client, ArtifactKind::ChernoffFaces, &params).await
        });
    });

    let client = services.client.clone();
    let registry = services.registry.clone();
    use_effect(move || {
        let params = ChartParams::for_language((state.language)());
        let client = client.clone();
        load_image(legend, registry.clone(), async move {
            fetch_artifact(&client, ArtifactKind::ChernoffLegend, &params).await
        });
    });

    let client = services.client.clone();
    let registry = services.registry.clone();
    use_effect(move || {
        let params = ChartParams {
            mode: Some(mode()),
            column: face().map(str::to_string),
            compare: Some(compare()),
            ..ChartParams::for_language((state.language)())
        };
        let client = client.clone();
        load_image(quantiles, registry.clone(), async move {
            fetch_artifact(&client, ArtifactKind::QuantilesDistance, &params).await
        });
    });

    let selected_face = face().unwrap_or(ALL_FACES);
    let faces_loading = faces.read().is_loading();
    let title = t.t_or("ui_tab_chernoff", "Chernoff faces");
    let quantiles_title = t.t_or(
        "chart_quantiles_distance_label",
        "Distance of quartiles from the mean",
    );

    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 12px; flex: 1; min-height: 0; overflow: auto;",
            div {
                style: "display: flex; gap: 12px; align-items: center; flex-wrap: wrap;",
                ModeSwitch { mode: mode(), on_change: move |next: Mode| mode.set(next) }
                select {
                    value: "{selected_face}",
                    onchange: move |event: Event<FormData>| {
                        let value = event.value();
                        face.set(numeric_column(&value).map(|column| column.key));
                    },
                    option { value: ALL_FACES, {t.t_or("chernoff_face_all", "All columns")} }
                    for candidate in NUMERIC_COLUMNS {
                        option {
                            key: "{candidate.key}",
                            value: candidate.key,
                            selected: candidate.key == selected_face,
                            {t.t_or(candidate.label_key, candidate.fallback)}
                        }
                    }
                }
                button {
                    disabled: faces_loading,
                    onclick: move |_| refresh += 1,
                    {t.t_or("ui_refresh", "Refresh")}
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
            }

            section {
                h3 { "{title}" }
                ImageView { panel: faces, alt: title.clone() }
            }
            section {
                h4 { {t.t_or("chernoff_legend", "Legend")} }
                ImageView { panel: legend, alt: t.t_or("chernoff_legend", "Legend") }
            }
            section {
                h3 { "{quantiles_title}" }
                ImageView { panel: quantiles, alt: quantiles_title.clone() }
            }
        }
    }
}
