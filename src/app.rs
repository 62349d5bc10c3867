use dioxus::prelude::*;
use tracing::error;

use crate::i18n::Language;
use crate::ui::state::app_state::{AppState, Services, Tab};
use crate::ui::styles::{root_container_style, tab_button_style};
use crate::ui::views::charts::ChartsTab;
use crate::ui::views::chernoff::ChernoffTab;
use crate::ui::views::data_table::{run_page_request, DataTab};
use crate::ui::views::statistics::StatisticsTab;
use crate::usecase::services::table_view::{load_header_labels, LoadState};

#[component]
pub fn App() -> Element {
    let services = use_hook(|| {
        Services::init().map_err(|err| {
            error!(error = %format!("{err:#}"), "failed to start dashboard services");
            format!("{err:#}")
        })
    });

    match services {
        Ok(services) => rsx! { Dashboard { services } },
        Err(message) => rsx! {
            div {
                style: root_container_style(),
                p { "Failed to start: {message}" }
            }
        },
    }
}

/// Always-mounted shell. Owns the table fetches so they survive tab switches.
#[component]
pub fn Dashboard(services: Services) -> Element {
    let state = AppState::new(services.prefs.clone());
    use_context_provider(|| state);
    let t = state.translator();

    let client = services.client.clone();
    use_effect(move || {
        let language = (state.language)();
        let mode = (state.table_mode)();
        let mut table = state.table;
        let request = {
            let mut table = table.write();
            let first = matches!(table.state(), LoadState::Idle);
            let by_language = table.set_language(language);
            let by_mode = table.set_mode(mode);
            if first {
                Some(table.mount())
            } else {
                by_mode.or(by_language)
            }
        };
        if let Some(request) = request {
            run_page_request(table, client.clone(), request);
        }
    });

    let client = services.client.clone();
    use_effect(move || {
        let language = (state.language)();
        let mut headers = state.headers;
        let request = headers.write().request(language);
        let client = client.clone();
        spawn(async move {
            let result = load_header_labels(&client, language).await;
            headers.write().settle(&request, result);
        });
    });

    let current_tab = (state.tab)();
    let current_language = (state.language)();
    let status = (state.status)();

    rsx! {
        div {
            style: root_container_style(),
            div {
                style: "display: flex; align-items: center; justify-content: space-between; gap: 12px; padding: 8px 0;",
                h2 { style: "margin: 0;", {t.t_or("ui_app_title", "Loan dashboard")} }
                label {
                    {t.t_or("ui_language", "Language")}
                    " "
                    select {
                        value: current_language.code(),
                        onchange: move |event: Event<FormData>| {
                            let mut store = state.language_store;
                            store.write().set_language_code(&event.value());
                        },
                        for language in Language::ALL {
                            option {
                                key: "{language.code()}",
                                value: language.code(),
                                selected: language == current_language,
                                "{language.label()}"
                            }
                        }
                    }
                }
            }

            div {
                style: "display: flex; border-bottom: 1px solid #ddd; margin-bottom: 8px;",
                for tab in Tab::ALL {
                    button {
                        key: "{tab.label_key()}",
                        style: tab_button_style(tab == current_tab),
                        onclick: move |_| {
                            let mut selected = state.tab;
                            selected.set(tab);
                        },
                        {t.t_or(tab.label_key(), tab.label_key())}
                    }
                }
            }

            match current_tab {
                Tab::Data => rsx! { DataTab { services: services.clone() } },
                Tab::Statistics => rsx! { StatisticsTab { services: services.clone() } },
                Tab::Charts => rsx! { ChartsTab { services: services.clone() } },
                Tab::Chernoff => rsx! { ChernoffTab { services: services.clone() } },
            }

            if !status.is_empty() {
                div {
                    style: "padding: 6px 0; color: #555; font-size: 0.9em;",
                    "{status}"
                }
            }
        }
    }
}
