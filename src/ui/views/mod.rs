pub mod charts;
pub mod chernoff;
pub mod data_table;
pub mod statistics;

use std::future::Future;

use dioxus::prelude::*;

use crate::domain::entities::dataset::Mode;
use crate::infra::images::object_url::ObjectUrlRegistry;
use crate::ui::state::app_state::AppState;
use crate::ui::styles::{error_style, image_panel_style, toggle_button_style};
use crate::usecase::ports::remote::{Binary, FetchError};
use crate::usecase::services::chart_fetcher::ImagePanel;
use crate::usecase::services::dispatch::FetchPanel;

/// Starts a ticketed fetch for `panel` on the current scope.
pub fn load_panel<T, F>(mut panel: Signal<FetchPanel<T>>, fetch: F)
where
    T: 'static,
    F: Future<Output = Result<T, FetchError>> + 'static,
{
    let ticket = panel.write().begin();
    spawn(async move {
        let result = fetch.await;
        panel.write().settle(ticket, result);
    });
}

pub fn load_image<F>(mut panel: Signal<ImagePanel>, registry: ObjectUrlRegistry, fetch: F)
where
    F: Future<Output = Result<Binary, FetchError>> + 'static,
{
    let ticket = panel.write().begin();
    spawn(async move {
        let result = fetch.await;
        panel.write().settle(ticket, result, &registry);
    });
}

#[component]
pub fn ModeSwitch(mode: Mode, on_change: EventHandler<Mode>) -> Element {
    let state = use_context::<AppState>();
    let t = state.translator();

    rsx! {
        div {
            style: "display: inline-flex;",
            for candidate in Mode::ALL {
                button {
                    key: "{candidate.as_str()}",
                    style: toggle_button_style(candidate == mode),
                    onclick: move |_| on_change.call(candidate),
                    {t.t_or(candidate.label_key(), candidate.label_fallback())}
                }
            }
        }
    }
}

#[component]
pub fn ErrorBox(message: String) -> Element {
    rsx! {
        div { style: error_style(), "{message}" }
    }
}

#[component]
pub fn ImageView(panel: Signal<ImagePanel>, alt: String) -> Element {
    let state = use_context::<AppState>();
    let t = state.translator();
    let panel = panel.read();

    let body = if panel.is_loading() {
        rsx! { span { {t.t_or("ui_loading", "Loading...")} } }
    } else if let Some(err) = panel.error() {
        rsx! { ErrorBox { message: err.user_message(&t) } }
    } else if let Some(image) = panel.image() {
        rsx! {
            img {
                src: image.data_url(),
                alt: "{alt}",
                style: "max-width: 100%; max-height: 70vh;",
            }
        }
    } else {
        rsx! {}
    };

    rsx! {
        div { style: image_panel_style(), {body} }
    }
}
