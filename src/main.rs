mod app;
mod config;
mod domain;
mod i18n;
mod infra;
mod platform;
mod ui;
mod usecase;

#[cfg(test)]
mod tests;

use crate::app::App;
use crate::platform::desktop::console::hide_console_window;
use crate::platform::desktop::paths::default_webview_data_dir;

fn main() {
    dioxus::logger::init(tracing::Level::INFO).expect("should initialize logger");
    hide_console_window();

    let webview_data_dir =
        default_webview_data_dir().expect("should resolve and create WebView2 data directory");

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(dioxus::desktop::WindowBuilder::new().with_title("Loan Dashboard"))
                .with_data_directory(webview_data_dir),
        )
        .launch(App);
}
