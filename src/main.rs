//! Wardrobe Frontend Entry Point

mod api;
mod app;
mod categories;
mod components;
mod config;
mod context;
mod files;
mod google;
mod models;
mod session;
mod store;
mod wardrobe;

use app::App;
use leptos::prelude::*;

use crate::config::AppConfig;

fn main() {
    console_error_panic_hook::set_once();

    let config = AppConfig::from_build_env();
    if let Err(e) = rolling_logger::init("Wardrobe", rolling_logger::parse_level(&config.log_level)) {
        web_sys::console::error_1(&format!("[APP] Logger already set: {}", e).into());
    }
    log::info!("[APP] Starting wardrobe frontend");

    mount_to_body(move || view! { <App config=config /> });
}
