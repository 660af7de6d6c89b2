#![allow(warnings)]
//! Todo Frontend Entry Point

mod actions;
mod api;
mod app;
mod components;
mod config;
mod context;
mod error;
mod logging;
mod models;
mod query;
mod view_state;


use app::App;
use config::ClientConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let config = ClientConfig::from_build_env();
    logging::init(config.log_level);
    tracing::info!(base_url = %config.base_url, "starting todo client");

    mount_to_body(move || view! { <App config=config.clone() /> });
}
