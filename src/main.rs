use std::rc::Rc;

mod components;
mod config;
mod model;
mod services;
mod state;
mod util;

use components::{App, AppProps};
use config::AppConfig;

const MOUNT_ELEMENT_ID: &str = "app";

fn main() {
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();
    log::info!("Start location app");

    let Some(root) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(MOUNT_ELEMENT_ID))
    else {
        log::error!("Missing #{MOUNT_ELEMENT_ID} element to mount the app on");
        return;
    };
    let config = AppConfig::from_element(&root);
    log::debug!("Using {config:?}");
    yew::Renderer::<App>::with_root_and_props(
        root,
        AppProps {
            config: Rc::new(config),
        },
    )
    .render();
}
