// Small browser helpers shared by the components
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::model::Notice;

/// Shows a blocking notice.
pub fn notify(notice: &Notice) {
    let message = notice.message();
    log::info!("Notice: {message}");
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(err) = window.alert_with_message(message) {
        log::warn!("Unable to show notice: {err:?}");
    }
}

pub fn input_value(e: &InputEvent) -> String {
    e.target_unchecked_into::<HtmlInputElement>().value()
}
