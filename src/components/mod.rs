pub mod action_bar;
pub mod app;
pub mod location_form;
pub mod map_view;

pub use app::{App, AppProps};
