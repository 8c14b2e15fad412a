use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ActionBarProps {
    pub on_get_location: Callback<()>,
    pub on_confirm: Callback<()>,
    /// External map link for the pinned point; the icon is hidden without one.
    pub map_link: Option<String>,
}

#[function_component]
pub fn ActionBar(props: &ActionBarProps) -> Html {
    let locate_cb = {
        let cb = props.on_get_location.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let confirm_cb = {
        let cb = props.on_confirm.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {
        <div style="display:flex; align-items:center; gap:8px;">
            <button onclick={locate_cb}>{"Get Location"}</button>
            <button onclick={confirm_cb}>{"Confirm Location"}</button>
            { if let Some(href) = &props.map_link {
                html! {
                    <a
                        href={href.clone()}
                        target="_blank"
                        rel="noopener noreferrer"
                        title="Open in map"
                        style="margin-left:10px; text-decoration:none;"
                    >
                        <MarkerIcon />
                    </a>
                }
            } else {
                html! {}
            } }
        </div>
    }
}

#[function_component]
fn MarkerIcon() -> Html {
    html! {
        <svg width="24" height="32" viewBox="0 0 384 512" aria-hidden="true">
            <path
                fill="red"
                d="M172.3 501.7C27 291 0 269.4 0 192 0 86 86 0 192 0s192 86 192 192c0 77.4-27 99-172.3 309.7-9.5 13.8-29.9 13.8-39.5 0zM192 272c44.2 0 80-35.8 80-80s-35.8-80-80-80-80 35.8-80 80 35.8 80 80 80z"
            />
        </svg>
    }
}
