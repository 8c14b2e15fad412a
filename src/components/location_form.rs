use yew::prelude::*;

use crate::state::CoordinatesError;
use crate::util::input_value;

#[derive(Properties, PartialEq, Clone)]
pub struct LocationFormProps {
    pub coordinates: String,
    pub address: String,
    /// Last address the geocoder resolved, shown as the address field's tooltip.
    pub resolved_address: Option<String>,
    pub coordinates_error: Option<CoordinatesError>,
    pub on_coordinates: Callback<String>,
    pub on_address: Callback<String>,
}

#[function_component]
pub fn LocationForm(props: &LocationFormProps) -> Html {
    let coordinates_cb = {
        let cb = props.on_coordinates.clone();
        Callback::from(move |e: InputEvent| cb.emit(input_value(&e)))
    };
    let address_cb = {
        let cb = props.on_address.clone();
        Callback::from(move |e: InputEvent| cb.emit(input_value(&e)))
    };
    let input_style = "padding:6px 8px; border:1px solid #30363d; border-radius:6px; min-width:240px;";
    // an empty field is not worth a hint
    let hint = props
        .coordinates_error
        .as_ref()
        .filter(|err| !matches!(err, CoordinatesError::Blank));

    html! {
        <div style="display:flex; flex-direction:column; gap:4px;">
            <div style="display:flex; gap:8px; flex-wrap:wrap;">
                <input
                    type="text"
                    placeholder="Coordinates (lat, lon)"
                    style={input_style}
                    value={props.coordinates.clone()}
                    oninput={coordinates_cb}
                />
                <input
                    type="text"
                    placeholder="Address"
                    title={props.resolved_address.clone()}
                    style={format!("{input_style} flex:1;")}
                    value={props.address.clone()}
                    oninput={address_cb}
                />
            </div>
            { if let Some(err) = hint {
                html! { <div style="font-size:12px; color:#f85149;">{ format!("Not applied: {err}") }</div> }
            } else {
                html! {}
            } }
        </div>
    }
}
