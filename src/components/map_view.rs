use web_sys::HtmlElement;
use yew::prelude::*;

use crate::model::GeoPoint;
use crate::services::{MapSettings, MapWidget};

#[derive(Properties, PartialEq, Clone)]
pub struct MapViewProps {
    pub settings: MapSettings,
    pub center: GeoPoint,
    pub marker: Option<GeoPoint>,
    pub on_click: Callback<GeoPoint>,
}

#[function_component]
pub fn MapView(props: &MapViewProps) -> Html {
    let container_ref = use_node_ref();
    let widget = use_mut_ref(|| None::<MapWidget>);
    // The click handler is registered once; keep it pointed at the latest callback.
    let on_click_ref = use_mut_ref(|| props.on_click.clone());
    *on_click_ref.borrow_mut() = props.on_click.clone();

    {
        let container_ref = container_ref.clone();
        let widget = widget.clone();
        let settings = props.settings.clone();
        let center = props.center;
        let marker = props.marker;
        use_effect_with((), move |_| {
            match container_ref.cast::<HtmlElement>() {
                Some(element) => {
                    let on_click = move |point: GeoPoint| on_click_ref.borrow().emit(point);
                    match MapWidget::mount(&element, &settings, center, on_click) {
                        Ok(mut mounted) => {
                            if let Err(err) = mounted.set_marker(marker) {
                                log::warn!("Unable to place marker: {err}");
                            }
                            *widget.borrow_mut() = Some(mounted);
                        }
                        Err(err) => log::error!("Unable to show map: {err}"),
                    }
                }
                None => log::error!("Map container is not attached"),
            }
            move || {
                widget.borrow_mut().take();
            }
        });
    }

    // Re-center whenever the position changes
    {
        let widget = widget.clone();
        use_effect_with(props.center, move |center| {
            if let Some(map) = &*widget.borrow() {
                if let Err(err) = map.set_center(*center) {
                    log::warn!("Unable to move map: {err}");
                }
            }
            || ()
        });
    }

    {
        let widget = widget.clone();
        use_effect_with(props.marker, move |marker| {
            if let Some(map) = &mut *widget.borrow_mut() {
                if let Err(err) = map.set_marker(*marker) {
                    log::warn!("Unable to place marker: {err}");
                }
            }
            || ()
        });
    }

    html! { <div ref={container_ref} style="height:400px; width:100%;"></div> }
}
