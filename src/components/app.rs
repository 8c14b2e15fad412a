use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::{action_bar::ActionBar, location_form::LocationForm, map_view::MapView};
use crate::config::AppConfig;
use crate::model::GeoPoint;
use crate::services::{Nominatim, geolocation, lookup_address};
use crate::state::{Command, LocationAction, LocationState};
use crate::util::notify;

#[derive(Properties, PartialEq, Clone)]
pub struct AppProps {
    pub config: Rc<AppConfig>,
}

/// Owns the location state and runs the commands its updates produce.
/// Completions of asynchronous commands come back through [`Store::dispatch`].
#[derive(Clone)]
struct Store {
    state: Rc<RefCell<LocationState>>,
    redraw: UseForceUpdateHandle,
    geocoder: Rc<Nominatim>,
}

impl Store {
    fn dispatch(&self, action: LocationAction) {
        let commands = self.state.borrow_mut().update(action);
        self.redraw.force_update();
        for command in commands {
            self.run(command);
        }
    }

    fn run(&self, command: Command) {
        match command {
            Command::LocateDevice => {
                let store = self.clone();
                spawn_local(async move {
                    let action = match geolocation::current_position().await {
                        Ok(point) => LocationAction::DeviceLocated(point),
                        Err(err) => LocationAction::DeviceLocationFailed(err),
                    };
                    store.dispatch(action);
                });
            }
            Command::ReverseGeocode(request) => {
                let store = self.clone();
                spawn_local(async move {
                    let action = lookup_address(&*store.geocoder, request).await;
                    store.dispatch(action);
                });
            }
            Command::Notify(notice) => notify(&notice),
        }
    }

    fn callback<T: 'static>(&self, action: impl Fn(T) -> LocationAction + 'static) -> Callback<T> {
        let store = self.clone();
        Callback::from(move |value: T| store.dispatch(action(value)))
    }
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let config = props.config.clone();
    let state = {
        let order = config.response_order;
        use_mut_ref(move || LocationState::new(order))
    };
    let redraw = use_force_update();
    let geocoder = {
        let endpoint = config.geocoder_endpoint.clone();
        use_memo((), move |_| Nominatim::new(endpoint))
    };
    let settings = {
        let config = config.clone();
        use_memo((), move |_| config.map_settings())
    };

    let store = Store {
        state: state.clone(),
        redraw,
        geocoder,
    };

    let on_coordinates = store.callback(LocationAction::CoordinatesTextChanged);
    let on_address = store.callback(LocationAction::AddressTextChanged);
    let on_get_location = store.callback(|()| LocationAction::RequestDeviceLocation);
    let on_confirm = store.callback(|()| LocationAction::ConfirmLocation);
    let on_map_click = store.callback(LocationAction::MapClicked);

    let snapshot = state.borrow().clone();
    let map_link = snapshot.pinned.map(|point: GeoPoint| config.map_link(point));

    html! {
        <div class="App" style="display:flex; flex-direction:column; gap:12px; padding:16px; font-family:sans-serif;">
            <h1 style="margin:0;">{"Location App"}</h1>
            <LocationForm
                coordinates={snapshot.coordinates_input.clone()}
                address={snapshot.address_input.clone()}
                resolved_address={snapshot.address.clone()}
                coordinates_error={snapshot.coordinates_error.clone()}
                {on_coordinates}
                {on_address}
            />
            <ActionBar {on_get_location} {on_confirm} {map_link} />
            <MapView
                settings={(*settings).clone()}
                center={snapshot.position}
                marker={snapshot.pinned}
                on_click={on_map_click}
            />
        </div>
    }
}
