//! The page's location state and the single function that changes it.
//!
//! Every user action and every completed browser request is fed through
//! [`LocationState::update`] as a [`LocationAction`]. The function mutates the
//! state in place and returns the [`Command`]s the page has to run next, so
//! the whole synchronization between the inputs, the pin and the address can
//! be exercised without a browser.

use super::coords::{CoordinatesError, parse_point};
use super::lookup::{LookupRequest, LookupTracker, ResponseOrder};
use crate::model::{ADDRESS_NOT_FOUND, GeoPoint, GeocodeError, GeolocationError, Notice};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationState {
    /// Map center.
    pub position: GeoPoint,
    /// Set by the first locating action and never cleared afterwards.
    pub pinned: Option<GeoPoint>,
    pub address: Option<String>,
    pub coordinates_input: String,
    pub address_input: String,
    /// Result of the last coordinates edit that could not be applied.
    pub coordinates_error: Option<CoordinatesError>,
    pub lookups: LookupTracker,
}

#[derive(Clone, Debug, PartialEq)]
pub enum LocationAction {
    RequestDeviceLocation,
    DeviceLocated(GeoPoint),
    DeviceLocationFailed(GeolocationError),
    CoordinatesTextChanged(String),
    AddressTextChanged(String),
    MapClicked(GeoPoint),
    AddressResolved {
        seq: u64,
        result: Result<Option<String>, GeocodeError>,
    },
    ConfirmLocation,
}

/// Side effects requested by [`LocationState::update`].
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    LocateDevice,
    ReverseGeocode(LookupRequest),
    Notify(Notice),
}

impl LocationState {
    pub fn new(order: ResponseOrder) -> Self {
        Self {
            lookups: LookupTracker::new(order),
            ..Default::default()
        }
    }

    pub fn update(&mut self, action: LocationAction) -> Vec<Command> {
        use LocationAction::*;
        match action {
            RequestDeviceLocation => vec![Command::LocateDevice],
            DeviceLocated(point) => {
                log::debug!("Device located at {point}");
                self.pin_and_echo(point)
            }
            DeviceLocationFailed(err) => {
                log::warn!("Unable to locate device: {err}");
                vec![Command::Notify(Notice::GeolocationFailed(err))]
            }
            CoordinatesTextChanged(text) => {
                let parsed = parse_point(&text);
                self.coordinates_input = text;
                match parsed {
                    Ok(point) => {
                        self.pin(point);
                        vec![self.reverse_geocode(point)]
                    }
                    Err(err) => {
                        log::debug!("Coordinates not applied: {err}");
                        self.coordinates_error = Some(err);
                        vec![]
                    }
                }
            }
            AddressTextChanged(text) => {
                self.address_input = text;
                vec![]
            }
            MapClicked(point) => self.pin_and_echo(point),
            AddressResolved { seq, result } => self.resolve_address(seq, result),
            ConfirmLocation => match self.pinned {
                Some(point) => {
                    log::info!("Location confirmed at {point}");
                    vec![Command::Notify(Notice::LocationConfirmed)]
                }
                None => vec![],
            },
        }
    }

    /// Issues the next lookup for `point`.
    pub fn reverse_geocode(&mut self, point: GeoPoint) -> Command {
        Command::ReverseGeocode(self.lookups.issue(point))
    }

    fn pin(&mut self, point: GeoPoint) {
        self.position = point;
        self.pinned = Some(point);
        self.coordinates_error = None;
    }

    // Pins the point and writes it back into the coordinates input.
    fn pin_and_echo(&mut self, point: GeoPoint) -> Vec<Command> {
        self.pin(point);
        self.coordinates_input = point.to_string();
        vec![self.reverse_geocode(point)]
    }

    fn resolve_address(
        &mut self,
        seq: u64,
        result: Result<Option<String>, GeocodeError>,
    ) -> Vec<Command> {
        if !self.lookups.accepts(seq) {
            log::debug!(
                "Discarding address lookup #{seq}, #{} is newer",
                self.lookups.issued
            );
            return vec![];
        }
        match result {
            Ok(name) => {
                let name = name
                    .filter(|n| !n.trim().is_empty())
                    .unwrap_or_else(|| ADDRESS_NOT_FOUND.to_string());
                self.address_input = name.clone();
                self.address = Some(name);
                vec![]
            }
            Err(err) => {
                log::warn!("Address lookup #{seq} failed: {err}");
                vec![Command::Notify(Notice::GeocodeFailed)]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(commands: &[Command]) -> LookupRequest {
        match commands {
            [Command::ReverseGeocode(request)] => *request,
            other => panic!("expected a single lookup, got {other:?}"),
        }
    }

    fn resolved(seq: u64, name: &str) -> LocationAction {
        LocationAction::AddressResolved {
            seq,
            result: Ok(Some(name.to_string())),
        }
    }

    #[test]
    fn starts_unpinned_at_origin() {
        let state = LocationState::default();
        assert_eq!(state.position, GeoPoint::new(0.0, 0.0));
        assert_eq!(state.pinned, None);
        assert_eq!(state.address, None);
        assert!(state.coordinates_input.is_empty());
    }

    #[test]
    fn valid_coordinates_pin_and_trigger_one_lookup() {
        let mut state = LocationState::default();
        let commands = state.update(LocationAction::CoordinatesTextChanged("40, -70".into()));
        let point = GeoPoint::new(40.0, -70.0);
        assert_eq!(lookup(&commands).point, point);
        assert_eq!(state.position, point);
        assert_eq!(state.pinned, Some(point));
        assert_eq!(state.coordinates_input, "40, -70");
        assert_eq!(state.coordinates_error, None);
    }

    #[test]
    fn typed_text_is_kept_verbatim() {
        let mut state = LocationState::default();
        state.update(LocationAction::CoordinatesTextChanged(" 40.50 ,-70".into()));
        assert_eq!(state.coordinates_input, " 40.50 ,-70");
        assert_eq!(state.pinned, Some(GeoPoint::new(40.5, -70.0)));
    }

    #[test]
    fn invalid_coordinates_change_only_the_text() {
        let mut state = LocationState::default();
        state.update(LocationAction::MapClicked(GeoPoint::new(1.0, 2.0)));
        let before = state.clone();

        for text in ["40", "1, 2, 3", "north, west", "40,", ""] {
            let commands = state.update(LocationAction::CoordinatesTextChanged(text.into()));
            assert!(commands.is_empty(), "{text:?} triggered {commands:?}");
            assert_eq!(state.position, before.position);
            assert_eq!(state.pinned, before.pinned);
            assert_eq!(state.lookups.issued, before.lookups.issued);
            assert_eq!(state.coordinates_input, text);
            assert!(state.coordinates_error.is_some());
        }
    }

    #[test]
    fn valid_entry_clears_previous_error() {
        let mut state = LocationState::default();
        state.update(LocationAction::CoordinatesTextChanged("40".into()));
        assert_eq!(state.coordinates_error, Some(CoordinatesError::TokenCount(1)));
        state.update(LocationAction::CoordinatesTextChanged("40, 7".into()));
        assert_eq!(state.coordinates_error, None);
    }

    #[test]
    fn map_click_always_pins_the_clicked_point() {
        let mut state = LocationState::default();
        state.update(LocationAction::CoordinatesTextChanged("10, 20".into()));
        state.update(LocationAction::CoordinatesTextChanged("garbage".into()));

        let point = GeoPoint::new(-33.8688, 151.2093);
        let commands = state.update(LocationAction::MapClicked(point));
        assert_eq!(lookup(&commands).point, point);
        assert_eq!(state.pinned, Some(point));
        assert_eq!(state.position, point);
        assert_eq!(state.coordinates_input, "-33.8688, 151.2093");
        assert_eq!(state.coordinates_error, None);
    }

    #[test]
    fn device_location_flow() {
        let mut state = LocationState::default();
        assert_eq!(
            state.update(LocationAction::RequestDeviceLocation),
            vec![Command::LocateDevice]
        );
        // nothing changes until the browser answers
        assert_eq!(state.pinned, None);

        let point = GeoPoint::new(52.52, 13.405);
        let commands = state.update(LocationAction::DeviceLocated(point));
        assert_eq!(lookup(&commands).point, point);
        assert_eq!(state.pinned, Some(point));
        assert_eq!(state.coordinates_input, "52.52, 13.405");
    }

    #[test]
    fn device_location_failure_only_notifies() {
        let mut state = LocationState::default();
        state.update(LocationAction::MapClicked(GeoPoint::new(1.0, 1.0)));
        let before = state.clone();
        let commands = state.update(LocationAction::DeviceLocationFailed(
            GeolocationError::PermissionDenied,
        ));
        assert_eq!(
            commands,
            vec![Command::Notify(Notice::GeolocationFailed(
                GeolocationError::PermissionDenied
            ))]
        );
        assert_eq!(state, before);
    }

    #[test]
    fn address_text_does_not_geocode() {
        let mut state = LocationState::default();
        let commands = state.update(LocationAction::AddressTextChanged("Main St".into()));
        assert!(commands.is_empty());
        assert_eq!(state.address_input, "Main St");
        assert_eq!(state.address, None);
        assert_eq!(state.pinned, None);
    }

    #[test]
    fn confirm_before_pinning_is_a_no_op() {
        let mut state = LocationState::default();
        let before = state.clone();
        assert!(state.update(LocationAction::ConfirmLocation).is_empty());
        assert_eq!(state, before);
    }

    #[test]
    fn confirm_after_pinning_notifies_once() {
        let mut state = LocationState::default();
        state.update(LocationAction::MapClicked(GeoPoint::new(5.0, 6.0)));
        let before = state.clone();
        assert_eq!(
            state.update(LocationAction::ConfirmLocation),
            vec![Command::Notify(Notice::LocationConfirmed)]
        );
        assert_eq!(state, before);
    }

    #[test]
    fn resolved_name_fills_both_address_fields() {
        let mut state = LocationState::default();
        let request = lookup(&state.update(LocationAction::MapClicked(GeoPoint::new(40.0, -70.0))));
        state.update(resolved(request.seq, "123 Main St"));
        assert_eq!(state.address.as_deref(), Some("123 Main St"));
        assert_eq!(state.address_input, "123 Main St");
    }

    #[test]
    fn missing_or_blank_name_uses_placeholder() {
        for result in [Ok(None), Ok(Some(String::new())), Ok(Some("  ".to_string()))] {
            let mut state = LocationState::default();
            let request =
                lookup(&state.update(LocationAction::MapClicked(GeoPoint::new(0.0, -160.0))));
            state.update(LocationAction::AddressResolved {
                seq: request.seq,
                result,
            });
            assert_eq!(state.address.as_deref(), Some(ADDRESS_NOT_FOUND));
            assert_eq!(state.address_input, ADDRESS_NOT_FOUND);
        }
    }

    #[test]
    fn failed_lookup_keeps_previous_address() {
        let mut state = LocationState::default();
        let first = lookup(&state.update(LocationAction::MapClicked(GeoPoint::new(1.0, 1.0))));
        state.update(resolved(first.seq, "Old Road"));
        state.update(LocationAction::AddressTextChanged("edited".into()));

        let second = lookup(&state.update(LocationAction::MapClicked(GeoPoint::new(2.0, 2.0))));
        let commands = state.update(LocationAction::AddressResolved {
            seq: second.seq,
            result: Err(GeocodeError::Status(503)),
        });
        assert_eq!(commands, vec![Command::Notify(Notice::GeocodeFailed)]);
        assert_eq!(state.address.as_deref(), Some("Old Road"));
        assert_eq!(state.address_input, "edited");
    }

    #[test]
    fn late_response_overwrites_newer_one_by_default() {
        let mut state = LocationState::new(ResponseOrder::LastWriteWins);
        let a = lookup(&state.update(LocationAction::MapClicked(GeoPoint::new(1.0, 1.0))));
        let b = lookup(&state.update(LocationAction::MapClicked(GeoPoint::new(2.0, 2.0))));

        state.update(resolved(b.seq, "B Street"));
        state.update(resolved(a.seq, "A Avenue"));
        assert_eq!(state.address.as_deref(), Some("A Avenue"));
        // the pin still reflects the latest action
        assert_eq!(state.pinned, Some(GeoPoint::new(2.0, 2.0)));
    }

    #[test]
    fn stale_response_is_dropped_when_only_latest_counts() {
        let mut state = LocationState::new(ResponseOrder::LatestRequestOnly);
        let a = lookup(&state.update(LocationAction::MapClicked(GeoPoint::new(1.0, 1.0))));
        let b = lookup(&state.update(LocationAction::MapClicked(GeoPoint::new(2.0, 2.0))));

        state.update(resolved(b.seq, "B Street"));
        let commands = state.update(LocationAction::AddressResolved {
            seq: a.seq,
            result: Err(GeocodeError::Fetch("offline".into())),
        });
        assert!(commands.is_empty());
        state.update(resolved(a.seq, "A Avenue"));
        assert_eq!(state.address.as_deref(), Some("B Street"));
        assert_eq!(state.address_input, "B Street");
    }

    #[test]
    fn state_round_trips_through_json() {
        let mut state = LocationState::default();
        state.update(LocationAction::CoordinatesTextChanged("nope".into()));
        state.update(LocationAction::MapClicked(GeoPoint::new(3.5, 4.5)));
        let json = serde_json::to_string(&state).unwrap();
        let back: LocationState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
