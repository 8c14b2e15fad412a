pub mod geolocation;
pub mod leaflet;
pub mod nominatim;

pub use leaflet::{MapSettings, MapWidget};
pub use nominatim::Nominatim;

use crate::model::{GeoPoint, GeocodeError};
use crate::state::{LocationAction, LookupRequest};

/// Resolves a point to a display address. `Ok(None)` means the service
/// answered but knows no name for the point.
#[allow(async_fn_in_trait)] // only ever driven by `spawn_local`
pub trait ReverseGeocoder {
    async fn reverse(&self, point: GeoPoint) -> Result<Option<String>, GeocodeError>;
}

/// Runs one lookup and turns its outcome into the action that completes it.
pub async fn lookup_address<G>(geocoder: &G, request: LookupRequest) -> LocationAction
where
    G: ReverseGeocoder,
{
    let LookupRequest { seq, point } = request;
    let result = geocoder.reverse(point).await;
    LocationAction::AddressResolved { seq, result }
}
