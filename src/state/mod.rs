pub mod coords;
pub mod location;
pub mod lookup;

pub use coords::CoordinatesError;
pub use location::{Command, LocationAction, LocationState};
pub use lookup::{LookupRequest, ResponseOrder};
