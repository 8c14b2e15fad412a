// Sequencing of reverse-geocoding requests
use crate::model::GeoPoint;
use serde::{Deserialize, Serialize};

/// Which reverse-geocoding responses may overwrite the shown address when
/// several lookups are in flight at once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseOrder {
    /// Every response is applied in arrival order, so a slow response for an
    /// older point can replace the address of a newer one.
    #[default]
    LastWriteWins,
    /// Only the response to the most recently issued request is applied.
    LatestRequestOnly,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LookupRequest {
    pub seq: u64,
    pub point: GeoPoint,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupTracker {
    pub order: ResponseOrder,
    /// Sequence number of the most recently issued request; 0 before the first.
    pub issued: u64,
}

impl LookupTracker {
    pub fn new(order: ResponseOrder) -> Self {
        Self {
            order,
            ..Default::default()
        }
    }

    pub fn issue(&mut self, point: GeoPoint) -> LookupRequest {
        self.issued += 1;
        LookupRequest {
            seq: self.issued,
            point,
        }
    }

    /// Decides whether the response to request `seq` is still wanted.
    pub fn accepts(&self, seq: u64) -> bool {
        match self.order {
            ResponseOrder::LastWriteWins => seq <= self.issued,
            ResponseOrder::LatestRequestOnly => seq == self.issued,
        }
    }
}
