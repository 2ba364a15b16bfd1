// ----- `UavPoint`, flattened struct

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{FleetSnapshot, Status, UavRecord};

/// This is a flattened struct gathering everything one UAV record carries into a plain
/// row suitable for tables, CSV and charts.
///
/// The predicted pair stays optional all the way down: "no prediction" and "zero
/// displacement" are different answers and downstream arithmetic must be able to tell
/// them apart.
///
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct UavPoint {
    /// Identifier for the UAV
    pub uav_id: String,
    /// Longitude
    pub x: f64,
    /// Latitude
    pub y: f64,
    /// Proximity risk classification
    pub status: Status,
    /// Minimum separation to any other UAV, kilometers
    pub min_distance_km: f64,
    /// Forecast longitude, absent when no prediction was made
    pub predicted_x: Option<f64>,
    /// Forecast latitude, absent when no prediction was made
    pub predicted_y: Option<f64>,
}

impl From<&UavRecord> for UavPoint {
    fn from(rec: &UavRecord) -> Self {
        UavPoint {
            uav_id: rec.uav_id.clone(),
            x: rec.x,
            y: rec.y,
            status: rec.status,
            min_distance_km: rec.min_distance_km,
            predicted_x: rec.predicted.map(|p| p.x),
            predicted_y: rec.predicted.map(|p| p.y),
        }
    }
}

impl UavPoint {
    /// Actual position as an (x, y) pair.
    ///
    #[inline]
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Predicted position, when there is one.
    ///
    #[inline]
    pub fn predicted(&self) -> Option<(f64, f64)> {
        match (self.predicted_x, self.predicted_y) {
            (Some(px), Some(py)) => Some((px, py)),
            _ => None,
        }
    }

    /// Euclidean distance between actual and predicted position.  Undefined (not
    /// zero) without a prediction.
    ///
    pub fn displacement(&self) -> Option<f64> {
        self.predicted()
            .map(|(px, py)| ((self.x - px).powi(2) + (self.y - py).powi(2)).sqrt())
    }
}

impl FleetSnapshot {
    /// Project the snapshot into flat rows, one per record, preserving service order.
    ///
    /// Pure and infallible: the contract was already enforced while decoding.
    ///
    #[tracing::instrument(skip(self))]
    pub fn project(&self) -> Vec<UavPoint> {
        trace!("project({}, {} records)", self.tag, self.len());

        self.uavs.iter().map(UavPoint::from).collect()
    }
}
