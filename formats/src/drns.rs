//! Module to decode the JSON emitted by the DRNS deconfliction service.
//!
//! The service exposes a single read-only endpoint returning the current fleet state,
//! either raw (`process=false`) or after its collision-avoidance pass (`process=true`).
//! Both answers share one schema:
//!
//! ```json
//! { "uavs": [
//!     { "uav_id": 1, "x": 44.36, "y": 33.31,
//!       "status": "safe",
//!       "min_distance_km": 2.4,
//!       "predicted": { "x": 44.37, "y": 33.32 } }
//! ]}
//! ```
//!
//! `predicted` is only present when the service produced a forward prediction for that
//! UAV; it is either a full pair or absent, never partial.  Everything that deviates
//! from the schema (missing `uavs`, missing required fields, unknown status string,
//! partial `predicted`, duplicate ids) is a data-contract violation and is reported as
//! such instead of being papered over with defaults.
//!
//! The two snapshots of one refresh cycle come from two independent calls; the service
//! may have advanced its state in between.  This skew is accepted and visible through
//! each snapshot's `fetched_at` stamp.
//!

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use strum::{EnumString, VariantNames};
use thiserror::Error;
use tracing::trace;

/// Severity classification of a UAV's proximity risk, ordered by increasing severity.
///
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Eq,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
    strum::Display,
    strum::EnumIter,
    EnumString,
    VariantNames,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Status {
    /// Clear of every separation ring.
    Safe,
    /// Inside the outer separation ring of some other UAV.
    OuterNear,
    /// Inside the inner separation ring, avoidance expected to act.
    InnerNear,
    /// Separation lost.
    Collision,
}

/// Forward-predicted position, present only when the service ran its prediction model
/// for this UAV.
///
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct Predicted {
    /// Longitude in degrees
    pub x: f64,
    /// Latitude in degrees
    pub y: f64,
}

/// Represents one UAV record as obtained from the service.
///
/// Fields with the `Option` type indicate data the service only sometimes computes;
/// everything else is required and its absence is a contract violation.
///
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct UavRecord {
    /// Opaque identifier, unique within one snapshot.  The service emits it either as
    /// a number or a string depending on its version, we keep it opaque.
    #[serde(deserialize_with = "deser_id")]
    pub uav_id: String,
    /// Longitude in degrees
    pub x: f64,
    /// Latitude in degrees
    pub y: f64,
    /// Proximity risk classification
    pub status: Status,
    /// Minimum separation to any other UAV, kilometers
    pub min_distance_km: f64,
    /// Forward prediction, absent when none was computed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicted: Option<Predicted>,
}

/// The wire answer itself, only the `uavs` array.
///
#[derive(Debug, Deserialize)]
struct FleetData {
    uavs: Vec<UavRecord>,
}

/// Which side of the avoidance pass a snapshot describes.
///
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize, strum::Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SnapshotTag {
    Before,
    After,
}

/// One fetched, immutable set of UAV records at a point in time.
///
/// Snapshots are ephemeral, rebuilt on every refresh cycle.  Records are correlated
/// across the before/after pair only by `uav_id` and nothing guarantees the same id set
/// appears in both.
///
#[derive(Clone, Debug, Serialize)]
pub struct FleetSnapshot {
    /// Raw or post-avoidance?
    pub tag: SnapshotTag,
    /// When we received this answer
    pub fetched_at: DateTime<Utc>,
    /// All records, in service order
    pub uavs: Vec<UavRecord>,
}

impl FleetSnapshot {
    /// Decode one wire answer into a snapshot, enforcing the contract.
    ///
    #[tracing::instrument(skip(input))]
    pub fn decode(tag: SnapshotTag, input: &str) -> Result<Self, DataContractError> {
        trace!("drns::decode({tag})");

        let data: FleetData =
            serde_json::from_str(input).map_err(|e| DataContractError::Decode(e.to_string()))?;

        // id must be unique within one snapshot
        //
        let mut seen = BTreeSet::new();
        for uav in &data.uavs {
            if !seen.insert(uav.uav_id.as_str()) {
                return Err(DataContractError::DuplicateId(uav.uav_id.clone()));
            }
        }

        Ok(FleetSnapshot {
            tag,
            fetched_at: Utc::now(),
            uavs: data.uavs,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.uavs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.uavs.is_empty()
    }
}

/// Custom error type for the data contract, allow us to differentiate between errors.
///
#[derive(Debug, Error, PartialEq)]
pub enum DataContractError {
    #[error("Malformed answer: {0}")]
    Decode(String),
    #[error("Duplicate UAV id {0} within one snapshot")]
    DuplicateId(String),
}

/// The service emits ids as bare numbers or strings depending on its version; accept
/// both, keep them opaque.
///
fn deser_id<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Num(i64),
        Text(String),
    }

    Ok(match Id::deserialize(d)? {
        Id::Num(n) => n.to_string(),
        Id::Text(s) => s,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn good_body() -> &'static str {
        r##"{ "uavs": [
            { "uav_id": 1, "x": 44.36, "y": 33.31, "status": "safe",
              "min_distance_km": 2.4,
              "predicted": { "x": 44.37, "y": 33.32 } },
            { "uav_id": "u-2", "x": 44.40, "y": 33.30, "status": "collision",
              "min_distance_km": 0.1 }
        ]}"##
    }

    #[test]
    fn test_decode_good() {
        let snap = FleetSnapshot::decode(SnapshotTag::Before, good_body()).unwrap();

        assert_eq!(SnapshotTag::Before, snap.tag);
        assert_eq!(2, snap.len());
        assert_eq!("1", snap.uavs[0].uav_id);
        assert_eq!("u-2", snap.uavs[1].uav_id);
        assert_eq!(Status::Collision, snap.uavs[1].status);
        assert!(snap.uavs[0].predicted.is_some());
        assert!(snap.uavs[1].predicted.is_none());
    }

    #[test]
    fn test_decode_missing_uavs() {
        let r = FleetSnapshot::decode(SnapshotTag::Before, r##"{ "fleet": [] }"##);
        assert!(matches!(r, Err(DataContractError::Decode(_))));
    }

    #[test]
    fn test_decode_unknown_status() {
        let body = r##"{ "uavs": [
            { "uav_id": 1, "x": 0.0, "y": 0.0, "status": "meh", "min_distance_km": 1.0 }
        ]}"##;
        let r = FleetSnapshot::decode(SnapshotTag::After, body);
        assert!(matches!(r, Err(DataContractError::Decode(_))));
    }

    #[test]
    fn test_decode_missing_required_field() {
        // no min_distance_km
        //
        let body = r##"{ "uavs": [
            { "uav_id": 1, "x": 0.0, "y": 0.0, "status": "safe" }
        ]}"##;
        let r = FleetSnapshot::decode(SnapshotTag::Before, body);
        assert!(matches!(r, Err(DataContractError::Decode(_))));
    }

    #[test]
    fn test_decode_partial_predicted() {
        let body = r##"{ "uavs": [
            { "uav_id": 1, "x": 0.0, "y": 0.0, "status": "safe",
              "min_distance_km": 1.0, "predicted": { "x": 0.5 } }
        ]}"##;
        let r = FleetSnapshot::decode(SnapshotTag::Before, body);
        assert!(matches!(r, Err(DataContractError::Decode(_))));
    }

    #[test]
    fn test_decode_duplicate_id() {
        let body = r##"{ "uavs": [
            { "uav_id": 7, "x": 0.0, "y": 0.0, "status": "safe", "min_distance_km": 1.0 },
            { "uav_id": 7, "x": 1.0, "y": 1.0, "status": "safe", "min_distance_km": 1.0 }
        ]}"##;
        let r = FleetSnapshot::decode(SnapshotTag::Before, body);
        assert_eq!(
            DataContractError::DuplicateId("7".to_string()),
            r.unwrap_err()
        );
    }

    #[test]
    fn test_decode_ignores_extra_fields() {
        let body = r##"{ "uavs": [
            { "uav_id": 1, "x": 0.0, "y": 0.0, "status": "safe",
              "min_distance_km": 1.0, "battery": 87 }
        ], "generation": 42 }"##;
        let snap = FleetSnapshot::decode(SnapshotTag::After, body).unwrap();
        assert_eq!(1, snap.len());
    }

    #[test]
    fn test_status_ordering() {
        assert!(Status::Safe < Status::OuterNear);
        assert!(Status::OuterNear < Status::InnerNear);
        assert!(Status::InnerNear < Status::Collision);
    }

    #[test]
    fn test_status_strings() {
        assert_eq!("outer_near", Status::OuterNear.to_string());
        let s: Status = serde_json::from_str(r##""inner_near""##).unwrap();
        assert_eq!(Status::InnerNear, s);
    }
}
