//! The dashboard itself: one immutable `WatchCycle` value per tick, rendered into
//! console tables and SVG charts.
//!
//! Nothing here keeps state across ticks; every cycle starts from the two snapshots
//! the client just fetched and ends with its rendered artifacts.
//!

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use sepwatch_formats::{
    delta_min_distance, has_collision, mean_min_distance, status_distribution, DminDelta,
    FleetSnapshot, Status, UavPoint,
};

pub use charts::*;
pub use tables::*;

mod charts;
mod plotcfg;
mod tables;

pub use plotcfg::{pad_range, status_color, status_size, Pixel, PlotResolution, FONT, PLOT_MARGIN};

/// Everything one tick of the dashboard works from, computed once after both fetches
/// resolved.
///
#[derive(Clone, Debug)]
pub struct WatchCycle {
    /// Projected rows, raw fleet
    pub before: Vec<UavPoint>,
    /// Projected rows, post-avoidance fleet
    pub after: Vec<UavPoint>,
    /// When the raw snapshot was received
    pub before_at: DateTime<Utc>,
    /// When the post-avoidance snapshot was received
    pub after_at: DateTime<Utc>,
    /// Count per status, raw fleet
    pub dist_before: BTreeMap<Status, usize>,
    /// Count per status, post-avoidance fleet
    pub dist_after: BTreeMap<Status, usize>,
    /// Per-UAV separation change, ids present on both sides only
    pub deltas: Vec<DminDelta>,
    /// True when the pass left a collision in the fleet
    pub collision: bool,
    /// Average minimum separation, raw fleet
    pub mean_before: Option<f64>,
    /// Average minimum separation, post-avoidance fleet
    pub mean_after: Option<f64>,
}

impl WatchCycle {
    /// Project both snapshots and derive every metric the renderers need.
    ///
    #[tracing::instrument(skip(before, after))]
    pub fn new(before: &FleetSnapshot, after: &FleetSnapshot) -> Self {
        let before_rows = before.project();
        let after_rows = after.project();

        WatchCycle {
            before_at: before.fetched_at,
            after_at: after.fetched_at,
            dist_before: status_distribution(&before_rows),
            dist_after: status_distribution(&after_rows),
            deltas: delta_min_distance(&before_rows, &after_rows),
            collision: has_collision(&after_rows),
            mean_before: mean_min_distance(&before_rows),
            mean_after: mean_min_distance(&after_rows),
            before: before_rows,
            after: after_rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sepwatch_formats::SnapshotTag;

    fn snap(tag: SnapshotTag, body: &str) -> FleetSnapshot {
        FleetSnapshot::decode(tag, body).unwrap()
    }

    #[test]
    fn test_watch_cycle_metrics() {
        let before = snap(
            SnapshotTag::Before,
            r##"{ "uavs": [
                { "uav_id": 1, "x": 44.0, "y": 33.0, "status": "inner_near",
                  "min_distance_km": 0.4, "predicted": { "x": 44.1, "y": 33.1 } }
            ]}"##,
        );
        let after = snap(
            SnapshotTag::After,
            r##"{ "uavs": [
                { "uav_id": 1, "x": 44.0, "y": 33.2, "status": "safe", "min_distance_km": 2.1 },
                { "uav_id": 2, "x": 44.5, "y": 33.0, "status": "collision", "min_distance_km": 0.0 }
            ]}"##,
        );

        let cycle = WatchCycle::new(&before, &after);

        assert_eq!(1, cycle.before.len());
        assert_eq!(2, cycle.after.len());
        assert!(cycle.collision);
        assert_eq!(1, cycle.dist_after[&Status::Collision]);

        // only id 1 is on both sides
        //
        assert_eq!(1, cycle.deltas.len());
        assert!((cycle.deltas[0].delta_km - 1.7).abs() < 1e-9);

        assert_eq!(Some(0.4), cycle.mean_before);
        assert_eq!(Some(1.05), cycle.mean_after);
    }
}
