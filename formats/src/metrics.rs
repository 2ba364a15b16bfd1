//! Derived metrics the presentation layer works from.
//!
//! All of these are pure functions over projected rows.  They never fabricate values:
//! a metric that is undefined for the input (mean of an empty fleet, displacement
//! without a prediction, delta for an id only one side knows) stays undefined.
//!

use std::collections::BTreeMap;

use serde::Serialize;
use strum::IntoEnumIterator;

use crate::{Status, UavPoint};

/// Count of rows per status value.  Every enumeration member gets an entry, so counts
/// always sum to the row count.
///
pub fn status_distribution(points: &[UavPoint]) -> BTreeMap<Status, usize> {
    let mut dist: BTreeMap<Status, usize> = Status::iter().map(|s| (s, 0)).collect();

    points.iter().for_each(|p| {
        *dist.entry(p.status).or_insert(0) += 1;
    });
    dist
}

/// Per-UAV change in minimum separation across the avoidance pass.
///
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DminDelta {
    /// Identifier for the UAV
    pub uav_id: String,
    /// Minimum separation before the pass, kilometers
    pub before_km: f64,
    /// Minimum separation after the pass, kilometers
    pub after_km: f64,
    /// `after - before`, positive means the pass gained separation
    pub delta_km: f64,
}

/// Compute `dmin_after - dmin_before` for every id present in both snapshots, in
/// after-snapshot order.  Ids absent from one side are excluded: no interpolation,
/// no default.
///
pub fn delta_min_distance(before: &[UavPoint], after: &[UavPoint]) -> Vec<DminDelta> {
    let dmin: BTreeMap<&str, f64> = before
        .iter()
        .map(|p| (p.uav_id.as_str(), p.min_distance_km))
        .collect();

    after
        .iter()
        .filter_map(|p| {
            dmin.get(p.uav_id.as_str()).map(|before_km| DminDelta {
                uav_id: p.uav_id.clone(),
                before_km: *before_km,
                after_km: p.min_distance_km,
                delta_km: p.min_distance_km - before_km,
            })
        })
        .collect()
}

/// True iff any row still classifies as `collision`.
///
pub fn has_collision(points: &[UavPoint]) -> bool {
    points.iter().any(|p| p.status == Status::Collision)
}

/// Arithmetic mean of the minimum separations.  Undefined for an empty fleet.
///
pub fn mean_min_distance(points: &[UavPoint]) -> Option<f64> {
    if points.is_empty() {
        return None;
    }
    let sum: f64 = points.iter().map(|p| p.min_distance_km).sum();
    Some(sum / points.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn point(id: &str, status: Status, dmin: f64) -> UavPoint {
        UavPoint {
            uav_id: id.to_string(),
            x: 0.,
            y: 0.,
            status,
            min_distance_km: dmin,
            predicted_x: None,
            predicted_y: None,
        }
    }

    #[test]
    fn test_distribution_sums_to_total() {
        let points = vec![
            point("1", Status::Safe, 3.0),
            point("2", Status::Collision, 0.1),
            point("3", Status::Safe, 2.0),
        ];
        let dist = status_distribution(&points);

        // every member present, even at zero
        //
        assert_eq!(4, dist.len());
        assert_eq!(2, dist[&Status::Safe]);
        assert_eq!(0, dist[&Status::OuterNear]);
        assert_eq!(0, dist[&Status::InnerNear]);
        assert_eq!(1, dist[&Status::Collision]);
        assert_eq!(points.len(), dist.values().sum::<usize>());
    }

    #[test]
    fn test_distribution_empty() {
        let dist = status_distribution(&[]);
        assert_eq!(4, dist.len());
        assert_eq!(0, dist.values().sum::<usize>());
    }

    #[test]
    fn test_delta_only_for_matching_ids() {
        let before = vec![point("1", Status::Safe, 2.0)];
        let after = vec![point("1", Status::Safe, 1.2), point("2", Status::Safe, 0.5)];

        let deltas = delta_min_distance(&before, &after);

        assert_eq!(1, deltas.len());
        assert_eq!("1", deltas[0].uav_id);
        assert!((deltas[0].delta_km - (-0.8)).abs() < 1e-9);
    }

    #[test]
    fn test_delta_keeps_after_order() {
        let before = vec![point("b", Status::Safe, 1.0), point("a", Status::Safe, 2.0)];
        let after = vec![point("a", Status::Safe, 2.5), point("b", Status::Safe, 1.5)];

        let ids: Vec<_> = delta_min_distance(&before, &after)
            .iter()
            .map(|d| d.uav_id.clone())
            .collect();
        assert_eq!(vec!["a", "b"], ids);
    }

    #[rstest]
    #[case(vec![], false)]
    #[case(vec![point("1", Status::Safe, 1.0)], false)]
    #[case(vec![point("1", Status::Safe, 1.0), point("2", Status::Collision, 0.0)], true)]
    fn test_has_collision(#[case] points: Vec<UavPoint>, #[case] expected: bool) {
        assert_eq!(expected, has_collision(&points));
    }

    #[test]
    fn test_mean_min_distance() {
        assert_eq!(None, mean_min_distance(&[]));

        let points = vec![point("1", Status::Safe, 1.0), point("2", Status::Safe, 3.0)];
        assert_eq!(Some(2.0), mean_min_distance(&points));
    }
}
