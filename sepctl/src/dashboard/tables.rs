//! Console output for the dashboard: summary block and `tabled` tables.
//!

use tabled::builder::Builder;
use tabled::settings::Style;

use sepwatch_formats::{DminDelta, UavPoint};

use super::WatchCycle;

/// Format an optional float, "-" when the value is undefined.
///
fn opt_km(v: Option<f64>) -> String {
    match v {
        Some(v) => format!("{v:.3}"),
        None => "-".to_string(),
    }
}

/// One snapshot's rows as a table.
///
pub fn points_table(points: &[UavPoint]) -> String {
    let header = vec!["UAV", "Lon", "Lat", "Status", "dmin km", "displ."];

    let mut builder = Builder::default();
    builder.push_record(header);

    points.iter().for_each(|p| {
        builder.push_record(vec![
            p.uav_id.clone(),
            format!("{:.4}", p.x),
            format!("{:.4}", p.y),
            p.status.to_string(),
            format!("{:.3}", p.min_distance_km),
            opt_km(p.displacement()),
        ]);
    });

    builder.build().with(Style::rounded()).to_string()
}

/// Per-status counts, before vs after, one row per status.
///
pub fn status_table(cycle: &WatchCycle) -> String {
    let header = vec!["Status", "Before", "After"];

    let mut builder = Builder::default();
    builder.push_record(header);

    // Both maps carry every status, iterate one of them.
    //
    cycle.dist_before.iter().for_each(|(status, before)| {
        builder.push_record(vec![
            status.to_string(),
            before.to_string(),
            cycle.dist_after[status].to_string(),
        ]);
    });

    builder.build().with(Style::rounded()).to_string()
}

/// Separation change per UAV present on both sides of the pass.
///
pub fn delta_table(deltas: &[DminDelta]) -> String {
    let header = vec!["UAV", "dmin before", "dmin after", "delta"];

    let mut builder = Builder::default();
    builder.push_record(header);

    deltas.iter().for_each(|d| {
        builder.push_record(vec![
            d.uav_id.clone(),
            format!("{:.3}", d.before_km),
            format!("{:.3}", d.after_km),
            format!("{:+.3}", d.delta_km),
        ]);
    });

    builder.build().with(Style::rounded()).to_string()
}

/// The whole console block for one cycle.
///
pub fn render_summary(cycle: &WatchCycle) -> String {
    let banner = if cycle.collision {
        "COLLISION in post-avoidance fleet!"
    } else {
        "no collision"
    };

    format!(
        r##"=== Cycle at {} ===
before: {} UAVs (fetched {})   after: {} UAVs (fetched {})
{banner}
mean dmin: {} km -> {} km

Status counts:
{}
Before:
{}
After:
{}
Separation change (matching ids):
{}"##,
        cycle.after_at.format("%Y-%m-%d %H:%M:%S UTC"),
        cycle.before.len(),
        cycle.before_at.format("%H:%M:%S%.3f"),
        cycle.after.len(),
        cycle.after_at.format("%H:%M:%S%.3f"),
        opt_km(cycle.mean_before),
        opt_km(cycle.mean_after),
        status_table(cycle),
        points_table(&cycle.before),
        points_table(&cycle.after),
        delta_table(&cycle.deltas),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use sepwatch_formats::{FleetSnapshot, SnapshotTag};

    fn cycle() -> WatchCycle {
        let before = FleetSnapshot::decode(
            SnapshotTag::Before,
            r##"{ "uavs": [
                { "uav_id": 1, "x": 44.0, "y": 33.0, "status": "safe", "min_distance_km": 2.0 }
            ]}"##,
        )
        .unwrap();
        let after = FleetSnapshot::decode(
            SnapshotTag::After,
            r##"{ "uavs": [
                { "uav_id": 1, "x": 44.0, "y": 33.1, "status": "collision", "min_distance_km": 1.2 }
            ]}"##,
        )
        .unwrap();
        WatchCycle::new(&before, &after)
    }

    #[test]
    fn test_points_table_rows() {
        let cycle = cycle();
        let table = points_table(&cycle.after);

        assert!(table.contains("UAV"));
        assert!(table.contains("collision"));
        // no prediction, displacement column stays undefined
        //
        assert!(table.contains('-'));
    }

    #[test]
    fn test_status_table_has_all_statuses() {
        let table = status_table(&cycle());

        for name in ["safe", "outer_near", "inner_near", "collision"] {
            assert!(table.contains(name), "{name} missing");
        }
    }

    #[test]
    fn test_delta_table_signed() {
        let table = delta_table(&cycle().deltas);
        assert!(table.contains("-0.800"));
    }

    #[test]
    fn test_render_summary_flags_collision() {
        let s = render_summary(&cycle());
        assert!(s.contains("COLLISION"));
        assert!(s.contains("mean dmin"));
    }
}
