//! SVG chart rendering for the dashboard.
//!
//! Three charts per cycle, rewritten in place so the output directory always shows the
//! latest state:
//!
//! - `status.svg`: status distribution before vs after the avoidance pass
//! - `positions.svg`: position comparison with predictions and displacements
//! - `map.svg`: airspace view around the fixed reference point, one series per
//!   status, empty statuses skipped
//!

use std::fs;
use std::path::{Path, PathBuf};

use plotters::prelude::*;
use plotters::style::full_palette::{BLUE_600, GREY};
use strum::{IntoEnumIterator, VariantNames};
use thiserror::Error;
use tracing::trace;

use sepwatch_common::BB;
use sepwatch_formats::Status;

use super::plotcfg::{pad_range, status_color, status_size, PlotResolution, FONT, PLOT_MARGIN};
use super::WatchCycle;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Drawing failed: {0}")]
    Draw(String),
    #[error("Can not create output dir: {0}")]
    Output(String),
}

/// Shorthand, every plotters error type collapses into `Draw`.
///
fn draw_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Draw(e.to_string())
}

/// The set of charts one `watch` session rewrites every cycle.
///
#[derive(Debug)]
pub struct ChartSet {
    dir: PathBuf,
    resolution: PlotResolution,
    map_extent: BB,
}

impl ChartSet {
    /// Create the output directory and remember the fixed map extent.
    ///
    pub fn new(dir: &Path, map_extent: BB) -> Result<Self, RenderError> {
        fs::create_dir_all(dir).map_err(|e| RenderError::Output(e.to_string()))?;

        Ok(ChartSet {
            dir: dir.to_path_buf(),
            resolution: PlotResolution::default(),
            map_extent,
        })
    }

    /// Render the full chart set for one cycle.
    ///
    #[tracing::instrument(skip(self, cycle))]
    pub fn render(&self, cycle: &WatchCycle) -> Result<(), RenderError> {
        trace!("charts::render into {:?}", self.dir);

        self.render_status(cycle)?;
        self.render_positions(cycle)?;
        self.render_map(cycle)?;
        Ok(())
    }

    /// Grouped bar chart: per-status counts, before (pale) vs after (full).
    ///
    fn render_status(&self, cycle: &WatchCycle) -> Result<(), RenderError> {
        let path = self.dir.join("status.svg");
        let area = SVGBackend::new(&path, self.resolution.into()).into_drawing_area();
        area.fill(&WHITE).map_err(draw_err)?;

        let top = cycle
            .dist_before
            .values()
            .chain(cycle.dist_after.values())
            .max()
            .copied()
            .unwrap_or(0) as f64
            + 1.0;
        let slots = Status::VARIANTS.len() as f64;

        let mut chart = ChartBuilder::on(&area)
            .caption("Status distribution (before vs after)", (FONT, 20))
            .margin(PLOT_MARGIN)
            .x_label_area_size(40)
            .y_label_area_size(40)
            .build_cartesian_2d(0f64..slots, 0f64..top)
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(2 * Status::VARIANTS.len() + 1)
            .x_label_formatter(&|x| {
                // Name each slot once, at its center tick.
                //
                let i = *x as usize;
                if (x - i as f64 - 0.5).abs() < 0.1 {
                    Status::VARIANTS.get(i).map(|s| s.to_string()).unwrap_or_default()
                } else {
                    String::new()
                }
            })
            .y_desc("UAV count")
            .draw()
            .map_err(draw_err)?;

        for (i, status) in Status::iter().enumerate() {
            let x = i as f64;
            let before = cycle.dist_before[&status] as f64;
            let after = cycle.dist_after[&status] as f64;

            chart
                .draw_series(std::iter::once(Rectangle::new(
                    [(x + 0.10, 0.0), (x + 0.45, before)],
                    status_color(status).mix(0.35).filled(),
                )))
                .map_err(draw_err)?;
            chart
                .draw_series(std::iter::once(Rectangle::new(
                    [(x + 0.50, 0.0), (x + 0.85, after)],
                    status_color(status).filled(),
                )))
                .map_err(draw_err)?;
        }

        area.present().map_err(draw_err)?;
        Ok(())
    }

    /// Scatter comparing raw positions, post-avoidance positions and predictions.
    ///
    fn render_positions(&self, cycle: &WatchCycle) -> Result<(), RenderError> {
        let path = self.dir.join("positions.svg");
        let area = SVGBackend::new(&path, self.resolution.into()).into_drawing_area();
        area.fill(&WHITE).map_err(draw_err)?;

        // Frame every point we are about to draw.
        //
        let xs = cycle
            .before
            .iter()
            .chain(cycle.after.iter())
            .flat_map(|p| {
                std::iter::once(p.x).chain(p.predicted().map(|(px, _)| px))
            });
        let ys = cycle
            .before
            .iter()
            .chain(cycle.after.iter())
            .flat_map(|p| {
                std::iter::once(p.y).chain(p.predicted().map(|(_, py)| py))
            });
        let x_range = pad_range(
            xs.clone().fold(f64::INFINITY, f64::min),
            xs.fold(f64::NEG_INFINITY, f64::max),
        );
        let y_range = pad_range(
            ys.clone().fold(f64::INFINITY, f64::min),
            ys.fold(f64::NEG_INFINITY, f64::max),
        );

        let mut chart = ChartBuilder::on(&area)
            .caption("UAV positions (before / after / predicted)", (FONT, 20))
            .margin(PLOT_MARGIN)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(x_range, y_range)
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .x_desc("Longitude")
            .y_desc("Latitude")
            .draw()
            .map_err(draw_err)?;

        // Displacement segments first so markers draw on top.
        //
        chart
            .draw_series(cycle.before.iter().filter_map(|p| {
                p.predicted().map(|pred| {
                    PathElement::new(vec![p.position(), pred], GREY.mix(0.6).stroke_width(1))
                })
            }))
            .map_err(draw_err)?;

        chart
            .draw_series(
                cycle
                    .before
                    .iter()
                    .map(|p| Circle::new(p.position(), 4, BLUE_600.stroke_width(1))),
            )
            .map_err(draw_err)?
            .label("before")
            .legend(|(x, y)| Circle::new((x + 10, y), 4, BLUE_600.stroke_width(1)));

        chart
            .draw_series(cycle.after.iter().map(|p| {
                Circle::new(
                    p.position(),
                    status_size(p.status) as i32,
                    status_color(p.status).filled(),
                )
            }))
            .map_err(draw_err)?
            .label("after")
            .legend(|(x, y)| Circle::new((x + 10, y), 4, GREY.filled()));

        chart
            .draw_series(
                cycle
                    .before
                    .iter()
                    .filter_map(|p| p.predicted())
                    .map(|pred| Cross::new(pred, 4, GREY.stroke_width(1))),
            )
            .map_err(draw_err)?
            .label("predicted")
            .legend(|(x, y)| Cross::new((x + 10, y), 4, GREY.stroke_width(1)));

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8).filled())
            .border_style(BLACK.stroke_width(1))
            .draw()
            .map_err(draw_err)?;

        area.present().map_err(draw_err)?;
        Ok(())
    }

    /// Airspace view: post-avoidance fleet over the fixed bounding box, one series per
    /// status with id labels next to the markers.
    ///
    fn render_map(&self, cycle: &WatchCycle) -> Result<(), RenderError> {
        let path = self.dir.join("map.svg");
        let area = SVGBackend::new(&path, self.resolution.into()).into_drawing_area();
        area.fill(&WHITE).map_err(draw_err)?;

        let bb = self.map_extent;
        let mut chart = ChartBuilder::on(&area)
            .caption("Airspace view - UAV positions", (FONT, 20))
            .margin(PLOT_MARGIN)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(bb.min_lon..bb.max_lon, bb.min_lat..bb.max_lat)
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .x_desc("Longitude")
            .y_desc("Latitude")
            .draw()
            .map_err(draw_err)?;

        for status in Status::iter() {
            let points: Vec<_> = cycle.after.iter().filter(|p| p.status == status).collect();
            if points.is_empty() {
                continue;
            }

            chart
                .draw_series(points.iter().map(|p| {
                    EmptyElement::at(p.position())
                        + Circle::new(
                            (0, 0),
                            status_size(p.status) as i32,
                            status_color(p.status).filled(),
                        )
                        + Text::new(p.uav_id.clone(), (8, -8), (FONT, 11).into_font())
                }))
                .map_err(draw_err)?
                .label(status.to_string())
                .legend(move |(x, y)| Circle::new((x + 10, y), 4, status_color(status).filled()));
        }

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8).filled())
            .border_style(BLACK.stroke_width(1))
            .draw()
            .map_err(draw_err)?;

        area.present().map_err(draw_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sepwatch_formats::{FleetSnapshot, SnapshotTag};
    use std::env::temp_dir;

    fn cycle() -> WatchCycle {
        let before = FleetSnapshot::decode(
            SnapshotTag::Before,
            r##"{ "uavs": [
                { "uav_id": 1, "x": 44.36, "y": 33.31, "status": "outer_near",
                  "min_distance_km": 1.1, "predicted": { "x": 44.38, "y": 33.33 } }
            ]}"##,
        )
        .unwrap();
        let after = FleetSnapshot::decode(
            SnapshotTag::After,
            r##"{ "uavs": [
                { "uav_id": 1, "x": 44.35, "y": 33.30, "status": "safe", "min_distance_km": 2.3 }
            ]}"##,
        )
        .unwrap();
        WatchCycle::new(&before, &after)
    }

    #[test]
    fn test_chart_set_renders_all_files() {
        let dir = temp_dir().join("sepwatch-charts");
        let charts = ChartSet::new(&dir, BB::from_lat_lon(33.3152, 44.3661, 10)).unwrap();

        charts.render(&cycle()).unwrap();

        for name in ["status.svg", "positions.svg", "map.svg"] {
            let f = dir.join(name);
            assert!(f.exists(), "{name} missing");
            assert!(fs::metadata(&f).unwrap().len() > 0);
        }

        fs::remove_dir_all(&dir).unwrap();
    }
}
