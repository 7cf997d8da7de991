// Layout planner - Plot bounds and start/end label placement
//
// Label placement is a best-effort heuristic: one candidate per label and at
// most one flip of the end label. It handles near-straight and near-closed
// tracks; other geometries may still overlap.
use crate::domain::layout::{LabelBox, LabelPlacement, Offset, PlotBounds, PlotPoint};
use crate::domain::metrics::BoundingBox;
use crate::domain::track::Track;
use crate::infrastructure::config::LayoutConfig;

/// Bias added to the perpendicular offset, as a fraction of the magnitude.
const START_BIAS: (f64, f64) = (5.0 / 6.0, 1.0 / 3.0);
const END_BIAS: (f64, f64) = (5.0 / 6.0, -1.0 / 3.0);

/// Offsets used when an endpoint has no heading (single or stationary fix).
const START_FALLBACK: (f64, f64) = (1.0, 0.5);
const END_FALLBACK: (f64, f64) = (1.0, -0.5);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub bounds: PlotBounds,
    pub labels: LabelPlacement,
}

#[derive(Debug, Clone, Default)]
pub struct LayoutPlanner {
    config: LayoutConfig,
}

impl LayoutPlanner {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn plan(&self, track: &Track, bounding_box: &BoundingBox) -> Layout {
        let points: Vec<PlotPoint> = track
            .observations()
            .iter()
            .map(|o| PlotPoint::new(o.lon(), o.lat()))
            .collect();
        let bounds = self.plot_bounds(bounding_box);
        let labels = self.place_labels(&points, &bounds);
        Layout { bounds, labels }
    }

    /// Pads the box and enforces a minimum span on both axes, so a single
    /// fix still gets a usable map.
    pub fn plot_bounds(&self, bbox: &BoundingBox) -> PlotBounds {
        let cfg = &self.config;
        let larger = bbox.lat_span().max(bbox.lon_span());
        let pad = (larger * cfg.pad_fraction).min(cfg.max_pad_deg).max(cfg.min_pad_deg);

        let (lat_min, lat_max) = widen(bbox.lat_min - pad, bbox.lat_max + pad, cfg.min_span_deg);
        let (lon_min, lon_max) = widen(bbox.lon_min - pad, bbox.lon_max + pad, cfg.min_span_deg);
        let (lat_min, lat_max) = keep_within_poles(lat_min, lat_max);

        PlotBounds {
            lat_min,
            lat_max,
            lon_min,
            lon_max,
        }
    }

    pub fn place_labels(&self, points: &[PlotPoint], bounds: &PlotBounds) -> LabelPlacement {
        let cfg = &self.config;
        let scale = bounds.larger_span();
        let magnitude = scale * cfg.label_offset_fraction;

        let (Some(&start_anchor), Some(&end_anchor)) = (points.first(), points.last()) else {
            return LabelPlacement {
                start: scaled(START_FALLBACK, magnitude),
                end: scaled(END_FALLBACK, magnitude),
                end_flipped: false,
            };
        };

        let start_heading = points.iter().skip(1).find(|p| **p != start_anchor).map(|next| direction(start_anchor, *next));
        let end_heading = points.iter().rev().skip(1).find(|p| **p != end_anchor).map(|prev| direction(*prev, end_anchor));

        let start = offset_for(start_heading, START_BIAS, START_FALLBACK, magnitude);
        let end = offset_for(end_heading, END_BIAS, END_FALLBACK, magnitude);

        let width = scale * cfg.label_width_fraction;
        let height = scale * cfg.label_height_fraction;
        let start_box = LabelBox::centered(shifted(start_anchor, start), width, height);
        let end_box = LabelBox::centered(shifted(end_anchor, end), width, height);

        let tail_start = points.len().saturating_sub(cfg.track_check_segments + 1);
        let hits_track = points[tail_start..]
            .windows(2)
            .any(|segment| end_box.intersects_segment(segment[0], segment[1]));

        if points.len() > 1 && (end_box.overlaps(&start_box) || hits_track) {
            LabelPlacement {
                start,
                end: end.flipped(),
                end_flipped: true,
            }
        } else {
            LabelPlacement {
                start,
                end,
                end_flipped: false,
            }
        }
    }
}

fn widen(min: f64, max: f64, min_span: f64) -> (f64, f64) {
    let span = max - min;
    if span >= min_span {
        return (min, max);
    }
    let grow = (min_span - span) / 2.0;
    (min - grow, max + grow)
}

fn keep_within_poles(min: f64, max: f64) -> (f64, f64) {
    if min < -90.0 {
        (-90.0, (max + (-90.0 - min)).min(90.0))
    } else if max > 90.0 {
        ((min - (max - 90.0)).max(-90.0), 90.0)
    } else {
        (min, max)
    }
}

/// Unit vector from `from` to `to`; callers guarantee the points differ.
fn direction(from: PlotPoint, to: PlotPoint) -> (f64, f64) {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let len = dx.hypot(dy);
    (dx / len, dy / len)
}

fn offset_for(heading: Option<(f64, f64)>, bias: (f64, f64), fallback: (f64, f64), magnitude: f64) -> Offset {
    match heading {
        Some((hx, hy)) => Offset::new((-hy + bias.0) * magnitude, (hx + bias.1) * magnitude),
        None => scaled(fallback, magnitude),
    }
}

fn scaled((x, y): (f64, f64), magnitude: f64) -> Offset {
    Offset::new(x * magnitude, y * magnitude)
}

fn shifted(anchor: PlotPoint, offset: Offset) -> PlotPoint {
    PlotPoint::new(anchor.x + offset.dx, anchor.y + offset.dy)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bbox(lat_min: f64, lat_max: f64, lon_min: f64, lon_max: f64) -> BoundingBox {
        BoundingBox {
            lat_min,
            lat_max,
            lon_min,
            lon_max,
        }
    }

    fn points(coords: &[(f64, f64)]) -> Vec<PlotPoint> {
        coords.iter().map(|&(x, y)| PlotPoint::new(x, y)).collect()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_point_box_gets_minimum_span() {
        let planner = LayoutPlanner::default();
        let bounds = planner.plot_bounds(&bbox(20.0, 20.0, -60.0, -60.0));

        assert!(close(bounds.lat_span(), 5.0));
        assert!(close(bounds.lon_span(), 5.0));
        assert!(close((bounds.lat_min + bounds.lat_max) / 2.0, 20.0));
        assert!(close((bounds.lon_min + bounds.lon_max) / 2.0, -60.0));
    }

    #[test]
    fn test_padding_is_proportional_and_clamped() {
        let planner = LayoutPlanner::default();

        // 20 degree box -> 5 degree pad
        let medium = planner.plot_bounds(&bbox(10.0, 30.0, -80.0, -60.0));
        assert!(close(medium.lat_min, 5.0));
        assert!(close(medium.lon_max, -55.0));

        // 100 degree box -> pad capped at 15
        let huge = planner.plot_bounds(&bbox(0.0, 40.0, -100.0, 0.0));
        assert!(close(huge.lon_min, -115.0));
        assert!(close(huge.lon_max, 15.0));

        // 3 degree box -> pad raised to 1
        let small = planner.plot_bounds(&bbox(10.0, 13.0, -50.0, -47.0));
        assert!(close(small.lat_min, 9.0));
        assert!(close(small.lon_max, -46.0));
    }

    #[test]
    fn test_bounds_stay_within_poles() {
        let planner = LayoutPlanner::default();
        let bounds = planner.plot_bounds(&bbox(-89.5, -80.0, 10.0, 20.0));
        assert!(bounds.lat_min >= -90.0);
        assert!(bounds.lat_span() >= 5.0);
    }

    #[test]
    fn test_single_point_labels_use_fallback() {
        let planner = LayoutPlanner::default();
        let bounds = planner.plot_bounds(&bbox(20.0, 20.0, -60.0, -60.0));
        let labels = planner.place_labels(&points(&[(-60.0, 20.0)]), &bounds);

        let magnitude = 5.0 * 0.08;
        assert!(close(labels.start.dx, magnitude));
        assert!(close(labels.start.dy, 0.5 * magnitude));
        assert!(close(labels.end.dy, -0.5 * magnitude));
        assert!(!labels.end_flipped);
    }

    #[test]
    fn test_stationary_track_uses_fallback() {
        let planner = LayoutPlanner::default();
        let track = points(&[(-60.0, 20.0), (-60.0, 20.0), (-60.0, 20.0)]);
        let bounds = planner.plot_bounds(&bbox(20.0, 20.0, -60.0, -60.0));
        let labels = planner.place_labels(&track, &bounds);

        assert!(close(labels.start.dx, 0.4));
        assert!(close(labels.end.dx, 0.4));
        assert!(labels.start.dx.is_finite() && labels.end.dy.is_finite());
    }

    #[test]
    fn test_straight_track_keeps_labels_on_left_side() {
        let planner = LayoutPlanner::default();
        let track = points(&[(0.0, 0.0), (2.0, 0.0), (4.0, 0.0), (6.0, 0.0)]);
        let bounds = planner.plot_bounds(&bbox(0.0, 0.0, 0.0, 6.0));
        let labels = planner.place_labels(&track, &bounds);

        // heading east, perpendicular points north
        assert!(!labels.end_flipped);
        assert!(labels.start.dy > 0.0);
        assert!(labels.end.dy > 0.0);
        assert!(labels.start.dy > labels.end.dy);
    }

    #[test]
    fn test_near_closed_track_flips_end_label() {
        let planner = LayoutPlanner::default();
        let track = points(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.5, 4.0), (0.5, 0.8)]);
        let bounds = planner.plot_bounds(&bbox(0.0, 4.0, 0.0, 4.0));
        let labels = planner.place_labels(&track, &bounds);

        assert!(labels.end_flipped);
        // unflipped end would point east of the southbound heading
        assert!(labels.end.dx < 0.0);
    }

    #[test]
    fn test_plan_is_deterministic() {
        let planner = LayoutPlanner::default();
        let track = points(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.5, 4.0), (0.5, 0.8)]);
        let bounds = planner.plot_bounds(&bbox(0.0, 4.0, 0.0, 4.0));
        assert_eq!(planner.place_labels(&track, &bounds), planner.place_labels(&track, &bounds));
    }
}
