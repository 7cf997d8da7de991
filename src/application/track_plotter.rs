// Track plotter - Synchronous pipeline from raw records to a scene
use crate::application::layout_planner::LayoutPlanner;
use crate::application::metrics_calculator::compute_metrics;
use crate::application::plot_assembler::assemble_scene;
use crate::application::sanitizer::{SanitizeReport, TrackSanitizer};
use crate::domain::error::TrackError;
use crate::domain::metrics::StormMetrics;
use crate::domain::observation::RawObservation;
use crate::domain::scene::Scene;
use crate::infrastructure::config::{LayoutConfig, SanitizerConfig};

#[derive(Debug, Clone)]
pub struct PlottedStorm {
    pub scene: Scene,
    pub metrics: StormMetrics,
    pub report: SanitizeReport,
}

/// Pure and side-effect free; safe to share between requests.
#[derive(Debug, Clone, Default)]
pub struct TrackPlotter {
    sanitizer: TrackSanitizer,
    planner: LayoutPlanner,
}

impl TrackPlotter {
    pub fn new(sanitizer: SanitizerConfig, layout: LayoutConfig) -> Self {
        Self {
            sanitizer: TrackSanitizer::new(sanitizer),
            planner: LayoutPlanner::new(layout),
        }
    }

    /// `season` is the requested season, used for the title; Southern
    /// Hemisphere seasons start in the previous calendar year.
    pub fn plot(&self, raw: &[RawObservation], season: i32) -> Result<PlottedStorm, TrackError> {
        let sanitized = self.sanitizer.sanitize(raw)?;
        let track = &sanitized.track;

        let metrics = compute_metrics(track);
        let layout = self.planner.plan(track, &metrics.bounding_box);
        let scene = assemble_scene(track, season, &metrics, &layout);

        Ok(PlottedStorm {
            scene,
            metrics,
            report: sanitized.report,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::sanitizer::tests::raw;
    use crate::domain::intensity::IntensityCategory;

    fn irma_excerpt() -> Vec<RawObservation> {
        vec![
            raw("2017-08-30 12:00:00", 16.1, -30.3, Some(30.0), Some(1005.0)),
            raw("2017-08-30 18:00:00", 16.2, -31.8, Some(70.0), Some(980.0)),
            raw("2017-08-31 00:00:00", 16.4, -33.1, Some(145.0), Some(920.0)),
        ]
    }

    #[test]
    fn test_scene_for_three_fix_storm() {
        let plotted = TrackPlotter::default().plot(&irma_excerpt(), 2017).unwrap();
        let scene = &plotted.scene;

        assert_eq!(scene.title, "Hurricane IRMA (2017)");
        assert_eq!(scene.points.len(), 3);
        assert_eq!(scene.polyline.len(), 3);
        assert_eq!(
            scene.points.iter().map(|p| p.category).collect::<Vec<_>>(),
            vec![IntensityCategory::TropicalDepression, IntensityCategory::Cat1, IntensityCategory::Cat5]
        );
        assert_eq!(scene.points[2].color, IntensityCategory::Cat5.color());
        assert_eq!(scene.start_label.text, "Start: 2017-08-30 12:00 UTC");
        assert_eq!(scene.end_label.caption, "August 31st at 00:00 UTC");
        assert_eq!(scene.metrics.peak_wind_kt, 145.0);
        assert_eq!(scene.metrics.min_pressure_mb, Some(920.0));
        assert_eq!(scene.metrics.duration_hours, 12.0);
        assert_eq!(scene.metrics.point_count, 3);
        assert!((scene.metrics.peak_wind_mph - 145.0 * 1.15078).abs() < 1e-9);
    }

    #[test]
    fn test_bounds_contain_every_point() {
        let plotted = TrackPlotter::default().plot(&irma_excerpt(), 2017).unwrap();
        let bounds = plotted.scene.bounds;
        for point in &plotted.scene.points {
            assert!(bounds.lat_min < point.lat && point.lat < bounds.lat_max);
            assert!(bounds.lon_min < point.lon && point.lon < bounds.lon_max);
        }
    }

    #[test]
    fn test_single_fix_scene_is_not_degenerate() {
        let plotted = TrackPlotter::default()
            .plot(&[raw("2017-09-01 00:00:00", 20.0, -60.0, Some(40.0), None)], 2017)
            .unwrap();

        assert_eq!(plotted.metrics.duration_hours, 0.0);
        assert_eq!(plotted.metrics.bounding_box.lat_min, plotted.metrics.bounding_box.lat_max);
        assert!(plotted.scene.bounds.lat_span() >= 5.0);
        assert!(plotted.scene.bounds.lon_span() >= 5.0);
        assert_eq!(plotted.scene.start_label.anchor, plotted.scene.end_label.anchor);
    }

    #[test]
    fn test_input_order_does_not_change_result() {
        let forward = irma_excerpt();
        let mut backward = forward.clone();
        backward.reverse();

        let plotter = TrackPlotter::default();
        let a = plotter.plot(&forward, 2017).unwrap();
        let b = plotter.plot(&backward, 2017).unwrap();

        assert_eq!(a.metrics.ace, b.metrics.ace);
        assert_eq!(a.scene, b.scene);
    }

    #[test]
    fn test_track_level_errors_propagate() {
        let plotter = TrackPlotter::default();
        assert_eq!(plotter.plot(&[], 2017).unwrap_err(), TrackError::EmptyTrack);

        let no_wind = vec![raw("2017-09-01 00:00:00", 20.0, -60.0, None, Some(1000.0))];
        assert_eq!(plotter.plot(&no_wind, 2017).unwrap_err(), TrackError::NoIntensityData);
    }

    #[test]
    fn test_scene_serializes() {
        let plotted = TrackPlotter::default().plot(&irma_excerpt(), 2017).unwrap();
        let json = serde_json::to_value(&plotted.scene).unwrap();

        assert_eq!(json["points"][1]["color"], "#FFCC5C");
        assert_eq!(json["points"][1]["category"], "Cat1");
        assert_eq!(json["storm_type"], "Hurricane");
        assert_eq!(json["storm_id"], "2017242N16333");
        assert_eq!(json["basin"], "NATL");
        assert!(json["bounds"]["lat_min"].is_number());
    }

    #[test]
    fn test_title_uses_requested_season() {
        // A 2018 Southern Hemisphere season opening in late 2017
        let records = vec![
            raw("2017-12-30 18:00:00", -14.0, 120.0, Some(40.0), None),
            raw("2017-12-31 00:00:00", -14.5, 119.0, Some(55.0), None),
        ];
        let plotted = TrackPlotter::default().plot(&records, 2018).unwrap();
        assert_eq!(plotted.scene.title, "Cyclone IRMA (2018)");
        assert_eq!(plotted.scene.start_label.text, "Start: 2017-12-30 18:00 UTC");
    }
}
