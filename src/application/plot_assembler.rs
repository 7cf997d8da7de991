// Plot assembler - Composes track, metrics and layout into a scene
use crate::application::layout_planner::Layout;
use crate::domain::intensity::IntensityCategory;
use crate::domain::layout::{Offset, PlotPoint};
use crate::domain::metrics::StormMetrics;
use crate::domain::observation::Observation;
use crate::domain::scene::{LegendEntry, MetricsSummary, Scene, SceneLabel, ScenePoint};
use crate::domain::track::Track;
use chrono::{DateTime, Datelike, Utc};

pub fn assemble_scene(track: &Track, season: i32, metrics: &StormMetrics, layout: &Layout) -> Scene {
    let points: Vec<ScenePoint> = track
        .observations()
        .iter()
        .map(|o| {
            let category = IntensityCategory::classify(o.wind_kt());
            ScenePoint {
                lat: o.lat(),
                lon: o.lon(),
                category,
                color: category.color(),
            }
        })
        .collect();
    let polyline = track
        .observations()
        .iter()
        .map(|o| PlotPoint::new(o.lon(), o.lat()))
        .collect();
    let legend = legend_for(&points);

    Scene {
        storm_id: track.storm_id().to_string(),
        basin: track.basin(),
        title: format!("{} {} ({})", metrics.storm_type, track.display_name(), season),
        storm_type: metrics.storm_type,
        points,
        polyline,
        start_label: label("Start", track.first(), layout.labels.start),
        end_label: label("End", track.last(), layout.labels.end),
        bounds: layout.bounds,
        metrics: summarize(metrics),
        legend,
    }
}

fn label(prefix: &str, observation: &Observation, offset: Offset) -> SceneLabel {
    SceneLabel {
        anchor: PlotPoint::new(observation.lon(), observation.lat()),
        offset,
        text: format!("{}: {}", prefix, observation.time().format("%Y-%m-%d %H:%M UTC")),
        caption: long_caption(observation.time()),
    }
}

fn summarize(metrics: &StormMetrics) -> MetricsSummary {
    let bbox = metrics.bounding_box;
    MetricsSummary {
        duration_hours: metrics.duration_hours,
        duration_days: metrics.duration_days(),
        point_count: metrics.point_count,
        peak_wind_kt: metrics.peak_wind_kt,
        peak_wind_mph: metrics.peak_wind_mph(),
        min_pressure_mb: metrics.min_pressure_mb,
        ace: metrics.ace,
        lat_extent: (bbox.lat_min, bbox.lat_max),
        lon_extent: (bbox.lon_min, bbox.lon_max),
        distribution: metrics.distribution.clone(),
    }
}

/// Full scale in ascending order; the neutral marker only when a fix lacks wind.
fn legend_for(points: &[ScenePoint]) -> Vec<LegendEntry> {
    let mut legend: Vec<LegendEntry> = IntensityCategory::SCALE
        .iter()
        .map(|c| LegendEntry {
            label: c.legend_label(),
            color: c.color(),
        })
        .collect();
    if points.iter().any(|p| p.category == IntensityCategory::Unknown) {
        let unknown = IntensityCategory::Unknown;
        legend.push(LegendEntry {
            label: unknown.legend_label(),
            color: unknown.color(),
        });
    }
    legend
}

/// `September 1st at 12:00 UTC`
pub fn long_caption(time: DateTime<Utc>) -> String {
    format!(
        "{} {}{} at {}",
        time.format("%B"),
        time.day(),
        ordinal_suffix(time.day()),
        time.format("%H:%M UTC")
    )
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_long_caption_ordinals() {
        let at = |day| Utc.with_ymd_and_hms(2017, 9, day, 12, 0, 0).unwrap();
        assert_eq!(long_caption(at(1)), "September 1st at 12:00 UTC");
        assert_eq!(long_caption(at(2)), "September 2nd at 12:00 UTC");
        assert_eq!(long_caption(at(3)), "September 3rd at 12:00 UTC");
        assert_eq!(long_caption(at(11)), "September 11th at 12:00 UTC");
        assert_eq!(long_caption(at(13)), "September 13th at 12:00 UTC");
        assert_eq!(long_caption(at(22)), "September 22nd at 12:00 UTC");
        assert_eq!(long_caption(at(30)), "September 30th at 12:00 UTC");
    }

    #[test]
    fn test_legend_adds_neutral_marker_only_when_needed() {
        let point = |category: IntensityCategory| ScenePoint {
            lat: 0.0,
            lon: 0.0,
            category,
            color: category.color(),
        };

        let known = legend_for(&[point(IntensityCategory::Cat1)]);
        assert_eq!(known.len(), 7);
        assert_eq!(known[0].label, "TD (<34 kt)");

        let with_unknown = legend_for(&[point(IntensityCategory::Cat1), point(IntensityCategory::Unknown)]);
        assert_eq!(with_unknown.len(), 8);
        assert_eq!(with_unknown[7].label, "No Wind Data");
    }
}
