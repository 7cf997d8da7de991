// Metrics calculator - Scalar statistics for a sanitized track
use crate::domain::intensity::IntensityCategory;
use crate::domain::metrics::{BoundingBox, CategoryShare, HOURS_PER_FIX, StormMetrics};
use crate::domain::storm::StormType;
use crate::domain::track::Track;
use std::collections::BTreeMap;

/// Wind speed (knots) at which a fix starts contributing to ACE.
pub const ACE_THRESHOLD_KT: f64 = 34.0;

/// Computes the metrics snapshot. Infallible for a valid track.
pub fn compute_metrics(track: &Track) -> StormMetrics {
    let observations = track.observations();

    let duration_hours = (track.last().time() - track.first().time()).num_seconds() as f64 / 3600.0;

    let peak_wind_kt = observations
        .iter()
        .filter_map(|o| o.wind_kt())
        .fold(f64::NEG_INFINITY, f64::max);

    let min_pressure_mb = observations
        .iter()
        .filter_map(|o| o.pressure_mb())
        .reduce(f64::min);

    let bounding_box = bounding_box(track);
    let (lat_center, lon_center) = bounding_box.center();

    StormMetrics {
        duration_hours,
        point_count: observations.len(),
        peak_wind_kt,
        min_pressure_mb,
        ace: accumulated_cyclone_energy(observations.iter().filter(|o| o.is_synoptic()).map(|o| o.wind_kt())),
        bounding_box,
        peak_category: IntensityCategory::classify(Some(peak_wind_kt)),
        storm_type: StormType::from_center(lat_center, lon_center),
        distribution: category_distribution(track),
    }
}

/// Σ w²·10⁻⁴ over known winds ≥ 34 kt. Contributions are summed in sorted
/// order, so the result does not depend on the order of `winds`.
pub fn accumulated_cyclone_energy<I>(winds: I) -> f64
where
    I: IntoIterator<Item = Option<f64>>,
{
    let mut contributions: Vec<f64> = winds
        .into_iter()
        .flatten()
        .filter(|w| *w >= ACE_THRESHOLD_KT)
        .map(|w| w * w / 10_000.0)
        .collect();
    contributions.sort_by(f64::total_cmp);
    contributions.iter().sum()
}

pub fn bounding_box(track: &Track) -> BoundingBox {
    let first = track.first();
    track.observations().iter().fold(
        BoundingBox {
            lat_min: first.lat(),
            lat_max: first.lat(),
            lon_min: first.lon(),
            lon_max: first.lon(),
        },
        |b, o| BoundingBox {
            lat_min: b.lat_min.min(o.lat()),
            lat_max: b.lat_max.max(o.lat()),
            lon_min: b.lon_min.min(o.lon()),
            lon_max: b.lon_max.max(o.lon()),
        },
    )
}

fn category_distribution(track: &Track) -> Vec<CategoryShare> {
    let mut counts: BTreeMap<IntensityCategory, usize> = BTreeMap::new();
    for observation in track.observations() {
        *counts.entry(IntensityCategory::classify(observation.wind_kt())).or_default() += 1;
    }

    counts
        .into_iter()
        .filter(|(category, _)| *category != IntensityCategory::Unknown)
        .map(|(category, points)| CategoryShare {
            category,
            points,
            hours: points as f64 * HOURS_PER_FIX,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::sanitizer::TrackSanitizer;
    use crate::application::sanitizer::tests::raw;
    use crate::domain::observation::RawObservation;

    fn track(records: &[RawObservation]) -> Track {
        TrackSanitizer::default().sanitize(records).unwrap().track
    }

    fn three_fix_storm() -> Vec<RawObservation> {
        vec![
            raw("2017-09-01 00:00:00", 16.0, -30.0, Some(30.0), Some(1005.0)),
            raw("2017-09-01 06:00:00", 16.5, -31.5, Some(70.0), Some(980.0)),
            raw("2017-09-01 12:00:00", 17.0, -33.0, Some(145.0), Some(920.0)),
        ]
    }

    #[test]
    fn test_three_fix_scenario() {
        let track = track(&three_fix_storm());
        let metrics = compute_metrics(&track);

        assert_eq!(metrics.peak_wind_kt, 145.0);
        assert_eq!(metrics.min_pressure_mb, Some(920.0));
        assert_eq!(metrics.duration_hours, 12.0);
        assert_eq!(metrics.point_count, 3);
        assert_eq!(metrics.peak_category, IntensityCategory::Cat5);

        let categories: Vec<IntensityCategory> = track
            .observations()
            .iter()
            .map(|o| IntensityCategory::classify(o.wind_kt()))
            .collect();
        assert_eq!(
            categories,
            vec![IntensityCategory::TropicalDepression, IntensityCategory::Cat1, IntensityCategory::Cat5]
        );

        // 30 kt is below the threshold
        let expected_ace = (70.0_f64 * 70.0 + 145.0 * 145.0) / 10_000.0;
        assert!((metrics.ace - expected_ace).abs() < 1e-12);
    }

    #[test]
    fn test_single_fix_collapses() {
        let track = track(&[raw("2017-09-01 00:00:00", 20.0, -60.0, Some(40.0), None)]);
        let metrics = compute_metrics(&track);

        assert_eq!(metrics.duration_hours, 0.0);
        assert_eq!(metrics.point_count, 1);
        assert_eq!(metrics.bounding_box.lat_span(), 0.0);
        assert_eq!(metrics.bounding_box.lon_span(), 0.0);
    }

    #[test]
    fn test_unknown_pressure_everywhere() {
        let track = track(&[
            raw("2017-09-01 00:00:00", 20.0, -60.0, Some(40.0), None),
            raw("2017-09-01 06:00:00", 21.0, -61.0, Some(50.0), None),
        ]);
        let metrics = compute_metrics(&track);

        assert_eq!(metrics.min_pressure_mb, None);
        assert_eq!(metrics.peak_wind_kt, 50.0);
        assert_eq!(metrics.duration_hours, 6.0);
        assert!(metrics.ace > 0.0);
    }

    #[test]
    fn test_ace_is_order_independent() {
        let forward = three_fix_storm();
        let mut reversed = forward.clone();
        reversed.reverse();
        let rotated = vec![forward[1].clone(), forward[2].clone(), forward[0].clone()];

        let expected = compute_metrics(&track(&forward)).ace;
        assert_eq!(compute_metrics(&track(&reversed)).ace, expected);
        assert_eq!(compute_metrics(&track(&rotated)).ace, expected);

        let winds = [Some(35.0), Some(120.3), None, Some(64.7), Some(12.0), Some(98.1)];
        let direct = accumulated_cyclone_energy(winds);
        let mut shuffled = winds;
        shuffled.reverse();
        shuffled.swap(0, 3);
        assert_eq!(accumulated_cyclone_energy(shuffled), direct);
    }

    #[test]
    fn test_ace_skips_off_cycle_fixes() {
        let records = vec![
            raw("2017-09-01 00:00:00", 20.0, -60.0, Some(100.0), None),
            raw("2017-09-01 03:00:00", 20.5, -60.5, Some(100.0), None),
        ];
        let sanitizer = TrackSanitizer::new(crate::infrastructure::config::SanitizerConfig { synoptic_only: false });
        let track = sanitizer.sanitize(&records).unwrap().track;
        let metrics = compute_metrics(&track);

        assert_eq!(metrics.point_count, 2);
        assert!((metrics.ace - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_point_count_matches_track() {
        let track = track(&three_fix_storm());
        assert_eq!(compute_metrics(&track).point_count, track.len());
    }

    #[test]
    fn test_distribution_and_storm_type() {
        let track = track(&[
            raw("2017-09-01 00:00:00", 20.0, -60.0, Some(40.0), None),
            raw("2017-09-01 06:00:00", 21.0, -61.0, Some(45.0), None),
            raw("2017-09-01 12:00:00", 22.0, -62.0, None, None),
            raw("2017-09-01 18:00:00", 23.0, -63.0, Some(90.0), None),
        ]);
        let metrics = compute_metrics(&track);

        assert_eq!(metrics.storm_type, StormType::Hurricane);
        assert_eq!(
            metrics.distribution,
            vec![
                CategoryShare { category: IntensityCategory::TropicalStorm, points: 2, hours: 12.0 },
                CategoryShare { category: IntensityCategory::Cat2, points: 1, hours: 6.0 },
            ]
        );
    }
}
