// Plot service - Use case for building the scene of one storm
use crate::application::storm_repository::StormRepository;
use crate::application::track_plotter::{PlottedStorm, TrackPlotter};
use crate::domain::storm::Basin;
use std::sync::Arc;

#[derive(Clone)]
pub struct PlotService {
    repository: Arc<dyn StormRepository>,
    plotter: TrackPlotter,
}

impl PlotService {
    pub fn new(repository: Arc<dyn StormRepository>, plotter: TrackPlotter) -> Self {
        Self { repository, plotter }
    }

    /// Fetches the raw fixes once and runs the plotting pipeline on them.
    /// Track-level failures come back as a `TrackError` inside the error.
    pub async fn plot_storm(&self, basin: Basin, season: i32, storm_id: &str) -> anyhow::Result<PlottedStorm> {
        let raw = self.repository.fetch_track(basin, season, storm_id).await?;
        tracing::debug!("Fetched {} raw fixes for {} ({} {})", raw.len(), storm_id, basin, season);

        let plotted = self.plotter.plot(&raw, season)?;

        let report = &plotted.report;
        if report.dropped() > 0 {
            tracing::info!(
                "Sanitized {}: kept {} of {} fixes (invalid={}, foreign={}, off_cycle={}, duplicates={})",
                storm_id,
                plotted.metrics.point_count,
                report.received,
                report.invalid,
                report.foreign,
                report.off_cycle,
                report.duplicates
            );
        }

        Ok(plotted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::sanitizer::tests::raw;
    use crate::application::storm_repository::StormNotFound;
    use crate::domain::error::TrackError;
    use crate::domain::observation::RawObservation;
    use crate::domain::storm::StormSummary;
    use async_trait::async_trait;

    struct FixedRepository {
        fixes: Vec<RawObservation>,
    }

    #[async_trait]
    impl StormRepository for FixedRepository {
        async fn list_storms(&self, _basin: Basin, _season: i32) -> anyhow::Result<Vec<StormSummary>> {
            Ok(Vec::new())
        }

        async fn fetch_track(&self, basin: Basin, season: i32, storm_id: &str) -> anyhow::Result<Vec<RawObservation>> {
            if storm_id == "2017242N16333" {
                Ok(self.fixes.clone())
            } else {
                Err(StormNotFound {
                    basin,
                    season,
                    storm_id: storm_id.to_string(),
                }
                .into())
            }
        }
    }

    fn service(fixes: Vec<RawObservation>) -> PlotService {
        PlotService::new(Arc::new(FixedRepository { fixes }), TrackPlotter::default())
    }

    #[tokio::test]
    async fn test_plots_known_storm() {
        let service = service(vec![
            raw("2017-09-01 00:00:00", 16.0, -30.0, Some(30.0), Some(1005.0)),
            raw("2017-09-01 06:00:00", 16.5, -31.5, Some(70.0), Some(980.0)),
        ]);
        let plotted = service.plot_storm(Basin::NorthAtlantic, 2017, "2017242N16333").await.unwrap();
        assert_eq!(plotted.metrics.point_count, 2);
    }

    #[tokio::test]
    async fn test_track_error_is_recoverable_from_anyhow() {
        let service = service(vec![raw("2017-09-01 00:00:00", 16.0, -30.0, None, None)]);
        let err = service.plot_storm(Basin::NorthAtlantic, 2017, "2017242N16333").await.unwrap_err();
        assert_eq!(err.downcast_ref::<TrackError>(), Some(&TrackError::NoIntensityData));
    }

    #[tokio::test]
    async fn test_unknown_storm_is_not_found() {
        let err = service(Vec::new())
            .plot_storm(Basin::NorthAtlantic, 2017, "nope")
            .await
            .unwrap_err();
        assert!(err.downcast_ref::<StormNotFound>().is_some());
    }
}
