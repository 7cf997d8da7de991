// Caching decorator for storm repositories
use crate::application::storm_repository::StormRepository;
use crate::domain::observation::RawObservation;
use crate::domain::storm::{Basin, StormSummary};
use crate::infrastructure::ttl_cache::TtlCache;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

type TrackKey = (Basin, i32, String);

/// Keeps storm lists per (basin, season) and raw tracks per
/// (basin, season, storm) so repeated requests skip the fetch.
pub struct CachedStormRepository {
    inner: Arc<dyn StormRepository>,
    storms: TtlCache<(Basin, i32), Vec<StormSummary>>,
    tracks: TtlCache<TrackKey, Vec<RawObservation>>,
}

impl CachedStormRepository {
    pub fn new(inner: Arc<dyn StormRepository>, storm_list_ttl: Duration, track_ttl: Duration) -> Self {
        Self {
            inner,
            storms: TtlCache::new(storm_list_ttl),
            tracks: TtlCache::new(track_ttl),
        }
    }
}

#[async_trait]
impl StormRepository for CachedStormRepository {
    async fn list_storms(&self, basin: Basin, season: i32) -> Result<Vec<StormSummary>> {
        let key = (basin, season);
        if let Some(storms) = self.storms.get(&key).await {
            tracing::debug!("Storm list cache hit for {} {}", basin, season);
            return Ok(storms);
        }

        let storms = self.inner.list_storms(basin, season).await?;
        self.storms.insert(key, storms.clone()).await;
        Ok(storms)
    }

    async fn fetch_track(&self, basin: Basin, season: i32, storm_id: &str) -> Result<Vec<RawObservation>> {
        let key = (basin, season, storm_id.to_string());
        if let Some(track) = self.tracks.get(&key).await {
            tracing::debug!("Track cache hit for {}", storm_id);
            return Ok(track);
        }

        let track = self.inner.fetch_track(basin, season, storm_id).await?;
        self.tracks.insert(key, track.clone()).await;
        Ok(track)
    }
}
