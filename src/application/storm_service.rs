// Storm service - Use case for listing storms of a basin and season
use crate::application::storm_repository::StormRepository;
use crate::domain::storm::{Basin, StormSummary};
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Clone)]
pub struct StormService {
    repository: Arc<dyn StormRepository>,
}

impl StormService {
    pub fn new(repository: Arc<dyn StormRepository>) -> Self {
        Self { repository }
    }

    /// Storms sorted by display name, one entry per (name, basin).
    pub async fn list_storms(&self, basin: Basin, season: i32) -> anyhow::Result<Vec<StormSummary>> {
        let storms = self.repository.list_storms(basin, season).await?;
        Ok(Self::dedup_and_sort(storms))
    }

    fn dedup_and_sort(storms: Vec<StormSummary>) -> Vec<StormSummary> {
        let mut seen = HashSet::new();
        let mut unique: Vec<StormSummary> = storms
            .into_iter()
            .filter(|s| seen.insert(s.dedup_key()))
            .collect();
        unique.sort_by(|a, b| a.display_name.cmp(&b.display_name));
        unique
    }
}
