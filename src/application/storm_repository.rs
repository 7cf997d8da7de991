// Repository trait for best-track data access
use crate::domain::observation::RawObservation;
use crate::domain::storm::{Basin, StormSummary};
use async_trait::async_trait;
use thiserror::Error;

/// Raised when a storm id is not part of the requested basin and season.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("storm {storm_id} not found in {basin} {season}")]
pub struct StormNotFound {
    pub basin: Basin,
    pub season: i32,
    pub storm_id: String,
}

#[async_trait]
pub trait StormRepository: Send + Sync {
    /// List storms that formed in a basin during a season
    async fn list_storms(&self, basin: Basin, season: i32) -> anyhow::Result<Vec<StormSummary>>;

    /// Fetch the raw fixes of one storm, in feed order
    async fn fetch_track(&self, basin: Basin, season: i32, storm_id: &str) -> anyhow::Result<Vec<RawObservation>>;
}
