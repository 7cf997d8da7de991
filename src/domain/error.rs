// Track-level error taxonomy
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrackError {
    /// A single malformed record. Dropped and counted during sanitization.
    #[error("invalid observation: {0}")]
    InvalidObservation(String),
    #[error("track has no observations")]
    EmptyTrack,
    #[error("track has no observation with a known wind speed")]
    NoIntensityData,
}

impl TrackError {
    /// Track-level failures surface to callers as "no plottable data".
    pub fn is_unplottable(&self) -> bool {
        matches!(self, TrackError::EmptyTrack | TrackError::NoIntensityData)
    }
}
