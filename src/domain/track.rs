// Track model - chronological fixes of a single storm
use super::error::TrackError;
use super::observation::Observation;
use super::storm::Basin;

/// Non-empty, strictly chronological fixes of one storm in one basin, with
/// at least one known wind speed.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    storm_id: String,
    name: Option<String>,
    basin: Basin,
    observations: Vec<Observation>,
}

impl Track {
    /// Checks every track invariant. The identity comes from the first fix.
    pub fn new(name: Option<String>, observations: Vec<Observation>) -> Result<Self, TrackError> {
        let first = observations.first().ok_or(TrackError::EmptyTrack)?;
        let storm_id = first.storm_id().to_string();
        let basin = first.basin();

        for pair in observations.windows(2) {
            if pair[1].time() <= pair[0].time() {
                return Err(TrackError::InvalidObservation(format!(
                    "fix at {} is not after {}",
                    pair[1].time(),
                    pair[0].time()
                )));
            }
        }
        if let Some(foreign) = observations
            .iter()
            .find(|o| o.storm_id() != storm_id || o.basin() != basin)
        {
            return Err(TrackError::InvalidObservation(format!(
                "fix of {} in {} does not belong to {} in {}",
                foreign.storm_id(),
                foreign.basin(),
                storm_id,
                basin
            )));
        }
        if observations.iter().all(|o| o.wind_kt().is_none()) {
            return Err(TrackError::NoIntensityData);
        }

        Ok(Self {
            storm_id,
            name,
            basin,
            observations,
        })
    }

    pub fn storm_id(&self) -> &str {
        &self.storm_id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn basin(&self) -> Basin {
        self.basin
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn first(&self) -> &Observation {
        &self.observations[0]
    }

    pub fn last(&self) -> &Observation {
        &self.observations[self.observations.len() - 1]
    }

    /// Name for titles, falling back to the storm id.
    pub fn display_name(&self) -> &str {
        self.name().unwrap_or(&self.storm_id)
    }
}
