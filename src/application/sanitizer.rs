// Track sanitizer - Turns raw feed records into a valid track
use crate::domain::error::TrackError;
use crate::domain::observation::{Observation, RawObservation};
use crate::domain::storm::Basin;
use crate::domain::track::Track;
use crate::infrastructure::config::SanitizerConfig;
use chrono::NaiveDate;

/// Counts of records removed while sanitizing. Not fatal; callers log it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SanitizeReport {
    pub received: usize,
    pub invalid: usize,
    pub foreign: usize,
    pub off_cycle: usize,
    pub duplicates: usize,
}

impl SanitizeReport {
    pub fn dropped(&self) -> usize {
        self.invalid + self.foreign + self.off_cycle + self.duplicates
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SanitizedTrack {
    pub track: Track,
    pub report: SanitizeReport,
}

#[derive(Debug, Clone, Default)]
pub struct TrackSanitizer {
    config: SanitizerConfig,
}

impl TrackSanitizer {
    pub fn new(config: SanitizerConfig) -> Self {
        Self { config }
    }

    pub fn sanitize(&self, raw: &[RawObservation]) -> Result<SanitizedTrack, TrackError> {
        let mut report = SanitizeReport {
            received: raw.len(),
            ..SanitizeReport::default()
        };

        let (mut observations, name) = self.validate(raw, &mut report);

        // stable: equal timestamps keep feed order
        observations.sort_by_key(Observation::time);
        let before = observations.len();
        observations.dedup_by_key(|o| o.time());
        report.duplicates = before - observations.len();

        if observations.is_empty() {
            return Err(TrackError::EmptyTrack);
        }
        if observations.iter().all(|o| o.wind_kt().is_none()) {
            return Err(TrackError::NoIntensityData);
        }

        let track = Track::new(name, observations)?;
        Ok(SanitizedTrack { track, report })
    }

    /// Converts records one by one, dropping invalid, foreign and off-cycle
    /// fixes. Identity is taken from the first valid record.
    fn validate(&self, raw: &[RawObservation], report: &mut SanitizeReport) -> (Vec<Observation>, Option<String>) {
        let mut observations: Vec<Observation> = Vec::with_capacity(raw.len());
        let mut name: Option<String> = None;
        let mut carried_date: Option<NaiveDate> = None;
        let mut identity: Option<(String, Basin)> = None;

        for record in raw {
            let observation = match record.to_observation(carried_date) {
                Ok(observation) => observation,
                Err(_) => {
                    report.invalid += 1;
                    continue;
                }
            };
            carried_date = Some(observation.time().date_naive());

            let belongs = match &identity {
                Some((id, basin)) => id == observation.storm_id() && *basin == observation.basin(),
                None => true,
            };
            if !belongs {
                report.foreign += 1;
                continue;
            }
            if identity.is_none() {
                identity = Some((observation.storm_id().to_string(), observation.basin()));
            }
            if self.config.synoptic_only && !observation.is_synoptic() {
                report.off_cycle += 1;
                continue;
            }

            if name.is_none() {
                name = record
                    .name
                    .as_deref()
                    .map(str::trim)
                    .filter(|n| !n.is_empty())
                    .map(str::to_string);
            }
            observations.push(observation);
        }

        (observations, name)
    }
}
