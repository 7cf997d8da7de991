// Observation model - one best-track fix and its raw ingest record
use super::error::TrackError;
use super::storm::Basin;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use serde::Deserialize;

/// Hours of the regularly scheduled best-track fixes.
pub const SYNOPTIC_HOURS: [u32; 4] = [0, 6, 12, 18];

/// Numeric fill values the feed uses for "not reported".
const FILL_VALUES: [f64; 3] = [-99.0, -999.0, -9999.0];

/// Text markers the feed uses for "not reported".
const MISSING_MARKERS: [&str; 5] = ["", "-", "NA", "N/A", "NAN"];

/// A validated storm fix. Unknown wind or pressure is `None`, never zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    storm_id: String,
    basin: Basin,
    time: DateTime<Utc>,
    lat: f64,
    lon: f64,
    wind_kt: Option<f64>,
    pressure_mb: Option<f64>,
}

impl Observation {
    pub fn new(
        storm_id: impl Into<String>,
        basin: Basin,
        time: DateTime<Utc>,
        lat: f64,
        lon: f64,
        wind_kt: Option<f64>,
        pressure_mb: Option<f64>,
    ) -> Result<Self, TrackError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(TrackError::InvalidObservation(format!("latitude {} out of range", lat)));
        }
        if !lon.is_finite() || !(-180.0..=360.0).contains(&lon) {
            return Err(TrackError::InvalidObservation(format!("longitude {} out of range", lon)));
        }
        if let Some(wind) = wind_kt {
            if !wind.is_finite() || wind < 0.0 {
                return Err(TrackError::InvalidObservation(format!("wind speed {} is negative", wind)));
            }
        }
        if let Some(pressure) = pressure_mb {
            if !pressure.is_finite() || pressure <= 0.0 {
                return Err(TrackError::InvalidObservation(format!("pressure {} is not positive", pressure)));
            }
        }

        Ok(Self {
            storm_id: storm_id.into(),
            basin,
            time,
            lat,
            lon: normalize_longitude(lon),
            wind_kt,
            pressure_mb,
        })
    }

    pub fn storm_id(&self) -> &str {
        &self.storm_id
    }

    pub fn basin(&self) -> Basin {
        self.basin
    }

    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    pub fn wind_kt(&self) -> Option<f64> {
        self.wind_kt
    }

    pub fn pressure_mb(&self) -> Option<f64> {
        self.pressure_mb
    }

    /// True for fixes on the 00/06/12/18 UTC schedule.
    pub fn is_synoptic(&self) -> bool {
        self.time.minute() == 0 && self.time.second() == 0 && SYNOPTIC_HOURS.contains(&self.time.hour())
    }
}

/// Maps [-180, 360] onto [-180, 180).
fn normalize_longitude(lon: f64) -> f64 {
    if lon >= 180.0 { lon - 360.0 } else { lon }
}

/// A numeric cell as delivered by the feed: JSON number or free text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawField {
    Number(f64),
    Text(String),
}

impl RawField {
    /// Reads a measurement, mapping the feed's missing markers to `None`.
    /// Unparseable text is treated as missing as well.
    pub fn measurement(&self) -> Option<f64> {
        let value = match self {
            RawField::Number(n) => *n,
            RawField::Text(t) => {
                let trimmed = t.trim();
                if MISSING_MARKERS.contains(&trimmed.to_ascii_uppercase().as_str()) {
                    return None;
                }
                trimmed.parse::<f64>().ok()?
            }
        };

        if value.is_nan() || FILL_VALUES.contains(&value) {
            None
        } else {
            Some(value)
        }
    }

    /// Reads a required coordinate. Missing or unparseable is an error.
    /// Fill values are not applied: -99 is a real longitude.
    fn coordinate(&self, field: &str) -> Result<f64, TrackError> {
        let missing = || TrackError::InvalidObservation(format!("{} is missing", field));
        let value = match self {
            RawField::Number(n) => *n,
            RawField::Text(t) => {
                let trimmed = t.trim();
                if MISSING_MARKERS.contains(&trimmed.to_ascii_uppercase().as_str()) {
                    return Err(missing());
                }
                trimmed.parse::<f64>().map_err(|_| missing())?
            }
        };

        if value.is_nan() { Err(missing()) } else { Ok(value) }
    }
}

/// One record from the fetch collaborator, before validation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawObservation {
    pub storm_id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub basin: String,
    pub time: String,
    pub lat: Option<RawField>,
    pub lon: Option<RawField>,
    #[serde(default)]
    pub wind: Option<RawField>,
    #[serde(default)]
    pub pressure: Option<RawField>,
}

impl RawObservation {
    /// Validates the record. `carried_date` is the date of the previous
    /// record, used when the feed only repeats the time of day.
    pub fn to_observation(&self, carried_date: Option<NaiveDate>) -> Result<Observation, TrackError> {
        let basin = self
            .basin
            .parse::<Basin>()
            .map_err(|e| TrackError::InvalidObservation(e.to_string()))?;
        let time = parse_fix_time(&self.time, carried_date)?;

        let lat = self
            .lat
            .as_ref()
            .ok_or_else(|| TrackError::InvalidObservation("latitude is missing".to_string()))?
            .coordinate("latitude")?;
        let lon = self
            .lon
            .as_ref()
            .ok_or_else(|| TrackError::InvalidObservation("longitude is missing".to_string()))?
            .coordinate("longitude")?;

        Observation::new(
            self.storm_id.trim(),
            basin,
            time,
            lat,
            lon,
            self.wind.as_ref().and_then(RawField::measurement),
            self.pressure.as_ref().and_then(RawField::measurement),
        )
    }
}

/// Parses `YYYY-MM-DD HH:MM:SS`, RFC 3339, or a bare `HH:MM:SS` on the
/// carried date.
pub fn parse_fix_time(text: &str, carried_date: Option<NaiveDate>) -> Result<DateTime<Utc>, TrackError> {
    let text = text.trim();

    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
        return Ok(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M") {
        return Ok(naive.and_utc());
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Ok(parsed.with_timezone(&Utc));
    }
    if let (Ok(time), Some(date)) = (NaiveTime::parse_from_str(text, "%H:%M:%S"), carried_date) {
        return Ok(date.and_time(time).and_utc());
    }

    Err(TrackError::InvalidObservation(format!("unrecognized timestamp '{}'", text)))
}
