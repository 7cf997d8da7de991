// Derived storm statistics
use super::intensity::IntensityCategory;
use super::storm::StormType;
use serde::Serialize;

pub const MPH_PER_KNOT: f64 = 1.15078;

/// Hours represented by one synoptic fix.
pub const HOURS_PER_FIX: f64 = 6.0;

/// Presentation-only conversion; stored speeds stay in knots.
pub fn knots_to_mph(knots: f64) -> f64 {
    knots * MPH_PER_KNOT
}

pub fn mph_to_knots(mph: f64) -> f64 {
    mph / MPH_PER_KNOT
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl BoundingBox {
    pub fn lat_span(&self) -> f64 {
        self.lat_max - self.lat_min
    }

    pub fn lon_span(&self) -> f64 {
        self.lon_max - self.lon_min
    }

    pub fn center(&self) -> (f64, f64) {
        ((self.lat_min + self.lat_max) / 2.0, (self.lon_min + self.lon_max) / 2.0)
    }
}

/// Number of fixes spent in one category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: IntensityCategory,
    pub points: usize,
    pub hours: f64,
}

/// Immutable snapshot computed from one track.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StormMetrics {
    pub duration_hours: f64,
    pub point_count: usize,
    pub peak_wind_kt: f64,
    pub min_pressure_mb: Option<f64>,
    pub ace: f64,
    pub bounding_box: BoundingBox,
    pub peak_category: IntensityCategory,
    pub storm_type: StormType,
    pub distribution: Vec<CategoryShare>,
}

impl StormMetrics {
    pub fn duration_days(&self) -> f64 {
        self.duration_hours / 24.0
    }

    pub fn peak_wind_mph(&self) -> f64 {
        knots_to_mph(self.peak_wind_kt)
    }
}
