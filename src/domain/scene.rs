// Scene description consumed by the rendering backend
use super::intensity::{IntensityCategory, Rgb};
use super::layout::{Offset, PlotBounds, PlotPoint};
use super::metrics::CategoryShare;
use super::storm::{Basin, StormType};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenePoint {
    pub lat: f64,
    pub lon: f64,
    pub category: IntensityCategory,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneLabel {
    pub anchor: PlotPoint,
    pub offset: Offset,
    /// e.g. `Start: 2017-09-06 12:00 UTC`
    pub text: String,
    /// e.g. `September 6th at 12:00 UTC`
    pub caption: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub label: &'static str,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSummary {
    pub duration_hours: f64,
    pub duration_days: f64,
    pub point_count: usize,
    pub peak_wind_kt: f64,
    pub peak_wind_mph: f64,
    pub min_pressure_mb: Option<f64>,
    pub ace: f64,
    pub lat_extent: (f64, f64),
    pub lon_extent: (f64, f64),
    pub distribution: Vec<CategoryShare>,
}

/// Everything a renderer needs to draw one storm.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub storm_id: String,
    pub basin: Basin,
    pub title: String,
    pub storm_type: StormType,
    pub points: Vec<ScenePoint>,
    pub polyline: Vec<PlotPoint>,
    pub start_label: SceneLabel,
    pub end_label: SceneLabel,
    pub bounds: PlotBounds,
    pub metrics: MetricsSummary,
    pub legend: Vec<LegendEntry>,
}
