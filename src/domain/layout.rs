// Plot geometry models
use serde::Serialize;

/// Point in plot space: x is longitude, y is latitude (degrees).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,
}

impl PlotPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Label displacement from its anchor, in plot units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Offset {
    pub dx: f64,
    pub dy: f64,
}

impl Offset {
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    pub fn flipped(&self) -> Self {
        Self::new(-self.dx, -self.dy)
    }
}

/// Final map extent handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlotBounds {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl PlotBounds {
    pub fn lat_span(&self) -> f64 {
        self.lat_max - self.lat_min
    }

    pub fn lon_span(&self) -> f64 {
        self.lon_max - self.lon_min
    }

    pub fn larger_span(&self) -> f64 {
        self.lat_span().max(self.lon_span())
    }
}

/// Axis-aligned label box, used only for overlap tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelBox {
    pub min: PlotPoint,
    pub max: PlotPoint,
}

impl LabelBox {
    pub fn centered(center: PlotPoint, width: f64, height: f64) -> Self {
        Self {
            min: PlotPoint::new(center.x - width / 2.0, center.y - height / 2.0),
            max: PlotPoint::new(center.x + width / 2.0, center.y + height / 2.0),
        }
    }

    pub fn overlaps(&self, other: &LabelBox) -> bool {
        self.min.x < other.max.x && other.min.x < self.max.x && self.min.y < other.max.y && other.min.y < self.max.y
    }

    /// Liang-Barsky clip of the segment `a`-`b` against the box.
    pub fn intersects_segment(&self, a: PlotPoint, b: PlotPoint) -> bool {
        let dx = b.x - a.x;
        let dy = b.y - a.y;
        let mut t0 = 0.0_f64;
        let mut t1 = 1.0_f64;

        let edges = [
            (-dx, a.x - self.min.x),
            (dx, self.max.x - a.x),
            (-dy, a.y - self.min.y),
            (dy, self.max.y - a.y),
        ];
        for (p, q) in edges {
            if p == 0.0 {
                if q < 0.0 {
                    return false;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                t0 = t0.max(r);
            } else {
                t1 = t1.min(r);
            }
            if t0 > t1 {
                return false;
            }
        }
        true
    }
}

/// Start/end annotation offsets. Pure function of the track endpoints and
/// the plot extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LabelPlacement {
    pub start: Offset,
    pub end: Offset,
    pub end_flipped: bool,
}
