// Saffir-Simpson intensity classification and display palette
use serde::{Serialize, Serializer};
use std::fmt;

/// Lower bounds (knots, inclusive) for TS, Cat1, Cat2, Cat3, Cat4, Cat5.
pub const CATEGORY_THRESHOLDS_KT: [f64; 6] = [34.0, 64.0, 83.0, 96.0, 113.0, 137.0];

/// Fixed display color. Serializes as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Ordered by wind speed. `Unknown` ranks below every real category and is
/// drawn with a neutral marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum IntensityCategory {
    Unknown,
    TropicalDepression,
    TropicalStorm,
    Cat1,
    Cat2,
    Cat3,
    Cat4,
    Cat5,
}

impl IntensityCategory {
    /// Real categories in ascending order.
    pub const SCALE: [IntensityCategory; 7] = [
        IntensityCategory::TropicalDepression,
        IntensityCategory::TropicalStorm,
        IntensityCategory::Cat1,
        IntensityCategory::Cat2,
        IntensityCategory::Cat3,
        IntensityCategory::Cat4,
        IntensityCategory::Cat5,
    ];

    pub fn classify(wind_kt: Option<f64>) -> Self {
        let Some(wind) = wind_kt else {
            return IntensityCategory::Unknown;
        };
        let rank = CATEGORY_THRESHOLDS_KT.iter().take_while(|&&t| wind >= t).count();
        Self::SCALE[rank]
    }

    pub fn color(&self) -> Rgb {
        match self {
            IntensityCategory::Unknown => Rgb(0xA9, 0xA9, 0xA9),
            IntensityCategory::TropicalDepression => Rgb(0xFF, 0xFF, 0xFF),
            IntensityCategory::TropicalStorm => Rgb(0xF5, 0xF5, 0xDC),
            IntensityCategory::Cat1 => Rgb(0xFF, 0xCC, 0x5C),
            IntensityCategory::Cat2 => Rgb(0xFF, 0x8C, 0x00),
            IntensityCategory::Cat3 => Rgb(0xFF, 0x00, 0x00),
            IntensityCategory::Cat4 => Rgb(0x8B, 0x00, 0x8B),
            IntensityCategory::Cat5 => Rgb(0x00, 0x00, 0x00),
        }
    }

    pub fn short_label(&self) -> &'static str {
        match self {
            IntensityCategory::Unknown => "No Data",
            IntensityCategory::TropicalDepression => "TD",
            IntensityCategory::TropicalStorm => "TS",
            IntensityCategory::Cat1 => "Cat1",
            IntensityCategory::Cat2 => "Cat2",
            IntensityCategory::Cat3 => "Cat3",
            IntensityCategory::Cat4 => "Cat4",
            IntensityCategory::Cat5 => "Cat5",
        }
    }

    pub fn legend_label(&self) -> &'static str {
        match self {
            IntensityCategory::Unknown => "No Wind Data",
            IntensityCategory::TropicalDepression => "TD (<34 kt)",
            IntensityCategory::TropicalStorm => "TS (34-63 kt)",
            IntensityCategory::Cat1 => "Cat 1 (64-82 kt)",
            IntensityCategory::Cat2 => "Cat 2 (83-95 kt)",
            IntensityCategory::Cat3 => "Cat 3 (96-112 kt)",
            IntensityCategory::Cat4 => "Cat 4 (113-136 kt)",
            IntensityCategory::Cat5 => "Cat 5 (137+ kt)",
        }
    }
}
