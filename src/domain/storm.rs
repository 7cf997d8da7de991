// Basin and storm catalogue models
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// First season covered by the best-track archive.
pub const FIRST_SEASON: i32 = 1842;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Basin {
    #[serde(rename = "NATL")]
    NorthAtlantic,
    #[serde(rename = "EPAC")]
    EasternPacific,
    #[serde(rename = "WPAC")]
    WesternPacific,
    #[serde(rename = "NIO")]
    NorthIndian,
    #[serde(rename = "SIO")]
    SouthIndian,
    #[serde(rename = "AUS")]
    Australian,
}

impl Basin {
    pub const ALL: [Basin; 6] = [
        Basin::NorthAtlantic,
        Basin::EasternPacific,
        Basin::WesternPacific,
        Basin::NorthIndian,
        Basin::SouthIndian,
        Basin::Australian,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Basin::NorthAtlantic => "NATL",
            Basin::EasternPacific => "EPAC",
            Basin::WesternPacific => "WPAC",
            Basin::NorthIndian => "NIO",
            Basin::SouthIndian => "SIO",
            Basin::Australian => "AUS",
        }
    }

    /// Two-letter code used in IBTrACS file names and `BASIN` columns.
    pub fn ibtracs_code(&self) -> &'static str {
        match self {
            Basin::NorthAtlantic => "NA",
            Basin::EasternPacific => "EP",
            Basin::WesternPacific => "WP",
            Basin::NorthIndian => "NI",
            Basin::SouthIndian => "SI",
            Basin::Australian => "SP",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Basin::NorthAtlantic => "Atlantic (NATL)",
            Basin::EasternPacific => "East/Central Pacific (EPAC/CPAC)",
            Basin::WesternPacific => "West Pacific (WPAC)",
            Basin::NorthIndian => "Northern Indian Ocean (NIO)",
            Basin::SouthIndian => "Southern Indian Ocean (SIO)",
            Basin::Australian => "Australian Region (AUSW/AUSE)",
        }
    }
}

impl fmt::Display for Basin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown basin code '{0}'")]
pub struct UnknownBasin(pub String);

impl FromStr for Basin {
    type Err = UnknownBasin;

    /// Accepts both the display codes and the IBTrACS two-letter codes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NATL" | "NA" => Ok(Basin::NorthAtlantic),
            "EPAC" | "CPAC" | "EP" => Ok(Basin::EasternPacific),
            "WPAC" | "WP" => Ok(Basin::WesternPacific),
            "NIO" | "NI" => Ok(Basin::NorthIndian),
            "SIO" | "SI" => Ok(Basin::SouthIndian),
            "AUS" | "AUSW" | "AUSE" | "SP" => Ok(Basin::Australian),
            _ => Err(UnknownBasin(s.to_string())),
        }
    }
}

/// Regional name for a tropical cyclone, chosen from where the track sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StormType {
    Hurricane,
    Typhoon,
    Cyclone,
}

impl StormType {
    pub fn from_center(lat_center: f64, lon_center: f64) -> Self {
        if lat_center < 0.0 {
            StormType::Cyclone
        } else if lon_center < -30.0 {
            StormType::Hurricane
        } else if lon_center > 100.0 {
            StormType::Typhoon
        } else {
            StormType::Cyclone
        }
    }
}

impl fmt::Display for StormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StormType::Hurricane => "Hurricane",
            StormType::Typhoon => "Typhoon",
            StormType::Cyclone => "Cyclone",
        };
        f.write_str(name)
    }
}

/// One entry of a basin/year storm listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StormSummary {
    pub id: String,
    pub name: String,
    pub display_name: String,
    pub basin: Basin,
    pub season: i32,
}

impl StormSummary {
    pub fn new(id: String, name: String, basin: Basin, season: i32) -> Self {
        let display_name = Self::format_name(&id, &name);
        Self {
            id,
            name,
            display_name,
            basin,
            season,
        }
    }

    fn format_name(id: &str, name: &str) -> String {
        // "NOT_NAMED" -> "Unnamed (2017228N14314)"
        let cleaned = name.trim().trim_matches('*').trim();
        if cleaned.is_empty() || cleaned.eq_ignore_ascii_case("NOT_NAMED") || cleaned.eq_ignore_ascii_case("UNNAMED") {
            format!("Unnamed ({})", id)
        } else {
            cleaned.replace('_', " ")
        }
    }

    /// Key used to collapse duplicate listings of the same storm.
    pub fn dedup_key(&self) -> (String, Basin) {
        if self.display_name.starts_with("Unnamed") {
            (self.id.clone(), self.basin)
        } else {
            (self.display_name.to_uppercase(), self.basin)
        }
    }
}
