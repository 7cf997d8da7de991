use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub ibtracs: IbtracsSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub sanitizer: SanitizerConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerSettings {
    pub addr: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:8080".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct IbtracsSettings {
    /// Directory holding `ibtracs.<BASIN>.list.v04r01.csv`.
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for IbtracsSettings {
    fn default() -> Self {
        Self {
            base_url: "https://www.ncei.noaa.gov/data/international-best-track-archive-for-climate-stewardship-ibtracs/v04r01/access/csv".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CacheSettings {
    /// Parsed IBTrACS rows per basin and season.
    pub season_ttl_secs: u64,
    pub storm_list_ttl_secs: u64,
    pub track_ttl_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            season_ttl_secs: 3600,
            storm_list_ttl_secs: 7200,
            track_ttl_secs: 3600,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SanitizerConfig {
    /// Drop fixes off the 00/06/12/18 UTC schedule.
    pub synoptic_only: bool,
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        Self { synoptic_only: true }
    }
}

/// Visual tuning constants for the layout planner.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
    /// Padding as a fraction of the larger bounding-box dimension.
    pub pad_fraction: f64,
    pub min_pad_deg: f64,
    pub max_pad_deg: f64,
    /// Smallest span either axis of the plot may have.
    pub min_span_deg: f64,
    /// Label offset magnitude as a fraction of the larger plot span.
    pub label_offset_fraction: f64,
    pub label_width_fraction: f64,
    pub label_height_fraction: f64,
    /// Number of trailing track segments the end label must avoid.
    pub track_check_segments: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            pad_fraction: 0.25,
            min_pad_deg: 1.0,
            max_pad_deg: 15.0,
            min_span_deg: 5.0,
            label_offset_fraction: 0.08,
            label_width_fraction: 0.22,
            label_height_fraction: 0.05,
            track_check_segments: 4,
        }
    }
}

/// Loads `config/app.*`, then `STORMTRACK__SECTION__KEY` environment overrides.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/app").required(false))
        .add_source(
            config::Environment::with_prefix("STORMTRACK")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
