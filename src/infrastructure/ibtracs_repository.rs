// IBTrACS repository implementation - per-basin CSV best-track files
use crate::application::storm_repository::{StormNotFound, StormRepository};
use crate::domain::observation::{RawField, RawObservation};
use crate::domain::storm::{Basin, StormSummary};
use crate::infrastructure::ttl_cache::TtlCache;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

type SeasonRows = Arc<Vec<IbtracsRow>>;

pub struct IbtracsRepository {
    base_url: String,
    client: reqwest::Client,
    /// Parsed rows per (basin, season), shared by storm lists and tracks.
    season_rows: TtlCache<(Basin, i32), SeasonRows>,
}

/// One data row, cells kept as text until validation.
#[derive(Debug, Clone, PartialEq)]
struct IbtracsRow {
    sid: String,
    season: i32,
    name: String,
    iso_time: String,
    lat: String,
    lon: String,
    wind: Option<String>,
    pressure: Option<String>,
}

/// Column positions, located by header name.
#[derive(Debug, Clone, Copy)]
struct Columns {
    sid: usize,
    season: usize,
    name: usize,
    iso_time: usize,
    lat: usize,
    lon: usize,
    wind: Option<usize>,
    pressure: Option<usize>,
}

impl Columns {
    fn locate(headers: &csv::StringRecord) -> Result<Self> {
        let names: Vec<String> = headers.iter().map(|h| h.to_ascii_uppercase()).collect();
        let find = |name: &str| names.iter().position(|h| h == name);
        let require = |name: &str| find(name).with_context(|| format!("IBTrACS header has no {} column", name));

        Ok(Self {
            sid: require("SID")?,
            season: require("SEASON")?,
            name: require("NAME")?,
            iso_time: require("ISO_TIME")?,
            lat: require("LAT")?,
            lon: require("LON")?,
            wind: find("USA_WIND").or_else(|| find("WMO_WIND")),
            pressure: find("USA_PRES").or_else(|| find("WMO_PRES")),
        })
    }
}

impl IbtracsRepository {
    pub fn new(base_url: String, timeout: Duration, season_ttl: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build IBTrACS HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            season_rows: TtlCache::new(season_ttl),
        })
    }

    fn build_basin_url(&self, basin: Basin) -> String {
        format!("{}/ibtracs.{}.list.v04r01.csv", self.base_url, basin.ibtracs_code())
    }

    /// Rows of one season, downloaded at most once per cache lifetime.
    async fn season_rows(&self, basin: Basin, season: i32) -> Result<SeasonRows> {
        let key = (basin, season);
        if let Some(rows) = self.season_rows.get(&key).await {
            tracing::debug!("Season rows cache hit for {} {}", basin, season);
            return Ok(rows);
        }

        let rows = Arc::new(self.fetch_rows(basin, season).await?);
        self.season_rows.insert(key, rows.clone()).await;
        Ok(rows)
    }

    async fn fetch_rows(&self, basin: Basin, season: i32) -> Result<Vec<IbtracsRow>> {
        let url = self.build_basin_url(basin);
        tracing::debug!("Fetching IBTrACS file {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to send request to IBTrACS")?;

        if !response.status().is_success() {
            let status = response.status();
            anyhow::bail!("IBTrACS request for {} failed with status {}", basin, status);
        }

        let body = response
            .text()
            .await
            .context("Failed to read IBTrACS response body")?;

        let rows = Self::parse_rows(&body, season)?;
        tracing::debug!("Parsed {} IBTrACS rows for {} {}", rows.len(), basin, season);
        Ok(rows)
    }

    /// Parses the CSV body, keeping rows of one season. The record after
    /// the header holds units and is skipped with every other record whose
    /// season does not parse.
    fn parse_rows(body: &str, season: i32) -> Result<Vec<IbtracsRow>> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(body.as_bytes());
        let columns = Columns::locate(reader.headers().context("Failed to read IBTrACS header")?)?;

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.context("Malformed IBTrACS record")?;
            let Some(row_season) = record.get(columns.season).and_then(|s| s.parse::<i32>().ok()) else {
                continue;
            };
            if row_season != season {
                continue;
            }
            let Some(sid) = record.get(columns.sid).filter(|sid| !sid.is_empty()) else {
                continue;
            };

            let cell = |idx: usize| record.get(idx).unwrap_or_default().to_string();
            rows.push(IbtracsRow {
                sid: sid.to_string(),
                season: row_season,
                name: cell(columns.name),
                iso_time: cell(columns.iso_time),
                lat: cell(columns.lat),
                lon: cell(columns.lon),
                wind: columns.wind.map(cell),
                pressure: columns.pressure.map(cell),
            });
        }

        Ok(rows)
    }

    fn summaries(rows: &[IbtracsRow], basin: Basin) -> Vec<StormSummary> {
        let mut seen = HashSet::new();
        rows.iter()
            .filter(|row| seen.insert(row.sid.clone()))
            .map(|row| StormSummary::new(row.sid.clone(), row.name.clone(), basin, row.season))
            .collect()
    }

    /// Rows become raw records declared in the requested basin, so storms
    /// that cross basin lines keep a single identity.
    fn to_raw(row: &IbtracsRow, basin: Basin) -> RawObservation {
        RawObservation {
            storm_id: row.sid.clone(),
            name: Some(row.name.clone()),
            basin: basin.ibtracs_code().to_string(),
            time: row.iso_time.clone(),
            lat: Some(RawField::Text(row.lat.clone())),
            lon: Some(RawField::Text(row.lon.clone())),
            wind: row.wind.clone().map(RawField::Text),
            pressure: row.pressure.clone().map(RawField::Text),
        }
    }
}

#[async_trait]
impl StormRepository for IbtracsRepository {
    async fn list_storms(&self, basin: Basin, season: i32) -> Result<Vec<StormSummary>> {
        let rows = self.season_rows(basin, season).await?;
        Ok(Self::summaries(&rows, basin))
    }

    async fn fetch_track(&self, basin: Basin, season: i32, storm_id: &str) -> Result<Vec<RawObservation>> {
        let rows = self.season_rows(basin, season).await?;
        let raw: Vec<RawObservation> = rows
            .iter()
            .filter(|row| row.sid == storm_id)
            .map(|row| Self::to_raw(row, basin))
            .collect();

        if raw.is_empty() {
            return Err(StormNotFound {
                basin,
                season,
                storm_id: storm_id.to_string(),
            }
            .into());
        }
        Ok(raw)
    }
}
