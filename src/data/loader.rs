use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;

use super::labels::enrich;
use super::model::{BikeTable, Dataset, DayRecord, HourRecord, Record};
use crate::config::DataSource;
use crate::error::DashboardError;

pub const DAY_FILE: &str = "day.csv";
pub const HOUR_FILE: &str = "hour.csv";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load both sources, join them on date and attach category labels.
///
/// Any fetch or parse failure is a [`DashboardError::Load`]; a join with no
/// overlapping dates is a [`DashboardError::Data`].
pub fn load(source: &DataSource) -> crate::error::Result<Dataset> {
    let (daily, hourly) = match source {
        DataSource::Remote { day_url, hour_url, timeout } => {
            read_remote(day_url, hour_url, *timeout).map_err(DashboardError::load)?
        }
        DataSource::Local { dir } => read_dir(dir).map_err(DashboardError::load)?,
    };
    build_dataset(&daily, &hourly, source.describe())
}

/// Join parsed sources into a labeled [`Dataset`].
pub fn build_dataset(
    daily: &[DayRecord],
    hourly: &[HourRecord],
    origin: String,
) -> crate::error::Result<Dataset> {
    let joined = join(daily, hourly);
    let unmatched = unmatched_rows(daily, hourly);
    if unmatched.hourly > 0 || unmatched.daily > 0 {
        log::debug!(
            "Join dropped {} hourly rows without a daily row and {} daily rows without hourly rows",
            unmatched.hourly,
            unmatched.daily
        );
    }

    let full = BikeTable::from_rows(enrich(&joined)).ok_or_else(|| {
        DashboardError::Data(format!(
            "daily ({} rows) and hourly ({} rows) sources share no dates",
            daily.len(),
            hourly.len()
        ))
    })?;

    log::info!(
        "Loaded {} hourly observations over {} days ({} to {}) from {origin}",
        full.len(),
        full.distinct_days(),
        full.domain.start,
        full.domain.end
    );

    Ok(Dataset { full, origin })
}

// ---------------------------------------------------------------------------
// Inner join on date
// ---------------------------------------------------------------------------

/// Inner join of daily and hourly rows on `dteday`.
///
/// Output follows the daily rows' order, then hourly order within a date.
/// Dates present on only one side are dropped.
pub fn join(daily: &[DayRecord], hourly: &[HourRecord]) -> Vec<Record> {
    let mut hours_by_date: HashMap<NaiveDate, Vec<&HourRecord>> = HashMap::new();
    for h in hourly {
        hours_by_date.entry(h.dteday).or_default().push(h);
    }

    daily
        .iter()
        .flat_map(|d| {
            hours_by_date
                .get(&d.dteday)
                .into_iter()
                .flatten()
                .map(move |h| Record {
                    date: d.dteday,
                    hour: h.hr,
                    season: d.season,
                    weather: d.weathersit,
                    month: d.mnth,
                    daily_count: d.cnt,
                    hourly_count: h.cnt,
                })
        })
        .collect()
}

/// Rows on each side of the join whose date has no partner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Unmatched {
    pub daily: usize,
    pub hourly: usize,
}

pub fn unmatched_rows(daily: &[DayRecord], hourly: &[HourRecord]) -> Unmatched {
    let day_dates: HashSet<NaiveDate> = daily.iter().map(|d| d.dteday).collect();
    let hour_dates: HashSet<NaiveDate> = hourly.iter().map(|h| h.dteday).collect();
    Unmatched {
        daily: daily.iter().filter(|d| !hour_dates.contains(&d.dteday)).count(),
        hourly: hourly.iter().filter(|h| !day_dates.contains(&h.dteday)).count(),
    }
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

fn read_remote(
    day_url: &str,
    hour_url: &str,
    timeout: Duration,
) -> Result<(Vec<DayRecord>, Vec<HourRecord>)> {
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .context("building HTTP client")?;

    let day_text = fetch_text(&client, day_url)?;
    let hour_text = fetch_text(&client, hour_url)?;

    let daily = parse_daily(day_text.as_bytes()).with_context(|| format!("parsing {day_url}"))?;
    let hourly = parse_hourly(hour_text.as_bytes()).with_context(|| format!("parsing {hour_url}"))?;
    Ok((daily, hourly))
}

fn fetch_text(client: &reqwest::blocking::Client, url: &str) -> Result<String> {
    log::info!("Fetching {url}");
    let resp = client
        .get(url)
        .send()
        .with_context(|| format!("requesting {url}"))?
        .error_for_status()
        .with_context(|| format!("bad response from {url}"))?;
    resp.text().with_context(|| format!("reading body of {url}"))
}

/// Read `day.csv` and `hour.csv` from a local directory.
pub fn read_dir(dir: &Path) -> Result<(Vec<DayRecord>, Vec<HourRecord>)> {
    let day_path = dir.join(DAY_FILE);
    let hour_path = dir.join(HOUR_FILE);

    let day_file = std::fs::File::open(&day_path)
        .with_context(|| format!("opening {}", day_path.display()))?;
    let hour_file = std::fs::File::open(&hour_path)
        .with_context(|| format!("opening {}", hour_path.display()))?;

    let daily = parse_daily(day_file).with_context(|| format!("parsing {}", day_path.display()))?;
    let hourly = parse_hourly(hour_file).with_context(|| format!("parsing {}", hour_path.display()))?;
    Ok((daily, hourly))
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// Parse the daily CSV. Needs `dteday`, `season`, `mnth`, `weathersit`, `cnt`.
pub fn parse_daily<R: Read>(reader: R) -> Result<Vec<DayRecord>> {
    parse_rows(reader, "daily")
}

/// Parse the hourly CSV. Needs `dteday`, `hr`, `cnt`.
pub fn parse_hourly<R: Read>(reader: R) -> Result<Vec<HourRecord>> {
    let rows: Vec<HourRecord> = parse_rows(reader, "hourly")?;
    if let Some((i, bad)) = rows.iter().enumerate().find(|(_, r)| r.hr > 23) {
        bail!("hourly row {i}: hour {} is outside 0-23", bad.hr);
    }
    Ok(rows)
}

fn parse_rows<R: Read, T: DeserializeOwned>(reader: R, what: &str) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut rows = Vec::new();
    for (row_no, result) in reader.deserialize::<T>().enumerate() {
        let row = result.with_context(|| format!("{what} CSV row {row_no}"))?;
        rows.push(row);
    }

    if rows.is_empty() {
        bail!("{what} source contains no rows");
    }
    Ok(rows)
}
