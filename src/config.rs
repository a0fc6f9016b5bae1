use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};

pub const DEFAULT_DAY_URL: &str =
    "https://raw.githubusercontent.com/RizalNR03/Proyek-Analisis-Data-Bike-Sharing/main/data/day.csv";
pub const DEFAULT_HOUR_URL: &str =
    "https://raw.githubusercontent.com/RizalNR03/Proyek-Analisis-Data-Bike-Sharing/main/data/hour.csv";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ---------------------------------------------------------------------------
// Where the two CSV sources come from
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// Two remote CSV files fetched over HTTP.
    Remote {
        day_url: String,
        hour_url: String,
        timeout: Duration,
    },
    /// A directory holding `day.csv` and `hour.csv`.
    Local { dir: PathBuf },
}

impl DataSource {
    pub fn describe(&self) -> String {
        match self {
            DataSource::Remote { day_url, hour_url, .. } => format!("{day_url} + {hour_url}"),
            DataSource::Local { dir } => dir.display().to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Environment configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub source: DataSource,
}

impl Config {
    /// Build the configuration from `BIKE_DASH_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`] but with an injectable variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(dir) = non_empty("BIKE_DASH_DATA_DIR") {
            return Ok(Config {
                source: DataSource::Local { dir: PathBuf::from(dir) },
            });
        }

        let timeout_secs = match non_empty("BIKE_DASH_FETCH_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("BIKE_DASH_FETCH_TIMEOUT_SECS: '{raw}' is not a number of seconds"))?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            bail!("BIKE_DASH_FETCH_TIMEOUT_SECS must be greater than zero");
        }

        Ok(Config {
            source: DataSource::Remote {
                day_url: non_empty("BIKE_DASH_DAY_URL").unwrap_or_else(|| DEFAULT_DAY_URL.to_string()),
                hour_url: non_empty("BIKE_DASH_HOUR_URL").unwrap_or_else(|| DEFAULT_HOUR_URL.to_string()),
                timeout: Duration::from_secs(timeout_secs),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_to_remote_dataset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(
            config.source,
            DataSource::Remote {
                day_url: DEFAULT_DAY_URL.to_string(),
                hour_url: DEFAULT_HOUR_URL.to_string(),
                timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            }
        );
    }

    #[test]
    fn data_dir_wins_over_urls() {
        let config = Config::from_lookup(lookup(&[
            ("BIKE_DASH_DATA_DIR", "/tmp/bikes"),
            ("BIKE_DASH_DAY_URL", "http://example.invalid/day.csv"),
        ]))
        .unwrap();
        assert_eq!(config.source, DataSource::Local { dir: PathBuf::from("/tmp/bikes") });
    }

    #[test]
    fn rejects_bad_timeout() {
        assert!(Config::from_lookup(lookup(&[("BIKE_DASH_FETCH_TIMEOUT_SECS", "soon")])).is_err());
        assert!(Config::from_lookup(lookup(&[("BIKE_DASH_FETCH_TIMEOUT_SECS", "0")])).is_err());
    }

    #[test]
    fn custom_urls_and_timeout() {
        let config = Config::from_lookup(lookup(&[
            ("BIKE_DASH_DAY_URL", "http://mirror/day.csv"),
            ("BIKE_DASH_HOUR_URL", "http://mirror/hour.csv"),
            ("BIKE_DASH_FETCH_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        match config.source {
            DataSource::Remote { day_url, hour_url, timeout } => {
                assert_eq!(day_url, "http://mirror/day.csv");
                assert_eq!(hour_url, "http://mirror/hour.csv");
                assert_eq!(timeout, Duration::from_secs(5));
            }
            other => panic!("unexpected source {other:?}"),
        }
    }
}
