use chrono::NaiveDate;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Raw CSV rows
// ---------------------------------------------------------------------------

/// One row of the daily source (`day.csv`). Columns not listed are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DayRecord {
    pub dteday: NaiveDate,
    pub season: u8,
    pub mnth: u8,
    pub weathersit: u8,
    pub cnt: u32,
}

/// One row of the hourly source (`hour.csv`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HourRecord {
    pub dteday: NaiveDate,
    pub hr: u8,
    pub cnt: u32,
}

// ---------------------------------------------------------------------------
// Record – one joined (date, hour) observation
// ---------------------------------------------------------------------------

/// Result of joining a daily row with one of its hourly rows.
/// Category codes are taken from the daily side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record {
    pub date: NaiveDate,
    pub hour: u8,
    pub season: u8,
    pub weather: u8,
    pub month: u8,
    /// Total rentals on `date` (daily source).
    pub daily_count: u32,
    /// Rentals during `hour` (hourly source).
    pub hourly_count: u32,
}

/// A [`Record`] plus its human-readable category labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
    pub record: Record,
    pub season_label: &'static str,
    pub weather_label: &'static str,
    pub month_label: &'static str,
}

impl Observation {
    pub fn date(&self) -> NaiveDate {
        self.record.date
    }
}

// ---------------------------------------------------------------------------
// BikeTable – a (possibly filtered) set of observations
// ---------------------------------------------------------------------------

/// Inclusive date interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn covers(&self, other: &DateRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Number of calendar days in the range, both ends included.
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Rows plus the date domain of the dataset they came from.
///
/// The domain is inherited by filtered tables, so a subset still knows which
/// bounds are legal for it.
#[derive(Debug, Clone, PartialEq)]
pub struct BikeTable {
    pub rows: Vec<Observation>,
    pub domain: DateRange,
}

impl BikeTable {
    /// Build a table from rows, computing the domain from their dates.
    /// Returns `None` for an empty row set, which has no domain.
    pub fn from_rows(rows: Vec<Observation>) -> Option<Self> {
        let start = rows.iter().map(Observation::date).min()?;
        let end = rows.iter().map(Observation::date).max()?;
        Some(BikeTable {
            rows,
            domain: DateRange { start, end },
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of distinct dates present in the rows.
    pub fn distinct_days(&self) -> usize {
        let mut dates: Vec<NaiveDate> = self.rows.iter().map(Observation::date).collect();
        dates.sort_unstable();
        dates.dedup();
        dates.len()
    }
}

// ---------------------------------------------------------------------------
// Dataset – session context, loaded once and never mutated
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Full joined and labeled table.
    pub full: BikeTable,
    /// Human-readable description of where the data came from.
    pub origin: String,
}

impl Dataset {
    pub fn domain(&self) -> DateRange {
        self.full.domain
    }
}
