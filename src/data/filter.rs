use chrono::NaiveDate;

use super::model::{BikeTable, DateRange};
use crate::error::{DashboardError, Result};

// ---------------------------------------------------------------------------
// Validating the user's date selection
// ---------------------------------------------------------------------------

impl DateRange {
    /// Build a range from an ordered pair; `start > end` is rejected.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(DashboardError::Input(format!(
                "start date {start} is after end date {end}"
            )));
        }
        Ok(DateRange { start, end })
    }

    /// Build a range from whatever the date picker produced.
    /// Exactly two dates are required.
    pub fn from_selection(dates: &[NaiveDate]) -> Result<Self> {
        match dates {
            [start, end] => DateRange::new(*start, *end),
            _ => Err(DashboardError::Input(format!(
                "select both a start and an end date (got {} date{})",
                dates.len(),
                if dates.len() == 1 { "" } else { "s" }
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Range filter
// ---------------------------------------------------------------------------

/// Keep the rows whose date lies in `range` (inclusive), in original order.
///
/// The range must lie within the table's domain. The result keeps that
/// domain, so filtering it again with the same range is a no-op.
pub fn filter(table: &BikeTable, range: DateRange) -> Result<BikeTable> {
    if !table.domain.covers(&range) {
        return Err(DashboardError::Input(format!(
            "{} to {} is outside the available data ({} to {})",
            range.start, range.end, table.domain.start, table.domain.end
        )));
    }

    let rows = table
        .rows
        .iter()
        .filter(|o| range.contains(o.date()))
        .copied()
        .collect();

    Ok(BikeTable {
        rows,
        domain: table.domain,
    })
}
