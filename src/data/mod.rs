/// Data layer: loading, labeling, filtering and aggregation.
///
/// Architecture:
/// ```text
///  day.csv   hour.csv
///     │         │
///     └────┬────┘
///          ▼
///   ┌──────────┐
///   │  loader   │  parse + inner join on date → Vec<Record>
///   └──────────┘
///          │
///          ▼
///   ┌──────────┐
///   │  labels   │  season / weather / month codes → names
///   └──────────┘
///          │
///          ▼
///   ┌────────────┐
///   │  BikeTable  │  full set (Dataset), loaded once
///   └────────────┘
///          │
///          ▼
///   ┌──────────┐
///   │  filter   │  inclusive date range → working set
///   └──────────┘
///          │
///          ▼
///   ┌───────────┐
///   │ aggregate  │  working set + full set → Summary
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod labels;
pub mod loader;
pub mod model;
