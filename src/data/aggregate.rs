use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use super::labels::UNKNOWN_LABEL;
use super::model::{BikeTable, Observation};

// ---------------------------------------------------------------------------
// Aggregate tables
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourlyMean {
    pub hour: u8,
    pub mean: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyMean {
    pub month: &'static str,
    pub mean_daily_count: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeasonStat {
    pub season: &'static str,
    /// Mean daily count over the season's rows.
    pub mean_daily_count: f64,
    pub rows: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherShare {
    pub weather: &'static str,
    pub rows: usize,
    /// `rows` divided by the total row count, in `[0, 1]`.
    pub proportion: f64,
}

/// Everything the dashboard renders for one date selection.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Summary {
    pub total_usage: u64,
    pub daily_trend: Vec<DailyTotal>,
    pub hourly_profile: Vec<HourlyMean>,
    pub monthly_trend: Vec<MonthlyMean>,
    pub seasonal: Vec<SeasonStat>,
    pub weather: Vec<WeatherShare>,
}

/// Compute every aggregate for one render cycle.
///
/// Headline, daily and hourly views use `working_set`; monthly, seasonal and
/// weather views always use `full_set` regardless of the selected range.
pub fn summarize(working_set: &BikeTable, full_set: &BikeTable) -> Summary {
    Summary {
        total_usage: total_usage(working_set),
        daily_trend: daily_trend(working_set),
        hourly_profile: hourly_profile(working_set),
        monthly_trend: monthly_trend(full_set),
        seasonal: seasonal_totals(full_set),
        weather: weather_distribution(full_set),
    }
}

// ---------------------------------------------------------------------------
// Working-set views
// ---------------------------------------------------------------------------

/// Sum of hourly counts.
pub fn total_usage(working_set: &BikeTable) -> u64 {
    working_set
        .rows
        .iter()
        .map(|o| u64::from(o.record.hourly_count))
        .sum()
}

/// Hourly counts summed per date, chronological.
pub fn daily_trend(working_set: &BikeTable) -> Vec<DailyTotal> {
    let mut per_day: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for o in &working_set.rows {
        *per_day.entry(o.date()).or_default() += u64::from(o.record.hourly_count);
    }
    per_day
        .into_iter()
        .map(|(date, total)| DailyTotal { date, total })
        .collect()
}

/// Mean hourly count per hour of day, for the hours present.
pub fn hourly_profile(working_set: &BikeTable) -> Vec<HourlyMean> {
    let mut per_hour: BTreeMap<u8, Mean> = BTreeMap::new();
    for o in &working_set.rows {
        per_hour
            .entry(o.record.hour)
            .or_default()
            .add(f64::from(o.record.hourly_count));
    }
    per_hour
        .into_iter()
        .map(|(hour, m)| HourlyMean { hour, mean: m.value() })
        .collect()
}

// ---------------------------------------------------------------------------
// Full-set views
// ---------------------------------------------------------------------------

/// Mean daily count per month, ascending by mean.
pub fn monthly_trend(full_set: &BikeTable) -> Vec<MonthlyMean> {
    let mut groups = group_by_label(full_set, |o| (o.month_label, o.record.month));
    // Stable sort: equal means keep calendar order.
    groups.sort_by(|a, b| a.mean.value().total_cmp(&b.mean.value()));
    groups
        .into_iter()
        .map(|g| MonthlyMean {
            month: g.label,
            mean_daily_count: g.mean.value(),
        })
        .collect()
}

/// Mean daily count per season, in season order with "Unknown" last.
pub fn seasonal_totals(full_set: &BikeTable) -> Vec<SeasonStat> {
    group_by_label(full_set, |o| (o.season_label, o.record.season))
        .into_iter()
        .map(|g| SeasonStat {
            season: g.label,
            mean_daily_count: g.mean.value(),
            rows: g.mean.count,
        })
        .collect()
}

/// Row share per weather condition, most frequent first.
pub fn weather_distribution(full_set: &BikeTable) -> Vec<WeatherShare> {
    let total = full_set.len();
    let mut groups = group_by_label(full_set, |o| (o.weather_label, o.record.weather));
    groups.sort_by(|a, b| b.mean.count.cmp(&a.mean.count));
    groups
        .into_iter()
        .map(|g| WeatherShare {
            weather: g.label,
            rows: g.mean.count,
            proportion: g.mean.count as f64 / total as f64,
        })
        .collect()
}

// -- helpers --

#[derive(Debug, Clone, Copy, Default)]
struct Mean {
    sum: f64,
    count: usize,
}

impl Mean {
    fn add(&mut self, v: f64) {
        self.sum += v;
        self.count += 1;
    }

    fn value(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}

struct LabelGroup {
    label: &'static str,
    order: u8,
    mean: Mean,
}

/// Group rows by label, averaging the daily count. Groups come back ordered
/// by their smallest code, with the unknown label last.
fn group_by_label(
    table: &BikeTable,
    key: impl Fn(&Observation) -> (&'static str, u8),
) -> Vec<LabelGroup> {
    let mut groups: HashMap<&'static str, LabelGroup> = HashMap::new();
    for o in &table.rows {
        let (label, code) = key(o);
        let order = if label == UNKNOWN_LABEL { u8::MAX } else { code };
        let group = groups.entry(label).or_insert(LabelGroup {
            label,
            order,
            mean: Mean::default(),
        });
        group.order = group.order.min(order);
        group.mean.add(f64::from(o.record.daily_count));
    }

    let mut groups: Vec<LabelGroup> = groups.into_values().collect();
    groups.sort_by_key(|g| g.order);
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::filter;
    use crate::data::labels::enrich;
    use crate::data::model::{DateRange, Record};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(day: NaiveDate, hour: u8, season: u8, weather: u8, daily: u32, hourly: u32) -> Record {
        Record {
            date: day,
            hour,
            season,
            weather,
            month: chrono::Datelike::month(&day) as u8,
            daily_count: daily,
            hourly_count: hourly,
        }
    }

    /// Two full days in January 2011 and one partial day in July 2012.
    fn full() -> BikeTable {
        let mut records = Vec::new();
        for hour in 0..24 {
            records.push(record(date(2011, 1, 1), hour, 1, 1, 985, hour as u32));
        }
        for hour in 0..24 {
            records.push(record(date(2011, 1, 2), hour, 1, 2, 801, 2 * hour as u32));
        }
        for hour in 8..10 {
            records.push(record(date(2012, 7, 4), hour, 3, 1, 7000, 500));
        }
        BikeTable::from_rows(enrich(&records)).unwrap()
    }

    #[test]
    fn single_day_total_matches_hourly_sum() {
        let full = full();
        let day = date(2011, 1, 1);
        let working = filter(&full, DateRange::new(day, day).unwrap()).unwrap();
        let summary = summarize(&working, &full);

        assert!(working.rows.iter().all(|o| o.date() == day));
        assert_eq!(summary.total_usage, (0..24u64).sum::<u64>());
        assert_eq!(summary.daily_trend, vec![DailyTotal { date: day, total: 276 }]);
    }

    #[test]
    fn daily_trend_is_chronological() {
        let trend = daily_trend(&full());
        let dates: Vec<NaiveDate> = trend.iter().map(|d| d.date).collect();
        assert_eq!(dates, vec![date(2011, 1, 1), date(2011, 1, 2), date(2012, 7, 4)]);
        assert_eq!(trend[1].total, 2 * 276);
        assert_eq!(trend[2].total, 1000);
    }

    #[test]
    fn hourly_profile_has_24_entries_for_a_full_day() {
        let full = full();
        let profile = hourly_profile(&full);
        assert_eq!(profile.len(), 24);
        assert!(profile.windows(2).all(|w| w[0].hour < w[1].hour));
        // Hour 3: 3 and 6 across the two January days.
        assert_eq!(profile[3], HourlyMean { hour: 3, mean: 4.5 });
        // Hour 8: 8, 16 and 500.
        assert!((profile[8].mean - 524.0 / 3.0).abs() < 1e-9);

        let partial = filter(&full, DateRange::new(date(2012, 7, 4), date(2012, 7, 4)).unwrap()).unwrap();
        let hours: Vec<u8> = hourly_profile(&partial).iter().map(|h| h.hour).collect();
        assert_eq!(hours, vec![8, 9]);
    }

    #[test]
    fn monthly_trend_sorted_by_mean() {
        let trend = monthly_trend(&full());
        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0].month, "January");
        assert_eq!(trend[0].mean_daily_count, (985.0 + 801.0) / 2.0);
        assert_eq!(trend[1].month, "July");
        assert!(trend.windows(2).all(|w| w[0].mean_daily_count <= w[1].mean_daily_count));
    }

    #[test]
    fn seasonal_and_weather_ignore_the_working_set() {
        let full = full();
        let working = filter(&full, DateRange::new(date(2011, 1, 1), date(2011, 12, 31)).unwrap()).unwrap();
        assert_eq!(working.distinct_days(), 2);

        let filtered = summarize(&working, &full);
        let unfiltered = summarize(&full, &full);
        assert_eq!(filtered.seasonal, unfiltered.seasonal);
        assert_eq!(filtered.weather, unfiltered.weather);
        assert_eq!(filtered.monthly_trend, unfiltered.monthly_trend);
        assert_ne!(filtered.total_usage, unfiltered.total_usage);
    }

    #[test]
    fn clear_weather_counts_even_when_2012_is_filtered_out() {
        let full = full();
        let working = filter(&full, DateRange::new(date(2011, 1, 1), date(2011, 1, 2)).unwrap()).unwrap();
        let summary = summarize(&working, &full);

        let clear = summary
            .weather
            .iter()
            .find(|w| w.weather.starts_with("Clear"))
            .unwrap();
        // 24 rows on 2011-01-01 plus 2 rows in 2012.
        assert_eq!(clear.rows, 26);
        assert!((clear.proportion - 26.0 / 50.0).abs() < 1e-12);
        let share: f64 = summary.weather.iter().map(|w| w.proportion).sum();
        assert!((share - 1.0).abs() < 1e-12);
        assert_eq!(summary.weather[0].weather, clear.weather);
    }

    #[test]
    fn seasons_in_code_order_with_unknown_last() {
        let records = vec![
            record(date(2011, 1, 1), 0, 9, 1, 10, 1),
            record(date(2011, 1, 1), 1, 3, 1, 30, 1),
            record(date(2011, 1, 1), 2, 1, 1, 50, 1),
            record(date(2011, 1, 1), 3, 1, 1, 70, 1),
            record(date(2011, 1, 1), 4, 0, 5, 20, 1),
        ];
        let table = BikeTable::from_rows(enrich(&records)).unwrap();

        let seasons = seasonal_totals(&table);
        let labels: Vec<&str> = seasons.iter().map(|s| s.season).collect();
        assert_eq!(labels, vec!["Spring", "Fall", UNKNOWN_LABEL]);
        assert_eq!(seasons[0].mean_daily_count, 60.0);
        assert_eq!(seasons[0].rows, 2);
        assert_eq!(seasons[2].rows, 2);
        assert_eq!(seasons[2].mean_daily_count, 15.0);
    }

    #[test]
    fn empty_working_set_gives_empty_aggregates() {
        let full = full();
        let gap = filter(&full, DateRange::new(date(2011, 6, 1), date(2011, 6, 30)).unwrap()).unwrap();
        assert!(gap.is_empty());

        let summary = summarize(&gap, &full);
        assert_eq!(summary.total_usage, 0);
        assert!(summary.daily_trend.is_empty());
        assert!(summary.hourly_profile.is_empty());
        assert!(!summary.weather.is_empty());

        let empty = BikeTable { rows: Vec::new(), domain: full.domain };
        assert!(monthly_trend(&empty).is_empty());
        assert!(seasonal_totals(&empty).is_empty());
        assert!(weather_distribution(&empty).is_empty());
    }
}
