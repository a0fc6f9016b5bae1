use super::model::{Observation, Record};

/// Label used for any code outside its lookup table.
pub const UNKNOWN_LABEL: &str = "Unknown";

pub const SEASON_LABELS: [(u8, &str); 4] = [
    (1, "Spring"),
    (2, "Summer"),
    (3, "Fall"),
    (4, "Winter"),
];

pub const WEATHER_LABELS: [(u8, &str); 4] = [
    (1, "Clear, Few clouds, Partly cloudy, Partly cloudy"),
    (2, "Mist + Cloudy, Mist + Broken clouds, Mist + Few clouds, Mist"),
    (3, "Light Snow, Light Rain + Thunderstorm + Scattered clouds, Light Rain + Scattered clouds"),
    (4, "Heavy Rain + Ice Pallets + Thunderstorm + Mist, Snow + Fog"),
];

pub const MONTH_LABELS: [(u8, &str); 12] = [
    (1, "January"),
    (2, "February"),
    (3, "March"),
    (4, "April"),
    (5, "May"),
    (6, "June"),
    (7, "July"),
    (8, "August"),
    (9, "September"),
    (10, "October"),
    (11, "November"),
    (12, "December"),
];

fn lookup(table: &[(u8, &'static str)], code: u8) -> &'static str {
    table
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, label)| *label)
        .unwrap_or(UNKNOWN_LABEL)
}

pub fn season_label(code: u8) -> &'static str {
    lookup(&SEASON_LABELS, code)
}

pub fn weather_label(code: u8) -> &'static str {
    lookup(&WEATHER_LABELS, code)
}

pub fn month_label(code: u8) -> &'static str {
    lookup(&MONTH_LABELS, code)
}

/// Attach season, weather and month labels to joined records.
///
/// Codes are kept alongside the labels; out-of-domain codes become
/// [`UNKNOWN_LABEL`] and are reported once with a warning.
pub fn enrich(records: &[Record]) -> Vec<Observation> {
    let observations: Vec<Observation> = records
        .iter()
        .map(|r| Observation {
            record: *r,
            season_label: season_label(r.season),
            weather_label: weather_label(r.weather),
            month_label: month_label(r.month),
        })
        .collect();

    let unknown = observations
        .iter()
        .filter(|o| {
            o.season_label == UNKNOWN_LABEL
                || o.weather_label == UNKNOWN_LABEL
                || o.month_label == UNKNOWN_LABEL
        })
        .count();
    if unknown > 0 {
        log::warn!("{unknown} rows carry category codes outside the known range; labeled \"{UNKNOWN_LABEL}\"");
    }

    observations
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(season: u8, weather: u8, month: u8) -> Record {
        Record {
            date: NaiveDate::from_ymd_opt(2011, 1, 1).unwrap(),
            hour: 0,
            season,
            weather,
            month,
            daily_count: 985,
            hourly_count: 16,
        }
    }

    #[test]
    fn maps_known_codes() {
        assert_eq!(season_label(1), "Spring");
        assert_eq!(season_label(4), "Winter");
        assert!(weather_label(1).starts_with("Clear"));
        assert!(weather_label(4).starts_with("Heavy Rain"));
        assert_eq!(month_label(1), "January");
        assert_eq!(month_label(12), "December");
    }

    #[test]
    fn out_of_domain_codes_are_unknown() {
        assert_eq!(season_label(0), UNKNOWN_LABEL);
        assert_eq!(season_label(5), UNKNOWN_LABEL);
        assert_eq!(weather_label(9), UNKNOWN_LABEL);
        assert_eq!(month_label(13), UNKNOWN_LABEL);
    }

    #[test]
    fn enrich_keeps_codes_and_adds_labels() {
        let records = vec![record(3, 2, 7), record(7, 1, 0)];
        let labeled = enrich(&records);

        assert_eq!(labeled.len(), 2);
        assert_eq!(labeled[0].record, records[0]);
        assert_eq!(labeled[0].season_label, "Fall");
        assert!(labeled[0].weather_label.starts_with("Mist"));
        assert_eq!(labeled[0].month_label, "July");

        assert_eq!(labeled[1].record.season, 7);
        assert_eq!(labeled[1].season_label, UNKNOWN_LABEL);
        assert_eq!(labeled[1].month_label, UNKNOWN_LABEL);
    }
}
