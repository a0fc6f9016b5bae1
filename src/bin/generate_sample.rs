use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

// Writes a synthetic `day.csv` / `hour.csv` pair covering 2011-2012 with the
// same columns as the public bike sharing dataset. Point the dashboard at it
// with `BIKE_DASH_DATA_DIR=sample_data`.

const OUTPUT_DIR: &str = "sample_data";

#[derive(Serialize)]
struct DayRow {
    instant: u32,
    dteday: NaiveDate,
    season: u8,
    yr: u8,
    mnth: u32,
    holiday: u8,
    weekday: u32,
    workingday: u8,
    weathersit: u8,
    temp: f64,
    atemp: f64,
    hum: f64,
    windspeed: f64,
    casual: u32,
    registered: u32,
    cnt: u32,
}

#[derive(Serialize)]
struct HourRow {
    instant: u32,
    dteday: NaiveDate,
    season: u8,
    yr: u8,
    mnth: u32,
    hr: u32,
    holiday: u8,
    weekday: u32,
    workingday: u8,
    weathersit: u8,
    temp: f64,
    atemp: f64,
    hum: f64,
    windspeed: f64,
    casual: u32,
    registered: u32,
    cnt: u32,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Season code as used by the dataset: quarters starting in January.
fn season_for(date: NaiveDate) -> u8 {
    ((date.month0() / 3) + 1) as u8
}

fn weather_for(rng: &mut SimpleRng) -> u8 {
    match rng.next_f64() {
        p if p < 0.65 => 1,
        p if p < 0.91 => 2,
        p if p < 0.99 => 3,
        _ => 4,
    }
}

/// Relative demand per hour: commute peaks on working days, a midday hump
/// on weekends.
fn hour_shape(hour: u32, working: bool) -> f64 {
    let h = hour as f64;
    let bump = |center: f64, width: f64| (-(h - center).powi(2) / (2.0 * width * width)).exp();
    if working {
        0.05 + 1.0 * bump(8.0, 1.0) + 1.2 * bump(17.5, 1.5) + 0.3 * bump(12.5, 2.0)
    } else {
        0.05 + 0.9 * bump(14.0, 3.5)
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let dir = Path::new(OUTPUT_DIR);
    std::fs::create_dir_all(dir).with_context(|| format!("creating {OUTPUT_DIR}"))?;

    let mut day_writer = csv::Writer::from_path(dir.join("day.csv")).context("creating day.csv")?;
    let mut hour_writer = csv::Writer::from_path(dir.join("hour.csv")).context("creating hour.csv")?;

    let first = NaiveDate::from_ymd_opt(2011, 1, 1).context("start date")?;
    let last = NaiveDate::from_ymd_opt(2012, 12, 31).context("end date")?;

    let mut hour_instant = 0u32;
    let mut day_instant = 0u32;
    for date in first.iter_days().take_while(|d| *d <= last) {
        day_instant += 1;
        let yr = (date.year() - 2011) as u8;
        let season = season_for(date);
        let weekday = date.weekday();
        let workingday = u8::from(!matches!(weekday, Weekday::Sat | Weekday::Sun));

        // Warm in summer, cold in winter.
        let phase = (date.ordinal0() as f64 / 365.0 - 0.55) * std::f64::consts::TAU;
        let temp = (0.5 + 0.3 * phase.cos()).clamp(0.02, 0.98);
        let demand = 180.0 * (0.4 + temp) * if yr == 1 { 1.6 } else { 1.0 };

        let mut day_weather = 1u8;
        let (mut day_casual, mut day_registered) = (0u32, 0u32);
        for hr in 0..24u32 {
            hour_instant += 1;
            let weathersit = weather_for(&mut rng);
            day_weather = day_weather.max(weathersit.min(3));

            let weather_factor = match weathersit {
                1 => 1.0,
                2 => 0.85,
                3 => 0.45,
                _ => 0.15,
            };
            let mean = demand * hour_shape(hr, workingday == 1) * weather_factor;
            let cnt = rng.gauss(mean, mean.sqrt() + 1.0).round().max(1.0) as u32;
            let casual = (cnt as f64 * if workingday == 1 { 0.12 } else { 0.35 }).round() as u32;
            day_casual += casual;
            day_registered += cnt - casual;

            hour_writer.serialize(HourRow {
                instant: hour_instant,
                dteday: date,
                season,
                yr,
                mnth: date.month(),
                hr,
                holiday: 0,
                weekday: weekday.num_days_from_sunday(),
                workingday,
                weathersit,
                temp,
                atemp: temp * 0.95,
                hum: rng.next_f64() * 0.6 + 0.3,
                windspeed: rng.next_f64() * 0.4,
                casual,
                registered: cnt - casual,
                cnt,
            })?;
        }

        day_writer.serialize(DayRow {
            instant: day_instant,
            dteday: date,
            season,
            yr,
            mnth: date.month(),
            holiday: 0,
            weekday: weekday.num_days_from_sunday(),
            workingday,
            weathersit: day_weather,
            temp,
            atemp: temp * 0.95,
            hum: rng.next_f64() * 0.6 + 0.3,
            windspeed: rng.next_f64() * 0.4,
            casual: day_casual,
            registered: day_registered,
            cnt: day_casual + day_registered,
        })?;
    }

    day_writer.flush()?;
    hour_writer.flush()?;

    println!("Wrote {day_instant} days and {hour_instant} hours to {OUTPUT_DIR}/");
    Ok(())
}
