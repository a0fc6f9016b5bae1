use std::f64::consts::{FRAC_PI_2, TAU};

use chrono::{Datelike, NaiveDate};
use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints, Points, Polygon};

use bike_dash::data::aggregate::Summary;

use crate::state::AppState;

const CHART_HEIGHT: f32 = 260.0;
const LINE_COLOR: Color32 = Color32::from_rgb(31, 119, 180);

// ---------------------------------------------------------------------------
// Dashboard (central panel)
// ---------------------------------------------------------------------------

/// Render the headline metric and all charts.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    let summary = &state.summary;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Bike Sharing Dashboard");
            ui.add_space(4.0);
            ui.label("Total rentals");
            ui.label(RichText::new(summary.total_usage.to_string()).size(28.0).strong());
            ui.separator();

            ui.columns(2, |cols| {
                cols[0].strong("Rentals per day");
                daily_chart(&mut cols[0], summary);
                cols[1].strong("Average rentals per hour");
                hourly_chart(&mut cols[1], summary);
            });
            ui.separator();

            ui.strong("Average daily rentals by month (all data)");
            monthly_chart(ui, summary);
            ui.separator();

            ui.strong("Rentals by season (all data)");
            seasonal_chart(ui, state);
            ui.separator();

            ui.strong("Share of rentals by weather (all data)");
            weather_chart(ui, state);
        });
}

fn empty_notice(ui: &mut Ui, text: &str) {
    ui.allocate_ui(egui::vec2(ui.available_width(), CHART_HEIGHT), |ui: &mut Ui| {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label(RichText::new(text).italics());
        });
    });
}

// ---------------------------------------------------------------------------
// Working-set charts
// ---------------------------------------------------------------------------

fn daily_chart(ui: &mut Ui, summary: &Summary) {
    if summary.daily_trend.is_empty() {
        empty_notice(ui, "No rentals in the selected range.");
        return;
    }

    let points: PlotPoints = summary
        .daily_trend
        .iter()
        .map(|d| [f64::from(d.date.num_days_from_ce()), d.total as f64])
        .collect();

    Plot::new("daily_trend")
        .height(CHART_HEIGHT)
        .x_axis_label("Date")
        .y_axis_label("Rentals")
        .x_axis_formatter(|mark: GridMark, _range| {
            NaiveDate::from_num_days_from_ce_opt(mark.value.round() as i32)
                .map(|d| d.to_string())
                .unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(points).color(LINE_COLOR).width(1.5).name("rentals"));
        });
}

fn hourly_chart(ui: &mut Ui, summary: &Summary) {
    if summary.hourly_profile.is_empty() {
        empty_notice(ui, "No rentals in the selected range.");
        return;
    }

    let bars: Vec<Bar> = summary
        .hourly_profile
        .iter()
        .map(|h| {
            Bar::new(f64::from(h.hour), h.mean)
                .width(0.8)
                .name(format!("{:02}:00", h.hour))
        })
        .collect();

    Plot::new("hourly_profile")
        .height(CHART_HEIGHT)
        .x_axis_label("Hour")
        .y_axis_label("Average rentals")
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(LINE_COLOR));
        });
}

// ---------------------------------------------------------------------------
// Full-set charts
// ---------------------------------------------------------------------------

/// Formatter showing `labels[i]` at integer grid marks only.
fn label_formatter(labels: Vec<String>) -> impl Fn(GridMark, &std::ops::RangeInclusive<f64>) -> String {
    move |mark, _range| {
        let rounded = mark.value.round();
        if (mark.value - rounded).abs() > 1e-6 || rounded < 0.0 {
            return String::new();
        }
        labels.get(rounded as usize).cloned().unwrap_or_default()
    }
}

fn monthly_chart(ui: &mut Ui, summary: &Summary) {
    if summary.monthly_trend.is_empty() {
        empty_notice(ui, "No data.");
        return;
    }

    let labels: Vec<String> = summary.monthly_trend.iter().map(|m| m.month.to_string()).collect();
    let coords: Vec<[f64; 2]> = summary
        .monthly_trend
        .iter()
        .enumerate()
        .map(|(i, m)| [i as f64, m.mean_daily_count])
        .collect();

    Plot::new("monthly_trend")
        .height(CHART_HEIGHT)
        .x_axis_label("Month")
        .y_axis_label("Average daily rentals")
        .x_axis_formatter(label_formatter(labels))
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(PlotPoints::from(coords.clone())).color(LINE_COLOR).width(1.5));
            plot_ui.points(Points::new(PlotPoints::from(coords)).radius(4.0).color(LINE_COLOR));
        });
}

fn seasonal_chart(ui: &mut Ui, state: &AppState) {
    let seasonal = &state.summary.seasonal;
    if seasonal.is_empty() {
        empty_notice(ui, "No data.");
        return;
    }

    let labels: Vec<String> = seasonal.iter().map(|s| s.season.to_string()).collect();
    let bars: Vec<Bar> = seasonal
        .iter()
        .enumerate()
        .map(|(i, s)| {
            Bar::new(i as f64, s.mean_daily_count)
                .width(0.7)
                .fill(state.season_colors.color_for(s.season))
                .name(format!("{} ({} rows)", s.season, s.rows))
        })
        .collect();

    Plot::new("seasonal")
        .height(CHART_HEIGHT)
        .x_axis_label("Average daily rentals")
        .y_axis_label("Season")
        .y_axis_formatter(label_formatter(labels))
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal());
        });
}

/// Pie chart drawn as one polygon wedge per weather condition, starting at
/// twelve o'clock and running counter-clockwise.
fn weather_chart(ui: &mut Ui, state: &AppState) {
    let weather = &state.summary.weather;
    if weather.is_empty() {
        empty_notice(ui, "No data.");
        return;
    }

    Plot::new("weather_share")
        .height(CHART_HEIGHT + 60.0)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            let mut angle = FRAC_PI_2;
            for share in weather {
                let sweep = share.proportion * TAU;
                let wedge = wedge_points(angle, angle + sweep);
                angle += sweep;

                plot_ui.polygon(
                    Polygon::new(PlotPoints::from(wedge))
                        .fill_color(state.weather_colors.color_for(share.weather))
                        .name(format!("{:.1}%  {}", share.proportion * 100.0, share.weather)),
                );
            }
        });
}

fn wedge_points(from: f64, to: f64) -> Vec<[f64; 2]> {
    let steps = (((to - from) / TAU) * 120.0).ceil().max(1.0) as usize;
    let mut points = Vec::with_capacity(steps + 2);
    points.push([0.0, 0.0]);
    for i in 0..=steps {
        let a = from + (to - from) * i as f64 / steps as f64;
        points.push([a.cos(), a.sin()]);
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wedge_spans_requested_arc() {
        let quarter = wedge_points(0.0, FRAC_PI_2);
        assert_eq!(quarter[0], [0.0, 0.0]);
        assert!((quarter[1][0] - 1.0).abs() < 1e-12);
        let last = quarter[quarter.len() - 1];
        assert!(last[0].abs() < 1e-12 && (last[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn label_formatter_only_labels_integer_marks() {
        let fmt = label_formatter(vec!["Spring".into(), "Summer".into()]);
        let range = 0.0..=1.0;
        let mark = |value| GridMark { value, step_size: 0.5 };
        assert_eq!(fmt(mark(1.0), &range), "Summer");
        assert_eq!(fmt(mark(0.5), &range), "");
        assert_eq!(fmt(mark(4.0), &range), "");
    }
}
