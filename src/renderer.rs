//! # Forecast Rendering
//!
//! Terminal presentation of a generated [`Forecast`]: a current-conditions header, one tile
//! per day, a small ASCII tide chart for each day, and an hourly table for a single day.
//!
//! Renderers build `String`s so they can be tested; [`draw_ascii`] prints the full report.
//! Every tile re-evaluates its day with [`conditions::evaluate`] rather than reading a
//! stored verdict.

use crate::conditions::{self, DroneAlert};
use crate::{DailyForecast, Description, Forecast};
use std::fmt::Write;

/// Background wind effect for the current-conditions header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindBand {
    Low,
    Moderate,
    High,
    /// Above 30 km/h the drone alerts take over
    None,
}

pub fn wind_band(wind_speed: u32) -> WindBand {
    match wind_speed {
        0..=10 => WindBand::Low,
        11..=25 => WindBand::Moderate,
        26..=30 => WindBand::High,
        _ => WindBand::None,
    }
}

fn wind_band_marker(band: WindBand) -> &'static str {
    match band {
        WindBand::Low => "~",
        WindBand::Moderate => "~~",
        WindBand::High => "~~~",
        WindBand::None => "",
    }
}

/// Single-character weather glyph.
pub fn weather_glyph(description: Description) -> char {
    match description {
        Description::Sunny => '☀',
        Description::LightRain | Description::Showers => '☂',
        Description::PartlyCloudy | Description::Cloudy | Description::Overcast => '☁',
        Description::StrongWinds => '≋',
    }
}

fn alert_marker(alert: DroneAlert) -> &'static str {
    match alert {
        DroneAlert::Flash => "!!",
        DroneAlert::Warn => "! ",
        DroneAlert::None => "  ",
    }
}

fn wind_line(day: &DailyForecast) -> String {
    format!(
        "{} {} km/h (Gusts: {} km/h)",
        day.wind_direction, day.wind_speed, day.wind_gust
    )
}

fn tide_line(day: &DailyForecast) -> String {
    format!(
        "High: {}  Low: {}",
        day.tide_times.high.join(" & "),
        day.tide_times.low.join(" & ")
    )
}

/// Header block for today.
pub fn render_current(day: &DailyForecast, location: &str) -> String {
    let verdict = conditions::evaluate(day.wind_speed, day.wind_direction, day.wind_gust);
    let mut out = String::new();

    let _ = writeln!(out, "Beach Fishing: {location}");
    let _ = writeln!(out, "Current Conditions ({})", day.date);
    let _ = writeln!(
        out,
        "  {} {}°C  {}",
        weather_glyph(day.description),
        day.temp,
        day.description
    );

    let band = match verdict.alert() {
        DroneAlert::None => wind_band(day.wind_speed),
        _ => WindBand::None,
    };
    let marker = wind_band_marker(band);
    if !marker.is_empty() {
        let _ = writeln!(out, "  {marker}");
    }

    // wind and tide details are only shown on a good day
    if verdict.is_good() {
        let _ = writeln!(out, "  Wind: {}", wind_line(day));
        if verdict.drone_not_an_option {
            let _ = writeln!(
                out,
                "  (Drone not an option: {})",
                verdict.drone_warning_reason
            );
        }
        let _ = writeln!(out, "  Ideal Fishing: {}", day.ideal_fishing_time);
        let _ = writeln!(out, "  {}", tide_line(day));
    }
    let _ = writeln!(
        out,
        "  {}Fishing: {}",
        alert_marker(verdict.alert()),
        verdict.condition
    );
    out
}

/// One line per day.
pub fn render_tiles(forecast: &Forecast) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}-Day Weather Forecast", forecast.len());
    for day in forecast.days() {
        let verdict = conditions::evaluate(day.wind_speed, day.wind_direction, day.wind_gust);
        let _ = write!(
            out,
            "{}{} {} {:<13} {:>3}°C  Fishing: {:<4}",
            alert_marker(verdict.alert()),
            day.date.format("%a %b %e"),
            weather_glyph(day.description),
            day.description.as_str(),
            day.temp,
            verdict.condition
        );
        if verdict.is_good() {
            let _ = write!(out, "  {}  Ideal: {}", wind_line(day), day.ideal_fishing_time);
            if verdict.drone_not_an_option {
                let _ = write!(out, "  (Drone not an option: {})", verdict.drone_warning_reason);
            }
            let _ = write!(out, "  {}", tide_line(day));
        } else if !verdict.drone_warning_reason.is_empty() {
            let _ = write!(out, "  Drone: {}", verdict.drone_warning_reason);
        }
        out.push('\n');
    }
    out
}

const CHART_ROWS: usize = 5;
const Y_AXIS_WIDTH: usize = 6;
/// Columns per slice, wide enough for the hour label underneath
const COLUMN_STEP: usize = 3;

/// Tide chart for one day's slices, scaled to that day's own range, followed by the hour
/// axis and the day's high/low labels.
pub fn render_day_tide(day: &DailyForecast) -> String {
    let heights: Vec<f64> = day.hourly_forecast.iter().map(|h| h.tide_height).collect();
    let mut out = String::new();
    if heights.is_empty() {
        let _ = writeln!(out, "{}", tide_line(day));
        return out;
    }

    let (min, max) = heights
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &h| {
            (min.min(h), max.max(h))
        });
    let span = (max - min).max(f64::EPSILON);

    let height_to_row = |h: f64| {
        let normalized = ((h - min) / span).clamp(0.0, 1.0);
        ((1.0 - normalized) * (CHART_ROWS as f64 - 1.0)).round() as usize
    };

    let width = Y_AXIS_WIDTH + heights.len() * COLUMN_STEP;
    let mut grid = vec![vec![' '; width]; CHART_ROWS];

    // label the top, middle and bottom rows
    for value in [max, (max + min) / 2.0, min] {
        let row = height_to_row(value);
        let label = format!("{value:>4.1}m");
        for (i, ch) in label.chars().enumerate().take(Y_AXIS_WIDTH - 1) {
            grid[row][i] = ch;
        }
    }
    for row in grid.iter_mut() {
        row[Y_AXIS_WIDTH - 1] = '│';
    }

    for (slice, &h) in heights.iter().enumerate() {
        grid[height_to_row(h)][Y_AXIS_WIDTH + slice * COLUMN_STEP] = '•';
    }

    for row in grid {
        let _ = writeln!(out, "{}", row.into_iter().collect::<String>().trim_end());
    }

    // hour markers below the chart
    let hours: String = day
        .hourly_forecast
        .iter()
        .map(|h| format!("{:<width$}", &h.time[..2], width = COLUMN_STEP))
        .collect();
    let _ = writeln!(out, "{}{}", " ".repeat(Y_AXIS_WIDTH), hours.trim_end());
    let _ = writeln!(out, "{}", tide_line(day));
    out
}

/// One tide chart per forecast day.
pub fn render_tide_overview(forecast: &Forecast) -> String {
    if forecast.is_empty() {
        return String::new();
    }
    let mut out = String::new();
    let _ = writeln!(out, "{}-Day Tide Overview", forecast.len());
    for day in forecast.days() {
        let _ = writeln!(out, "\n{}", day.date.format("%a %b %e"));
        out.push_str(&render_day_tide(day));
    }
    out
}

/// Hourly table for one day.
pub fn render_day_detail(day: &DailyForecast) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "24-Hour Forecast for {}", day.date.format("%A, %B %e"));
    out.push_str(&render_day_tide(day));
    out.push('\n');
    for slice in &day.hourly_forecast {
        let verdict =
            conditions::evaluate(slice.wind_speed, slice.wind_direction, slice.wind_gust);
        let _ = writeln!(
            out,
            "{}{}  {} {:>3}°C  {} {:>2} km/h (Gusts: {:>2} km/h)  {} Tide: {} ({:.2}m)",
            alert_marker(verdict.alert()),
            slice.time,
            weather_glyph(slice.description),
            slice.temperature,
            slice.wind_direction,
            slice.wind_speed,
            slice.wind_gust,
            slice.tide_status.trend_arrow(),
            slice.tide_status,
            slice.tide_height
        );
    }
    out
}

/// Full report: header, tiles and the tide overview.
pub fn render_report(forecast: &Forecast, location: &str) -> String {
    let mut out = String::new();
    if let Some(today) = forecast.today() {
        out.push_str(&render_current(today, location));
        out.push('\n');
    }
    out.push_str(&render_tiles(forecast));
    out.push('\n');
    out.push_str(&render_tide_overview(forecast));
    out
}

/// Render the report to the terminal.
pub fn draw_ascii(forecast: &Forecast, location: &str) {
    print!("{}", render_report(forecast, location));
}
