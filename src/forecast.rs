//! # Synthetic Forecast Generator
//!
//! Builds a week of mock weather and tide data starting from a given date. Nothing here talks
//! to a weather provider: every value comes from the injected [`RandomSource`].
//!
//! ## Per-day draw order
//! 1. wind speed and gust (skipped on day 0, which is pinned to 15/20 km/h)
//! 2. temperature, humidity
//! 3. description, wind direction
//! 4. tide curve base height and range
//! 5. for each of the 8 slices: temperature, wind, gust offsets
//!
//! Keeping this order stable is what makes a seed reproduce the same week.

use crate::conditions;
use crate::random::RandomSource;
use crate::tide::{self, TideCurve};
use crate::{DailyForecast, Description, Forecast, HourlyRecord, TideWindow, WindDirection};
use chrono::{Days, NaiveDate};
use tracing::debug;

pub const DEFAULT_HORIZON_DAYS: u32 = 7;

/// Slice hours: 00:00 to 21:00 every 3 hours.
pub const SLICE_HOURS: [u32; 8] = [0, 3, 6, 9, 12, 15, 18, 21];

/// Day 0 wind, pinned so the first tile always shows the calm animation.
pub const TODAY_WIND_SPEED: u32 = 15;
pub const TODAY_WIND_GUST: u32 = 20;

pub const GOOD_WINDOW_LABEL: &str = "Morning window, 7–10 AM";
pub const NO_WINDOW_LABEL: &str = "No good window — alternative activity recommended";

/// Generator for a session's forecast.
#[derive(Debug)]
pub struct ForecastGenerator<R> {
    rng: R,
}

impl<R: RandomSource> ForecastGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generate `horizon_days` days starting at `today`.
    ///
    /// Each call produces a whole new [`Forecast`]; earlier results are untouched.
    pub fn generate(&mut self, horizon_days: u32, today: NaiveDate) -> Forecast {
        let days = (0..horizon_days)
            .map(|i| self.generate_day(i, today))
            .collect();
        Forecast::new(days)
    }

    pub fn into_inner(self) -> R {
        self.rng
    }

    fn generate_day(&mut self, day_index: u32, today: NaiveDate) -> DailyForecast {
        let rng = &mut self.rng;

        let date = today
            .checked_add_days(Days::new(u64::from(day_index)))
            .unwrap_or(NaiveDate::MAX);

        let (wind_speed, wind_gust) = if day_index == 0 {
            (TODAY_WIND_SPEED, TODAY_WIND_GUST)
        } else {
            let speed = 5 + rng.below(35);
            (speed, speed + rng.below(10))
        };

        let temp = 10 + rng.below(10) as i32;
        let humidity = 60 + rng.below(30) as i32;
        let description = *rng.pick(&Description::ALL);
        let wind_direction = *rng.pick(&WindDirection::ALL);

        let curve = TideCurve::draw(rng);
        let hourly_forecast = hourly_slices(
            rng,
            day_index,
            &curve,
            temp,
            wind_speed,
            description,
            wind_direction,
        );

        let verdict = conditions::evaluate(wind_speed, wind_direction, wind_gust);
        let ideal_fishing_time = if verdict.is_good() {
            GOOD_WINDOW_LABEL
        } else {
            NO_WINDOW_LABEL
        };

        debug!(
            %date,
            wind_speed,
            wind_gust,
            %wind_direction,
            %description,
            condition = %verdict.condition,
            "generated forecast day"
        );

        DailyForecast {
            date,
            wind_speed,
            wind_gust,
            wind_direction,
            description,
            temp,
            humidity,
            ideal_fishing_time: ideal_fishing_time.to_string(),
            tide_times: tide_window(day_index),
            hourly_forecast,
        }
    }
}

/// Sample the 8 slices of a day, carrying the previous unrounded tide height forward
/// for the trend label.
fn hourly_slices<R: RandomSource + ?Sized>(
    rng: &mut R,
    day_index: u32,
    curve: &TideCurve,
    temp: i32,
    wind_speed: u32,
    description: Description,
    wind_direction: WindDirection,
) -> Vec<HourlyRecord> {
    let day_wind = wind_speed as i32;

    SLICE_HOURS
        .iter()
        .scan(None, |previous: &mut Option<f64>, &hour| {
            let temperature = temp - 5 + rng.below(10) as i32;
            let slice_wind = (day_wind - 5 + rng.below(10) as i32).max(0);
            let slice_gust = (slice_wind + rng.below(5) as i32).max(0);

            let height = curve.height_at(hour, day_index);
            let tide_status = tide::classify(height, *previous);
            *previous = Some(height);

            Some(HourlyRecord {
                time: format!("{hour:02}:00"),
                temperature,
                description,
                wind_speed: slice_wind as u32,
                wind_gust: slice_gust as u32,
                wind_direction,
                tide_height: tide::round_to_cents(height),
                tide_status,
            })
        })
        .collect()
}

/// Coarse high/low labels for day `day_index`, shifted one hour per day.
pub fn tide_window(day_index: u32) -> TideWindow {
    TideWindow {
        high: [
            clock_label(9 + day_index, "AM"),
            clock_label(21 + day_index, "PM"),
        ],
        low: [
            clock_label(3 + day_index, "AM"),
            clock_label(15 + day_index, "PM"),
        ],
    }
}

fn clock_label(hour: u32, meridiem: &str) -> String {
    let h = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{h}:00 {meridiem}")
}
