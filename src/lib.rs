//! # Beach Forecast Core Library
//!
//! This library provides the data structures and the two pieces of real logic behind the
//! beach fishing forecast: a synthetic multi-day forecast generator with a simulated tide
//! curve, and the condition evaluator that decides whether the day is worth fishing and
//! whether the line-deployment drone can fly.
//!
//! ## Design Philosophy
//!
//! ### Reproducible Generation
//! - **Injectable randomness**: every random draw goes through [`random::RandomSource`],
//!   so a seed (or a fixed sequence in tests) reproduces the whole week
//! - **Whole-session values**: a [`Forecast`] is built once and never patched; a new
//!   session simply generates a new one
//!
//! ### Pure Evaluation
//! [`conditions::evaluate`] is a plain function of wind speed, direction and gust. The
//! generator calls it to pick the ideal fishing label and the renderer calls it again for
//! every tile, always with the same answer. Verdicts are never stored on a record.
//!
//! ### Data Flow
//! 1. **Generate**: draw daily weather → sample 8 three-hourly slices → simulate tide
//! 2. **Evaluate**: classify each day (and optionally each slice) for fishing/drone use
//! 3. **Present**: ASCII report or JSON on stdout, optional fishing tip from the tip service
//!
//! ## Core Types
//!
//! - [`HourlyRecord`]: one three-hourly slice with its tide sample
//! - [`DailyForecast`]: one day with its 8 slices and coarse tide window
//! - [`Forecast`]: the complete session, today first

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub mod conditions;
pub mod config;
pub mod forecast;
pub mod random;
pub mod renderer;
pub mod tide;
pub mod tip;

/// Eight-point compass direction the wind is blowing from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WindDirection {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl WindDirection {
    /// All directions in compass order, the table the generator draws from.
    pub const ALL: [WindDirection; 8] = [
        WindDirection::N,
        WindDirection::NE,
        WindDirection::E,
        WindDirection::SE,
        WindDirection::S,
        WindDirection::SW,
        WindDirection::W,
        WindDirection::NW,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            WindDirection::N => "N",
            WindDirection::NE => "NE",
            WindDirection::E => "E",
            WindDirection::SE => "SE",
            WindDirection::S => "S",
            WindDirection::SW => "SW",
            WindDirection::W => "W",
            WindDirection::NW => "NW",
        }
    }

    /// The beach faces roughly east, so E, NE and SE blow from the sea.
    pub fn is_onshore(self) -> bool {
        matches!(self, WindDirection::E | WindDirection::NE | WindDirection::SE)
    }
}

impl fmt::Display for WindDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when text does not name one of the eight compass points.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown wind direction: {0:?}")]
pub struct ParseDirectionError(pub String);

impl FromStr for WindDirection {
    type Err = ParseDirectionError;

    /// Case-insensitive: `"ne"`, `"Ne"` and `"NE"` all parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        WindDirection::ALL
            .into_iter()
            .find(|d| d.as_str() == upper)
            .ok_or_else(|| ParseDirectionError(s.to_string()))
    }
}

/// Daily weather summary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Description {
    Sunny,
    #[serde(rename = "Partly Cloudy")]
    PartlyCloudy,
    Cloudy,
    #[serde(rename = "Light Rain")]
    LightRain,
    Showers,
    #[serde(rename = "Strong Winds")]
    StrongWinds,
    Overcast,
}

impl Description {
    pub const ALL: [Description; 7] = [
        Description::Sunny,
        Description::PartlyCloudy,
        Description::Cloudy,
        Description::LightRain,
        Description::Showers,
        Description::StrongWinds,
        Description::Overcast,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Description::Sunny => "Sunny",
            Description::PartlyCloudy => "Partly Cloudy",
            Description::Cloudy => "Cloudy",
            Description::LightRain => "Light Rain",
            Description::Showers => "Showers",
            Description::StrongWinds => "Strong Winds",
            Description::Overcast => "Overcast",
        }
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label attached to each tide sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TideStatus {
    #[serde(rename = "Rising Tide")]
    Rising,
    #[serde(rename = "Falling Tide")]
    Falling,
    #[serde(rename = "High Tide")]
    High,
    #[serde(rename = "Low Tide")]
    Low,
    Stable,
}

impl TideStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TideStatus::Rising => "Rising Tide",
            TideStatus::Falling => "Falling Tide",
            TideStatus::High => "High Tide",
            TideStatus::Low => "Low Tide",
            TideStatus::Stable => "Stable",
        }
    }
}

impl fmt::Display for TideStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One three-hourly slice of a day.
///
/// Wind values are unsigned: the generator clamps negative raw draws to zero
/// before a record is built.
///
/// # Example
/// ```
/// use beach_forecast_lib::{Description, HourlyRecord, TideStatus, WindDirection};
///
/// let slice = HourlyRecord {
///     time: "06:00".to_string(),
///     temperature: 14,
///     description: Description::Sunny,
///     wind_speed: 12,
///     wind_gust: 15,
///     wind_direction: WindDirection::SW,
///     tide_height: 1.87,
///     tide_status: TideStatus::Rising,
/// };
/// assert!(slice.wind_gust >= slice.wind_speed);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyRecord {
    /// "HH:00", 00 to 21 in 3-hour steps
    pub time: String,
    /// Degrees Celsius
    pub temperature: i32,
    /// Inherited from the parent day
    pub description: Description,
    /// km/h
    pub wind_speed: u32,
    /// km/h
    pub wind_gust: u32,
    pub wind_direction: WindDirection,
    /// Meters, rounded to 2 decimals
    pub tide_height: f64,
    pub tide_status: TideStatus,
}

/// Coarse high/low tide labels for a day.
///
/// These are not derived from the hourly curve and can disagree with it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TideWindow {
    pub high: [String; 2],
    pub low: [String; 2],
}

/// One forecast day.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub wind_speed: u32,
    pub wind_gust: u32,
    pub wind_direction: WindDirection,
    pub description: Description,
    pub temp: i32,
    pub humidity: i32,
    pub ideal_fishing_time: String,
    pub tide_times: TideWindow,
    /// Exactly 8 slices, 00:00 through 21:00
    pub hourly_forecast: Vec<HourlyRecord>,
}

/// A complete session forecast, today first.
///
/// Built once by [`forecast::ForecastGenerator::generate`]; there is no way to
/// modify a day in place.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Forecast(Vec<DailyForecast>);

impl Forecast {
    pub(crate) fn new(days: Vec<DailyForecast>) -> Self {
        Forecast(days)
    }

    pub fn days(&self) -> &[DailyForecast] {
        &self.0
    }

    /// Current conditions: the first generated day.
    pub fn today(&self) -> Option<&DailyForecast> {
        self.0.first()
    }

    pub fn get(&self, index: usize) -> Option<&DailyForecast> {
        self.0.get(index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
