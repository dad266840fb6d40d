//! # Tide Simulator
//!
//! A stylized diurnal tide: one sine cycle per day, shifted by a sixth of a cycle for each
//! forecast day so consecutive days are not in phase.
//!
//! ## Model Characteristics
//!
//! ### Daily Curve
//! ```text
//! height = base + (range / 2) * sin(2π * hour / 24 + day * π / 3)
//! ```
//! - **Mean level**: `base`, drawn once per day in [1.0, 1.5) m
//! - **Range**: `range`, drawn once per day in [2.0, 3.0) m (peak to trough)
//! - **Phase**: advanced by π/3 per day index
//!
//! ### Status Labels
//! Absolute bands win over trend:
//! - above 2.5 m → High Tide
//! - below 1.0 m → Low Tide
//! - otherwise rising / falling against the previous sample, or Stable when there is none
//!
//! ### Accuracy Trade-offs
//! - ✅ **Smooth, bounded curve** suitable for a chart
//! - ❌ **Not semidiurnal**: one high and one low per day
//! - ❌ **No astronomy**: no lunar phase, no harmonic constituents
//!
//! The coarse high/low labels on each day come from a separate rule in the generator and
//! are not derived from this curve.

use crate::random::RandomSource;
use crate::TideStatus;
use std::f64::consts::PI;

/// Heights strictly above this are labelled High Tide (m).
pub const HIGH_TIDE_ABOVE: f64 = 2.5;
/// Heights strictly below this are labelled Low Tide (m).
pub const LOW_TIDE_BELOW: f64 = 1.0;

/// Tide height at `hour_of_day` on day `day_index` of the forecast.
pub fn tide_height(hour_of_day: u32, day_index: u32, base_height: f64, amplitude_range: f64) -> f64 {
    let daily_phase = 2.0 * PI * f64::from(hour_of_day) / 24.0;
    let day_shift = f64::from(day_index) * PI / 3.0;
    base_height + (amplitude_range / 2.0) * (daily_phase + day_shift).sin()
}

/// Label a sample given the previous sample of the same day, if any.
pub fn classify(height: f64, previous_height: Option<f64>) -> TideStatus {
    if height > HIGH_TIDE_ABOVE {
        return TideStatus::High;
    }
    if height < LOW_TIDE_BELOW {
        return TideStatus::Low;
    }
    match previous_height {
        Some(prev) if height > prev => TideStatus::Rising,
        Some(prev) if height < prev => TideStatus::Falling,
        _ => TideStatus::Stable,
    }
}

/// Round to centimetres for storage and display.
pub fn round_to_cents(height: f64) -> f64 {
    (height * 100.0).round() / 100.0
}

/// Per-day curve parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TideCurve {
    /// Mean level (m)
    pub base_height: f64,
    /// Peak-to-trough range (m)
    pub amplitude_range: f64,
}

impl TideCurve {
    /// Draw a day's parameters: base first, then range.
    pub fn draw<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        let base_height = rng.uniform(1.0, 1.5);
        let amplitude_range = rng.uniform(2.0, 3.0);
        Self {
            base_height,
            amplitude_range,
        }
    }

    pub fn height_at(&self, hour_of_day: u32, day_index: u32) -> f64 {
        tide_height(
            hour_of_day,
            day_index,
            self.base_height,
            self.amplitude_range,
        )
    }
}

impl TideStatus {
    /// Single-character trend marker for terminal output.
    pub fn trend_arrow(self) -> char {
        match self {
            TideStatus::Rising => '↑',
            TideStatus::Falling => '↓',
            TideStatus::High => '▲',
            TideStatus::Low => '▼',
            TideStatus::Stable => '·',
        }
    }
}
