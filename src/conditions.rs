//! # Fishing and Drone Conditions
//!
//! Decides whether a time slice is worth fishing from the beach with a drone or long line,
//! and whether the drone can be flown at all.
//!
//! Drone checks run first and form a single priority chain:
//! 1. gusts over 40 km/h: no-go, flash red
//! 2. sustained wind over 35 km/h: no-go, flash red only above 38 km/h
//! 3. sustained wind 30–35 km/h: warn (orange)
//!
//! Only when the drone checks leave the day Good do the general checks run: sustained wind
//! of 20 km/h or more, or an onshore wind of 10 km/h or more, makes fishing Poor.
//!
//! Inputs are assumed non-negative; the generator clamps before anything reaches here.

use crate::WindDirection;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Gusts above this ground the drone (km/h).
pub const GUST_NO_GO: u32 = 40;
/// Sustained wind above this flashes red (km/h).
pub const STRONG_FLASH: u32 = 38;
/// Sustained wind from this up to [`MAX_SUSTAINED`] raises a drone warning (km/h).
pub const WARNING_FLASH: u32 = 30;
/// Sustained wind above this grounds the drone (km/h).
pub const MAX_SUSTAINED: u32 = 35;
/// Onshore wind from this speed spoils fishing (km/h).
pub const ONSHORE_BAD: u32 = 10;
/// Any wind from this speed spoils fishing (km/h).
pub const GENERAL_BAD_SUSTAINED: u32 = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FishingCondition {
    Good,
    Poor,
}

impl fmt::Display for FishingCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FishingCondition::Good => f.pad("Good"),
            FishingCondition::Poor => f.pad("Poor"),
        }
    }
}

/// How loudly presentation should signal drone trouble.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DroneAlert {
    None,
    Warn,
    Flash,
}

/// Result of [`evaluate`]. Always computed fresh, never stored on a forecast record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionVerdict {
    pub condition: FishingCondition,
    pub drone_not_an_option: bool,
    pub should_flash: bool,
    pub should_warn_drone: bool,
    /// Empty when no drone rule fired
    pub drone_warning_reason: String,
}

impl ConditionVerdict {
    pub fn is_good(&self) -> bool {
        self.condition == FishingCondition::Good
    }

    pub fn alert(&self) -> DroneAlert {
        if self.should_flash {
            DroneAlert::Flash
        } else if self.should_warn_drone {
            DroneAlert::Warn
        } else {
            DroneAlert::None
        }
    }
}

/// Evaluate fishing and drone suitability for one set of wind readings (km/h).
///
/// Readings are whole km/h, the same unit [`crate::DailyForecast`] and
/// [`crate::HourlyRecord`] store, so fractional speeds such as 35.5 cannot be expressed.
/// On integers the strict bounds read as: sustained no-go from 36, flash from 39, gust
/// no-go from 41.
pub fn evaluate(wind_speed: u32, wind_direction: WindDirection, wind_gust: u32) -> ConditionVerdict {
    let mut verdict = ConditionVerdict {
        condition: FishingCondition::Good,
        drone_not_an_option: false,
        should_flash: false,
        should_warn_drone: false,
        drone_warning_reason: String::new(),
    };

    if wind_gust > GUST_NO_GO {
        verdict.drone_not_an_option = true;
        verdict.should_flash = true;
        verdict.condition = FishingCondition::Poor;
        verdict.drone_warning_reason = format!("Gusts > {GUST_NO_GO}km/h");
    } else if wind_speed > MAX_SUSTAINED {
        verdict.drone_not_an_option = true;
        verdict.should_flash = wind_speed > STRONG_FLASH;
        verdict.condition = FishingCondition::Poor;
        verdict.drone_warning_reason = format!("Wind > {MAX_SUSTAINED}km/h");
    } else if wind_speed >= WARNING_FLASH {
        verdict.should_warn_drone = true;
        verdict.drone_warning_reason = format!("Wind {WARNING_FLASH}-{MAX_SUSTAINED}km/h");
    }

    if verdict.condition == FishingCondition::Good {
        let too_windy = wind_speed >= GENERAL_BAD_SUSTAINED;
        let onshore_chop = wind_direction.is_onshore() && wind_speed >= ONSHORE_BAD;
        if too_windy || onshore_chop {
            verdict.condition = FishingCondition::Poor;
        }
    }

    verdict
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WindDirection::*;

    #[test]
    fn test_calm_offshore_day_is_good() {
        let v = evaluate(15, N, 20);
        assert_eq!(v.condition, FishingCondition::Good);
        assert!(!v.drone_not_an_option);
        assert!(!v.should_flash);
        assert!(!v.should_warn_drone);
        assert!(v.drone_warning_reason.is_empty());
        assert_eq!(v.alert(), DroneAlert::None);
    }

    #[test]
    fn test_sustained_no_go_without_flash() {
        let v = evaluate(36, N, 30);
        assert!(v.drone_not_an_option);
        assert!(!v.should_flash);
        assert_eq!(v.condition, FishingCondition::Poor);
        assert_eq!(v.drone_warning_reason, "Wind > 35km/h");
    }

    #[test]
    fn test_onshore_moderate_wind_is_poor() {
        let v = evaluate(25, E, 25);
        assert_eq!(v.condition, FishingCondition::Poor);
        assert!(!v.drone_not_an_option);
    }

    #[test]
    fn test_gust_and_speed_both_over() {
        let v = evaluate(41, W, 50);
        assert!(v.drone_not_an_option);
        assert!(v.should_flash);
        assert_eq!(v.condition, FishingCondition::Poor);
        assert_eq!(v.drone_warning_reason, "Gusts > 40km/h");
        assert_eq!(v.alert(), DroneAlert::Flash);
    }

    #[test]
    fn test_gust_exactly_at_limit_is_not_no_go() {
        let v = evaluate(10, W, 40);
        assert!(!v.drone_not_an_option);
        assert!(!v.should_flash);
        assert!(v.is_good());
    }

    #[test]
    fn test_warning_band_edges() {
        for speed in [30, 35] {
            let v = evaluate(speed, W, speed);
            assert!(v.should_warn_drone, "speed {speed}");
            assert!(!v.should_flash);
            assert!(!v.drone_not_an_option);
            assert_eq!(v.drone_warning_reason, "Wind 30-35km/h");
            // still too windy to fish
            assert_eq!(v.condition, FishingCondition::Poor);
            assert_eq!(v.alert(), DroneAlert::Warn);
        }
        assert!(!evaluate(29, W, 29).should_warn_drone);
    }

    #[test]
    fn test_strong_flash_edge() {
        assert!(!evaluate(38, W, 38).should_flash);
        assert!(evaluate(39, W, 39).should_flash);
    }

    #[test]
    fn test_general_threshold_edges() {
        assert!(evaluate(19, W, 19).is_good());
        assert!(!evaluate(20, W, 20).is_good());
    }

    #[test]
    fn test_onshore_threshold_edges() {
        for dir in [E, NE, SE] {
            assert!(evaluate(9, dir, 12).is_good(), "{dir} at 9");
            assert!(!evaluate(10, dir, 12).is_good(), "{dir} at 10");
        }
        for dir in [N, S, SW, W, NW] {
            assert!(evaluate(10, dir, 12).is_good(), "{dir} at 10");
        }
    }

    #[test]
    fn test_verdict_serializes_camel_case() {
        let json = serde_json::to_value(evaluate(36, N, 30)).unwrap();
        assert_eq!(json["condition"], "Poor");
        assert_eq!(json["droneNotAnOption"], true);
        assert_eq!(json["shouldFlash"], false);
        assert_eq!(json["shouldWarnDrone"], false);
        assert_eq!(json["droneWarningReason"], "Wind > 35km/h");
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;
        use proptest::sample::select;

        fn direction() -> impl Strategy<Value = WindDirection> {
            select(WindDirection::ALL.to_vec())
        }

        proptest! {
            #[test]
            fn gust_over_limit_always_flashes(speed in 0u32..200, gust in 41u32..300, dir in direction()) {
                let v = evaluate(speed, dir, gust);
                prop_assert!(v.should_flash);
                prop_assert!(v.drone_not_an_option);
                prop_assert_eq!(v.condition, FishingCondition::Poor);
            }

            #[test]
            fn sustained_no_go_band(speed in 36u32..=38, gust in 0u32..=40, dir in direction()) {
                let v = evaluate(speed, dir, gust);
                prop_assert!(v.drone_not_an_option);
                prop_assert!(!v.should_flash);
            }

            #[test]
            fn strong_wind_flashes(speed in 39u32..200, gust in 0u32..=40, dir in direction()) {
                prop_assert!(evaluate(speed, dir, gust).should_flash);
            }

            #[test]
            fn warning_band(speed in 30u32..=35, gust in 0u32..=40, dir in direction()) {
                let v = evaluate(speed, dir, gust);
                prop_assert!(v.should_warn_drone);
                prop_assert!(!v.should_flash);
                prop_assert!(!v.drone_not_an_option);
            }

            #[test]
            fn flash_and_warn_never_together(speed in 0u32..200, gust in 0u32..300, dir in direction()) {
                let v = evaluate(speed, dir, gust);
                prop_assert!(!(v.should_flash && v.should_warn_drone));
                if v.drone_not_an_option {
                    prop_assert_eq!(v.condition, FishingCondition::Poor);
                }
            }

            #[test]
            fn more_wind_never_improves(speed in 0u32..100, extra in 0u32..100, gust in 0u32..300, dir in direction()) {
                let before = evaluate(speed, dir, gust);
                let after = evaluate(speed + extra, dir, gust);
                if before.condition == FishingCondition::Poor {
                    prop_assert_eq!(after.condition, FishingCondition::Poor);
                }
            }

            #[test]
            fn evaluation_is_referentially_transparent(speed in 0u32..100, gust in 0u32..100, dir in direction()) {
                prop_assert_eq!(evaluate(speed, dir, gust), evaluate(speed, dir, gust));
            }
        }
    }
}
