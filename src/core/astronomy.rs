//! Low-precision lunar, tidal and solar estimates for a calendar date.
//!
//! Everything here is a pure function of the date and the site. The tide
//! model is a fixed offset from the lunar age, not a harmonic prediction.

use crate::core::calendar::full_date;
use crate::domain::model::{ClockTime, MoonPhase, TideSnapshot, TideType, TimeWindow};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

pub const SYNODIC_MONTH: f64 = 29.530588853;

/// Lunar age on [`epoch`].
const EPOCH_AGE: f64 = 11.0;
const HALF_TIDE_CYCLE: f64 = 14.76;
const TIDE_BASE_HOURS: f64 = 5.0;
const TIDE_DRIFT_HOURS_PER_DAY: f64 = 0.08;
/// Standard refraction-corrected solar altitude at rise and set, degrees.
const SUN_ALTITUDE: f64 = -0.833;
const MAZUME_HALF_WIDTH_MINUTES: i64 = 30;

const DEFAULT_SUNRISE_MINUTES: f64 = 6.0 * 60.0 + 50.0;
const DEFAULT_SUNSET_MINUTES: f64 = 17.0 * 60.0 + 30.0;

fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 1).unwrap_or_default()
}

/// Observer position used for sun times.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Site {
    pub latitude: f64,
    pub longitude: f64,
    pub utc_offset_hours: f64,
}

impl Default for Site {
    /// Kobe harbour, JST.
    fn default() -> Self {
        Self {
            latitude: 34.69,
            longitude: 135.19,
            utc_offset_hours: 9.0,
        }
    }
}

/// Lunar age for a (possibly fractional, possibly negative) day offset from
/// the epoch, wrapped into `[0, SYNODIC_MONTH)` and rounded to 0.1.
pub fn lunar_age_from_epoch_days(days: f64) -> f64 {
    let age = (EPOCH_AGE + days).rem_euclid(SYNODIC_MONTH);
    let rounded = (age * 10.0).round() / 10.0;
    if rounded >= SYNODIC_MONTH {
        0.0
    } else {
        rounded
    }
}

pub fn lunar_age(date: NaiveDate) -> f64 {
    lunar_age_from_epoch_days((date - epoch()).num_days() as f64)
}

pub fn moon_phase(age: f64) -> MoonPhase {
    const PHASES: [(f64, MoonPhase); 7] = [
        (3.7, MoonPhase::New),
        (7.4, MoonPhase::WaxingCrescent),
        (11.1, MoonPhase::FirstQuarter),
        (14.8, MoonPhase::WaxingGibbous),
        (18.5, MoonPhase::Full),
        (22.1, MoonPhase::WaningGibbous),
        (25.8, MoonPhase::LastQuarter),
    ];
    PHASES
        .iter()
        .find(|(upper, _)| age < *upper)
        .map(|(_, phase)| *phase)
        .unwrap_or(MoonPhase::WaningCrescent)
}

/// Total over all reals: every age maps to exactly one class.
pub fn tide_type(age: f64) -> TideType {
    if age <= 2.0 || (13.5..=16.5).contains(&age) || age >= 27.5 {
        TideType::Spring
    } else if age <= 5.0 || (age > 16.5 && age <= 19.5) {
        TideType::Moderate
    } else if age <= 8.0 || (age > 19.5 && age <= 22.5) {
        TideType::Neap
    } else if age <= 10.0 || (age > 22.5 && age <= 24.5) {
        TideType::Long
    } else {
        TideType::Young
    }
}

/// High and low water estimates. The second low is dropped when it would
/// fall on the next day.
pub fn tide_times(age: f64) -> (Vec<ClockTime>, Vec<ClockTime>) {
    let base = TIDE_BASE_HOURS + age.rem_euclid(HALF_TIDE_CYCLE) * TIDE_DRIFT_HOURS_PER_DAY;

    let highs = vec![
        ClockTime::from_hours(base),
        ClockTime::from_hours(base + 12.4),
    ];

    let mut lows = vec![ClockTime::from_hours(base + 6.2)];
    if base + 18.6 < 24.0 {
        lows.push(ClockTime::from_hours(base + 18.6));
    }

    (highs, lows)
}

/// Sunrise and sunset as local clock times. Falls back to fixed defaults when
/// the sun never crosses the horizon that day.
pub fn sun_times(date: NaiveDate, site: &Site) -> (ClockTime, ClockTime) {
    let day_of_year = date.ordinal() as f64;

    let declination = -23.44 * (360.0 / 365.0 * (day_of_year + 10.0)).to_radians().cos();
    let b = (360.0 / 365.0 * (day_of_year - 81.0)).to_radians();
    let equation_of_time = 9.87 * (2.0 * b).sin() - 7.53 * b.cos() - 1.5 * b.sin();

    let phi = site.latitude.to_radians();
    let delta = declination.to_radians();
    let cos_h = (SUN_ALTITUDE.to_radians().sin() - phi.sin() * delta.sin()) / (phi.cos() * delta.cos());

    if !cos_h.is_finite() || cos_h.abs() > 1.0 {
        return (
            ClockTime::from_minutes(DEFAULT_SUNRISE_MINUTES),
            ClockTime::from_minutes(DEFAULT_SUNSET_MINUTES),
        );
    }

    let half_day_minutes = cos_h.acos().to_degrees() * 4.0;
    let meridian = site.utc_offset_hours * 15.0;
    let solar_noon = 12.0 * 60.0 - equation_of_time + (meridian - site.longitude) * 4.0;

    (
        ClockTime::from_minutes(solar_noon - half_day_minutes),
        ClockTime::from_minutes(solar_noon + half_day_minutes),
    )
}

pub fn snapshot(date: NaiveDate, site: &Site) -> TideSnapshot {
    let age = lunar_age(date);
    let (high_tides, low_tides) = tide_times(age);
    let (sunrise, sunset) = sun_times(date, site);

    TideSnapshot {
        date,
        date_label: full_date(date),
        lunar_age: age,
        moon_phase: moon_phase(age),
        tide_type: tide_type(age),
        high_tides,
        low_tides,
        sunrise,
        sunset,
        dawn: TimeWindow::around(sunrise, MAZUME_HALF_WIDTH_MINUTES),
        dusk: TimeWindow::around(sunset, MAZUME_HALF_WIDTH_MINUTES),
    }
}
