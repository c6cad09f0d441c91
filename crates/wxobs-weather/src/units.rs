//! Unit conversions and display formatting shared by the fetchers.

use chrono::{DateTime, Local};

pub const MPS_TO_MPH: f64 = 2.236_936_29;
pub const PA_TO_INHG: f64 = 0.000_295_3;
pub const PA_PER_HPA: f64 = 100.0;
/// Meters to miles as used for NWS station visibility.
pub const NWS_METERS_TO_MILES: f64 = 0.000_621_371;
/// Meters to miles as used for OpenWeatherMap visibility.
pub const OWM_METERS_TO_MILES: f64 = 0.000_621_37;

const ABSOLUTE_ZERO_C: f64 = 273.15;

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    kelvin - ABSOLUTE_ZERO_C
}

pub fn kelvin_to_fahrenheit(kelvin: f64) -> f64 {
    (kelvin - ABSOLUTE_ZERO_C) * 1.8 + 32.0
}

pub fn one_decimal(value: f64) -> String {
    format!("{:.1}", value)
}

pub fn two_decimals(value: f64) -> String {
    format!("{:.2}", value)
}

/// `"<deg> degrees at <mph> MPH"` with mph to one decimal.
pub fn wind_phrase(degrees: impl std::fmt::Display, mph: f64) -> String {
    format!("{} degrees at {:.1} MPH", degrees, mph)
}

/// Format `value` with `format`, or return an empty string for zero.
///
/// A zero reading and a missing reading look the same here.
pub fn nonzero_or_empty(value: f64, format: impl FnOnce(f64) -> String) -> String {
    if value == 0.0 {
        String::new()
    } else {
        format(value)
    }
}

/// Unix seconds to local `YYYY-MM-DD HH:MM:SS`.
pub fn local_timestamp(unix_seconds: i64) -> Option<String> {
    DateTime::from_timestamp(unix_seconds, 0).map(|utc| {
        utc.with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
    })
}
