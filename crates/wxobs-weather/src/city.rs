//! Current conditions by city name from OpenWeatherMap.
//!
//! Unlike the NWS document, the top-level shape here is a hard contract:
//! a missing `dt`, `main`, `name`, `sys`, `weather` or `wind` is an error.

use serde::Deserialize;
use serde_json::{Number, Value};

use crate::error::ObservationError;
use crate::types::CityRecord;
use crate::units::{
    kelvin_to_celsius, kelvin_to_fahrenheit, local_timestamp, one_decimal, two_decimals,
    wind_phrase, MPS_TO_MPH, OWM_METERS_TO_MILES,
};

/// Shown in place of a visibility the provider did not report.
pub const VISIBILITY_UNAVAILABLE: &str = "N/A";

#[derive(Debug, Deserialize)]
struct OwmCurrentWeather {
    dt: i64,
    main: OwmMain,
    name: String,
    sys: OwmSys,
    weather: Vec<OwmCondition>,
    wind: OwmWind,
    #[serde(default)]
    visibility: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    humidity: Number,
    pressure: Number,
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwmSys {
    country: String,
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwmCondition {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f64,
    #[serde(default)]
    deg: Option<Number>,
}

fn timestamp(field: &str, unix_seconds: i64) -> Result<String, ObservationError> {
    local_timestamp(unix_seconds).ok_or_else(|| {
        ObservationError::Contract(format!("{} is out of range: {}", field, unix_seconds))
    })
}

/// Parse and normalize an OpenWeatherMap current-weather body.
pub fn parse_city_weather(body: &str) -> Result<CityRecord, ObservationError> {
    let document: Value =
        serde_json::from_str(body).map_err(|e| ObservationError::Decode(e.to_string()))?;
    let payload: OwmCurrentWeather =
        serde_json::from_value(document).map_err(|e| ObservationError::Contract(e.to_string()))?;

    let condition = payload
        .weather
        .first()
        .ok_or_else(|| ObservationError::Contract("`weather` is empty".to_string()))?;

    let visibility = match payload.visibility {
        Some(meters) => two_decimals(meters * OWM_METERS_TO_MILES),
        None => VISIBILITY_UNAVAILABLE.to_string(),
    };
    let wind_deg = payload.wind.deg.unwrap_or_else(|| Number::from(0));

    Ok(CityRecord {
        lastupdate: timestamp("dt", payload.dt)?,
        humidity: format!("{} %", payload.main.humidity),
        pressure: format!("{} hPa", payload.main.pressure),
        temp_f: one_decimal(kelvin_to_fahrenheit(payload.main.temp)),
        temp_c: one_decimal(kelvin_to_celsius(payload.main.temp)),
        location: format!("{}, {}", payload.name, payload.sys.country),
        weather: condition.description.clone(),
        weather_icon: condition.icon.clone(),
        wind: wind_phrase(wind_deg, payload.wind.speed * MPS_TO_MPH),
        visibility: format!("{} miles", visibility),
        sunrise: timestamp("sys.sunrise", payload.sys.sunrise)?,
        sunset: timestamp("sys.sunset", payload.sys.sunset)?,
    })
}
