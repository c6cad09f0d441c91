//! Station observations from the National Weather Service.
//!
//! The api.weather.gov "latest observation" document is preferred. The
//! legacy `current_obs` XML feed is the fallback.

use serde::Deserialize;
use serde_json::Value;

use crate::error::ObservationError;
use crate::extract::{measurement, string_at};
use crate::types::{StationObservation, StationRecord};
use crate::units::{
    celsius_to_fahrenheit, nonzero_or_empty, one_decimal, two_decimals, wind_phrase, MPS_TO_MPH,
    NWS_METERS_TO_MILES, PA_PER_HPA, PA_TO_INHG,
};

pub const LINKED_DATA_JSON: &str = "application/ld+json";

/// Normalize an api.weather.gov latest-observation document.
///
/// Missing measurements read as zero. Wind, visibility and both pressure
/// fields are left empty when zero. `location` is the requested station id.
pub fn normalize_latest_observation(
    document: &Value,
    station_id: &str,
) -> Result<StationRecord, ObservationError> {
    if !document.is_object() {
        return Err(ObservationError::Contract(
            "latest observation is not a JSON object".to_string(),
        ));
    }
    let props = document.get("properties").unwrap_or(&Value::Null);

    let temp_c = measurement(props, "temperature");
    let dewpoint_c = measurement(props, "dewpoint");
    let humidity = measurement(props, "relativeHumidity");
    let wind_mph = measurement(props, "windSpeed") * MPS_TO_MPH;
    let wind_deg = measurement(props, "windDirection");
    let visibility_mi = measurement(props, "visibility") * NWS_METERS_TO_MILES;
    let pressure_pa = match measurement(props, "barometricPressure") {
        p if p != 0.0 => p,
        _ => measurement(props, "seaLevelPressure"),
    };

    Ok(StationRecord {
        observation_time: string_at(props, &["timestamp"]),
        weather: string_at(props, &["textDescription"]),
        temp_f: one_decimal(celsius_to_fahrenheit(temp_c)),
        temp_c: one_decimal(temp_c),
        dewpoint_f: one_decimal(celsius_to_fahrenheit(dewpoint_c)),
        dewpoint_c: one_decimal(dewpoint_c),
        relative_humidity: one_decimal(humidity),
        wind_string: nonzero_or_empty(wind_mph, |mph| {
            wind_phrase(wind_deg.round_ties_even() as i64, mph)
        }),
        visibility_mi: nonzero_or_empty(visibility_mi, two_decimals),
        pressure_string: nonzero_or_empty(pressure_pa / PA_PER_HPA, |hpa| {
            format!("{:.1} hPa", hpa)
        }),
        pressure_in: nonzero_or_empty(pressure_pa * PA_TO_INHG, two_decimals),
        location: station_id.to_string(),
    })
}

/// Parse and normalize a latest-observation response body.
pub fn parse_latest_observation(
    body: &str,
    station_id: &str,
) -> Result<StationRecord, ObservationError> {
    let document: Value =
        serde_json::from_str(body).map_err(|e| ObservationError::Decode(e.to_string()))?;
    normalize_latest_observation(&document, station_id)
}

/// Flat `current_observation` document from the legacy XML feed.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CurrentObservation {
    observation_time: Option<String>,
    weather: Option<String>,
    temp_f: Option<String>,
    temp_c: Option<String>,
    dewpoint_f: Option<String>,
    dewpoint_c: Option<String>,
    relative_humidity: Option<String>,
    wind_string: Option<String>,
    visibility_mi: Option<String>,
    pressure_string: Option<String>,
    pressure_in: Option<String>,
    location: Option<String>,
    icon_url_base: Option<String>,
    icon_url_name: Option<String>,
}

/// Parse a legacy `current_obs` XML document.
///
/// Tags are copied verbatim; a missing tag gives an empty field. The icon
/// URL is `icon_url_base` followed by `icon_url_name`.
pub fn parse_current_obs_xml(body: &str) -> Result<StationObservation, ObservationError> {
    let obs: CurrentObservation =
        serde_xml_rs::from_str(body).map_err(|e| ObservationError::Decode(e.to_string()))?;

    let icon_url = format!(
        "{}{}",
        obs.icon_url_base.unwrap_or_default(),
        obs.icon_url_name.unwrap_or_default()
    );

    let record = StationRecord {
        observation_time: obs.observation_time.unwrap_or_default(),
        weather: obs.weather.unwrap_or_default(),
        temp_f: obs.temp_f.unwrap_or_default(),
        temp_c: obs.temp_c.unwrap_or_default(),
        dewpoint_f: obs.dewpoint_f.unwrap_or_default(),
        dewpoint_c: obs.dewpoint_c.unwrap_or_default(),
        relative_humidity: obs.relative_humidity.unwrap_or_default(),
        wind_string: obs.wind_string.unwrap_or_default(),
        visibility_mi: obs.visibility_mi.unwrap_or_default(),
        pressure_string: obs.pressure_string.unwrap_or_default(),
        pressure_in: obs.pressure_in.unwrap_or_default(),
        location: obs.location.unwrap_or_default(),
    };

    Ok(StationObservation { record, icon_url })
}
