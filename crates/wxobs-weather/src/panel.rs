//! Display-ready field sets for the current-conditions form.
//!
//! The `*_or_placeholder` functions are the UI boundary: they never return
//! an error. A failed fetch is logged and an empty panel is shown instead.

use std::time::Duration;

use serde::Serialize;

use crate::client::WeatherClient;
use crate::types::{CityRecord, StationObservation};

pub const OWM_ICON_URL_BASE: &str = "https://openweathermap.org/img/w/";

const LAST_UPDATED_PREFIX: &str = "Last Updated on ";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StationPanel {
    pub location: String,
    pub updated: String,
    pub weather: String,
    pub temperature: String,
    pub dew_point: String,
    pub humidity: String,
    pub wind: String,
    pub visibility: String,
    pub pressure: String,
    pub altimeter: String,
    pub icon_url: String,
}

fn dual_temperature(fahrenheit: &str, celsius: &str) -> String {
    format!("{} \u{b0}F  ({} \u{b0}C)", fahrenheit, celsius)
}

impl StationPanel {
    pub fn from_observation(observation: &StationObservation) -> Self {
        let record = &observation.record;
        Self {
            location: record.location.clone(),
            updated: record.observation_time.replace(LAST_UPDATED_PREFIX, ""),
            weather: record.weather.clone(),
            temperature: dual_temperature(&record.temp_f, &record.temp_c),
            dew_point: dual_temperature(&record.dewpoint_f, &record.dewpoint_c),
            humidity: format!("{} %", record.relative_humidity),
            wind: record.wind_string.clone(),
            visibility: format!("{} miles", record.visibility_mi),
            pressure: record.pressure_string.clone(),
            altimeter: format!("{} in Hg", record.pressure_in),
            icon_url: observation.icon_url.clone(),
        }
    }

    /// Label/value rows in form order.
    pub fn rows(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("Location", self.location.as_str()),
            ("Last Updated", self.updated.as_str()),
            ("Weather", self.weather.as_str()),
            ("Temperature", self.temperature.as_str()),
            ("Dew Point", self.dew_point.as_str()),
            ("Relative Humidity", self.humidity.as_str()),
            ("Wind", self.wind.as_str()),
            ("Visibility", self.visibility.as_str()),
            ("MSL Pressure", self.pressure.as_str()),
            ("Altimeter", self.altimeter.as_str()),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CityPanel {
    pub location: String,
    pub updated: String,
    pub weather: String,
    pub temperature: String,
    pub humidity: String,
    pub wind: String,
    pub visibility: String,
    pub pressure: String,
    pub sunrise: String,
    pub sunset: String,
    pub icon_url: String,
}

impl CityPanel {
    pub fn from_record(record: &CityRecord) -> Self {
        let icon_url = if record.weather_icon.is_empty() {
            String::new()
        } else {
            format!("{}{}.png", OWM_ICON_URL_BASE, record.weather_icon)
        };

        Self {
            location: record.location.clone(),
            updated: record.lastupdate.clone(),
            weather: record.weather.clone(),
            temperature: dual_temperature(&record.temp_f, &record.temp_c),
            humidity: record.humidity.clone(),
            wind: record.wind.clone(),
            visibility: record.visibility.clone(),
            pressure: record.pressure.clone(),
            sunrise: record.sunrise.clone(),
            sunset: record.sunset.clone(),
            icon_url,
        }
    }

    pub fn rows(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("Location", self.location.as_str()),
            ("Last Updated", self.updated.as_str()),
            ("Weather", self.weather.as_str()),
            ("Temperature", self.temperature.as_str()),
            ("Relative Humidity", self.humidity.as_str()),
            ("Wind", self.wind.as_str()),
            ("Visibility", self.visibility.as_str()),
            ("MSL Pressure", self.pressure.as_str()),
            ("Sunrise", self.sunrise.as_str()),
            ("Sunset", self.sunset.as_str()),
        ]
    }
}

pub fn station_panel_or_placeholder(
    client: &WeatherClient,
    station_id: &str,
    timeout: Duration,
) -> StationPanel {
    match client.get_station_observation(station_id, timeout) {
        Ok(observation) => StationPanel::from_observation(&observation),
        Err(e) => {
            tracing::error!("Station {} unavailable: {}", station_id, e);
            StationPanel::default()
        }
    }
}

pub fn city_panel_or_placeholder(
    client: &WeatherClient,
    city: &str,
    api_key: &str,
    timeout: Duration,
) -> CityPanel {
    match client.get_city_observation(city, api_key, timeout) {
        Ok(record) => CityPanel::from_record(&record),
        Err(e) => {
            tracing::error!("City {:?} unavailable: {}", city, e);
            CityPanel::default()
        }
    }
}
