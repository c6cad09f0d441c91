use std::collections::BTreeMap;

use serde::Serialize;

/// Normalized current observation for a weather station.
///
/// Every field is display text. Numeric values are already rounded and
/// formatted; an unknown value is an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StationRecord {
    pub observation_time: String,
    pub weather: String,
    pub temp_f: String,
    pub temp_c: String,
    pub dewpoint_f: String,
    pub dewpoint_c: String,
    pub relative_humidity: String,
    pub wind_string: String,
    pub visibility_mi: String,
    pub pressure_string: String,
    pub pressure_in: String,
    pub location: String,
}

impl StationRecord {
    /// Canonical field names, in display order.
    pub const FIELDS: [&'static str; 12] = [
        "observation_time",
        "weather",
        "temp_f",
        "temp_c",
        "dewpoint_f",
        "dewpoint_c",
        "relative_humidity",
        "wind_string",
        "visibility_mi",
        "pressure_string",
        "pressure_in",
        "location",
    ];

    /// Look up a field by its canonical name.
    pub fn get(&self, field: &str) -> Option<&str> {
        let value = match field {
            "observation_time" => &self.observation_time,
            "weather" => &self.weather,
            "temp_f" => &self.temp_f,
            "temp_c" => &self.temp_c,
            "dewpoint_f" => &self.dewpoint_f,
            "dewpoint_c" => &self.dewpoint_c,
            "relative_humidity" => &self.relative_humidity,
            "wind_string" => &self.wind_string,
            "visibility_mi" => &self.visibility_mi,
            "pressure_string" => &self.pressure_string,
            "pressure_in" => &self.pressure_in,
            "location" => &self.location,
            _ => return None,
        };
        Some(value.as_str())
    }

    /// The record as a key/value mapping holding every canonical key.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        Self::FIELDS
            .iter()
            .map(|field| {
                let value = self.get(field).unwrap_or_default();
                (field.to_string(), value.to_string())
            })
            .collect()
    }
}

/// Result of a station lookup: the record plus the provider's icon URL
/// (empty when the provider does not supply one).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StationObservation {
    pub record: StationRecord,
    pub icon_url: String,
}

/// Current conditions for a city, pre-formatted with units.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CityRecord {
    pub lastupdate: String,
    pub humidity: String,
    pub pressure: String,
    pub temp_f: String,
    pub temp_c: String,
    pub location: String,
    pub weather: String,
    /// Bare icon code such as `04d`.
    pub weather_icon: String,
    pub wind: String,
    pub visibility: String,
    pub sunrise: String,
    pub sunset: String,
}

/// One row of a regional station directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationEntry {
    pub station_id: String,
    pub city: String,
}

impl std::fmt::Display for StationEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.city, self.station_id)
    }
}

/// Provider URL templates.
///
/// `{station}` is replaced with the station id and `{state}` with the
/// lower-cased region code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Endpoints {
    pub station_json: String,
    pub station_xml: String,
    pub city: String,
    pub station_directory: String,
}

pub const DEFAULT_STATION_JSON_URL: &str =
    "https://api.weather.gov/stations/{station}/observations/latest";
pub const DEFAULT_STATION_XML_URL: &str = "https://www.weather.gov/xml/current_obs/{station}.xml";
pub const DEFAULT_CITY_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
pub const DEFAULT_STATION_DIRECTORY_URL: &str =
    "https://w1.weather.gov/xml/current_obs/seek.php?state={state}&Find=Find";

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            station_json: DEFAULT_STATION_JSON_URL.to_string(),
            station_xml: DEFAULT_STATION_XML_URL.to_string(),
            city: DEFAULT_CITY_URL.to_string(),
            station_directory: DEFAULT_STATION_DIRECTORY_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// Point every endpoint at `base`, keeping the production paths.
    pub fn with_base_url(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            station_json: format!("{}/stations/{{station}}/observations/latest", base),
            station_xml: format!("{}/xml/current_obs/{{station}}.xml", base),
            city: format!("{}/data/2.5/weather", base),
            station_directory: format!(
                "{}/xml/current_obs/seek.php?state={{state}}&Find=Find",
                base
            ),
        }
    }

    pub fn station_json_url(&self, station_id: &str) -> String {
        self.station_json.replace("{station}", station_id)
    }

    pub fn station_xml_url(&self, station_id: &str) -> String {
        self.station_xml.replace("{station}", station_id)
    }

    pub fn city_url(&self, city: &str, api_key: &str) -> String {
        format!(
            "{}?q={}&appid={}",
            self.city,
            urlencoding::encode(city),
            urlencoding::encode(api_key)
        )
    }

    pub fn station_directory_url(&self, region_code: &str) -> String {
        self.station_directory.replace("{state}", &region_code.to_lowercase())
    }
}
