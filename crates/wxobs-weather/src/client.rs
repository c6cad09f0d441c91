//! Blocking weather client used by the presentation layer.

use std::time::Duration;

use tracing::instrument;

use crate::city::parse_city_weather;
use crate::directory::parse_station_directory;
use crate::error::ObservationError;
use crate::retry::{with_retry, RetryConfig};
use crate::station::{parse_current_obs_xml, parse_latest_observation, LINKED_DATA_JSON};
use crate::transport::{HttpTransport, USER_AGENT};
use crate::types::{CityRecord, Endpoints, StationEntry, StationObservation, StationRecord};

/// Client construction settings.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub user_agent: String,
    pub retry: RetryConfig,
    pub endpoints: Endpoints,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            user_agent: USER_AGENT.to_string(),
            retry: RetryConfig::default(),
            endpoints: Endpoints::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WeatherClient {
    transport: HttpTransport,
    retry: RetryConfig,
    endpoints: Endpoints,
}

impl WeatherClient {
    pub fn new(settings: ClientSettings) -> Result<Self, ObservationError> {
        Ok(Self {
            transport: HttpTransport::new(&settings.user_agent)?,
            retry: settings.retry,
            endpoints: settings.endpoints,
        })
    }

    /// Current observation for an NWS station.
    ///
    /// Tries the JSON API first. Any failure there is logged and the legacy
    /// XML feed is used instead; only an XML failure reaches the caller.
    /// The JSON API supplies no icon, so `icon_url` is empty on that path.
    #[instrument(skip(self), level = "info")]
    pub fn get_station_observation(
        &self,
        station_id: &str,
        timeout: Duration,
    ) -> Result<StationObservation, ObservationError> {
        match self.latest_observation(station_id, timeout) {
            Ok(record) => {
                return Ok(StationObservation {
                    record,
                    icon_url: String::new(),
                })
            }
            Err(e) => {
                tracing::warn!(
                    "JSON observation for {} failed ({:?}): {}; falling back to XML",
                    station_id,
                    e.kind(),
                    e
                );
            }
        }

        self.current_obs_xml(station_id, timeout)
    }

    fn latest_observation(
        &self,
        station_id: &str,
        timeout: Duration,
    ) -> Result<StationRecord, ObservationError> {
        let url = self.endpoints.station_json_url(station_id);
        tracing::info!("Fetching latest observation: {}", url);

        let body = with_retry(&self.retry, || {
            self.transport.get(&url, Some(LINKED_DATA_JSON), timeout)
        })?;
        parse_latest_observation(&body, station_id)
    }

    fn current_obs_xml(
        &self,
        station_id: &str,
        timeout: Duration,
    ) -> Result<StationObservation, ObservationError> {
        let url = self.endpoints.station_xml_url(station_id);
        tracing::info!("Fetching current_obs XML: {}", url);

        let body = with_retry(&self.retry, || self.transport.get(&url, None, timeout))?;
        parse_current_obs_xml(&body)
    }

    /// Current conditions for a free-text city name.
    ///
    /// Single attempt; transport, decode and contract failures all surface.
    #[instrument(skip(self, api_key), level = "info")]
    pub fn get_city_observation(
        &self,
        city: &str,
        api_key: &str,
        timeout: Duration,
    ) -> Result<CityRecord, ObservationError> {
        let url = self.endpoints.city_url(city, api_key);
        tracing::info!("Fetching city weather for {:?}", city);

        let body = self.transport.get(&url, None, timeout)?;
        parse_city_weather(&body)
    }

    /// Stations listed for a region (US state code), in page order.
    #[instrument(skip(self), level = "info")]
    pub fn list_stations(
        &self,
        region_code: &str,
        timeout: Duration,
    ) -> Result<Vec<StationEntry>, ObservationError> {
        let url = self.endpoints.station_directory_url(region_code);
        tracing::info!("Fetching station directory: {}", url);

        let body = self.transport.get(&url, None, timeout)?;
        let stations = parse_station_directory(&body);
        tracing::debug!("Found {} stations for {}", stations.len(), region_code);
        Ok(stations)
    }
}
