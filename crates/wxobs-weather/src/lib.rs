//! Current weather observations for wxobs.
//!
//! Fetches station observations from the National Weather Service (JSON
//! API with a legacy XML fallback), city conditions from OpenWeatherMap,
//! and regional station directories, and normalizes them into display text.

pub mod city;
pub mod client;
pub mod directory;
pub mod error;
pub mod extract;
pub mod panel;
pub mod retry;
pub mod station;
pub mod transport;
pub mod types;
pub mod units;

pub use client::{ClientSettings, WeatherClient};
pub use error::{ErrorKind, ObservationError};
pub use panel::{city_panel_or_placeholder, station_panel_or_placeholder, CityPanel, StationPanel};
pub use retry::RetryConfig;
pub use transport::DEFAULT_TIMEOUT;
pub use types::*;
