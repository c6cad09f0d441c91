//! Maps observation failures onto the application error hierarchy.

use wxobs_core::{AppError, ReqwestErrorExt, WeatherError};
use wxobs_weather::ObservationError;

pub fn to_app_error(err: ObservationError) -> AppError {
    match err {
        ObservationError::Transport(e) => AppError::Network(e.into_network_error()),
        ObservationError::Decode(msg) => AppError::Weather(WeatherError::Malformed(msg)),
        ObservationError::Contract(msg) => AppError::Weather(WeatherError::Incomplete(msg)),
    }
}
