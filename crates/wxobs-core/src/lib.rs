pub mod config;
pub mod error;

pub use config::{Config, EndpointsConfig, HttpConfig, OpenWeatherMapConfig, ValidationResult};
pub use error::{AppError, ConfigError, NetworkError, ReqwestErrorExt, WeatherError};

use anyhow::Result;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

/// Initialize tracing/logging on stderr.
///
/// `RUST_LOG` overrides the default level (`info`, or `debug` with `debug`).
pub fn init(debug: bool) -> Result<()> {
    let level = if debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env()?,
        )
        .with_writer(std::io::stderr)
        .with_file(debug)
        .with_line_number(debug)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;

    tracing::debug!("wxobs core initialized");
    Ok(())
}
