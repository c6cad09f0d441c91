mod error_mapping;

use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use wxobs_core::{AppError, Config, ConfigError};
use wxobs_weather::{
    CityPanel, ClientSettings, Endpoints, RetryConfig, StationPanel, StationRecord, WeatherClient,
};

use crate::error_mapping::to_app_error;

#[derive(Parser, Debug)]
#[command(
    name = "wxobs",
    version,
    about = "Current weather observations from NWS and OpenWeatherMap"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Per-request timeout in seconds (overrides config)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Current observation for an NWS station (e.g. KLAX)
    Station {
        station_id: String,

        /// Print every record field instead of the panel
        #[arg(long)]
        all: bool,
    },
    /// Current conditions for a city from OpenWeatherMap
    City {
        name: String,

        /// OpenWeatherMap API key (overrides config and OWM_API_KEY)
        #[arg(long)]
        api_key: Option<String>,
    },
    /// Stations listed for a US state code (e.g. WA)
    Stations { region: String },
}

fn client_settings(config: &Config) -> ClientSettings {
    ClientSettings {
        user_agent: config.http.user_agent.clone(),
        retry: RetryConfig::new(config.http.max_retries, config.http.backoff_ms),
        endpoints: Endpoints {
            station_json: config.endpoints.station_json.clone(),
            station_xml: config.endpoints.station_xml.clone(),
            city: config.endpoints.city.clone(),
            station_directory: config.endpoints.station_directory.clone(),
        },
    }
}

fn print_rows(rows: &[(&str, &str)]) {
    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    for (label, value) in rows {
        println!("{:width$}  {}", label, value, width = width);
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let (config, _) = Config::load_validated()?;
    let timeout = cli
        .timeout
        .map(Duration::from_secs)
        .unwrap_or_else(|| config.http.timeout());

    let client = WeatherClient::new(client_settings(&config)).map_err(to_app_error)?;

    match cli.command {
        Command::Station { station_id, all } => {
            let observation = client
                .get_station_observation(&station_id, timeout)
                .map_err(to_app_error)?;

            if all {
                let map = observation.record.to_map();
                let rows: Vec<(&str, &str)> = StationRecord::FIELDS
                    .iter()
                    .map(|field| (*field, map.get(*field).map(String::as_str).unwrap_or("")))
                    .collect();
                print_rows(&rows);
                if !observation.icon_url.is_empty() {
                    println!("icon_url  {}", observation.icon_url);
                }
            } else {
                let panel = StationPanel::from_observation(&observation);
                print_rows(&panel.rows());
                if !panel.icon_url.is_empty() {
                    println!("\nIcon: {}", panel.icon_url);
                }
            }
        }
        Command::City { name, api_key } => {
            let api_key = api_key
                .or_else(|| config.openweathermap.resolve_api_key())
                .ok_or_else(|| ConfigError::MissingSetting("openweathermap.api_key".into()))?;

            let record = client
                .get_city_observation(&name, &api_key, timeout)
                .map_err(to_app_error)?;

            let panel = CityPanel::from_record(&record);
            print_rows(&panel.rows());
            if !panel.icon_url.is_empty() {
                println!("\nIcon: {}", panel.icon_url);
            }
        }
        Command::Stations { region } => {
            let stations = client
                .list_stations(&region, timeout)
                .map_err(to_app_error)?;

            if stations.is_empty() {
                println!("No stations found for {}", region);
            }
            for station in &stations {
                println!("{}", station);
            }
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    wxobs_core::init(cli.debug)?;

    if let Err(e) = run(cli) {
        tracing::error!("{}", e);
        eprintln!("{}", e.user_message());
        std::process::exit(1);
    }

    Ok(())
}
