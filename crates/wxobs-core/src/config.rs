use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;
use wxobs_weather::{
    transport::USER_AGENT, DEFAULT_CITY_URL, DEFAULT_STATION_DIRECTORY_URL,
    DEFAULT_STATION_JSON_URL, DEFAULT_STATION_XML_URL,
};

use crate::error::{AppError, ConfigError};

type Result<T> = std::result::Result<T, AppError>;

/// Environment variable consulted when no OpenWeatherMap key is configured.
pub const OWM_API_KEY_ENV: &str = "OWM_API_KEY";

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Outbound request settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Provider URL templates
    #[serde(default)]
    pub endpoints: EndpointsConfig,

    /// OpenWeatherMap credentials
    #[serde(default)]
    pub openweathermap: OpenWeatherMapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-attempt timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retries after the first attempt for station requests
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Delay before the first retry, doubling each time
    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: u64,

    /// Identifying user agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_max_retries() -> u32 {
    2
}

fn default_backoff_ms() -> u64 {
    500
}

fn default_user_agent() -> String {
    USER_AGENT.to_string()
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            backoff_ms: default_backoff_ms(),
            user_agent: default_user_agent(),
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointsConfig {
    /// NWS latest observation, `{station}` placeholder
    pub station_json: String,
    /// Legacy NWS current_obs XML, `{station}` placeholder
    pub station_xml: String,
    /// OpenWeatherMap current weather
    pub city: String,
    /// NWS station directory page, `{state}` placeholder
    pub station_directory: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            station_json: DEFAULT_STATION_JSON_URL.to_string(),
            station_xml: DEFAULT_STATION_XML_URL.to_string(),
            city: DEFAULT_CITY_URL.to_string(),
            station_directory: DEFAULT_STATION_DIRECTORY_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenWeatherMapConfig {
    /// Static API key; `OWM_API_KEY` is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl OpenWeatherMapConfig {
    /// Configured key, else the environment, else `None`.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var(OWM_API_KEY_ENV).ok())
            .filter(|k| !k.trim().is_empty())
    }
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, creating it with defaults if missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            tracing::info!("Wrote default configuration to {}", path.display());
            return Ok(config);
        }

        let contents = std::fs::read_to_string(path)?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        Self::load_validated_from(&Self::config_path()?)
    }

    /// Same as [`Config::load_validated`] for the file at `path`
    pub fn load_validated_from(path: &Path) -> Result<(Self, ValidationResult)> {
        let config = Self::load_from(path)?;
        let validation = config.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()).into());
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        if self.http.timeout_secs == 0 {
            result.add_error("http.timeout_secs", "Timeout must be greater than 0");
        } else if self.http.timeout_secs > 120 {
            result.add_warning("http.timeout_secs", "Timeout is unusually long (>120s)");
        }

        if self.http.max_retries > 10 {
            result.add_warning("http.max_retries", "More than 10 retries configured");
        }

        if self.http.user_agent.trim().is_empty() {
            result.add_error(
                "http.user_agent",
                "weather.gov requires an identifying User-Agent",
            );
        }

        self.validate_url(
            &self.endpoints.station_json,
            "endpoints.station_json",
            &mut result,
        );
        self.validate_url(
            &self.endpoints.station_xml,
            "endpoints.station_xml",
            &mut result,
        );
        self.validate_url(&self.endpoints.city, "endpoints.city", &mut result);
        self.validate_url(
            &self.endpoints.station_directory,
            "endpoints.station_directory",
            &mut result,
        );

        if !self.endpoints.station_json.contains("{station}") {
            result.add_error("endpoints.station_json", "Missing {station} placeholder");
        }
        if !self.endpoints.station_xml.contains("{station}") {
            result.add_error("endpoints.station_xml", "Missing {station} placeholder");
        }
        if !self.endpoints.station_directory.contains("{state}") {
            result.add_error("endpoints.station_directory", "Missing {state} placeholder");
        }

        if self.openweathermap.resolve_api_key().is_none() {
            result.add_warning(
                "openweathermap.api_key",
                format!(
                    "No API key configured and {} is unset - city lookups will fail",
                    OWM_API_KEY_ENV
                ),
            );
        }

        result
    }

    /// Validate a URL field
    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        // Placeholders are not valid URL syntax in every position
        let probe = url_str
            .replace("{station}", "KXYZ")
            .replace("{state}", "xx");

        match Url::parse(&probe) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }

                if url.port() == Some(0) {
                    result.add_error(field_name, "Port cannot be 0");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid(e.to_string()))?;

        std::fs::write(path, contents)?;

        Ok(())
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::MissingSetting("user config directory".to_string()))?
            .join("wxobs");

        Ok(config_dir.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_default_config() {
        let config = Config::default();
        let result = config.validate();
        assert!(
            result.is_valid(),
            "Default config should be valid: {:?}",
            result.errors
        );
    }

    #[test]
    fn test_default_http_settings() {
        let http = HttpConfig::default();
        assert_eq!(http.timeout_secs, 10);
        assert_eq!(http.max_retries, 2);
        assert_eq!(http.backoff_ms, 500);
        assert!(http.user_agent.starts_with("wxobs/"));
    }

    #[test]
    fn test_zero_timeout_is_error() {
        let mut config = Config::default();
        config.http.timeout_secs = 0;
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "http.timeout_secs"));
    }

    #[test]
    fn test_invalid_url() {
        let mut config = Config::default();
        config.endpoints.city = "not-a-url".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "endpoints.city"));
    }

    #[test]
    fn test_invalid_url_scheme() {
        let mut config = Config::default();
        config.endpoints.station_xml = "ftp://weather.gov/{station}.xml".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result
            .errors
            .iter()
            .any(|e| e.message.contains("http or https")));
    }

    #[test]
    fn test_missing_placeholder() {
        let mut config = Config::default();
        config.endpoints.station_json = "https://api.weather.gov/stations/KLAX".to_string();
        let result = config.validate();
        assert!(result
            .errors
            .iter()
            .any(|e| e.field == "endpoints.station_json" && e.message.contains("{station}")));
    }

    #[test]
    fn test_configured_api_key_wins() {
        let owm = OpenWeatherMapConfig {
            api_key: Some("abc123".to_string()),
        };
        assert_eq!(owm.resolve_api_key().as_deref(), Some("abc123"));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
[http]
timeout_secs = 5

[openweathermap]
api_key = "k"
"#,
        )
        .unwrap();

        assert_eq!(config.http.timeout_secs, 5);
        assert_eq!(config.http.max_retries, 2);
        assert_eq!(config.endpoints.city, EndpointsConfig::default().city);
        assert_eq!(config.openweathermap.api_key.as_deref(), Some("k"));
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wxobs").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.http.timeout_secs, 10);

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.endpoints.station_xml, config.endpoints.station_xml);
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[http\ntimeout_secs = ").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, AppError::Config(ConfigError::ParseError(_))));
        assert_eq!(
            err.user_message(),
            "Configuration file is malformed. Check your settings."
        );
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[http]\ntimeout_secs = 0\n").unwrap();

        let err = Config::load_validated_from(&path).unwrap_err();
        let summary = match &err {
            AppError::Config(ConfigError::Invalid(summary)) => summary.as_str(),
            _ => "",
        };
        assert!(summary.contains("http.timeout_secs"), "{:?}", err);
        assert_eq!(
            err.user_message(),
            "Invalid configuration. Check your settings."
        );
    }

    #[test]
    fn test_unreadable_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();

        // A directory exists at the path but cannot be read as a file
        let err = Config::load_from(dir.path()).unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }

    #[test]
    fn test_partial_endpoints_section() {
        let config: Config = toml::from_str(
            r#"
[endpoints]
city = "http://localhost:8080/weather"
"#,
        )
        .unwrap();

        assert_eq!(config.endpoints.city, "http://localhost:8080/weather");
        assert_eq!(config.endpoints.station_json, DEFAULT_STATION_JSON_URL);
        assert_eq!(config.endpoints.station_xml, DEFAULT_STATION_XML_URL);
        assert_eq!(
            config.endpoints.station_directory,
            DEFAULT_STATION_DIRECTORY_URL
        );
        assert!(config.validate().is_valid());
    }

    #[test]
    fn test_default_user_agent_matches_client() {
        assert_eq!(HttpConfig::default().user_agent, USER_AGENT);
    }

    #[test]
    fn test_validation_result_error_summary() {
        let mut result = ValidationResult::default();
        result.add_error("field1", "error1");
        result.add_error("field2", "error2");
        let summary = result.error_summary();
        assert!(summary.contains("field1"));
        assert!(summary.contains("field2"));
    }
}
