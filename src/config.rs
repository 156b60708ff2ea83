//! Client configuration with TOML file and environment variable layering.

use crate::country::Country;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Target environment for every request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Production,
    Sandbox,
}

impl Environment {
    /// Returns the host alias placed before `.buscape.com`.
    pub fn host(&self) -> &'static str {
        match self {
            Environment::Production => "bws",
            Environment::Sandbox => "sandbox",
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Production => write!(f, "production"),
            Environment::Sandbox => write!(f, "sandbox"),
        }
    }
}

/// Response body format requested from the service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    #[default]
    Xml,
    Json,
}

impl ResponseFormat {
    /// Returns the lowercase wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseFormat::Xml => "xml",
            ResponseFormat::Json => "json",
        }
    }
}

impl FromStr for ResponseFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "xml" => Ok(ResponseFormat::Xml),
            "json" => Ok(ResponseFormat::Json),
            _ => Err(Error::InvalidArgument(
                "the return format must be xml or json".to_string(),
            )),
        }
    }
}

impl std::fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Client configuration. `application_id` is immutable once the client is
/// built; `environment`, `format`, and `client_ip` stay mutable through the
/// client's setters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application identifier embedded in every request path.
    pub application_id: String,

    /// Country served by the API
    #[serde(default)]
    pub country: Country,

    /// Target environment
    #[serde(default)]
    pub environment: Environment,

    /// Default response format when a call does not override it
    #[serde(default)]
    pub format: ResponseFormat,

    /// Originating client IP forwarded to the service
    #[serde(default)]
    pub client_ip: Option<Ipv4Addr>,

    /// Proxy URL for the default transport (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,
}

impl Config {
    /// Creates a configuration for the default country (Brazil).
    pub fn new(application_id: impl Into<String>) -> Result<Self> {
        Self::with_country(application_id, Country::default())
    }

    /// Creates a configuration for an explicit country.
    pub fn with_country(application_id: impl Into<String>, country: Country) -> Result<Self> {
        let config = Self {
            application_id: application_id.into(),
            country,
            environment: Environment::default(),
            format: ResponseFormat::default(),
            client_ip: None,
            proxy: None,
        };
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            Error::Config(format!("Failed to parse config file {}: {}", path.display(), e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Loads configuration with fallback to default locations. There is no
    /// default application identifier, so some file must exist.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        // 1. Explicit path takes precedence
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        // 2. Try current directory
        let local_config = Path::new("buscape.toml");
        if local_config.exists() {
            debug!("Found buscape.toml in current directory");
            return Self::from_file(local_config);
        }

        // 3. Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("buscape").join("buscape.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        Err(Error::Config(
            "No config file found and no application ID supplied".to_string(),
        ))
    }

    /// Applies environment variable overrides. Invalid values are ignored.
    pub fn with_env(mut self) -> Self {
        if let Ok(app_id) = std::env::var("BUSCAPE_APP_ID") {
            if !app_id.is_empty() {
                self.application_id = app_id;
            }
        }

        if let Ok(country) = std::env::var("BUSCAPE_COUNTRY") {
            if let Ok(c) = country.parse() {
                self.country = c;
            }
        }

        if let Ok(proxy) = std::env::var("BUSCAPE_PROXY") {
            self.proxy = Some(proxy);
        }

        self
    }

    /// Checks the construction invariants.
    pub fn validate(&self) -> Result<()> {
        if self.application_id.is_empty() {
            return Err(Error::Config(
                "application ID must be specified".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_defaults() {
        let config = Config::new("2b613573535a6d324874493d").unwrap();
        assert_eq!(config.country, Country::Br);
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.format, ResponseFormat::Xml);
        assert!(config.client_ip.is_none());
        assert!(config.proxy.is_none());
    }

    #[test]
    fn test_config_empty_application_id() {
        let err = Config::new("").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("application ID must be specified"));
    }

    #[test]
    fn test_config_with_country() {
        let config = Config::with_country("app", Country::Mx).unwrap();
        assert_eq!(config.country, Country::Mx);
    }

    #[test]
    fn test_environment_hosts() {
        assert_eq!(Environment::Production.host(), "bws");
        assert_eq!(Environment::Sandbox.host(), "sandbox");
    }

    #[test]
    fn test_environment_display() {
        assert_eq!(Environment::Production.to_string(), "production");
        assert_eq!(Environment::Sandbox.to_string(), "sandbox");
    }

    #[test]
    fn test_response_format_parsing() {
        assert_eq!("xml".parse::<ResponseFormat>().unwrap(), ResponseFormat::Xml);
        assert_eq!("XML".parse::<ResponseFormat>().unwrap(), ResponseFormat::Xml);
        assert_eq!("json".parse::<ResponseFormat>().unwrap(), ResponseFormat::Json);
        assert_eq!("JSON".parse::<ResponseFormat>().unwrap(), ResponseFormat::Json);

        let err = "yaml".parse::<ResponseFormat>().unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("xml or json"));

        assert!("".parse::<ResponseFormat>().is_err());
    }

    #[test]
    fn test_response_format_display() {
        assert_eq!(ResponseFormat::Xml.to_string(), "xml");
        assert_eq!(ResponseFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_response_format_default() {
        assert_eq!(ResponseFormat::default(), ResponseFormat::Xml);
    }

    #[test]
    fn test_config_from_toml() {
        let toml = r#"
            application_id = "abc123"
            country = "mx"
            environment = "sandbox"
            format = "json"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.application_id, "abc123");
        assert_eq!(config.country, Country::Mx);
        assert_eq!(config.environment, Environment::Sandbox);
        assert_eq!(config.format, ResponseFormat::Json);
    }

    #[test]
    fn test_config_from_toml_all_fields() {
        let toml = r#"
            application_id = "abc123"
            country = "ar"
            environment = "production"
            format = "xml"
            client_ip = "192.168.0.10"
            proxy = "socks5://localhost:1080"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.client_ip, Some(Ipv4Addr::new(192, 168, 0, 10)));
        assert_eq!(config.proxy, Some("socks5://localhost:1080".to_string()));
    }

    #[test]
    fn test_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            application_id = "abc123"
            country = "cl"
            "#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.application_id, "abc123");
        assert_eq!(config.country, Country::Cl);
    }

    #[test]
    fn test_config_from_file_not_found() {
        let result = Config::from_file("/nonexistent/path/buscape.toml");
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Failed to read config file"));
    }

    #[test]
    fn test_config_from_file_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid toml {{{{").unwrap();

        let result = Config::from_file(file.path());
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Failed to parse config file"));
    }

    #[test]
    fn test_config_from_file_empty_application_id() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"application_id = """#).unwrap();

        let result = Config::from_file(file.path());
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_config_load_explicit_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            application_id = "abc123"
            country = "pe"
            "#
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.country, Country::Pe);
    }

    #[test]
    fn test_config_with_env() {
        let orig_app_id = std::env::var("BUSCAPE_APP_ID").ok();
        let orig_country = std::env::var("BUSCAPE_COUNTRY").ok();
        let orig_proxy = std::env::var("BUSCAPE_PROXY").ok();

        std::env::set_var("BUSCAPE_APP_ID", "env-app");
        std::env::set_var("BUSCAPE_COUNTRY", "co");
        std::env::set_var("BUSCAPE_PROXY", "http://proxy:8080");

        let config = Config::new("file-app").unwrap().with_env();
        assert_eq!(config.application_id, "env-app");
        assert_eq!(config.country, Country::Co);
        assert_eq!(config.proxy, Some("http://proxy:8080".to_string()));

        // Invalid values are ignored, keeping what the config already had
        std::env::set_var("BUSCAPE_COUNTRY", "atlantis");
        std::env::set_var("BUSCAPE_APP_ID", "");
        let config = Config::new("file-app").unwrap().with_env();
        assert_eq!(config.country, Country::Br);
        assert_eq!(config.application_id, "file-app");

        match orig_app_id {
            Some(v) => std::env::set_var("BUSCAPE_APP_ID", v),
            None => std::env::remove_var("BUSCAPE_APP_ID"),
        }
        match orig_country {
            Some(v) => std::env::set_var("BUSCAPE_COUNTRY", v),
            None => std::env::remove_var("BUSCAPE_COUNTRY"),
        }
        match orig_proxy {
            Some(v) => std::env::set_var("BUSCAPE_PROXY", v),
            None => std::env::remove_var("BUSCAPE_PROXY"),
        }
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let mut config = Config::with_country("abc123", Country::Ve).unwrap();
        config.environment = Environment::Sandbox;
        config.format = ResponseFormat::Json;
        config.client_ip = Some(Ipv4Addr::new(10, 0, 0, 1));

        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.application_id, config.application_id);
        assert_eq!(parsed.country, config.country);
        assert_eq!(parsed.environment, config.environment);
        assert_eq!(parsed.format, config.format);
        assert_eq!(parsed.client_ip, config.client_ip);
    }
}
