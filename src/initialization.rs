use std::fs;
use reqwest::Url;
use serde::Deserialize;
use crate::errors::ConfigError;
use crate::logging::setup_logger;
use crate::manager_openmeteo::DEFAULT_BASE_URL;

const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Deserialize, Debug)]
pub struct General {
    pub log_path: String,
    pub log_level: String,
    pub log_to_stdout: bool,
}

#[derive(Deserialize, Debug)]
pub struct WebServer {
    pub bind_address: String,
    pub bind_port: u16,
}

#[derive(Deserialize, Debug)]
pub struct OpenMeteoParameters {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for OpenMeteoParameters {
    fn default() -> Self {
        Self { base_url: default_base_url() }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

#[derive(Deserialize, Debug)]
pub struct Config {
    pub general: General,
    pub web_server: WebServer,
    #[serde(default)]
    pub open_meteo: OpenMeteoParameters,
}

/// Loads the configuration file and sets up logging
///
/// The file is taken from `--config=<path>` if given on the command line, otherwise
/// `config.toml` in the working directory is used.
pub fn config() -> Result<Config, ConfigError> {
    let path = config_path(std::env::args().skip(1));
    let toml = fs::read_to_string(&path)
        .map_err(|e| ConfigError(format!("unable to read {}: {}", path, e)))?;

    let config = parse_config(&toml)?;
    setup_logger(&config.general)?;

    Ok(config)
}

/// Picks the configuration path out of the command line arguments
///
/// # Arguments
///
/// * 'args' - command line arguments, program name excluded
fn config_path(args: impl Iterator<Item = String>) -> String {
    args.filter_map(|a| a.strip_prefix("--config=").map(str::to_string))
        .last()
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string())
}

fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(toml)?;

    let base_url = &config.open_meteo.base_url;
    let url = Url::parse(base_url)
        .map_err(|e| ConfigError(format!("open_meteo.base_url '{}' is not a valid url: {}", base_url, e)))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError(format!("open_meteo.base_url '{}' must be an http(s) url", base_url)));
    }

    Ok(config)
}
