pub mod errors;
pub mod models;

use async_trait::async_trait;
use log::{error, info, warn};
use reqwest::Client;
use tokio_util::sync::CancellationToken;
use crate::coordinates::Coordinates;
use crate::manager_openmeteo::errors::OpenMeteoError;
use crate::manager_openmeteo::models::WeatherResponse;

pub const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com/v1/forecast";
const CURRENT_FIELDS: &str = "temperature_2m,wind_speed_10m";
const HOURLY_FIELDS: &str = "temperature_2m,relative_humidity_2m,wind_speed_10m";

/// Anything able to produce a forecast envelope for a location
#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Fetches current conditions and hourly forecast for the given coordinates.
    /// Gives up with `OpenMeteoError::Cancelled` as soon as `cancel` fires.
    async fn fetch_weather(&self, coordinates: Coordinates, cancel: &CancellationToken)
        -> Result<WeatherResponse, OpenMeteoError>;
}

/// Struct for fetching weather forecasts from Open-Meteo
pub struct OpenMeteo {
    client: Client,
    base_url: String,
}

impl OpenMeteo {
    /// Returns an OpenMeteo struct ready for fetching forecasts
    ///
    /// The underlying http client keeps a connection pool, so one instance should be
    /// shared by all requests.
    ///
    /// # Arguments
    ///
    /// * 'base_url' - url of the forecast endpoint, query string excluded
    pub fn new(base_url: &str) -> Result<OpenMeteo, OpenMeteoError> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    /// Builds the full request url for the given location
    ///
    /// Coordinates use the default float formatting, no rounding is applied.
    fn request_url(&self, coordinates: Coordinates) -> String {
        format!("{}?latitude={}&longitude={}&current={}&hourly={}",
                self.base_url, coordinates.latitude(), coordinates.longitude(), CURRENT_FIELDS, HOURLY_FIELDS)
    }

    async fn request(&self, url: &str) -> Result<WeatherResponse, OpenMeteoError> {
        let req = self.client
            .get(url)
            .send().await?;

        let status = req.status();
        if !status.is_success() {
            return Err(OpenMeteoError::Transport(format!("Error while fetching forecast from Open-Meteo: {}", status)));
        }

        let json = req.text().await?;
        let weather: Option<WeatherResponse> = serde_json::from_str(&json)?;

        weather.ok_or(OpenMeteoError::Empty)
    }
}

#[async_trait]
impl WeatherSource for OpenMeteo {
    async fn fetch_weather(&self, coordinates: Coordinates, cancel: &CancellationToken)
        -> Result<WeatherResponse, OpenMeteoError> {
        info!("fetching weather data for {}", coordinates);
        let url = self.request_url(coordinates);

        let result = tokio::select! {
            _ = cancel.cancelled() => Err(OpenMeteoError::Cancelled),
            weather = self.request(&url) => weather,
        };

        match &result {
            Ok(_) => info!("retrieved weather data for {}", coordinates),
            Err(OpenMeteoError::Cancelled) => warn!("weather request cancelled for {}", coordinates),
            Err(e) => error!("failed to fetch weather data for {}: {}", coordinates, e),
        }

        result
    }
}
