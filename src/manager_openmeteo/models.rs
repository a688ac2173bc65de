use serde::{Deserialize, Serialize};

// Every record defaults missing fields instead of failing, so an upstream
// schema change degrades to zeroes rather than errors.

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentWeatherUnits {
    pub time: String,
    pub interval: String,
    pub temperature_2m: String,
    pub wind_speed_10m: String,
}

/// A single instantaneous reading
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentWeather {
    /// ISO-8601 local time of the reading
    pub time: String,
    /// Seconds covered by the reading
    pub interval: i64,
    pub temperature_2m: f64,
    pub wind_speed_10m: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HourlyUnits {
    pub time: String,
    pub temperature_2m: String,
    pub relative_humidity_2m: String,
    pub wind_speed_10m: String,
}

/// Hourly forecast as parallel series, `time[i]` belongs to `temperature_2m[i]` and so on
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HourlyForecast {
    pub time: Vec<String>,
    pub temperature_2m: Vec<f64>,
    pub relative_humidity_2m: Vec<f64>,
    pub wind_speed_10m: Vec<f64>,
}

/// The full forecast envelope as returned by Open-Meteo
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherResponse {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "generationtime_ms")]
    pub generation_time_ms: f64,
    pub utc_offset_seconds: i32,
    pub timezone: String,
    pub timezone_abbreviation: String,
    /// Meters above sea level
    pub elevation: f64,
    pub current_units: CurrentWeatherUnits,
    pub current: CurrentWeather,
    pub hourly_units: HourlyUnits,
    pub hourly: HourlyForecast,
}
