use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const FORECAST_PATH: &str = "/v1/forecast";

/// Open-Meteo answer for Berlin, trimmed to three hours
pub fn berlin_forecast() -> Value {
    json!({
        "latitude": 52.52,
        "longitude": 13.419998,
        "generationtime_ms": 0.0629425048828125,
        "utc_offset_seconds": 0,
        "timezone": "GMT",
        "timezone_abbreviation": "GMT",
        "elevation": 38.0,
        "current_units": {
            "time": "iso8601",
            "interval": "seconds",
            "temperature_2m": "°C",
            "wind_speed_10m": "km/h"
        },
        "current": {
            "time": "2025-05-01T12:00",
            "interval": 900,
            "temperature_2m": 18.3,
            "wind_speed_10m": 11.2
        },
        "hourly_units": {
            "time": "iso8601",
            "temperature_2m": "°C",
            "relative_humidity_2m": "%",
            "wind_speed_10m": "km/h"
        },
        "hourly": {
            "time": ["2025-05-01T00:00", "2025-05-01T01:00", "2025-05-01T02:00"],
            "temperature_2m": [10.1, 9.8, 9.4],
            "relative_humidity_2m": [81.0, 84.0, 86.0],
            "wind_speed_10m": [5.4, 4.9, 4.3]
        }
    })
}

/// Base url for a client talking to the given mock server
pub fn base_url(server: &MockServer) -> String {
    format!("{}{}", server.uri(), FORECAST_PATH)
}

/// Mounts a forecast mock matching the full Open-Meteo query for Berlin
pub async fn mount_berlin(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .and(query_param("latitude", "52.52"))
        .and(query_param("longitude", "13.41"))
        .and(query_param("current", "temperature_2m,wind_speed_10m"))
        .and(query_param("hourly", "temperature_2m,relative_humidity_2m,wind_speed_10m"))
        .respond_with(response)
        .mount(server)
        .await;
}
