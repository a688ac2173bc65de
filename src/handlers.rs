use std::fmt;
use actix_web::{get, web, HttpResponse, Responder};
use actix_web::error::InternalError;
use log::{error, info, warn};
use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use crate::AppState;
use crate::coordinates::Coordinates;
use crate::manager_openmeteo::errors::OpenMeteoError;
use crate::manager_openmeteo::models::WeatherResponse;

const UNAVAILABLE: &str = "Weather service is currently unavailable. Please try again later.";
const UNEXPECTED: &str = "An unexpected error occurred. Please try again later.";

/// Query parameters of the weather endpoints
///
/// Names match case-insensitively and a missing coordinate reads as 0.
#[derive(Debug, Default)]
struct CoordinateParams {
    latitude: f64,
    longitude: f64,
}

impl<'de> Deserialize<'de> for CoordinateParams {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(CoordinateParamsVisitor)
    }
}

struct CoordinateParamsVisitor;

impl<'de> Visitor<'de> for CoordinateParamsVisitor {
    type Value = CoordinateParams;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "latitude and longitude query parameters")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut params = CoordinateParams::default();

        while let Some(key) = map.next_key::<String>()? {
            if key.eq_ignore_ascii_case("latitude") {
                params.latitude = map.next_value()?;
            } else if key.eq_ignore_ascii_case("longitude") {
                params.longitude = map.next_value()?;
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }

        Ok(params)
    }
}

/// Registers the weather endpoints together with the query error handler
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(query_config())
        .service(get_weather)
        .service(get_current_weather)
        .service(get_hourly_forecast);
}

/// Turns non-numeric query parameters into a 400
fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, req| {
        warn!("rejected query '{}': {}", req.query_string(), err);
        let response = HttpResponse::BadRequest().json(err.to_string());
        InternalError::from_response(err, response).into()
    })
}

#[get("/api/weather")]
async fn get_weather(params: web::Query<CoordinateParams>, data: web::Data<AppState>) -> impl Responder {
    respond(&params, &data, "weather", |w| w).await
}

#[get("/api/weather/current")]
async fn get_current_weather(params: web::Query<CoordinateParams>, data: web::Data<AppState>) -> impl Responder {
    respond(&params, &data, "current weather", |w| w.current).await
}

#[get("/api/weather/hourly")]
async fn get_hourly_forecast(params: web::Query<CoordinateParams>, data: web::Data<AppState>) -> impl Responder {
    respond(&params, &data, "hourly forecast", |w| w.hourly).await
}

/// Validates the coordinates, fetches the forecast and answers with the part picked by `select`
///
/// The upstream call is cancelled if this future is dropped or the server shuts down.
///
/// # Arguments
///
/// * 'params' - query parameters as received
/// * 'data' - application state
/// * 'what' - name of the requested part, used for logging
/// * 'select' - picks the part of the forecast to return
async fn respond<T, F>(params: &CoordinateParams, data: &AppState, what: &str, select: F) -> HttpResponse
where
    T: Serialize,
    F: FnOnce(WeatherResponse) -> T,
{
    info!("{} requested: {:?}", what, params);

    let coordinates = match Coordinates::new(params.latitude, params.longitude) {
        Ok(coordinates) => coordinates,
        Err(e) => {
            warn!("invalid coordinates for {}: {}", what, e);
            return HttpResponse::BadRequest().json(e.to_string());
        }
    };

    let cancel = data.shutdown.child_token();
    let _abandon = cancel.clone().drop_guard();

    match data.weather.fetch_weather(coordinates, &cancel).await {
        Ok(forecast) => {
            info!("serving {} for {}", what, coordinates);
            HttpResponse::Ok().json(select(forecast))
        }
        Err(e) => {
            error!("failed to get {} for {}: {}", what, coordinates, e);
            failure_response(&e)
        }
    }
}

fn failure_response(e: &OpenMeteoError) -> HttpResponse {
    match e {
        OpenMeteoError::Transport(_) => HttpResponse::ServiceUnavailable().json(UNAVAILABLE),
        OpenMeteoError::Document(_) | OpenMeteoError::Empty | OpenMeteoError::Cancelled => {
            HttpResponse::InternalServerError().json(UNEXPECTED)
        }
    }
}
