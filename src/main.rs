mod coordinates;
mod errors;
mod handlers;
mod initialization;
mod logging;
mod manager_openmeteo;
#[cfg(test)]
mod test_support;

use std::sync::Arc;
use actix_web::{web, App, HttpServer};
use log::{error, info};
use tokio_util::sync::CancellationToken;
use crate::errors::UnrecoverableError;
use crate::initialization::config;
use crate::manager_openmeteo::{OpenMeteo, WeatherSource};

struct AppState {
    weather: Arc<dyn WeatherSource>,
    /// Cancelled when the server starts shutting down, aborting in-flight upstream calls
    shutdown: CancellationToken,
}

#[actix_web::main]
async fn main() -> Result<(), UnrecoverableError> {
    let config = config()?;
    info!("using forecast endpoint {}", config.open_meteo.base_url);

    let shutdown = CancellationToken::new();
    let state = web::Data::new(AppState {
        weather: Arc::new(OpenMeteo::new(&config.open_meteo.base_url)?),
        shutdown: shutdown.clone(),
    });

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(handlers::configure)
    })
        .disable_signals()
        .bind((config.web_server.bind_address.as_str(), config.web_server.bind_port))?
        .run();

    let handle = server.handle();
    actix_web::rt::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("unable to listen for shutdown signal: {}", e);
            return;
        }
        info!("shutting down");
        shutdown.cancel();
        handle.stop(true).await;
    });

    info!("listening on {}:{}", config.web_server.bind_address, config.web_server.bind_port);
    server.await?;

    Ok(())
}
