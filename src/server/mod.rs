//! This module holds the server definition

use std::net::SocketAddr;

use actix_toolbox::tb_middleware::{setup_logging_mw, LoggingMiddlewareConfig};
use actix_web::middleware::Compress;
use actix_web::web::{route, scope, Data, JsonConfig, PayloadConfig, ServiceConfig};
use actix_web::{App, HttpServer};
use log::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Config;
use crate::server::error::StartServerError;
use crate::server::handler::{
    completed_drawings, get_drawing, get_game_data, health, incomplete_users, store_game_state,
    update_drawing_status, update_game_status, update_game_with_player, validate_join_game,
};
use crate::server::middleware::{handle_not_found, json_extractor_error};
use crate::server::swagger::ApiDoc;
use crate::storage::Storage;

pub mod error;
pub mod handler;
pub mod middleware;
pub mod swagger;
#[cfg(test)]
mod tests;

/// Json extractor configuration with the given body limit in bytes
pub(crate) fn json_config(limit: usize) -> JsonConfig {
    JsonConfig::default()
        .limit(limit)
        .error_handler(json_extractor_error)
}

/// Registers all handlers of the `/api` scope
pub(crate) fn api_routes(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/api")
            .service(store_game_state)
            .service(get_game_data)
            .service(update_game_with_player)
            .service(update_game_status)
            .service(validate_join_game)
            .service(update_drawing_status)
            .service(incomplete_users)
            .service(get_drawing)
            .service(completed_drawings)
            .service(health),
    );
}

/// Start the passdraw server
///
/// **Parameter**:
/// - `config`: Reference to a [Config] struct
/// - `storage`: [Storage] holding the games and drawings
pub async fn start_server(config: &Config, storage: Storage) -> Result<(), StartServerError> {
    let s_addr = SocketAddr::new(config.server.listen_address, config.server.listen_port);
    let payload_limit = config.server.max_json_payload_size;

    info!("Starting to listen on {}", s_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(PayloadConfig::default().limit(payload_limit))
            .app_data(json_config(payload_limit))
            .app_data(Data::new(storage.clone()))
            .wrap(setup_logging_mw(LoggingMiddlewareConfig::default()))
            .wrap(Compress::default())
            .service(SwaggerUi::new("/docs/{_:.*}").url("/api-doc/openapi.json", ApiDoc::openapi()))
            .configure(api_routes)
            .default_service(route().to(handle_not_found))
    })
    .bind(s_addr)?
    .run()
    .await?;

    Ok(())
}
