//! This module holds the definition of the swagger declaration

use utoipa::OpenApi;

use crate::models;
use crate::server::handler;

/// Helper struct for the openapi definitions.
#[derive(OpenApi)]
#[openapi(
    paths(
        handler::store_game_state,
        handler::get_game_data,
        handler::update_game_with_player,
        handler::update_game_status,
        handler::validate_join_game,
        handler::update_drawing_status,
        handler::incomplete_users,
        handler::get_drawing,
        handler::completed_drawings,
        handler::health,
    ),
    components(schemas(
        handler::ApiErrorResponse,
        handler::ApiStatusCode,
        handler::StoreGameStateRequest,
        handler::GameResponse,
        handler::AddPlayerRequest,
        handler::UpdateGameStatusRequest,
        handler::JoinGameRequest,
        handler::JoinGameResponse,
        handler::JoinRejectedResponse,
        handler::UpdateDrawingStatusRequest,
        handler::DrawingResponse,
        handler::IncompletePlayersResponse,
        handler::GetDrawingResponse,
        handler::HealthResponse,
        models::GameDocument,
        models::Player,
        models::DrawingDocument,
        models::DrawingPoint,
    ))
)]
pub struct ApiDoc;
