//! All handlers for drawing submissions and completion tracking live in here

use actix_web::web::{Data, Json, Path};
use actix_web::{get, post, HttpResponse};
use log::debug;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::completion::incomplete_players;
use crate::models::{DrawingDocument, DrawingPoint};
use crate::server::handler::{validate_name, ApiError, ApiErrorResponse, ApiResult, PathGameCode};
use crate::storage::{NewDrawing, Storage};

/// The request to store the strokes of a part
#[derive(Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateDrawingStatusRequest {
    #[schema(example = "1000")]
    game_code: String,
    #[schema(example = "test")]
    player_name: String,
    #[schema(example = "Hat")]
    player_part: String,
    #[serde(default)]
    drawing_points: Vec<DrawingPoint>,
    #[serde(default)]
    player_drawing: String,
    #[serde(default)]
    is_completed: bool,
    #[schema(example = 82)]
    player_id: Option<i64>,
}

/// The stored drawing
#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct DrawingResponse {
    /// What has been done
    #[schema(example = "Drawing stored successfully")]
    pub message: String,
    /// The stored drawing
    pub drawing: DrawingDocument,
}

/// Store the strokes of a part
///
/// Every submission is stored as a new drawing, previous submissions
/// of the same part are kept.
#[utoipa::path(
    tag = "Drawings",
    context_path = "/api",
    responses(
        (status = 201, description = "Drawing has been stored", body = DrawingResponse),
        (status = 400, description = "Client error", body = ApiErrorResponse),
        (status = 500, description = "Server error", body = ApiErrorResponse),
    ),
    request_body = UpdateDrawingStatusRequest,
)]
#[post("/updateDrawingStatus")]
pub async fn update_drawing_status(
    req: Json<UpdateDrawingStatusRequest>,
    storage: Data<Storage>,
) -> ApiResult<HttpResponse> {
    let req = req.into_inner();

    validate_name(&req.game_code, ApiError::InvalidGameCode)?;
    validate_name(&req.player_name, ApiError::InvalidPlayerName)?;
    validate_name(&req.player_part, ApiError::InvalidPartName)?;

    let drawing = storage
        .insert_drawing(NewDrawing {
            game_code: req.game_code,
            player_name: req.player_name,
            player_part: req.player_part,
            drawing_points: req.drawing_points,
            player_drawing: req.player_drawing,
            is_completed: req.is_completed,
            player_id: req.player_id,
        })
        .await?;

    debug!(
        "Stored drawing of {} for {} in game {} (completed: {})",
        drawing.player_part, drawing.player_name, drawing.game_code, drawing.is_completed
    );

    Ok(HttpResponse::Created().json(DrawingResponse {
        message: "Drawing stored successfully".to_string(),
        drawing,
    }))
}

/// The game code and part in the path of a request
#[derive(Deserialize, IntoParams)]
pub struct PathGamePart {
    /// The code of the game
    pub(crate) game_code: String,
    /// The name of the body part
    pub(crate) part_name: String,
}

/// The players that have not finished a part yet
#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct IncompletePlayersResponse {
    /// Names of the players, in roster order
    #[serde(rename = "incompletePlayers")]
    pub incomplete_players: Vec<String>,
}

/// Retrieve the players of a game that have not completed a part yet
///
/// Players are returned in roster order. A player without any submission
/// for the part counts as incomplete, just like a player whose submissions
/// are all unfinished. The part name is not checked against the parts of the game.
#[utoipa::path(
    tag = "Drawings",
    context_path = "/api",
    responses(
        (status = 200, description = "Returns the incomplete players", body = IncompletePlayersResponse),
        (status = 404, description = "Game not found", body = ApiErrorResponse),
        (status = 500, description = "Server error", body = ApiErrorResponse),
    ),
    params(PathGamePart),
)]
#[get("/incompleteUsers/{game_code}/{part_name}")]
pub async fn incomplete_users(
    path: Path<PathGamePart>,
    storage: Data<Storage>,
) -> ApiResult<Json<IncompletePlayersResponse>> {
    let game = storage
        .find_game(&path.game_code)
        .await?
        .ok_or(ApiError::GameNotFound)?;

    let completed = storage
        .completed_player_names(&path.game_code, &path.part_name)
        .await?;

    Ok(Json(IncompletePlayersResponse {
        incomplete_players: incomplete_players(&game.players, &completed),
    }))
}

/// The game code, player and part in the path of a request
#[derive(Deserialize, IntoParams)]
pub struct PathPlayerPart {
    /// The code of the game
    pub(crate) game_code: String,
    /// The name of the player
    pub(crate) player_name: String,
    /// The name of the body part
    pub(crate) part_name: String,
}

/// The strokes of a single drawing
#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct GetDrawingResponse {
    /// The raw strokes
    pub drawing_points: Vec<DrawingPoint>,
    /// Whether the part is finished
    pub is_completed: bool,
}

/// Retrieve the strokes a player submitted for a part
///
/// If the part was submitted multiple times, the first submission is returned.
#[utoipa::path(
    tag = "Drawings",
    context_path = "/api",
    responses(
        (status = 200, description = "Returns the drawing", body = GetDrawingResponse),
        (status = 404, description = "Drawing not found", body = ApiErrorResponse),
        (status = 500, description = "Server error", body = ApiErrorResponse),
    ),
    params(PathPlayerPart),
)]
#[get("/getDrawing/{game_code}/{player_name}/{part_name}")]
pub async fn get_drawing(
    path: Path<PathPlayerPart>,
    storage: Data<Storage>,
) -> ApiResult<Json<GetDrawingResponse>> {
    let drawing = storage
        .find_drawing(&path.game_code, &path.player_name, &path.part_name)
        .await?
        .ok_or(ApiError::DrawingNotFound)?;

    Ok(Json(GetDrawingResponse {
        drawing_points: drawing.drawing_points,
        is_completed: drawing.is_completed,
    }))
}

/// Retrieve all completed drawings of a game
///
/// Responds with `DrawingNotFound` if no drawing of the game is completed,
/// this includes games that don't exist.
#[utoipa::path(
    tag = "Drawings",
    context_path = "/api",
    responses(
        (status = 200, description = "Returns the completed drawings", body = [DrawingDocument]),
        (status = 404, description = "No completed drawing found", body = ApiErrorResponse),
        (status = 500, description = "Server error", body = ApiErrorResponse),
    ),
    params(PathGameCode),
)]
#[get("/completedDrawings/{game_code}")]
pub async fn completed_drawings(
    path: Path<PathGameCode>,
    storage: Data<Storage>,
) -> ApiResult<Json<Vec<DrawingDocument>>> {
    let drawings = storage.completed_drawings(&path.game_code).await?;

    if drawings.is_empty() {
        return Err(ApiError::DrawingNotFound);
    }

    Ok(Json(drawings))
}
