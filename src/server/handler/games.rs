//! All handlers for creating, joining and updating games live in here

use actix_web::web::{Data, Json, Path};
use actix_web::{get, post, put, HttpResponse};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::models::{GameDocument, Player};
use crate::server::handler::{validate_name, ApiError, ApiErrorResponse, ApiResult};
use crate::storage::{GameStatusPatch, NewGame, Storage};

/// The game code in the path of a request
#[derive(Deserialize, IntoParams)]
pub struct PathGameCode {
    /// The code of the game
    pub(crate) game_code: String,
}

/// A response carrying a single game
#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct GameResponse {
    /// What has been done
    #[schema(example = "Game data retrieved")]
    pub message: String,
    /// The game
    pub game: GameDocument,
}

fn default_join() -> bool {
    true
}

/// The request to create a new game
///
/// `games_parts` is also accepted as `games_Parts`.
/// `number_of_players` of the created game is the length of `players`.
#[derive(Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct StoreGameStateRequest {
    #[schema(example = "1000")]
    game_code: String,
    #[serde(default, alias = "games_Parts")]
    games_parts: Vec<String>,
    #[serde(default)]
    players: Vec<Player>,
    #[serde(default = "default_join")]
    join: bool,
    #[serde(default)]
    start_game: bool,
    #[serde(default)]
    #[schema(example = 60)]
    drawing_time: i64,
}

fn validate_player(player: &Player) -> ApiResult<()> {
    validate_name(&player.player_name, ApiError::InvalidPlayerName)
}

/// Create a new game lobby
///
/// Game codes are not checked for uniqueness. If multiple games share a code,
/// every lookup uses the first one.
#[utoipa::path(
    tag = "Games",
    context_path = "/api",
    responses(
        (status = 201, description = "Game has been created", body = GameResponse),
        (status = 400, description = "Client error", body = ApiErrorResponse),
        (status = 500, description = "Server error", body = ApiErrorResponse),
    ),
    request_body = StoreGameStateRequest,
)]
#[post("/storeGameState")]
pub async fn store_game_state(
    req: Json<StoreGameStateRequest>,
    storage: Data<Storage>,
) -> ApiResult<HttpResponse> {
    let req = req.into_inner();

    validate_name(&req.game_code, ApiError::InvalidGameCode)?;
    for player in &req.players {
        validate_player(player)?;
    }

    let game = storage
        .insert_game(NewGame {
            game_code: req.game_code,
            games_parts: req.games_parts,
            players: req.players,
            join: req.join,
            start_game: req.start_game,
            drawing_time: req.drawing_time,
        })
        .await?;

    info!("Created game {}", game.game_code);

    Ok(HttpResponse::Created().json(GameResponse {
        message: "Game state stored successfully".to_string(),
        game,
    }))
}

/// Retrieve a game by its code
#[utoipa::path(
    tag = "Games",
    context_path = "/api",
    responses(
        (status = 200, description = "Returns the game", body = GameResponse),
        (status = 404, description = "Game not found", body = ApiErrorResponse),
        (status = 500, description = "Server error", body = ApiErrorResponse),
    ),
    params(PathGameCode),
)]
#[get("/getGameData/{game_code}")]
pub async fn get_game_data(
    path: Path<PathGameCode>,
    storage: Data<Storage>,
) -> ApiResult<Json<GameResponse>> {
    let game = storage
        .find_game(&path.game_code)
        .await?
        .ok_or(ApiError::GameNotFound)?;

    Ok(Json(GameResponse {
        message: "Game data retrieved".to_string(),
        game,
    }))
}

/// The request to add a player to a game
#[derive(Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct AddPlayerRequest {
    #[schema(example = "1000")]
    game_code: String,
    player_data: Player,
}

/// Appends a player to the roster of a game and writes the roster back.
///
/// Concurrent appends to the same game may overwrite each other.
async fn append_player(
    storage: &Storage,
    game: GameDocument,
    player: Player,
) -> ApiResult<GameDocument> {
    let mut players = game.players;
    players.push(player);

    storage
        .set_game_players(game.uuid, players)
        .await?
        .ok_or(ApiError::GameNotFound)
}

/// Append a player to the roster of a game
///
/// In contrast to `validateJoinGame`, the player is added regardless of
/// whether the game has already started or is closed for joining.
#[utoipa::path(
    tag = "Games",
    context_path = "/api",
    responses(
        (status = 200, description = "Player has been added", body = GameResponse),
        (status = 400, description = "Client error", body = ApiErrorResponse),
        (status = 404, description = "Game not found", body = ApiErrorResponse),
        (status = 500, description = "Server error", body = ApiErrorResponse),
    ),
    request_body = AddPlayerRequest,
)]
#[put("/updateGameWithPlayer")]
pub async fn update_game_with_player(
    req: Json<AddPlayerRequest>,
    storage: Data<Storage>,
) -> ApiResult<Json<GameResponse>> {
    let req = req.into_inner();
    validate_player(&req.player_data)?;

    let game = storage
        .find_game(&req.game_code)
        .await?
        .ok_or(ApiError::GameNotFound)?;

    let player_name = req.player_data.player_name.clone();
    let game = append_player(&storage, game, req.player_data).await?;

    debug!("Added player {player_name} to game {}", game.game_code);

    Ok(Json(GameResponse {
        message: "Player added to game".to_string(),
        game,
    }))
}

/// The request to change the lobby flags of a game
///
/// All parameter are optional, but at least one of them is required.
#[derive(Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateGameStatusRequest {
    #[schema(example = "1000")]
    game_code: String,
    join: Option<bool>,
    start_game: Option<bool>,
    #[schema(example = 60)]
    drawing_time: Option<i64>,
}

/// Update the lobby flags of a game
///
/// Use this to close a lobby for joining, start the game or set the drawing timer.
/// Only the given fields are changed.
#[utoipa::path(
    tag = "Games",
    context_path = "/api",
    responses(
        (status = 200, description = "Game has been updated", body = GameResponse),
        (status = 400, description = "Client error", body = ApiErrorResponse),
        (status = 404, description = "Game not found", body = ApiErrorResponse),
        (status = 500, description = "Server error", body = ApiErrorResponse),
    ),
    request_body = UpdateGameStatusRequest,
)]
#[put("/updateGameStatus")]
pub async fn update_game_status(
    req: Json<UpdateGameStatusRequest>,
    storage: Data<Storage>,
) -> ApiResult<Json<GameResponse>> {
    let req = req.into_inner();

    let patch = GameStatusPatch {
        join: req.join,
        start_game: req.start_game,
        drawing_time: req.drawing_time,
    };
    if patch.is_empty() {
        return Err(ApiError::EmptyJson);
    }

    let game = storage
        .find_game(&req.game_code)
        .await?
        .ok_or(ApiError::GameNotFound)?;

    let game = storage
        .set_game_status(game.uuid, patch)
        .await?
        .ok_or(ApiError::GameNotFound)?;

    info!(
        "Updated game {}: join={} start_game={} drawing_time={}",
        game.game_code, game.join, game.start_game, game.drawing_time
    );

    Ok(Json(GameResponse {
        message: "Game status updated".to_string(),
        game,
    }))
}

/// The request of a player that wants to join a game
#[derive(Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct JoinGameRequest {
    #[schema(example = "1000")]
    game_code: String,
    player_data: Player,
}

/// The player has been added to the game
#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct JoinGameResponse {
    /// What has been done
    #[schema(example = "Player joined the game")]
    pub message: String,
    /// Always `true`
    #[serde(rename = "canJoin")]
    pub can_join: bool,
    /// The game including the new player
    pub game: GameDocument,
}

/// The game can't be joined
#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct JoinRejectedResponse {
    /// Why the game can't be joined
    #[schema(example = "Room already started")]
    pub message: String,
    /// Always `false`
    #[serde(rename = "canJoin")]
    pub can_join: bool,
}

/// Join a game if it is still open
///
/// A game that has already started can't be joined, regardless of its `join` flag.
/// A rejected join leaves the roster untouched.
#[utoipa::path(
    tag = "Games",
    context_path = "/api",
    responses(
        (status = 200, description = "Player has joined the game", body = JoinGameResponse),
        (status = 400, description = "Game can't be joined or client error", body = JoinRejectedResponse),
        (status = 404, description = "Game not found", body = ApiErrorResponse),
        (status = 500, description = "Server error", body = ApiErrorResponse),
    ),
    request_body = JoinGameRequest,
)]
#[post("/validateJoinGame")]
pub async fn validate_join_game(
    req: Json<JoinGameRequest>,
    storage: Data<Storage>,
) -> ApiResult<HttpResponse> {
    let req = req.into_inner();
    validate_player(&req.player_data)?;

    let game = storage
        .find_game(&req.game_code)
        .await?
        .ok_or(ApiError::GameNotFound)?;

    let rejection = if game.start_game {
        Some("Room already started")
    } else if !game.join {
        Some("Room is closed for joining")
    } else {
        None
    };

    if let Some(message) = rejection {
        info!(
            "Rejected join of {} to game {}: {message}",
            req.player_data.player_name, game.game_code
        );

        return Ok(HttpResponse::BadRequest().json(JoinRejectedResponse {
            message: message.to_string(),
            can_join: false,
        }));
    }

    let player_name = req.player_data.player_name.clone();
    let game = append_player(&storage, game, req.player_data).await?;

    info!("Player {player_name} joined game {}", game.game_code);

    Ok(HttpResponse::Ok().json(JoinGameResponse {
        message: "Player joined the game".to_string(),
        can_join: true,
        game,
    }))
}
