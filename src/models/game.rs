use chrono::{DateTime, Utc};
use rorm::fields::types::Json;
use rorm::{Model, Patch};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A game lobby identified by the code players type in to join it
///
/// The roster and the configured parts are embedded as json documents,
/// as they are always read and written as a whole.
#[derive(Model)]
pub struct Game {
    /// Primary key of the game
    #[rorm(primary_key)]
    pub uuid: Uuid,

    /// The code of the lobby.
    ///
    /// This is not unique, lookups use the first match.
    #[rorm(max_length = 255, index)]
    pub game_code: String,

    /// The body parts every player draws, in order
    pub games_parts: Json<Vec<String>>,

    /// The roster of the game
    pub players: Json<Vec<Player>>,

    /// Count of players, kept in sync with `players` on every roster write
    pub number_of_players: i64,

    /// Whether new players may join
    pub joinable: bool,

    /// Whether the game has started
    pub started: bool,

    /// Seconds a player has to draw a single part
    pub drawing_time: i64,

    /// The point in time the game was created
    #[rorm(auto_create_time)]
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Patch)]
#[rorm(model = "Game")]
pub(crate) struct GameInsert {
    pub(crate) uuid: Uuid,
    pub(crate) game_code: String,
    pub(crate) games_parts: Json<Vec<String>>,
    pub(crate) players: Json<Vec<Player>>,
    pub(crate) number_of_players: i64,
    pub(crate) joinable: bool,
    pub(crate) started: bool,
    pub(crate) drawing_time: i64,
}

/// A player of a game
///
/// `player_body_parts_with_player_names` pairs every body part with the name
/// of the player that drew this part for this player's character.
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Player {
    /// The name of the player, unique within a game by convention
    #[schema(example = "test")]
    pub player_name: String,
    /// Ordinal chosen by the client
    #[schema(example = 82)]
    pub player_number: i64,
    /// The final composed character image
    #[serde(default)]
    pub player_image: String,
    /// Every body part paired with the name of the player that drew it
    #[serde(default)]
    pub player_body_parts_with_player_names: Vec<String>,
    /// The images of the completed parts, in completion order
    #[serde(default)]
    pub player_body_images: Vec<String>,
    /// Progress of the player through the parts of the game
    #[serde(default)]
    pub player_current_step: Vec<i64>,
}

/// A game as it is sent to clients
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct GameDocument {
    /// The identifier of the game
    #[serde(rename = "_id")]
    pub uuid: Uuid,
    /// The code of the lobby
    #[schema(example = "1000")]
    pub game_code: String,
    /// The body parts every player draws, in order
    pub games_parts: Vec<String>,
    /// The roster of the game
    pub players: Vec<Player>,
    /// Count of players in the roster
    #[schema(example = 1)]
    pub number_of_players: i64,
    /// Whether new players may join
    pub join: bool,
    /// Whether the game has started
    pub start_game: bool,
    /// Seconds a player has to draw a single part
    #[schema(example = 60)]
    pub drawing_time: i64,
    /// The point in time the game was created
    pub created_at: DateTime<Utc>,
}

impl From<Game> for GameDocument {
    fn from(game: Game) -> Self {
        Self {
            uuid: game.uuid,
            game_code: game.game_code,
            games_parts: game.games_parts.0,
            players: game.players.0,
            number_of_players: game.number_of_players,
            join: game.joinable,
            start_game: game.started,
            drawing_time: game.drawing_time,
            created_at: DateTime::from_naive_utc_and_offset(game.created_at, Utc),
        }
    }
}
