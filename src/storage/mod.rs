//! The storage layer for games and drawings
//!
//! Every operation is a single logical step against one collection.
//! Lookups by game code take the first matching game, codes are not unique.

use rorm::Database;
use uuid::Uuid;

use crate::models::{DrawingDocument, DrawingPoint, GameDocument, Player};

mod database;
#[cfg(test)]
pub(crate) mod memory;

/// The result of a storage operation
pub type StorageResult<T> = Result<T, rorm::Error>;

/// A game that is about to be created
#[derive(Debug, Clone)]
pub struct NewGame {
    /// The code of the lobby
    pub game_code: String,
    /// The parts of the drawing pipeline
    pub games_parts: Vec<String>,
    /// The initial roster
    pub players: Vec<Player>,
    /// Whether players may join
    pub join: bool,
    /// Whether the game has started
    pub start_game: bool,
    /// Seconds per part
    pub drawing_time: i64,
}

/// A drawing submission that is about to be stored
#[derive(Debug, Clone)]
pub struct NewDrawing {
    /// The code of the game
    pub game_code: String,
    /// The player whose character is drawn
    pub player_name: String,
    /// The drawn part
    pub player_part: String,
    /// The raw strokes
    pub drawing_points: Vec<DrawingPoint>,
    /// The rendered image
    pub player_drawing: String,
    /// Whether the part is finished
    pub is_completed: bool,
    /// Denormalized player reference
    pub player_id: Option<i64>,
}

/// Lobby fields to change, `None` leaves the stored value untouched
#[derive(Debug, Clone, Default)]
pub struct GameStatusPatch {
    /// New value for `join`
    pub join: Option<bool>,
    /// New value for `start_game`
    pub start_game: Option<bool>,
    /// New value for `drawing_time`
    pub drawing_time: Option<i64>,
}

impl GameStatusPatch {
    /// Returns `true` if no field would be changed
    pub fn is_empty(&self) -> bool {
        self.join.is_none() && self.start_game.is_none() && self.drawing_time.is_none()
    }
}

/// Handle to the storage backend, shared between all workers
#[derive(Clone)]
pub enum Storage {
    /// The postgres database
    Database(Database),
    /// Process local storage used by the test suite
    #[cfg(test)]
    Memory(memory::MemoryStorage),
}

impl Storage {
    /// Store a new game and return it
    pub async fn insert_game(&self, game: NewGame) -> StorageResult<GameDocument> {
        match self {
            Storage::Database(db) => database::insert_game(db, game).await,
            #[cfg(test)]
            Storage::Memory(mem) => Ok(mem.insert_game(game).await),
        }
    }

    /// Find the first game with the given code
    pub async fn find_game(&self, game_code: &str) -> StorageResult<Option<GameDocument>> {
        match self {
            Storage::Database(db) => database::find_game(db, game_code).await,
            #[cfg(test)]
            Storage::Memory(mem) => Ok(mem.find_game(game_code).await),
        }
    }

    /// Replace the roster of a game.
    ///
    /// `number_of_players` is set to the length of the new roster in the same write.
    pub async fn set_game_players(
        &self,
        uuid: Uuid,
        players: Vec<Player>,
    ) -> StorageResult<Option<GameDocument>> {
        match self {
            Storage::Database(db) => database::set_game_players(db, uuid, players).await,
            #[cfg(test)]
            Storage::Memory(mem) => Ok(mem.set_game_players(uuid, players).await),
        }
    }

    /// Change the lobby flags of a game
    pub async fn set_game_status(
        &self,
        uuid: Uuid,
        patch: GameStatusPatch,
    ) -> StorageResult<Option<GameDocument>> {
        match self {
            Storage::Database(db) => database::set_game_status(db, uuid, patch).await,
            #[cfg(test)]
            Storage::Memory(mem) => Ok(mem.set_game_status(uuid, patch).await),
        }
    }

    /// Store a new drawing submission and return it
    pub async fn insert_drawing(&self, drawing: NewDrawing) -> StorageResult<DrawingDocument> {
        match self {
            Storage::Database(db) => database::insert_drawing(db, drawing).await,
            #[cfg(test)]
            Storage::Memory(mem) => Ok(mem.insert_drawing(drawing).await),
        }
    }

    /// Find the first drawing of a player for a part
    pub async fn find_drawing(
        &self,
        game_code: &str,
        player_name: &str,
        player_part: &str,
    ) -> StorageResult<Option<DrawingDocument>> {
        match self {
            Storage::Database(db) => {
                database::find_drawing(db, game_code, player_name, player_part).await
            }
            #[cfg(test)]
            Storage::Memory(mem) => Ok(mem.find_drawing(game_code, player_name, player_part).await),
        }
    }

    /// All completed drawings of a game
    pub async fn completed_drawings(&self, game_code: &str) -> StorageResult<Vec<DrawingDocument>> {
        match self {
            Storage::Database(db) => database::completed_drawings(db, game_code).await,
            #[cfg(test)]
            Storage::Memory(mem) => Ok(mem.completed_drawings(game_code).await),
        }
    }

    /// The names of the players with a completed drawing of the given part.
    ///
    /// A player occurs once per completed submission.
    pub async fn completed_player_names(
        &self,
        game_code: &str,
        player_part: &str,
    ) -> StorageResult<Vec<String>> {
        match self {
            Storage::Database(db) => {
                database::completed_player_names(db, game_code, player_part).await
            }
            #[cfg(test)]
            Storage::Memory(mem) => Ok(mem.completed_player_names(game_code, player_part).await),
        }
    }

    /// Count of all stored games
    pub async fn count_games(&self) -> StorageResult<u64> {
        match self {
            Storage::Database(db) => database::count_games(db).await,
            #[cfg(test)]
            Storage::Memory(mem) => Ok(mem.count_games().await),
        }
    }

    /// Count of all stored drawings
    pub async fn count_drawings(&self) -> StorageResult<u64> {
        match self {
            Storage::Database(db) => database::count_drawings(db).await,
            #[cfg(test)]
            Storage::Memory(mem) => Ok(mem.count_drawings().await),
        }
    }
}
