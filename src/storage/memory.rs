use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::models::{DrawingDocument, GameDocument, Player};
use crate::storage::{GameStatusPatch, NewDrawing, NewGame};

#[derive(Default)]
struct Collections {
    games: Vec<GameDocument>,
    drawings: Vec<DrawingDocument>,
}

/// Keeps both collections in insertion order, so "first match" means first inserted
#[derive(Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<Mutex<Collections>>,
}

impl MemoryStorage {
    pub(crate) async fn insert_game(&self, game: NewGame) -> GameDocument {
        let game = GameDocument {
            uuid: Uuid::new_v4(),
            game_code: game.game_code,
            games_parts: game.games_parts,
            number_of_players: game.players.len() as i64,
            players: game.players,
            join: game.join,
            start_game: game.start_game,
            drawing_time: game.drawing_time,
            created_at: Utc::now(),
        };
        self.inner.lock().await.games.push(game.clone());
        game
    }

    pub(crate) async fn find_game(&self, game_code: &str) -> Option<GameDocument> {
        self.inner
            .lock()
            .await
            .games
            .iter()
            .find(|g| g.game_code == game_code)
            .cloned()
    }

    pub(crate) async fn set_game_players(
        &self,
        uuid: Uuid,
        players: Vec<Player>,
    ) -> Option<GameDocument> {
        let mut inner = self.inner.lock().await;
        let game = inner.games.iter_mut().find(|g| g.uuid == uuid)?;
        game.number_of_players = players.len() as i64;
        game.players = players;
        Some(game.clone())
    }

    pub(crate) async fn set_game_status(
        &self,
        uuid: Uuid,
        patch: GameStatusPatch,
    ) -> Option<GameDocument> {
        let mut inner = self.inner.lock().await;
        let game = inner.games.iter_mut().find(|g| g.uuid == uuid)?;
        if let Some(join) = patch.join {
            game.join = join;
        }
        if let Some(start_game) = patch.start_game {
            game.start_game = start_game;
        }
        if let Some(drawing_time) = patch.drawing_time {
            game.drawing_time = drawing_time;
        }
        Some(game.clone())
    }

    pub(crate) async fn insert_drawing(&self, drawing: NewDrawing) -> DrawingDocument {
        let drawing = DrawingDocument {
            uuid: Uuid::new_v4(),
            game_code: drawing.game_code,
            player_name: drawing.player_name,
            player_part: drawing.player_part,
            drawing_points: drawing.drawing_points,
            player_drawing: drawing.player_drawing,
            is_completed: drawing.is_completed,
            player_id: drawing.player_id,
            created_at: Utc::now(),
        };
        self.inner.lock().await.drawings.push(drawing.clone());
        drawing
    }

    pub(crate) async fn find_drawing(
        &self,
        game_code: &str,
        player_name: &str,
        player_part: &str,
    ) -> Option<DrawingDocument> {
        self.inner
            .lock()
            .await
            .drawings
            .iter()
            .find(|d| {
                d.game_code == game_code
                    && d.player_name == player_name
                    && d.player_part == player_part
            })
            .cloned()
    }

    pub(crate) async fn completed_drawings(&self, game_code: &str) -> Vec<DrawingDocument> {
        self.inner
            .lock()
            .await
            .drawings
            .iter()
            .filter(|d| d.game_code == game_code && d.is_completed)
            .cloned()
            .collect()
    }

    pub(crate) async fn completed_player_names(
        &self,
        game_code: &str,
        player_part: &str,
    ) -> Vec<String> {
        self.inner
            .lock()
            .await
            .drawings
            .iter()
            .filter(|d| d.game_code == game_code && d.player_part == player_part && d.is_completed)
            .map(|d| d.player_name.clone())
            .collect()
    }

    pub(crate) async fn count_games(&self) -> u64 {
        self.inner.lock().await.games.len() as u64
    }

    pub(crate) async fn count_drawings(&self) -> u64 {
        self.inner.lock().await.drawings.len() as u64
    }
}
