use rorm::fields::types::Json;
use rorm::{and, insert, query, update, Database, FieldAccess, Model};
use uuid::Uuid;

use crate::models::{
    Drawing, DrawingDocument, DrawingInsert, Game, GameDocument, GameInsert, Player,
};
use crate::storage::{GameStatusPatch, NewDrawing, NewGame, StorageResult};

pub(super) async fn insert_game(db: &Database, game: NewGame) -> StorageResult<GameDocument> {
    let uuid = Uuid::new_v4();
    insert!(db, GameInsert)
        .single(&GameInsert {
            uuid,
            game_code: game.game_code,
            number_of_players: game.players.len() as i64,
            games_parts: Json(game.games_parts),
            players: Json(game.players),
            joinable: game.join,
            started: game.start_game,
            drawing_time: game.drawing_time,
        })
        .await?;

    // Read it back to get the creation time set by the database
    let game = query!(db, Game)
        .condition(Game::F.uuid.equals(uuid))
        .one()
        .await?;

    Ok(game.into())
}

/// Codes are not unique, the first created game with the code wins
pub(super) async fn find_game(
    db: &Database,
    game_code: &str,
) -> StorageResult<Option<GameDocument>> {
    Ok(query!(db, Game)
        .condition(Game::F.game_code.equals(game_code))
        .order_asc(Game::F.created_at)
        .optional()
        .await?
        .map(GameDocument::from))
}

async fn find_game_by_uuid(db: &Database, uuid: Uuid) -> StorageResult<Option<GameDocument>> {
    Ok(query!(db, Game)
        .condition(Game::F.uuid.equals(uuid))
        .optional()
        .await?
        .map(GameDocument::from))
}

pub(super) async fn set_game_players(
    db: &Database,
    uuid: Uuid,
    players: Vec<Player>,
) -> StorageResult<Option<GameDocument>> {
    let number_of_players = players.len() as i64;

    update!(db, Game)
        .condition(Game::F.uuid.equals(uuid))
        .set(Game::F.players, Json(players))
        .set(Game::F.number_of_players, number_of_players)
        .exec()
        .await?;

    find_game_by_uuid(db, uuid).await
}

pub(super) async fn set_game_status(
    db: &Database,
    uuid: Uuid,
    patch: GameStatusPatch,
) -> StorageResult<Option<GameDocument>> {
    // An empty patch has nothing to write, the current state is returned as is
    if let Ok(update) = update!(db, Game)
        .condition(Game::F.uuid.equals(uuid))
        .begin_dyn_set()
        .set_if(Game::F.joinable, patch.join)
        .set_if(Game::F.started, patch.start_game)
        .set_if(Game::F.drawing_time, patch.drawing_time)
        .finish_dyn_set()
    {
        update.exec().await?;
    }

    find_game_by_uuid(db, uuid).await
}

pub(super) async fn insert_drawing(
    db: &Database,
    drawing: NewDrawing,
) -> StorageResult<DrawingDocument> {
    let uuid = Uuid::new_v4();
    insert!(db, DrawingInsert)
        .single(&DrawingInsert {
            uuid,
            game_code: drawing.game_code,
            player_name: drawing.player_name,
            player_part: drawing.player_part,
            drawing_points: Json(drawing.drawing_points),
            player_drawing: drawing.player_drawing,
            is_completed: drawing.is_completed,
            player_id: drawing.player_id,
        })
        .await?;

    let drawing = query!(db, Drawing)
        .condition(Drawing::F.uuid.equals(uuid))
        .one()
        .await?;

    Ok(drawing.into())
}

pub(super) async fn find_drawing(
    db: &Database,
    game_code: &str,
    player_name: &str,
    player_part: &str,
) -> StorageResult<Option<DrawingDocument>> {
    Ok(query!(db, Drawing)
        .condition(and!(
            Drawing::F.game_code.equals(game_code),
            Drawing::F.player_name.equals(player_name),
            Drawing::F.player_part.equals(player_part)
        ))
        .order_asc(Drawing::F.created_at)
        .optional()
        .await?
        .map(DrawingDocument::from))
}

pub(super) async fn completed_drawings(
    db: &Database,
    game_code: &str,
) -> StorageResult<Vec<DrawingDocument>> {
    Ok(query!(db, Drawing)
        .condition(and!(
            Drawing::F.game_code.equals(game_code),
            Drawing::F.is_completed.equals(true)
        ))
        .order_asc(Drawing::F.created_at)
        .all()
        .await?
        .into_iter()
        .map(DrawingDocument::from)
        .collect())
}

pub(super) async fn completed_player_names(
    db: &Database,
    game_code: &str,
    player_part: &str,
) -> StorageResult<Vec<String>> {
    Ok(query!(db, (Drawing::F.player_name,))
        .condition(and!(
            Drawing::F.game_code.equals(game_code),
            Drawing::F.player_part.equals(player_part),
            Drawing::F.is_completed.equals(true)
        ))
        .all()
        .await?
        .into_iter()
        .map(|(player_name,)| player_name)
        .collect())
}

pub(super) async fn count_games(db: &Database) -> StorageResult<u64> {
    let (count,) = query!(db, (Game::F.uuid.count(),)).one().await?;
    Ok(count as u64)
}

pub(super) async fn count_drawings(db: &Database) -> StorageResult<u64> {
    let (count,) = query!(db, (Drawing::F.uuid.count(),)).one().await?;
    Ok(count as u64)
}
