use actix_web::http::StatusCode;
use actix_web::test::{call_service, init_service, read_body_json, TestRequest};
use actix_web::web::{route, Data};
use actix_web::App;
use serde_json::{json, Value};

use crate::server::handler::{
    DrawingResponse, GameResponse, GetDrawingResponse, HealthResponse, IncompletePlayersResponse,
    JoinGameResponse, JoinRejectedResponse,
};
use crate::server::middleware::handle_not_found;
use crate::server::{api_routes, json_config};
use crate::storage::memory::MemoryStorage;
use crate::storage::Storage;

macro_rules! test_app {
    () => {
        init_service(
            App::new()
                .app_data(json_config(1024 * 1024))
                .app_data(Data::new(Storage::Memory(MemoryStorage::default())))
                .configure(api_routes)
                .default_service(route().to(handle_not_found)),
        )
        .await
    };
}

macro_rules! send {
    ($app:expr, $req:expr) => {
        call_service(&$app, $req.to_request()).await
    };
}

/// Sends a request and parses the json body after checking the status
macro_rules! send_ok {
    ($app:expr, $req:expr, $status:expr) => {{
        let res = send!($app, $req);
        assert_eq!(res.status(), $status);
        read_body_json(res).await
    }};
}

macro_rules! incomplete {
    ($app:expr, $part:expr) => {{
        let body: IncompletePlayersResponse = send_ok!(
            $app,
            get(&format!("/api/incompleteUsers/1000/{}", $part)),
            StatusCode::OK
        );
        body.incomplete_players
    }};
}

fn post(uri: &str, body: Value) -> TestRequest {
    TestRequest::post().uri(uri).set_json(body)
}

fn put(uri: &str, body: Value) -> TestRequest {
    TestRequest::put().uri(uri).set_json(body)
}

fn get(uri: &str) -> TestRequest {
    TestRequest::get().uri(uri)
}

fn player(name: &str, number: i64) -> Value {
    json!({
        "player_name": name,
        "player_number": number,
        "player_image": "",
        "player_body_parts_with_player_names": [],
        "player_body_images": [],
        "player_current_step": [0],
    })
}

fn create_game() -> TestRequest {
    post(
        "/api/storeGameState",
        json!({
            "game_code": "1000",
            "games_Parts": ["Hat", "Head"],
            "players": [],
            "join": true,
            "start_game": false,
        }),
    )
}

fn join(name: &str, number: i64) -> TestRequest {
    post(
        "/api/validateJoinGame",
        json!({"game_code": "1000", "player_data": player(name, number)}),
    )
}

fn submit_drawing(player_name: &str, part: &str, is_completed: bool) -> TestRequest {
    post(
        "/api/updateDrawingStatus",
        json!({
            "game_code": "1000",
            "player_name": player_name,
            "player_part": part,
            "is_completed": is_completed,
            "player_drawing": "data:image/png;base64,AAAA",
            "drawing_points": [
                {"offsetDx": 1.0, "offsetDy": 2.5, "pointType": 0, "pressure": 1.0},
                {"offsetDx": 3.0, "offsetDy": 4.0, "pointType": 1, "pressure": 0.5},
            ],
        }),
    )
}

#[actix_web::test]
async fn create_and_fetch_game() {
    let app = test_app!();
    let created: GameResponse = send_ok!(app, create_game(), StatusCode::CREATED);

    assert_eq!(created.game.game_code, "1000");
    assert_eq!(created.game.games_parts, vec!["Hat", "Head"]);
    assert!(created.game.players.is_empty());
    assert_eq!(created.game.number_of_players, 0);
    assert!(created.game.join);
    assert!(!created.game.start_game);

    let fetched: GameResponse = send_ok!(app, get("/api/getGameData/1000"), StatusCode::OK);
    assert_eq!(fetched.game, created.game);
}

#[actix_web::test]
async fn game_json_uses_wire_field_names() {
    let app = test_app!();
    send!(app, create_game());

    let body: Value = send_ok!(app, get("/api/getGameData/1000"), StatusCode::OK);
    let game = &body["game"];
    for field in [
        "_id",
        "game_code",
        "games_parts",
        "players",
        "number_of_players",
        "join",
        "start_game",
        "drawing_time",
        "created_at",
    ] {
        assert!(game.get(field).is_some(), "missing {field}");
    }
    assert!(body["message"].is_string());
}

#[actix_web::test]
async fn unknown_game_is_not_found() {
    let app = test_app!();

    let body: Value = send_ok!(app, get("/api/getGameData/404"), StatusCode::NOT_FOUND);
    assert_eq!(body["status_code"], 1100);

    let res = send!(app, get("/api/incompleteUsers/404/Hat"));
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = send!(
        app,
        post(
            "/api/validateJoinGame",
            json!({"game_code": "404", "player_data": player("test", 1)}),
        )
    );
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = send!(
        app,
        put(
            "/api/updateGameWithPlayer",
            json!({"game_code": "404", "player_data": player("test", 1)}),
        )
    );
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = send!(
        app,
        put(
            "/api/updateGameStatus",
            json!({"game_code": "404", "start_game": true}),
        )
    );
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn invalid_bodies_are_rejected() {
    let app = test_app!();

    // missing game code
    let body: Value = send_ok!(
        app,
        post("/api/storeGameState", json!({"games_parts": ["Hat"]})),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(body["status_code"], 1000);

    // empty game code
    let body: Value = send_ok!(
        app,
        post("/api/storeGameState", json!({"game_code": ""})),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(body["status_code"], 1002);

    // unknown field
    let res = send!(
        app,
        post(
            "/api/storeGameState",
            json!({"game_code": "1000", "owner": "mallory"}),
        )
    );
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // wrong type
    let res = send!(
        app,
        post(
            "/api/updateDrawingStatus",
            json!({"game_code": "1000", "player_name": "test", "player_part": "Hat", "is_completed": "yes"}),
        )
    );
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // missing part
    let res = send!(
        app,
        post(
            "/api/updateDrawingStatus",
            json!({"game_code": "1000", "player_name": "test"}),
        )
    );
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // empty part
    let body: Value = send_ok!(
        app,
        post(
            "/api/updateDrawingStatus",
            json!({"game_code": "1000", "player_name": "test", "player_part": " "}),
        ),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(body["status_code"], 1004);

    // player without number
    send!(app, create_game());
    let res = send!(
        app,
        post(
            "/api/validateJoinGame",
            json!({"game_code": "1000", "player_data": {"player_name": "test"}}),
        )
    );
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // player without name
    let body: Value = send_ok!(app, join("", 1), StatusCode::BAD_REQUEST);
    assert_eq!(body["status_code"], 1003);
}

#[actix_web::test]
async fn join_then_start_rejects_further_joins() {
    let app = test_app!();
    send!(app, create_game());

    let joined: JoinGameResponse = send_ok!(app, join("test", 82), StatusCode::OK);
    assert!(joined.can_join);
    assert_eq!(joined.game.players.len(), 1);
    assert_eq!(joined.game.number_of_players, 1);
    assert_eq!(joined.game.players[0].player_name, "test");
    assert_eq!(joined.game.players[0].player_number, 82);

    let updated: GameResponse = send_ok!(
        app,
        put(
            "/api/updateGameStatus",
            json!({"game_code": "1000", "start_game": true}),
        ),
        StatusCode::OK
    );
    assert!(updated.game.start_game);
    // untouched flags keep their value
    assert!(updated.game.join);

    let rejected: JoinRejectedResponse =
        send_ok!(app, join("second", 7), StatusCode::BAD_REQUEST);
    assert!(!rejected.can_join);
    assert_eq!(rejected.message, "Room already started");

    let game: GameResponse = send_ok!(app, get("/api/getGameData/1000"), StatusCode::OK);
    assert_eq!(game.game.players.len(), 1);
    assert_eq!(game.game.number_of_players, 1);
}

#[actix_web::test]
async fn closed_lobby_rejects_joins() {
    let app = test_app!();
    send!(app, create_game());

    let res = send!(
        app,
        put(
            "/api/updateGameStatus",
            json!({"game_code": "1000", "join": false}),
        )
    );
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = send_ok!(app, join("test", 1), StatusCode::BAD_REQUEST);
    assert_eq!(body["canJoin"], false);
    assert_eq!(body["message"], "Room is closed for joining");
    assert!(body.get("game").is_none());

    let game: GameResponse = send_ok!(app, get("/api/getGameData/1000"), StatusCode::OK);
    assert!(game.game.players.is_empty());
    assert_eq!(game.game.number_of_players, 0);
}

#[actix_web::test]
async fn started_game_rejects_joins_even_if_open() {
    let app = test_app!();
    send!(app, create_game());
    send!(
        app,
        put(
            "/api/updateGameStatus",
            json!({"game_code": "1000", "start_game": true, "join": true}),
        )
    );

    let rejected: JoinRejectedResponse = send_ok!(app, join("test", 1), StatusCode::BAD_REQUEST);
    assert_eq!(rejected.message, "Room already started");
}

#[actix_web::test]
async fn update_game_with_player_skips_lobby_checks() {
    let app = test_app!();
    send!(app, create_game());
    send!(
        app,
        put(
            "/api/updateGameStatus",
            json!({"game_code": "1000", "start_game": true, "join": false}),
        )
    );

    for (i, name) in ["alice", "bob"].into_iter().enumerate() {
        let body: GameResponse = send_ok!(
            app,
            put(
                "/api/updateGameWithPlayer",
                json!({"game_code": "1000", "player_data": player(name, i as i64)}),
            ),
            StatusCode::OK
        );
        assert_eq!(body.game.number_of_players, i as i64 + 1);
        assert_eq!(body.game.players.len(), i + 1);
        assert_eq!(body.game.players[i].player_name, name);
    }
}

#[actix_web::test]
async fn update_game_status_sets_timer_and_rejects_empty_patch() {
    let app = test_app!();
    send!(app, create_game());

    let body: GameResponse = send_ok!(
        app,
        put(
            "/api/updateGameStatus",
            json!({"game_code": "1000", "drawing_time": 90}),
        ),
        StatusCode::OK
    );
    assert_eq!(body.game.drawing_time, 90);
    assert!(body.game.join);
    assert!(!body.game.start_game);

    let body: Value = send_ok!(
        app,
        put("/api/updateGameStatus", json!({"game_code": "1000"})),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(body["status_code"], 1001);
}

#[actix_web::test]
async fn completion_tracking_per_part() {
    let app = test_app!();
    send!(app, create_game());
    send!(app, join("test", 82));
    send!(app, join("other", 3));

    assert_eq!(incomplete!(app, "Hat"), vec!["test", "other"]);

    let res = send!(app, submit_drawing("test", "Hat", true));
    assert_eq!(res.status(), StatusCode::CREATED);

    assert_eq!(incomplete!(app, "Hat"), vec!["other"]);
    assert_eq!(incomplete!(app, "Head"), vec!["test", "other"]);
}

#[actix_web::test]
async fn unfinished_drawings_count_as_incomplete() {
    let app = test_app!();
    send!(app, create_game());
    send!(app, join("test", 82));

    send!(app, submit_drawing("test", "Hat", false));
    assert_eq!(incomplete!(app, "Hat"), vec!["test"]);

    // Parts are not checked against the game
    assert_eq!(incomplete!(app, "Tail"), vec!["test"]);
}

#[actix_web::test]
async fn completions_of_other_games_are_ignored() {
    let app = test_app!();
    send!(app, create_game());
    send!(app, join("test", 82));

    let res = send!(
        app,
        post(
            "/api/updateDrawingStatus",
            json!({"game_code": "2000", "player_name": "test", "player_part": "Hat", "is_completed": true}),
        )
    );
    assert_eq!(res.status(), StatusCode::CREATED);

    assert_eq!(incomplete!(app, "Hat"), vec!["test"]);
}

#[actix_web::test]
async fn fetch_drawing() {
    let app = test_app!();

    let body: Value = send_ok!(
        app,
        get("/api/getDrawing/1000/test/Hat"),
        StatusCode::NOT_FOUND
    );
    assert_eq!(body["status_code"], 1101);

    let stored: DrawingResponse = send_ok!(
        app,
        submit_drawing("test", "Hat", false),
        StatusCode::CREATED
    );
    assert_eq!(stored.drawing.drawing_points.len(), 2);
    assert_eq!(stored.drawing.player_drawing, "data:image/png;base64,AAAA");
    // resubmission adds a second record, the first one is returned
    send!(app, submit_drawing("test", "Hat", true));

    let body: Value = send_ok!(app, get("/api/getDrawing/1000/test/Hat"), StatusCode::OK);
    assert_eq!(body["drawing_points"][0]["offsetDy"], 2.5);
    assert_eq!(body["drawing_points"][1]["pointType"], 1);
    let drawing: GetDrawingResponse = serde_json::from_value(body).unwrap();
    assert!(!drawing.is_completed);
    assert_eq!(drawing.drawing_points, stored.drawing.drawing_points);
}

#[actix_web::test]
async fn list_completed_drawings() {
    let app = test_app!();

    let res = send!(app, get("/api/completedDrawings/1000"));
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    send!(app, submit_drawing("test", "Hat", false));
    let res = send!(app, get("/api/completedDrawings/1000"));
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    send!(app, submit_drawing("test", "Hat", true));
    send!(app, submit_drawing("other", "Head", true));

    let body: Value = send_ok!(app, get("/api/completedDrawings/1000"), StatusCode::OK);
    let drawings = body.as_array().unwrap();
    assert_eq!(drawings.len(), 2);
    assert!(drawings.iter().all(|d| d["is_completed"] == true));
    assert_eq!(drawings[0]["player_name"], "test");
    assert_eq!(drawings[1]["player_part"], "Head");
}

#[actix_web::test]
async fn health_counts_records() {
    let app = test_app!();
    send!(app, create_game());
    send!(app, submit_drawing("test", "Hat", true));
    send!(app, submit_drawing("test", "Head", false));

    let body: HealthResponse = send_ok!(app, get("/api/health"), StatusCode::OK);
    assert_eq!(body.games, 1);
    assert_eq!(body.drawings, 2);
}

#[actix_web::test]
async fn unknown_route_is_not_found() {
    let app = test_app!();

    let body: Value = send_ok!(app, get("/api/doesNotExist"), StatusCode::NOT_FOUND);
    assert_eq!(body["status_code"], 1102);
}

#[actix_web::test]
async fn oversized_names_are_rejected() {
    let app = test_app!();
    let long = "a".repeat(256);

    let body: Value = send_ok!(
        app,
        post("/api/storeGameState", json!({"game_code": &long})),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(body["status_code"], 1002);

    let body: Value = send_ok!(
        app,
        post(
            "/api/updateDrawingStatus",
            json!({"game_code": "1000", "player_name": &long, "player_part": "Hat"}),
        ),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(body["status_code"], 1003);

    let body: Value = send_ok!(
        app,
        post(
            "/api/updateDrawingStatus",
            json!({"game_code": "1000", "player_name": "test", "player_part": &long}),
        ),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(body["status_code"], 1004);

    send!(app, create_game());
    let body: Value = send_ok!(app, join(&long, 1), StatusCode::BAD_REQUEST);
    assert_eq!(body["status_code"], 1003);

    // nothing has been stored by the rejected requests
    let health: HealthResponse = send_ok!(app, get("/api/health"), StatusCode::OK);
    assert_eq!(health.games, 1);
    assert_eq!(health.drawings, 0);

    // the column size itself is fine
    let res = send!(
        app,
        post(
            "/api/storeGameState",
            json!({"game_code": "a".repeat(255)}),
        )
    );
    assert_eq!(res.status(), StatusCode::CREATED);
}

#[actix_web::test]
async fn shared_game_code_resolves_to_first_created_game() {
    let app = test_app!();
    let first: GameResponse = send_ok!(app, create_game(), StatusCode::CREATED);
    let second: GameResponse = send_ok!(app, create_game(), StatusCode::CREATED);
    assert_ne!(first.game.uuid, second.game.uuid);

    let joined: JoinGameResponse = send_ok!(app, join("test", 82), StatusCode::OK);
    assert_eq!(joined.game.uuid, first.game.uuid);

    // writes to the first game don't change which game the code resolves to
    send!(
        app,
        put(
            "/api/updateGameStatus",
            json!({"game_code": "1000", "drawing_time": 30}),
        )
    );
    let fetched: GameResponse = send_ok!(app, get("/api/getGameData/1000"), StatusCode::OK);
    assert_eq!(fetched.game.uuid, first.game.uuid);
    assert_eq!(fetched.game.players.len(), 1);
    assert_eq!(fetched.game.drawing_time, 30);

    assert_eq!(incomplete!(app, "Hat"), vec!["test"]);
}
