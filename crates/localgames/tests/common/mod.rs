//! Shared test fixtures: an in-memory fake of the Local Games REST service.
//!
//! `FakeBackend` implements `HttpTransport`, so an `ApiClient` built on it
//! runs its real request wrapper and facets while the "server" is a few
//! vectors behind a mutex. Every request is logged for inspection, and a
//! test can queue canned responses that pre-empt routing (to simulate a
//! 500 or a garbage body).

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use localgames::{
    ApiClient, CreateGame, Game, GameId, GameStatus, GameUpdate,
    HttpRequest, HttpResponse, HttpTransport, Method, Player, PlayerId,
    PlayerPatch, TransportError,
};
use serde::Serialize;
use serde::de::DeserializeOwned;

pub const BASE_URL: &str = "http://fake.test";
pub const CREATED_AT: &str = "2024-01-01T00:00:00Z";

#[derive(Default)]
struct State {
    games: Vec<Game>,
    players: Vec<Player>,
    session: Option<PlayerId>,
    next_id: u64,
}

impl State {
    fn next_id(&mut self, kind: &str) -> String {
        self.next_id += 1;
        format!("{kind}-{}", self.next_id)
    }
}

/// In-memory REST service. Cheap to clone; clones share state.
#[derive(Clone, Default)]
pub struct FakeBackend {
    state: Arc<Mutex<State>>,
    scripted: Arc<Mutex<VecDeque<HttpResponse>>>,
    log: Arc<Mutex<Vec<HttpRequest>>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next request get this response instead of being routed.
    pub fn script(&self, status: u16, status_text: &str, body: &str) {
        self.scripted.lock().unwrap().push_back(HttpResponse {
            status,
            status_text: status_text.to_string(),
            body: body.as_bytes().to_vec(),
        });
    }

    /// Every request received so far, oldest first.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.log.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests().pop().expect("no request was sent")
    }

    /// Seeds a player directly, bypassing the API.
    pub fn seed_player(&self, username: &str) -> Player {
        let mut state = self.state.lock().unwrap();
        let player = Player {
            id: PlayerId::new(state.next_id("player")),
            username: username.to_string(),
            session_id: None,
            created_at: Some(CREATED_AT.to_string()),
            last_seen: Some(CREATED_AT.to_string()),
        };
        state.players.push(player.clone());
        player
    }

    pub fn has_session(&self) -> bool {
        self.state.lock().unwrap().session.is_some()
    }

    fn route(&self, request: &HttpRequest) -> HttpResponse {
        let Some(path) = request.url.strip_prefix(BASE_URL) else {
            return not_found();
        };
        if path == "/health" && request.method == Method::Get {
            return ok(&serde_json::json!({
                "status": "ok",
                "message": "server is running",
            }));
        }
        let Some(path) = path.strip_prefix("/api") else {
            return not_found();
        };
        let segments: Vec<&str> =
            path.trim_start_matches('/').split('/').collect();

        let mut state = self.state.lock().unwrap();
        match (request.method, segments.as_slice()) {
            // -- games ------------------------------------------------------
            (Method::Get, ["games"]) => ok(&state.games),
            (Method::Post, ["games"]) => {
                let Some(create) = decode::<CreateGame>(request) else {
                    return bad_request();
                };
                let game = Game {
                    id: GameId::new(state.next_id("game")),
                    game_type: create.game_type,
                    players: 0,
                    max_players: create.max_players.unwrap_or(8),
                    created_at: CREATED_AT.to_string(),
                    status: Some(GameStatus::Waiting),
                    room_code: None,
                    game_config: create.game_config,
                };
                state.games.push(game.clone());
                created(&game)
            }
            (Method::Get, ["games", id]) => match find_game(&mut state, id) {
                Some(game) => ok(&*game),
                None => not_found(),
            },
            (Method::Put, ["games", id]) => {
                let Some(update) = decode::<GameUpdate>(request) else {
                    return bad_request();
                };
                let Some(game) = find_game(&mut state, id) else {
                    return not_found();
                };
                if let Some(game_type) = update.game_type {
                    game.game_type = game_type;
                }
                if let Some(max_players) = update.max_players {
                    game.max_players = max_players;
                }
                if update.status.is_some() {
                    game.status = update.status;
                }
                if update.game_config.is_some() {
                    game.game_config = update.game_config;
                }
                ok(&*game)
            }
            (Method::Delete, ["games", id]) => {
                let before = state.games.len();
                state.games.retain(|g| g.id.as_str() != *id);
                if state.games.len() == before {
                    not_found()
                } else {
                    no_content()
                }
            }
            (Method::Post, ["games", id, "join"]) => {
                let Some(game) = find_game(&mut state, id) else {
                    return not_found();
                };
                if game.is_full() {
                    return status(400, "Bad Request");
                }
                game.players += 1;
                ok(&*game)
            }
            (Method::Post, ["games", id, "leave"]) => {
                let Some(game) = find_game(&mut state, id) else {
                    return not_found();
                };
                game.players = game.players.saturating_sub(1);
                no_content()
            }

            // -- players ----------------------------------------------------
            (Method::Get, ["players"]) => ok(&state.players),
            (Method::Post, ["players"]) => {
                let Some(body) = decode::<serde_json::Value>(request) else {
                    return bad_request();
                };
                let Some(name) = body["name"].as_str() else {
                    return bad_request();
                };
                let player = Player {
                    id: PlayerId::new(state.next_id("player")),
                    username: name.to_string(),
                    session_id: None,
                    created_at: Some(CREATED_AT.to_string()),
                    last_seen: Some(CREATED_AT.to_string()),
                };
                state.players.push(player.clone());
                created(&player)
            }
            (Method::Get, ["players", id]) => match find_player(&mut state, id)
            {
                Some(player) => ok(&*player),
                None => not_found(),
            },
            (Method::Put, ["players", id]) => {
                let Some(patch) = decode::<PlayerPatch>(request) else {
                    return bad_request();
                };
                let Some(player) = find_player(&mut state, id) else {
                    return not_found();
                };
                // The server owns ids and timestamps.
                if let Some(username) = patch.username {
                    player.username = username;
                }
                ok(&*player)
            }

            // -- auth -------------------------------------------------------
            (Method::Post, ["auth", "session"]) => {
                let Some(body) = decode::<serde_json::Value>(request) else {
                    return bad_request();
                };
                let Some(session_id) = body["sessionId"].as_str() else {
                    return bad_request();
                };
                let existing = state
                    .players
                    .iter()
                    .position(|p| p.session_id.as_deref() == Some(session_id));
                let index = match existing {
                    Some(index) => index,
                    None => {
                        let id = state.next_id("player");
                        state.players.push(Player {
                            id: PlayerId::new(id.clone()),
                            username: format!("guest-{id}"),
                            session_id: Some(session_id.to_string()),
                            created_at: Some(CREATED_AT.to_string()),
                            last_seen: Some(CREATED_AT.to_string()),
                        });
                        state.players.len() - 1
                    }
                };
                let player = state.players[index].clone();
                state.session = Some(player.id.clone());
                ok(&player)
            }
            (Method::Delete, ["auth", "session"]) => {
                state.session = None;
                no_content()
            }
            (Method::Get, ["auth", "me"]) => {
                let Some(id) = state.session.clone() else {
                    return status(401, "Unauthorized");
                };
                match find_player(&mut state, id.as_str()) {
                    Some(player) => ok(&*player),
                    None => status(401, "Unauthorized"),
                }
            }

            _ => not_found(),
        }
    }
}

impl HttpTransport for FakeBackend {
    async fn execute(
        &self,
        request: HttpRequest,
    ) -> Result<HttpResponse, TransportError> {
        self.log.lock().unwrap().push(request.clone());
        if let Some(canned) = self.scripted.lock().unwrap().pop_front() {
            return Ok(canned);
        }
        Ok(self.route(&request))
    }
}

/// A client pointed at a fresh fake backend, plus a handle to the backend.
pub fn client() -> (ApiClient<FakeBackend>, FakeBackend) {
    let backend = FakeBackend::new();
    let client = ApiClient::builder()
        .base_url(BASE_URL)
        .transport(backend.clone())
        .build()
        .expect("fake base URL is valid");
    (client, backend)
}

/// Decodes the JSON body of a logged request.
pub fn body_json(request: &HttpRequest) -> serde_json::Value {
    serde_json::from_slice(request.body.as_deref().expect("request had no body"))
        .expect("request body is JSON")
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn find_game<'s>(state: &'s mut State, id: &str) -> Option<&'s mut Game> {
    state.games.iter_mut().find(|g| g.id.as_str() == id)
}

fn find_player<'s>(state: &'s mut State, id: &str) -> Option<&'s mut Player> {
    state.players.iter_mut().find(|p| p.id.as_str() == id)
}

fn decode<T: DeserializeOwned>(request: &HttpRequest) -> Option<T> {
    serde_json::from_slice(request.body.as_deref()?).ok()
}

fn json<T: Serialize + ?Sized>(code: u16, text: &str, body: &T) -> HttpResponse {
    HttpResponse {
        status: code,
        status_text: text.to_string(),
        body: serde_json::to_vec(body).expect("fixture serializes"),
    }
}

fn ok<T: Serialize + ?Sized>(body: &T) -> HttpResponse {
    json(200, "OK", body)
}

fn created<T: Serialize + ?Sized>(body: &T) -> HttpResponse {
    json(201, "Created", body)
}

fn status(code: u16, text: &str) -> HttpResponse {
    HttpResponse {
        status: code,
        status_text: text.to_string(),
        body: Vec::new(),
    }
}

fn no_content() -> HttpResponse {
    status(204, "No Content")
}

fn not_found() -> HttpResponse {
    status(404, "Not Found")
}

fn bad_request() -> HttpResponse {
    status(400, "Bad Request")
}
