//! Lobby walkthrough against a running Local Games server.
//!
//! ```text
//! LOCALGAMES_API_URL=http://localhost:8080 cargo run -p lobby -- my-session
//! ```
//!
//! Checks the server is up, logs in with the given session id (default
//! `demo-session`), creates a lobby, joins it, lists every lobby, then
//! leaves and logs out.

use localgames::prelude::*;
use tracing_subscriber::{
    EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let session_id = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "demo-session".to_string());

    let ctx = AppContext::from_env()?;
    tracing::info!(base_url = ctx.api().config().base_url(), "connecting");

    ctx.player().subscribe(|player| match player {
        Some(p) => {
            tracing::info!(player = %p.username, "current player changed")
        }
        None => tracing::info!("no current player"),
    });

    let health = ctx.api().health_check().await?;
    tracing::info!(
        status = %health.status,
        message = %health.message,
        "server health"
    );

    let me = ctx.login(&session_id).await?;

    let game = ctx
        .api()
        .games()
        .create(&CreateGame::new("impostor").max_players(6))
        .await?;
    let game = ctx.api().games().join(&game.id, &me.id).await?;
    tracing::info!(game_id = %game.id, players = game.players, "joined lobby");

    for game in ctx.api().games().list().await? {
        println!(
            "{:<12} {:<10} {}/{}{}",
            game.id,
            game.game_type,
            game.players,
            game.max_players,
            if game.is_full() { " (full)" } else { "" }
        );
    }

    ctx.api().games().leave(&game.id, &me.id).await?;
    ctx.logout().await?;
    Ok(())
}
