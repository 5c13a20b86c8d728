//! Integration tests for `AppContext`: API calls wired to the stores.

mod common;

use std::sync::{Arc, Mutex};

use common::{FakeBackend, client};
use localgames::{
    ApiClient, AppContext, ClientError, ConnectionPhase, PlayerPatch,
};

fn context() -> (AppContext<FakeBackend>, FakeBackend) {
    let (api, backend): (ApiClient<FakeBackend>, _) = client();
    (AppContext::new(api), backend)
}

/// Collects the username seen by every player-store notification.
fn watch(ctx: &AppContext<FakeBackend>) -> Arc<Mutex<Vec<Option<String>>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    ctx.player().subscribe(move |p| {
        sink.lock().unwrap().push(p.map(|p| p.username.clone()));
    });
    seen
}

// =========================================================================
// login / restore / logout
// =========================================================================

#[tokio::test]
async fn test_login_sets_current_player() {
    let (ctx, backend) = context();

    let player = ctx.login("sess-1").await.unwrap();

    assert!(backend.has_session());
    assert_eq!(ctx.player().current(), Some(player));
}

#[tokio::test]
async fn test_login_failure_leaves_store_empty() {
    let (ctx, backend) = context();
    backend.script(500, "Internal Server Error", "");

    let err = ctx.login("sess-1").await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert!(!ctx.player().is_present());
}

#[tokio::test]
async fn test_restore_session_picks_up_existing_session() {
    let (ctx, _backend) = context();
    let player = ctx.api().sessions().create("sess-1").await.unwrap();
    assert!(!ctx.player().is_present(), "raw facet call doesn't touch store");

    let restored = ctx.restore_session().await.unwrap();

    assert_eq!(restored, player);
    assert_eq!(ctx.player().current(), Some(player));
}

#[tokio::test]
async fn test_restore_session_without_session_keeps_store() {
    let (ctx, _backend) = context();
    let seen = watch(&ctx);

    let err = ctx.restore_session().await.unwrap_err();

    assert!(err.is_unauthenticated());
    assert!(!ctx.player().is_present());
    assert_eq!(*seen.lock().unwrap(), vec![None], "no notification");
}

#[tokio::test]
async fn test_logout_clears_store_and_session() {
    let (ctx, backend) = context();
    ctx.login("sess-1").await.unwrap();

    ctx.logout().await.unwrap();

    assert!(!backend.has_session());
    assert!(!ctx.player().is_present());
    assert!(ctx.restore_session().await.unwrap_err().is_unauthenticated());
}

#[tokio::test]
async fn test_logout_failure_still_clears_store() {
    let (ctx, backend) = context();
    ctx.login("sess-1").await.unwrap();
    backend.script(502, "Bad Gateway", "");

    let result = ctx.logout().await;

    assert!(matches!(result, Err(ClientError::Http { status: 502, .. })));
    assert!(!ctx.player().is_present());
}

// =========================================================================
// update_profile
// =========================================================================

#[tokio::test]
async fn test_update_profile_requires_current_player() {
    let (ctx, backend) = context();

    let err = ctx
        .update_profile(&PlayerPatch::username("x"))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::NoCurrentPlayer));
    assert!(backend.requests().is_empty(), "no request is sent");
}

#[tokio::test]
async fn test_update_profile_stores_server_record() {
    let (ctx, _backend) = context();
    let player = ctx.login("sess-1").await.unwrap();

    let updated = ctx
        .update_profile(&PlayerPatch::username("renamed"))
        .await
        .unwrap();

    assert_eq!(updated.id, player.id);
    assert_eq!(updated.username, "renamed");
    let current = ctx.player().current().unwrap();
    assert_eq!(current.username, "renamed");
    assert_eq!(current.session_id.as_deref(), Some("sess-1"));
}

#[tokio::test]
async fn test_update_profile_failure_keeps_old_record() {
    let (ctx, backend) = context();
    let player = ctx.login("sess-1").await.unwrap();
    backend.script(409, "Conflict", "");

    let err = ctx
        .update_profile(&PlayerPatch::username("taken"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(409));
    assert_eq!(ctx.player().current(), Some(player));
}

// =========================================================================
// Subscriptions across the full flow
// =========================================================================

#[tokio::test]
async fn test_subscriber_sees_login_rename_logout() {
    let (ctx, _backend) = context();
    let seen = watch(&ctx);

    let player = ctx.login("sess-1").await.unwrap();
    ctx.update_profile(&PlayerPatch::username("neo")).await.unwrap();
    ctx.logout().await.unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        vec![None, Some(player.username), Some("neo".into()), None]
    );
}

#[tokio::test]
async fn test_clones_share_stores() {
    let (ctx, _backend) = context();
    let other = ctx.clone();

    ctx.login("sess-1").await.unwrap();
    other.socket().set_connected(true);

    assert!(other.player().is_present());
    assert_eq!(ctx.socket().phase(), ConnectionPhase::Connected);
}
