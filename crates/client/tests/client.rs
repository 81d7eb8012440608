use std::sync::Arc;

use reqwest::StatusCode;
use screentime_client::{Client, ClientError};
use screentime_core::{KeySet, KeyType, PrivateKey, ScreenTime};
use screentime_server::{AppState, serve};
use tokio::net::TcpListener;

fn admin() -> PrivateKey {
    PrivateKey::from_seed("admin")
}

fn user() -> PrivateKey {
    PrivateKey::from_seed("user")
}

fn viewer() -> PrivateKey {
    PrivateKey::from_seed("viewer")
}

async fn start_service() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let state = AppState::new(
        KeySet::new(admin().public_key())
            .with_user(user().public_key())
            .with_viewer(viewer().public_key()),
    );
    tokio::spawn(async move {
        serve(listener, state).await.unwrap();
    });
    format!("http://{addr}")
}

fn client(base_url: &str, key: PrivateKey) -> Client {
    Client::new(base_url, Arc::new(key)).unwrap()
}

#[tokio::test]
async fn role_probe_over_http() {
    let base_url = start_service().await;

    assert_eq!(client(&base_url, admin()).role().await.unwrap(), Some(KeyType::Admin));
    assert_eq!(client(&base_url, user()).role().await.unwrap(), Some(KeyType::User));
    assert_eq!(client(&base_url, viewer()).role().await.unwrap(), Some(KeyType::Viewer));
    assert_eq!(
        client(&base_url, PrivateKey::from_seed("stranger"))
            .role()
            .await
            .unwrap(),
        Some(KeyType::None)
    );
}

#[tokio::test]
async fn write_then_read_screen_time() {
    let base_url = start_service().await;
    let value = ScreenTime {
        available: 100,
        used: 42,
    };

    let writer = client(&base_url, user());
    assert_eq!(writer.get_time("alice", 2024, 5).await.unwrap(), None);
    writer.set_time("alice", 2024, 5, value).await.unwrap();

    let reader = client(&base_url, viewer());
    assert_eq!(reader.get_time("alice", 2024, 5).await.unwrap(), Some(value));
}

#[tokio::test]
async fn names_needing_percent_encoding_round_trip() {
    let base_url = start_service().await;
    let value = ScreenTime {
        available: 45,
        used: 45,
    };

    let writer = client(&base_url, admin());
    writer.set_time("anna/lena ü", 2025, 12, value).await.unwrap();
    assert_eq!(
        writer.get_time("anna/lena ü", 2025, 12).await.unwrap(),
        Some(value)
    );
}

#[tokio::test]
async fn viewer_write_is_rejected_with_403() {
    let base_url = start_service().await;
    let error = client(&base_url, viewer())
        .set_time("alice", 2024, 5, ScreenTime::default())
        .await
        .unwrap_err();
    assert_eq!(error.status(), Some(StatusCode::FORBIDDEN));
}

#[tokio::test]
async fn unregistered_key_is_rejected_with_401() {
    let base_url = start_service().await;
    let error = client(&base_url, PrivateKey::from_seed("stranger"))
        .get_time("alice", 2024, 5)
        .await
        .unwrap_err();
    assert!(matches!(error, ClientError::Status { .. }));
    assert_eq!(error.status(), Some(StatusCode::UNAUTHORIZED));
}

#[tokio::test]
async fn admin_uploads_derived_registry() {
    let base_url = start_service().await;
    let tablet = PrivateKey::from_seed("tablet");

    let private = KeySet::new(admin()).with_user(tablet.clone());
    let public = private.map(PrivateKey::public_key);
    client(&base_url, admin()).upload_keys(&public).await.unwrap();

    assert_eq!(client(&base_url, tablet).role().await.unwrap(), Some(KeyType::User));
    assert_eq!(client(&base_url, user()).role().await.unwrap(), Some(KeyType::None));
}

#[tokio::test]
async fn unreachable_service_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let error = client(&format!("http://{addr}"), admin())
        .role()
        .await
        .unwrap_err();
    assert!(matches!(error, ClientError::Transport(_)));
}

#[tokio::test]
async fn dot_user_names_are_refused_before_sending() {
    let base_url = start_service().await;
    let writer = client(&base_url, user());
    for name in [".", ".."] {
        let read = writer.get_time(name, 2024, 5).await.unwrap_err();
        assert!(matches!(read, ClientError::Url(_)), "{name:?}");
        let write = writer
            .set_time(name, 2024, 5, ScreenTime::default())
            .await
            .unwrap_err();
        assert!(matches!(write, ClientError::Url(_)), "{name:?}");
    }
}

#[tokio::test]
async fn unmatched_route_is_not_reported_as_missing_value() {
    let base_url = start_service().await;
    let misrouted = client(&format!("{base_url}/nowhere/"), viewer());
    let error = misrouted.get_time("alice", 2024, 5).await.unwrap_err();
    assert!(matches!(error, ClientError::Status { .. }));
    assert_eq!(error.status(), Some(StatusCode::NOT_FOUND));
}
