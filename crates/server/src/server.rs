pub mod auth;
pub mod envelope;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use screentime_core::signing::unix_now;
use screentime_core::{KeySet, KeyType, LogicalRequest, PublicKey, ScreenTime};
use tokio::net::TcpListener;

use crate::error::ServerError;
use crate::registry::Registry;
use crate::server::auth::{authenticate, authorize};
use crate::server::envelope::Envelope;
use crate::store::{ScreenTimeStore, WeekKey};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<Registry>,
    pub store: Arc<ScreenTimeStore>,
}

impl AppState {
    pub fn new(keys: KeySet<PublicKey>) -> Self {
        Self {
            registry: Arc::new(Registry::new(keys)),
            store: Arc::new(ScreenTimeStore::default()),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/healthcheck",
            get(|| async move { (StatusCode::OK, "Ok").into_response() }),
        )
        .route("/role", get(role_handler))
        .route(
            "/time/{user}/{year}/{week}",
            get(get_time_handler).put(put_time_handler),
        )
        .route("/keys", put(put_keys_handler))
        .with_state(state)
}

pub async fn run(host: &str, port: u16, state: AppState) -> Result<()> {
    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("binding {host}:{port}"))?;
    serve(listener, state).await
}

pub async fn serve(listener: TcpListener, state: AppState) -> Result<()> {
    let addr = listener.local_addr().context("reading listener address")?;
    tracing::info!(%addr, "screen time service listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    tracing::info!("screen time service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

/// Reports the role of whichever key signed the probe, `none` if no key did.
async fn role_handler(State(state): State<AppState>, Envelope(envelope): Envelope) -> String {
    let request = LogicalRequest::new("GET", ["role"]);
    let keys = state.registry.snapshot().await;
    let role = request.resolve_role_at(&envelope, &keys, unix_now());
    tracing::debug!(%role, "role probe");
    role.to_string()
}

async fn get_time_handler(
    State(state): State<AppState>,
    Path((user, year, week)): Path<(String, String, String)>,
    Envelope(envelope): Envelope,
) -> Result<Json<ScreenTime>, ServerError> {
    let request = LogicalRequest::new(
        "GET",
        ["time", user.as_str(), year.as_str(), week.as_str()],
    );
    authorize(
        &state.registry,
        &request,
        &envelope,
        "read screen time",
        KeyType::can_read,
    )
    .await?;

    let key = WeekKey::parse(&user, &year, &week)?;
    match state.store.get(&key).await {
        Some(value) => Ok(Json(value)),
        None => Err(ServerError::NotFound(key.to_string())),
    }
}

async fn put_time_handler(
    State(state): State<AppState>,
    Path((user, year, week)): Path<(String, String, String)>,
    Envelope(envelope): Envelope,
    body: Bytes,
) -> Result<StatusCode, ServerError> {
    let request = LogicalRequest::new(
        "PUT",
        ["time", user.as_str(), year.as_str(), week.as_str()],
    )
    .with_body(body.to_vec());
    let role = authorize(
        &state.registry,
        &request,
        &envelope,
        "write screen time",
        KeyType::can_write,
    )
    .await?;

    let key = WeekKey::parse(&user, &year, &week)?;
    let value: ScreenTime = serde_json::from_slice(&body)
        .map_err(|e| ServerError::BadRequest(format!("invalid screen time body: {e}")))?;

    tracing::info!(
        %key,
        %role,
        available = value.available,
        used = value.used,
        "screen time updated"
    );
    state.store.put(key, value).await;
    Ok(StatusCode::NO_CONTENT)
}

async fn put_keys_handler(
    State(state): State<AppState>,
    Envelope(envelope): Envelope,
    body: Bytes,
) -> Result<StatusCode, ServerError> {
    let request = LogicalRequest::new("PUT", ["keys"]).with_body(body.to_vec());
    let role = authenticate(&state.registry, &request, &envelope).await?;
    if role != KeyType::Admin {
        return Err(ServerError::Forbidden {
            role,
            action: "replace keys",
        });
    }

    let keys: KeySet<PublicKey> = serde_json::from_slice(&body)
        .map_err(|e| ServerError::BadRequest(format!("invalid key registry: {e}")))?;
    state.registry.replace(keys).await;
    Ok(StatusCode::NO_CONTENT)
}
