use axum::{
    body::Bytes,
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::alert::Alert;
use crate::broker::traits::BrokerApi;
use crate::catalog::InstrumentCatalog;
use crate::config::AppConfig;
use crate::services::translator::AlertTranslator;

pub struct AppState {
    pub catalog: InstrumentCatalog,
    pub broker: Arc<dyn BrokerApi>,
    pub translator: AlertTranslator,
    pub http: reqwest::Client,
    pub config: AppConfig,
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let webhook = Router::new()
        .route("/webhook", post(handle_webhook))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            ip_allowlist,
        ));

    Router::new()
        .merge(webhook)
        .route("/health", get(health))
        .route("/reload", post(reload_catalog))
        .with_state(state)
}

pub async fn run_server(state: Arc<AppState>) {
    let app = build_router(state.clone());

    let listener = tokio::net::TcpListener::bind(&state.config.server.bind_addr)
        .await
        .unwrap();
    info!("API server listening on {}", state.config.server.bind_addr);
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .unwrap();
}

fn error_body(message: impl std::fmt::Display) -> Json<Value> {
    Json(json!({"status": "error", "message": message.to_string()}))
}

/// Boundary policy, not part of the translation core: when an allow list is
/// configured, only those source IPs may post alerts.
async fn ip_allowlist(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    req: Request,
    next: Next,
) -> Response {
    if let Some(allowed) = &state.config.server.allowed_ips {
        let ip = addr.ip().to_string();
        if !allowed.iter().any(|a| a == &ip) {
            warn!("rejected webhook from non-allowlisted ip {}", ip);
            return (
                StatusCode::FORBIDDEN,
                error_body("source address not allowed"),
            )
                .into_response();
        }
    }
    next.run(req).await
}

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({"status": "ok", "instruments": state.catalog.len()}))
}

async fn reload_catalog(State(state): State<Arc<AppState>>) -> Response {
    match state
        .catalog
        .load(&state.http, &state.config.catalog.source)
        .await
    {
        Ok(rows) => Json(json!({"status": "success", "instruments": rows})).into_response(),
        Err(e) => {
            error!("catalog reload failed, keeping previous snapshot: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, error_body(e)).into_response()
        }
    }
}

async fn handle_webhook(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    // Take the raw body and decode by hand: non-JSON content types and
    // syntax errors must yield the 400 envelope, never an extractor
    // rejection (plain-text 400 or 415).
    let alert: Alert = match serde_json::from_slice(&body) {
        Ok(alert) => alert,
        Err(e) => {
            warn!(
                "malformed alert payload '{}': {}",
                String::from_utf8_lossy(&body),
                e
            );
            return (
                StatusCode::BAD_REQUEST,
                error_body(format!("malformed alert: {}", e)),
            )
                .into_response();
        }
    };
    info!("received webhook alert: {:?}", alert);

    let intent = match state.translator.translate(&alert).await {
        Ok(intent) => intent,
        Err(e) => {
            warn!("translation failed: {}", e);
            return (StatusCode::BAD_REQUEST, error_body(e)).into_response();
        }
    };

    info!(
        "placing order via {}: {:?}",
        state.broker.name(),
        intent
    );
    match state.broker.place_order(&intent).await {
        Ok(ack) => {
            info!("order {} accepted with status {}", ack.order_id, ack.status);
            Json(json!({"status": "success", "order_response": ack.raw})).into_response()
        }
        Err(e) => {
            error!("order submission failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, error_body(e)).into_response()
        }
    }
}
