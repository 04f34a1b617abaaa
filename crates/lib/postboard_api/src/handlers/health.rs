//! Liveness endpoint.

use axum::Json;

use crate::models::HealthResponse;

/// `GET /api/health` — always `{"ok": true}`; does not touch the store.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}
