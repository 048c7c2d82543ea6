use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::error::AppError;
use crate::handlers::AppState;
use crate::metrics;

/// Handle GET /ping
///
/// Liveness probe that round-trips through the store: reports the
/// current server time as seen by the database.
pub async fn ping(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    metrics::record_request("/ping");

    let fecha = state.db.server_time().await?;

    Ok(Json(json!({
        "mensaje": "Servidor funcionando correctamente",
        "fecha": fecha,
    })))
}
