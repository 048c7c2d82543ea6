use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::catalog;
use crate::error::AppError;
use crate::handlers::AppState;
use crate::metrics;

/// Handle GET /api/materiales/catalogos
///
/// Plain pass-through read of the reference catalogs.
pub async fn get_catalogos(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    metrics::record_request("/catalogos");

    let proyectos = catalog::list_project_types(state.db.pool()).await?;
    let calidades = catalog::list_quality_tiers(state.db.pool()).await?;

    Ok(Json(json!({
        "proyectos": proyectos,
        "calidades": calidades,
    })))
}
