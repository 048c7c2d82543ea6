use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use crate::error::AppError;
use crate::handlers::AppState;
use crate::materials::{self, CustomMaterial, MaterialPayload};
use crate::metrics;

/// Handle GET /api/materiales
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<CustomMaterial>>, AppError> {
    metrics::record_request("/materiales");
    let rows = materials::list_materials(state.db.pool()).await?;
    Ok(Json(rows))
}

/// Handle POST /api/materiales
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<MaterialPayload>,
) -> Result<Json<Value>, AppError> {
    metrics::record_request("/materiales");

    let material = payload.validate()?;
    let material_id = materials::insert_material(state.db.pool(), &material).await?;

    tracing::info!(material_id, nombre = %material.nombre, "Created custom material");

    Ok(Json(json!({ "message": "Material agregado exitosamente" })))
}

/// Handle PUT /api/materiales/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<MaterialPayload>,
) -> Result<Json<Value>, AppError> {
    metrics::record_request("/materiales");

    let affected = materials::update_material(state.db.pool(), id, &payload).await?;
    tracing::info!(material_id = id, rows_affected = affected, "Updated custom material");

    Ok(Json(json!({ "message": "Material actualizado" })))
}

/// Handle DELETE /api/materiales/:id
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    metrics::record_request("/materiales");

    let affected = materials::delete_material(state.db.pool(), id).await?;
    tracing::info!(material_id = id, rows_affected = affected, "Deleted custom material");

    Ok(Json(json!({ "message": "Material eliminado" })))
}
