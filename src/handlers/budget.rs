use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::time::Instant;

use crate::budget::{self, SaveBudgetRequest};
use crate::catalog;
use crate::error::AppError;
use crate::estimator::{self, CalculateRequest, Estimate, EstimateParams};
use crate::handlers::AppState;
use crate::metrics;

/// Handle POST /api/materiales/calcular
///
/// Compute-only half of the compute-then-commit workflow: validates the
/// parameters, reads the matching catalog rates and returns the priced
/// breakdown without persisting anything.
pub async fn calcular(
    State(state): State<AppState>,
    Json(request): Json<CalculateRequest>,
) -> Result<Json<Estimate>, AppError> {
    let start = Instant::now();
    metrics::record_request("/calcular");

    // 1. Coerce and validate before touching storage
    let params = EstimateParams::from_request(&request)?;

    // 2. Snapshot of matching catalog rates, in read order
    let rates =
        catalog::rates_for(state.db.pool(), params.id_tipo_proyecto, params.id_calidad).await?;

    // 3. Pure computation; an empty rate set yields a zero-total estimate
    let estimate = estimator::estimate(&params, &rates);

    tracing::info!(
        id_tipo_proyecto = params.id_tipo_proyecto,
        id_calidad = params.id_calidad,
        area_m2 = params.area_m2,
        pisos = params.pisos,
        line_items = estimate.detalle.len(),
        total = estimate.total,
        "Computed estimate"
    );
    metrics::record_duration("/calcular", start.elapsed());

    Ok(Json(estimate))
}

/// Handle POST /api/materiales/guardar-presupuesto
///
/// Commit half: persists a previously computed breakdown atomically and
/// returns the generated budget id. The body is decoded explicitly so a
/// missing or mistyped field comes back as the same structured 400 the
/// other endpoints emit.
pub async fn guardar_presupuesto(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, AppError> {
    let start = Instant::now();
    metrics::record_request("/guardar-presupuesto");

    let request: SaveBudgetRequest = serde_json::from_value(body)
        .map_err(|err| AppError::InvalidInput(format!("invalid budget payload: {err}")))?;

    let presupuesto_id =
        budget::save_budget(state.db.pool(), &request, state.save_timeout).await?;

    metrics::record_duration("/guardar-presupuesto", start.elapsed());

    Ok(Json(json!({
        "message": "Presupuesto guardado",
        "presupuesto_id": presupuesto_id,
    })))
}
