//! Persistence gateway for computed estimates
//!
//! Commits an already-computed breakdown as one `presupuesto` row plus
//! its `presupuesto_detalle` rows, atomically: the parent either exists
//! with exactly as many children as the request carried, or not at all.

use serde::Deserialize;
use sqlx::{Sqlite, SqlitePool, Transaction};
use std::time::Duration;

use crate::error::AppError;
use crate::estimator::LineItem;

/// Body of POST /guardar-presupuesto: the parameters the estimate was
/// computed from plus the breakdown to persist, in order.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveBudgetRequest {
    pub id_tipo_proyecto: i64,
    pub id_calidad: i64,
    pub area_m2: f64,
    pub pisos: i64,
    pub total: f64,
    pub detalle: Vec<LineItem>,
}

/// Save a budget and return the generated `presupuesto_id`.
///
/// One transaction per call. The parent insert runs first to obtain the
/// id, children follow in input order, and commit only happens if every
/// insert succeeded. Any failure rolls the whole transaction back; a
/// rollback failure is logged but never masks the original error. The
/// timeout bounds the entire transaction; on expiry the dropped
/// transaction rolls back when its connection returns to the pool.
pub async fn save_budget(
    pool: &SqlitePool,
    req: &SaveBudgetRequest,
    timeout: Duration,
) -> Result<i64, AppError> {
    match tokio::time::timeout(timeout, save_budget_tx(pool, req)).await {
        Ok(result) => result,
        Err(_) => Err(AppError::SaveTimeout(timeout)),
    }
}

async fn save_budget_tx(pool: &SqlitePool, req: &SaveBudgetRequest) -> Result<i64, AppError> {
    let mut tx = pool.begin().await?;

    match insert_budget(&mut tx, req).await {
        Ok(presupuesto_id) => {
            tx.commit().await?;
            tracing::info!(
                presupuesto_id,
                line_items = req.detalle.len(),
                total = req.total,
                "Saved budget"
            );
            Ok(presupuesto_id)
        }
        Err(err) => {
            tracing::error!(error = %err, "Budget save failed, rolling back");
            if let Err(rollback_err) = tx.rollback().await {
                tracing::error!(error = %rollback_err, "Rollback failed after aborted budget save");
            }
            Err(err.into())
        }
    }
}

async fn insert_budget(
    tx: &mut Transaction<'_, Sqlite>,
    req: &SaveBudgetRequest,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO presupuesto (area, pisos, tipo_proyecto_id, calidad_id, total_calculado)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(req.area_m2)
    .bind(req.pisos)
    .bind(req.id_tipo_proyecto)
    .bind(req.id_calidad)
    .bind(req.total)
    .execute(&mut **tx)
    .await?;

    let presupuesto_id = result.last_insert_rowid();

    for item in &req.detalle {
        sqlx::query(
            "INSERT INTO presupuesto_detalle
                (presupuesto_id, nombre_material, cantidad, unidad, precio_unitario, subtotal)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(presupuesto_id)
        .bind(&item.nombre_material)
        .bind(item.cantidad)
        .bind(&item.unidad)
        .bind(item.precio_unitario)
        .bind(item.subtotal)
        .execute(&mut **tx)
        .await?;
    }

    Ok(presupuesto_id)
}
