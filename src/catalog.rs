//! Read-only reference data: project types, quality tiers and base
//! material rates. Managed out of band; this module only reads.

use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ProjectType {
    pub tipo_proyecto_id: i64,
    pub nombre: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct QualityTier {
    pub calidad_id: i64,
    pub nombre: String,
}

/// One catalog row: consumption rate and unit price of a material for a
/// (project type, quality) pair. `cantidad` is expressed per 100 m2 of
/// reference building.
#[derive(Debug, Clone, FromRow)]
pub struct RateEntry {
    pub material_id: i64,
    pub tipo_proyecto_id: i64,
    pub calidad_id: i64,
    pub nombre: String,
    pub unidad: String,
    pub cantidad: f64,
    pub precio_unitario: f64,
}

pub async fn list_project_types(pool: &SqlitePool) -> Result<Vec<ProjectType>, sqlx::Error> {
    sqlx::query_as(
        "SELECT tipo_proyecto_id, nombre FROM tipo_proyecto ORDER BY tipo_proyecto_id",
    )
    .fetch_all(pool)
    .await
}

pub async fn list_quality_tiers(pool: &SqlitePool) -> Result<Vec<QualityTier>, sqlx::Error> {
    sqlx::query_as("SELECT calidad_id, nombre FROM calidad ORDER BY calidad_id")
        .fetch_all(pool)
        .await
}

/// Rates matching a (project type, quality) pair, in stable `material_id`
/// order. The estimator preserves this order in its output, so it is the
/// order line items are persisted in.
pub async fn rates_for(
    pool: &SqlitePool,
    tipo_proyecto_id: i64,
    calidad_id: i64,
) -> Result<Vec<RateEntry>, sqlx::Error> {
    sqlx::query_as(
        "SELECT material_id, tipo_proyecto_id, calidad_id, nombre, unidad, cantidad, precio_unitario
         FROM material_base
         WHERE tipo_proyecto_id = ? AND calidad_id = ?
         ORDER BY material_id",
    )
    .bind(tipo_proyecto_id)
    .bind(calidad_id)
    .fetch_all(pool)
    .await
}
