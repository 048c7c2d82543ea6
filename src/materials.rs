//! CRUD over user-defined materials (`material_personalizado`)
//!
//! Independent of the estimation flow. Creates validate required fields;
//! updates and deletes only take the row id.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::{FromRow, SqlitePool};

use crate::coerce;
use crate::error::AppError;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CustomMaterial {
    pub material_id: i64,
    pub tipo: String,
    pub nombre: String,
    pub unidad: String,
    pub precio: f64,
    pub proyecto: String,
    pub descripcion: Option<String>,
    pub fecha_creacion: NaiveDateTime,
}

/// Raw body of POST / and PUT /:id. `precio` is loosely typed like the
/// calculator fields; everything else is plain text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MaterialPayload {
    pub tipo: Option<String>,
    pub nombre: Option<String>,
    pub unidad: Option<String>,
    pub precio: Option<Value>,
    pub proyecto: Option<String>,
    pub descripcion: Option<String>,
}

/// Validated create payload.
#[derive(Debug, Clone)]
pub struct NewMaterial {
    pub tipo: String,
    pub nombre: String,
    pub unidad: String,
    pub precio: f64,
    pub proyecto: String,
    pub descripcion: Option<String>,
}

impl MaterialPayload {
    /// Create-side validation: tipo, nombre, unidad, precio and proyecto
    /// are required; descripcion is optional.
    pub fn validate(&self) -> Result<NewMaterial, AppError> {
        Ok(NewMaterial {
            tipo: required_text("tipo", &self.tipo)?,
            nombre: required_text("nombre", &self.nombre)?,
            unidad: required_text("unidad", &self.unidad)?,
            precio: coerce::positive_field("precio", self.precio.as_ref())?,
            proyecto: required_text("proyecto", &self.proyecto)?,
            descripcion: self.descripcion.clone(),
        })
    }
}

fn required_text(name: &str, value: &Option<String>) -> Result<String, AppError> {
    match value {
        Some(s) if !s.trim().is_empty() => Ok(s.clone()),
        _ => Err(AppError::InvalidInput(format!("field `{name}` is required"))),
    }
}

/// All materials, newest first.
pub async fn list_materials(pool: &SqlitePool) -> Result<Vec<CustomMaterial>, sqlx::Error> {
    sqlx::query_as(
        "SELECT material_id, tipo, nombre, unidad, precio, proyecto, descripcion, fecha_creacion
         FROM material_personalizado
         ORDER BY fecha_creacion DESC, material_id DESC",
    )
    .fetch_all(pool)
    .await
}

pub async fn insert_material(pool: &SqlitePool, material: &NewMaterial) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO material_personalizado (tipo, nombre, unidad, precio, proyecto, descripcion)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&material.tipo)
    .bind(&material.nombre)
    .bind(&material.unidad)
    .bind(material.precio)
    .bind(&material.proyecto)
    .bind(&material.descripcion)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Update takes the raw payload as-is; a missing NOT NULL column simply
/// surfaces as a storage error.
pub async fn update_material(
    pool: &SqlitePool,
    material_id: i64,
    payload: &MaterialPayload,
) -> Result<u64, sqlx::Error> {
    let precio = payload
        .precio
        .as_ref()
        .and_then(|v| match v {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        });

    let result = sqlx::query(
        "UPDATE material_personalizado
         SET tipo = ?, nombre = ?, unidad = ?, precio = ?, proyecto = ?, descripcion = ?
         WHERE material_id = ?",
    )
    .bind(&payload.tipo)
    .bind(&payload.nombre)
    .bind(&payload.unidad)
    .bind(precio)
    .bind(&payload.proyecto)
    .bind(&payload.descripcion)
    .bind(material_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

pub async fn delete_material(pool: &SqlitePool, material_id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM material_personalizado WHERE material_id = ?")
        .bind(material_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
