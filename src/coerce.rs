//! Explicit numeric coercion for loosely-typed request fields.
//!
//! Clients send numeric fields either as JSON numbers or as strings
//! (`"150"`). Coercion is total: anything that does not parse fully as
//! the target type is rejected, instead of silently turning into NaN.

use serde_json::Value;

use crate::error::AppError;

/// Extract a finite numeric value from an optional JSON field.
pub fn numeric_field(name: &str, value: Option<&Value>) -> Result<f64, AppError> {
    let value =
        value.ok_or_else(|| AppError::InvalidInput(format!("missing field `{name}`")))?;

    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(n) if n.is_finite() => Ok(n),
        _ => Err(AppError::InvalidInput(format!(
            "field `{name}` must be numeric"
        ))),
    }
}

/// Numeric field that must be strictly greater than zero.
pub fn positive_field(name: &str, value: Option<&Value>) -> Result<f64, AppError> {
    let n = numeric_field(name, value)?;
    if n <= 0.0 {
        return Err(AppError::InvalidInput(format!(
            "field `{name}` must be positive"
        )));
    }
    Ok(n)
}

/// Positive field that must also be a whole number (floor counts, ids).
pub fn positive_int_field(name: &str, value: Option<&Value>) -> Result<i64, AppError> {
    let n = positive_field(name, value)?;
    if n.fract() != 0.0 {
        return Err(AppError::InvalidInput(format!(
            "field `{name}` must be an integer"
        )));
    }
    Ok(n as i64)
}
