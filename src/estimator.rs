//! Stateless cost estimator
//!
//! Pure function over (validated project parameters, catalog rate rows).
//! No storage access and no side effects; the handler fetches the rates
//! and the persistence gateway commits the result, if the caller asks.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::RateEntry;
use crate::coerce;
use crate::error::AppError;

/// Raw body of POST /calcular. Fields arrive loosely typed (numbers or
/// numeric strings) and are coerced explicitly by [`EstimateParams::from_request`].
#[derive(Debug, Default, Deserialize)]
pub struct CalculateRequest {
    pub id_tipo_proyecto: Option<Value>,
    pub id_calidad: Option<Value>,
    pub area_m2: Option<Value>,
    pub pisos: Option<Value>,
}

/// Validated, typed estimate parameters.
#[derive(Debug, Clone, Copy)]
pub struct EstimateParams {
    pub id_tipo_proyecto: i64,
    pub id_calidad: i64,
    pub area_m2: f64,
    pub pisos: i64,
}

impl EstimateParams {
    pub fn from_request(req: &CalculateRequest) -> Result<Self, AppError> {
        Ok(Self {
            id_tipo_proyecto: coerce::positive_int_field(
                "id_tipo_proyecto",
                req.id_tipo_proyecto.as_ref(),
            )?,
            id_calidad: coerce::positive_int_field("id_calidad", req.id_calidad.as_ref())?,
            area_m2: coerce::positive_field("area_m2", req.area_m2.as_ref())?,
            pisos: coerce::positive_int_field("pisos", req.pisos.as_ref())?,
        })
    }
}

/// One computed line of an estimate. Also the wire shape of `detalle`
/// entries in the save request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub nombre_material: String,
    pub unidad: String,
    pub cantidad: f64,
    pub precio_unitario: f64,
    pub subtotal: f64,
}

/// Priced breakdown for one set of project parameters.
#[derive(Debug, Clone, Serialize)]
pub struct Estimate {
    pub total: f64,
    pub costo_m2: f64,
    pub detalle: Vec<LineItem>,
}

/// Compute the priced breakdown.
///
/// Stored rates are expressed per 100 m2 of reference building, hence the
/// division by 100; it must stay exact for numeric compatibility with
/// existing catalog data. An empty rate slice is a valid "no data
/// configured" outcome and yields a zero-total estimate.
pub fn estimate(params: &EstimateParams, rates: &[RateEntry]) -> Estimate {
    let mut total = 0.0;
    let mut detalle = Vec::with_capacity(rates.len());

    for rate in rates {
        let cantidad = rate.cantidad * params.area_m2 * params.pisos as f64 / 100.0;
        let subtotal = cantidad * rate.precio_unitario;
        total += subtotal;

        detalle.push(LineItem {
            nombre_material: rate.nombre.clone(),
            unidad: rate.unidad.clone(),
            cantidad,
            precio_unitario: rate.precio_unitario,
            subtotal,
        });
    }

    Estimate {
        total,
        costo_m2: total / params.area_m2,
        detalle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rate(nombre: &str, cantidad: f64, precio_unitario: f64) -> RateEntry {
        RateEntry {
            material_id: 0,
            tipo_proyecto_id: 1,
            calidad_id: 1,
            nombre: nombre.to_string(),
            unidad: "kg".to_string(),
            cantidad,
            precio_unitario,
        }
    }

    fn params(area_m2: f64, pisos: i64) -> EstimateParams {
        EstimateParams {
            id_tipo_proyecto: 1,
            id_calidad: 1,
            area_m2,
            pisos,
        }
    }

    #[test]
    fn test_worked_example() {
        // q=2, p=10, a=100, f=2 -> cantidad 4, subtotal 40
        let result = estimate(&params(100.0, 2), &[rate("Cemento", 2.0, 10.0)]);

        assert_eq!(result.detalle.len(), 1);
        assert_eq!(result.detalle[0].cantidad, 4.0);
        assert_eq!(result.detalle[0].subtotal, 40.0);
        assert_eq!(result.total, 40.0);
        assert_eq!(result.costo_m2, 0.4);
    }

    #[test]
    fn test_total_is_sum_of_subtotals() {
        let rates = vec![
            rate("Cemento", 350.0, 0.18),
            rate("Arena", 45.0, 28.0),
            rate("Grava", 30.0, 31.5),
        ];
        let result = estimate(&params(120.5, 3), &rates);

        let sum: f64 = result.detalle.iter().map(|item| item.subtotal).sum();
        assert_eq!(result.total, sum);
        assert_eq!(result.costo_m2, result.total / 120.5);
    }

    #[test]
    fn test_line_items_keep_rate_order() {
        let rates = vec![rate("Zinc", 1.0, 1.0), rate("Arena", 1.0, 1.0)];
        let result = estimate(&params(100.0, 1), &rates);

        assert_eq!(result.detalle[0].nombre_material, "Zinc");
        assert_eq!(result.detalle[1].nombre_material, "Arena");
    }

    #[test]
    fn test_empty_catalog_yields_zero_total() {
        let result = estimate(&params(250.0, 2), &[]);

        assert_eq!(result.total, 0.0);
        assert_eq!(result.costo_m2, 0.0);
        assert!(result.detalle.is_empty());
    }

    #[test]
    fn test_from_request_valid() {
        let req = CalculateRequest {
            id_tipo_proyecto: Some(json!(1)),
            id_calidad: Some(json!("2")),
            area_m2: Some(json!("150.5")),
            pisos: Some(json!(2)),
        };
        let params = EstimateParams::from_request(&req).unwrap();

        assert_eq!(params.id_tipo_proyecto, 1);
        assert_eq!(params.id_calidad, 2);
        assert_eq!(params.area_m2, 150.5);
        assert_eq!(params.pisos, 2);
    }

    #[test]
    fn test_from_request_missing_fields() {
        let req = CalculateRequest::default();
        let err = EstimateParams::from_request(&req).unwrap_err();
        assert!(err.to_string().contains("id_tipo_proyecto"));
    }

    #[test]
    fn test_from_request_rejects_bad_values() {
        let base = || CalculateRequest {
            id_tipo_proyecto: Some(json!(1)),
            id_calidad: Some(json!(1)),
            area_m2: Some(json!(100.0)),
            pisos: Some(json!(1)),
        };

        let mut req = base();
        req.area_m2 = Some(json!("abc"));
        assert!(EstimateParams::from_request(&req).is_err());

        let mut req = base();
        req.area_m2 = Some(json!(0));
        assert!(EstimateParams::from_request(&req).is_err());

        let mut req = base();
        req.pisos = Some(json!(-1));
        assert!(EstimateParams::from_request(&req).is_err());

        let mut req = base();
        req.pisos = Some(json!(1.5));
        assert!(EstimateParams::from_request(&req).is_err());
    }
}
