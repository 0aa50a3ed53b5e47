use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::domain::common::payload::{require_positive, require_ref, require_text};
use crate::domain::common::{
    FieldError, IdRef, Image, PersistedResource, ResourceId, ResourceKind, ResourcePayload,
};

// ============================================================================
// Aggregate Root
// ============================================================================

/// Тип промоакции
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PromotionType {
    HappyHour,
    #[default]
    Promocion,
}

/// Промоакция, действующая в выбранных филиалах
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Promotion {
    pub id: ResourceId,
    pub denominacion: String,
    pub fecha_desde: NaiveDate,
    pub fecha_hasta: NaiveDate,
    pub hora_desde: NaiveTime,
    pub hora_hasta: NaiveTime,

    #[serde(default)]
    pub descripcion_descuento: String,

    #[serde(default)]
    pub precio_promocional: f64,

    #[serde(default)]
    pub tipo_promocion: PromotionType,

    #[serde(default)]
    pub promocion_detalles: Vec<PromotionDetail>,

    #[serde(default)]
    pub sucursales: Vec<IdRef>,

    #[serde(default)]
    pub imagenes: Vec<Image>,

    #[serde(default)]
    pub eliminado: bool,
}

/// Товар, входящий в промоакцию
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromotionDetail {
    pub cantidad: i32,
    pub articulo: IdRef,
}

impl PersistedResource for Promotion {
    fn id(&self) -> ResourceId {
        self.id
    }

    fn denominacion(&self) -> &str {
        &self.denominacion
    }

    fn is_deleted(&self) -> bool {
        self.eliminado
    }

    fn images(&self) -> &[Image] {
        &self.imagenes
    }
}

impl ResourceKind for Promotion {
    type Persisted = Promotion;
    type CreateRequest = PromotionCreate;
    type UpdateRequest = PromotionUpdate;

    fn aggregate_index() -> &'static str {
        "a006"
    }

    fn collection_name() -> &'static str {
        "promociones"
    }

    fn element_name() -> &'static str {
        "Промоакция"
    }

    fn list_name() -> &'static str {
        "Промоакции"
    }

    fn requires_branches() -> bool {
        true
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromotionFields {
    pub denominacion: String,
    pub fecha_desde: NaiveDate,
    pub fecha_hasta: NaiveDate,
    pub hora_desde: NaiveTime,
    pub hora_hasta: NaiveTime,
    #[serde(default)]
    pub descripcion_descuento: String,
    pub precio_promocional: f64,
    #[serde(default)]
    pub tipo_promocion: PromotionType,
    pub promocion_detalles: Vec<PromotionDetail>,
}

impl PromotionFields {
    fn validate(&self) -> Result<(), FieldError> {
        require_text("denominacion", &self.denominacion, "Наименование обязательно")?;
        if self.fecha_hasta < self.fecha_desde {
            return Err(FieldError::new(
                "fechaHasta",
                "Дата окончания раньше даты начала",
            ));
        }
        if self.hora_hasta <= self.hora_desde {
            return Err(FieldError::new(
                "horaHasta",
                "Время окончания должно быть позже времени начала",
            ));
        }
        require_positive(
            "precioPromocional",
            self.precio_promocional,
            "Цена по акции должна быть больше нуля",
        )?;
        if self.promocion_detalles.is_empty() {
            return Err(FieldError::new(
                "promocionDetalles",
                "В акцию должен входить хотя бы один товар",
            ));
        }
        for detail in &self.promocion_detalles {
            if detail.cantidad <= 0 {
                return Err(FieldError::new(
                    "promocionDetalles",
                    "Количество товара должно быть больше нуля",
                ));
            }
            require_ref("promocionDetalles", detail.articulo.id, "Не выбран товар акции")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromotionCreate {
    #[serde(flatten)]
    pub fields: PromotionFields,
    #[serde(default)]
    pub sucursales: Vec<IdRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromotionUpdate {
    pub id: ResourceId,
    #[serde(flatten)]
    pub fields: PromotionFields,
}

impl ResourcePayload for PromotionCreate {
    fn validate(&self) -> Result<(), FieldError> {
        self.fields.validate()
    }

    fn branch_ids(&self) -> Vec<ResourceId> {
        self.sucursales.iter().map(|s| s.id).collect()
    }
}

impl ResourcePayload for PromotionUpdate {
    fn validate(&self) -> Result<(), FieldError> {
        self.fields.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> PromotionFields {
        PromotionFields {
            denominacion: "2x1 Lomos".into(),
            fecha_desde: NaiveDate::from_ymd_opt(2026, 11, 1).unwrap(),
            fecha_hasta: NaiveDate::from_ymd_opt(2026, 11, 30).unwrap(),
            hora_desde: NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
            hora_hasta: NaiveTime::from_hms_opt(21, 0, 0).unwrap(),
            descripcion_descuento: String::new(),
            precio_promocional: 12000.0,
            tipo_promocion: PromotionType::HappyHour,
            promocion_detalles: vec![PromotionDetail {
                cantidad: 2,
                articulo: IdRef::new(15),
            }],
        }
    }

    #[test]
    fn test_date_range() {
        let mut f = fields();
        assert!(f.validate().is_ok());

        f.fecha_hasta = NaiveDate::from_ymd_opt(2026, 10, 1).unwrap();
        assert_eq!(f.validate().unwrap_err().field, "fechaHasta");
    }

    #[test]
    fn test_nan_price_rejected() {
        let mut f = fields();
        f.precio_promocional = f64::NAN;
        assert_eq!(f.validate().unwrap_err().field, "precioPromocional");
    }

    #[test]
    fn test_type_wire_name() {
        let json = serde_json::to_value(PromotionType::HappyHour).unwrap();
        assert_eq!(json, "HAPPY_HOUR");
    }
}
