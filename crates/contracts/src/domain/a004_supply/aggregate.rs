use serde::{Deserialize, Serialize};

use crate::domain::common::payload::{require_positive, require_ref, require_text};
use crate::domain::common::{
    FieldError, IdRef, Image, PersistedResource, ResourceId, ResourceKind, ResourcePayload,
};

// ============================================================================
// Aggregate Root
// ============================================================================

/// Инсум: закупаемый товар или сырьё
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplyItem {
    pub id: ResourceId,
    pub denominacion: String,

    #[serde(default)]
    pub precio_venta: f64,

    #[serde(default)]
    pub precio_compra: f64,

    #[serde(default)]
    pub stock_actual: i32,

    #[serde(default)]
    pub stock_maximo: i32,

    #[serde(default)]
    pub stock_minimo: i32,

    /// Используется как сырьё для изготавливаемых товаров
    #[serde(default)]
    pub es_para_elaborar: bool,

    #[serde(default)]
    pub unidad_medida: Option<IdRef>,

    #[serde(default)]
    pub categoria: Option<IdRef>,

    #[serde(default)]
    pub imagenes: Vec<Image>,

    #[serde(default)]
    pub eliminado: bool,
}

impl PersistedResource for SupplyItem {
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

impl ResourceKind for SupplyItem {
    type Persisted = SupplyItem;
    type CreateRequest = SupplyItemCreate;
    type UpdateRequest = SupplyItemUpdate;

    fn aggregate_index() -> &'static str {
        "a004"
    }

    fn collection_name() -> &'static str {
        "articulosInsumos"
    }

    fn element_name() -> &'static str {
        "Инсум"
    }

    fn list_name() -> &'static str {
        "Инсумы"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// Поля формы инсума, общие для создания и обновления
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplyItemFields {
    pub denominacion: String,
    #[serde(default)]
    pub precio_venta: f64,
    pub precio_compra: f64,
    pub stock_actual: i32,
    pub stock_maximo: i32,
    pub stock_minimo: i32,
    #[serde(default)]
    pub es_para_elaborar: bool,
    pub unidad_medida: IdRef,
    pub categoria: IdRef,
}

impl SupplyItemFields {
    fn validate(&self) -> Result<(), FieldError> {
        require_text("denominacion", &self.denominacion, "Наименование обязательно")?;
        require_positive(
            "precioCompra",
            self.precio_compra,
            "Цена закупки должна быть больше нуля",
        )?;
        // Инсум на продажу без цены продажи не имеет смысла
        if !self.es_para_elaborar {
            require_positive(
                "precioVenta",
                self.precio_venta,
                "Цена продажи должна быть больше нуля",
            )?;
        }
        if self.stock_minimo < 0 || self.stock_actual < 0 {
            return Err(FieldError::new(
                "stockMinimo",
                "Остатки не могут быть отрицательными",
            ));
        }
        if self.stock_minimo > self.stock_maximo {
            return Err(FieldError::new(
                "stockMaximo",
                "Максимальный остаток меньше минимального",
            ));
        }
        require_ref("unidadMedida", self.unidad_medida.id, "Не выбрана единица измерения")?;
        require_ref("categoria", self.categoria.id, "Не выбрана категория")?;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplyItemCreate {
    #[serde(flatten)]
    pub fields: SupplyItemFields,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplyItemUpdate {
    pub id: ResourceId,
    #[serde(flatten)]
    pub fields: SupplyItemFields,
}

impl ResourcePayload for SupplyItemCreate {
    fn validate(&self) -> Result<(), FieldError> {
        self.fields.validate()
    }
}

impl ResourcePayload for SupplyItemUpdate {
    fn validate(&self) -> Result<(), FieldError> {
        self.fields.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> SupplyItemFields {
        SupplyItemFields {
            denominacion: "Harina 000".into(),
            precio_venta: 0.0,
            precio_compra: 850.0,
            stock_actual: 20,
            stock_maximo: 100,
            stock_minimo: 10,
            es_para_elaborar: true,
            unidad_medida: IdRef::new(1),
            categoria: IdRef::new(2),
        }
    }

    #[test]
    fn test_stock_bounds() {
        let mut f = fields();
        assert!(f.validate().is_ok());

        f.stock_minimo = 200;
        assert_eq!(f.validate().unwrap_err().field, "stockMaximo");
    }

    #[test]
    fn test_sale_item_needs_price() {
        let mut f = fields();
        f.es_para_elaborar = false;
        assert_eq!(f.validate().unwrap_err().field, "precioVenta");
    }

    #[test]
    fn test_nan_price_rejected() {
        let mut f = fields();
        f.precio_compra = f64::NAN;
        assert_eq!(f.validate().unwrap_err().field, "precioCompra");

        let mut f = fields();
        f.es_para_elaborar = false;
        f.precio_venta = f64::NAN;
        assert_eq!(f.validate().unwrap_err().field, "precioVenta");
    }

    #[test]
    fn test_flattened_body() {
        let json = serde_json::to_value(SupplyItemUpdate {
            id: 7,
            fields: fields(),
        })
        .unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["precioCompra"], 850.0);
        assert_eq!(json["unidadMedida"]["id"], 1);
    }
}
