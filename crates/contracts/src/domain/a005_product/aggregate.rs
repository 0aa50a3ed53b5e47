use serde::{Deserialize, Serialize};

use crate::domain::common::payload::{require_positive, require_ref, require_text};
use crate::domain::common::{
    FieldError, IdRef, Image, PersistedResource, ResourceId, ResourceKind, ResourcePayload,
};

// ============================================================================
// Aggregate Root
// ============================================================================

/// Изготавливаемый товар (блюдо по рецепту из инсумов)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ResourceId,
    pub denominacion: String,

    #[serde(default)]
    pub descripcion: String,

    #[serde(default)]
    pub tiempo_estimado_minutos: i32,

    #[serde(default)]
    pub precio_venta: f64,

    #[serde(default)]
    pub preparacion: String,

    #[serde(default)]
    pub articulo_manufacturado_detalles: Vec<ProductDetail>,

    #[serde(default)]
    pub unidad_medida: Option<IdRef>,

    #[serde(default)]
    pub categoria: Option<IdRef>,

    #[serde(default)]
    pub imagenes: Vec<Image>,

    #[serde(default)]
    pub eliminado: bool,
}

/// Строка рецепта: сколько инсума уходит на единицу товара
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    pub cantidad: f64,
    pub articulo_insumo: IdRef,
}

impl PersistedResource for Product {
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

impl ResourceKind for Product {
    type Persisted = Product;
    type CreateRequest = ProductCreate;
    type UpdateRequest = ProductUpdate;

    fn aggregate_index() -> &'static str {
        "a005"
    }

    fn collection_name() -> &'static str {
        "articulosManufacturados"
    }

    fn element_name() -> &'static str {
        "Товар"
    }

    fn list_name() -> &'static str {
        "Товары"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFields {
    pub denominacion: String,
    pub descripcion: String,
    pub tiempo_estimado_minutos: i32,
    pub precio_venta: f64,
    pub preparacion: String,
    pub articulo_manufacturado_detalles: Vec<ProductDetail>,
    pub unidad_medida: IdRef,
    pub categoria: IdRef,
}

impl ProductFields {
    fn validate(&self) -> Result<(), FieldError> {
        require_text("denominacion", &self.denominacion, "Наименование обязательно")?;
        require_text("descripcion", &self.descripcion, "Описание обязательно")?;
        require_text("preparacion", &self.preparacion, "Не заполнен способ приготовления")?;
        if self.tiempo_estimado_minutos <= 0 {
            return Err(FieldError::new(
                "tiempoEstimadoMinutos",
                "Время приготовления должно быть больше нуля",
            ));
        }
        require_positive(
            "precioVenta",
            self.precio_venta,
            "Цена продажи должна быть больше нуля",
        )?;
        if self.articulo_manufacturado_detalles.is_empty() {
            return Err(FieldError::new(
                "articuloManufacturadoDetalles",
                "В рецепте должен быть хотя бы один инсум",
            ));
        }
        for detail in &self.articulo_manufacturado_detalles {
            require_positive(
                "articuloManufacturadoDetalles",
                detail.cantidad,
                "Количество инсума должно быть больше нуля",
            )?;
            require_ref(
                "articuloManufacturadoDetalles",
                detail.articulo_insumo.id,
                "В строке рецепта не выбран инсум",
            )?;
        }
        require_ref("unidadMedida", self.unidad_medida.id, "Не выбрана единица измерения")?;
        require_ref("categoria", self.categoria.id, "Не выбрана категория")?;
        Ok(())
    }
}

/// Запрос на создание товара; строки рецепта уходят в том же запросе
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    #[serde(flatten)]
    pub fields: ProductFields,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub id: ResourceId,
    #[serde(flatten)]
    pub fields: ProductFields,
}

impl ResourcePayload for ProductCreate {
    fn validate(&self) -> Result<(), FieldError> {
        self.fields.validate()
    }
}

impl ResourcePayload for ProductUpdate {
    fn validate(&self) -> Result<(), FieldError> {
        self.fields.validate()
    }
}
