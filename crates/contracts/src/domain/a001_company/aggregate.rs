use serde::{Deserialize, Serialize};

use crate::domain::common::payload::require_text;
use crate::domain::common::{
    FieldError, Image, PersistedResource, ResourceId, ResourceKind, ResourcePayload,
};

// ============================================================================
// Aggregate Root
// ============================================================================

/// Компания (юридическое лицо, владелец филиалов)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: ResourceId,
    pub nombre: String,
    pub razon_social: String,
    pub cuil: String,

    #[serde(default)]
    pub eliminado: bool,

    #[serde(default)]
    pub imagenes: Vec<Image>,
}

impl Company {
    /// Форма редактирования на основе сохранённой записи
    pub fn to_update(&self) -> CompanyUpdate {
        CompanyUpdate {
            id: self.id,
            nombre: self.nombre.clone(),
            razon_social: self.razon_social.clone(),
            cuil: self.cuil.clone(),
        }
    }
}

impl PersistedResource for Company {
    fn id(&self) -> ResourceId {
        self.id
    }

    fn denominacion(&self) -> &str {
        &self.nombre
    }

    fn is_deleted(&self) -> bool {
        self.eliminado
    }

    fn images(&self) -> &[Image] {
        &self.imagenes
    }
}

impl ResourceKind for Company {
    type Persisted = Company;
    type CreateRequest = CompanyCreate;
    type UpdateRequest = CompanyUpdate;

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "empresas"
    }

    fn element_name() -> &'static str {
        "Компания"
    }

    fn list_name() -> &'static str {
        "Компании"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// Запрос на создание компании
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CompanyCreate {
    pub nombre: String,
    pub razon_social: String,
    pub cuil: String,
}

/// Запрос на обновление компании
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CompanyUpdate {
    pub id: ResourceId,
    pub nombre: String,
    pub razon_social: String,
    pub cuil: String,
}

fn validate_fields(nombre: &str, razon_social: &str, cuil: &str) -> Result<(), FieldError> {
    require_text("nombre", nombre, "Наименование обязательно для заполнения")?;
    require_text("razonSocial", razon_social, "Юридическое наименование обязательно")?;

    // CUIL: 11 цифр, дефисы допускаются
    let digits: String = cuil.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() != 11 || cuil.chars().any(|c| !c.is_ascii_digit() && c != '-') {
        return Err(FieldError::new("cuil", "CUIL должен содержать 11 цифр"));
    }
    Ok(())
}

impl ResourcePayload for CompanyCreate {
    fn validate(&self) -> Result<(), FieldError> {
        validate_fields(&self.nombre, &self.razon_social, &self.cuil)
    }
}

impl ResourcePayload for CompanyUpdate {
    fn validate(&self) -> Result<(), FieldError> {
        validate_fields(&self.nombre, &self.razon_social, &self.cuil)
    }
}
