use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::domain::common::payload::{require_ref, require_text};
use crate::domain::common::{
    FieldError, IdRef, Image, PersistedResource, ResourceId, ResourceKind, ResourcePayload,
};

// ============================================================================
// Aggregate Root
// ============================================================================

/// Филиал (точка продаж) компании
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub id: ResourceId,
    pub nombre: String,

    #[serde(default)]
    pub horario_apertura: Option<NaiveTime>,

    #[serde(default)]
    pub horario_cierre: Option<NaiveTime>,

    #[serde(default)]
    pub es_casa_matriz: bool,

    /// Компания-владелец
    #[serde(default)]
    pub empresa: Option<IdRef>,

    #[serde(default)]
    pub eliminado: bool,

    #[serde(default)]
    pub imagenes: Vec<Image>,
}

impl Branch {
    pub fn company_id(&self) -> Option<ResourceId> {
        self.empresa.map(|e| e.id)
    }
}

impl PersistedResource for Branch {
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

impl ResourceKind for Branch {
    type Persisted = Branch;
    type CreateRequest = BranchCreate;
    type UpdateRequest = BranchUpdate;

    fn aggregate_index() -> &'static str {
        "a002"
    }

    fn collection_name() -> &'static str {
        "sucursales"
    }

    fn element_name() -> &'static str {
        "Филиал"
    }

    fn list_name() -> &'static str {
        "Филиалы"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchCreate {
    pub nombre: String,
    pub horario_apertura: NaiveTime,
    pub horario_cierre: NaiveTime,
    #[serde(default)]
    pub es_casa_matriz: bool,
    pub empresa: IdRef,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchUpdate {
    pub id: ResourceId,
    pub nombre: String,
    pub horario_apertura: NaiveTime,
    pub horario_cierre: NaiveTime,
    #[serde(default)]
    pub es_casa_matriz: bool,
}

impl ResourcePayload for BranchCreate {
    fn validate(&self) -> Result<(), FieldError> {
        require_text("nombre", &self.nombre, "Наименование филиала обязательно")?;
        require_ref("empresa", self.empresa.id, "Не указана компания филиала")?;
        if self.horario_apertura == self.horario_cierre {
            return Err(FieldError::new(
                "horarioCierre",
                "Время закрытия совпадает со временем открытия",
            ));
        }
        Ok(())
    }
}

impl ResourcePayload for BranchUpdate {
    fn validate(&self) -> Result<(), FieldError> {
        require_text("nombre", &self.nombre, "Наименование филиала обязательно")?;
        if self.horario_apertura == self.horario_cierre {
            return Err(FieldError::new(
                "horarioCierre",
                "Время закрытия совпадает со временем открытия",
            ));
        }
        Ok(())
    }
}
