use serde::Serialize;

use super::ResourceId;
use crate::domain::a003_category::CategoryNode;

/// Ошибка валидации конкретного поля формы
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Имя поля в JSON (например, "razonSocial")
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for FieldError {}

/// Тело запроса на создание или обновление ресурса
pub trait ResourcePayload: Serialize + Send + Sync {
    /// Проверка полей формы до любых сетевых вызовов
    fn validate(&self) -> Result<(), FieldError>;

    /// Выбранные филиалы
    fn branch_ids(&self) -> Vec<ResourceId> {
        Vec::new()
    }

    /// Дерево дочерних записей, сохраняемых отдельными вызовами
    fn child_tree(&self) -> &[CategoryNode] {
        &[]
    }
}

/// Проверка обязательного текстового поля
pub fn require_text(field: &'static str, value: &str, message: &str) -> Result<(), FieldError> {
    if value.trim().is_empty() {
        return Err(FieldError::new(field, message));
    }
    Ok(())
}

/// Проверка ссылки на обязательную связанную запись
pub fn require_ref(field: &'static str, id: ResourceId, message: &str) -> Result<(), FieldError> {
    if !super::is_persisted(id) {
        return Err(FieldError::new(field, message));
    }
    Ok(())
}

/// Проверка суммы или количества: строго больше нуля, `NaN` не проходит
pub fn require_positive(field: &'static str, value: f64, message: &str) -> Result<(), FieldError> {
    if value.is_nan() || value <= 0.0 {
        return Err(FieldError::new(field, message));
    }
    Ok(())
}
