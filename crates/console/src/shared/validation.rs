use contracts::domain::common::{FieldError, ResourceId};
use thiserror::Error;

/// Ошибки, обнаруживаемые до любого сетевого вызова
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Выберите хотя бы один филиал")]
    NoBranchSelected,

    #[error("Филиал {0} недоступен для выбора")]
    UnknownBranch(ResourceId),

    #[error("Не выбрано ни одного файла")]
    NoFilesSelected,

    #[error("Можно загрузить не более {max} файлов (выбрано {count})")]
    TooManyFiles { count: usize, max: usize },

    #[error("К записям этого вида нельзя прикреплять изображения")]
    AttachmentsNotSupported,

    #[error("Нельзя удалить последнее изображение")]
    LastAttachmentProtected,

    #[error("Изображение {0} не найдено среди изображений записи")]
    UnknownAttachment(ResourceId),

    #[error("{message}")]
    Field { field: &'static str, message: String },

    #[error("Сохранение уже выполняется")]
    SubmitInProgress,
}

impl ValidationError {
    /// Поле формы, к которому относится ошибка
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ValidationError::Field { field, .. } => Some(field),
            ValidationError::NoBranchSelected | ValidationError::UnknownBranch(_) => {
                Some("sucursales")
            }
            _ => None,
        }
    }
}

impl From<FieldError> for ValidationError {
    fn from(e: FieldError) -> Self {
        ValidationError::Field {
            field: e.field,
            message: e.message,
        }
    }
}
