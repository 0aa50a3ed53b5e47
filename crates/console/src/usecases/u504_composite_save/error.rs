use contracts::domain::common::ResourceId;
use thiserror::Error;

use crate::shared::api::ApiError;
use crate::shared::validation::ValidationError;
use crate::usecases::u501_resolve_branches::AssociationError;
use crate::usecases::u502_upload_attachments::AttachmentError;
use crate::usecases::u503_category_tree::TreeError;

/// Зависимый шаг, выполняемый после сохранения родителя
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildStage {
    Attachments,
    CategoryTree,
}

impl ChildStage {
    pub fn display_name(&self) -> &'static str {
        match self {
            ChildStage::Attachments => "изображения",
            ChildStage::CategoryTree => "подкатегории",
        }
    }
}

impl std::fmt::Display for ChildStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Что стало с родителем после ошибки зависимого шага
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Compensation {
    /// Родитель удалён
    RolledBack,
    /// Удаление родителя не удалось, запись осталась на сервере
    RollbackFailed(ApiError),
    /// Режим редактирования: родитель существовал до сохранения
    NotAttempted,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChildError {
    #[error(transparent)]
    Attachments(#[from] AttachmentError),

    #[error(transparent)]
    CategoryTree(#[from] TreeError),
}

impl ChildError {
    pub fn stage(&self) -> ChildStage {
        match self {
            ChildError::Attachments(_) => ChildStage::Attachments,
            ChildError::CategoryTree(_) => ChildStage::CategoryTree,
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SaveError {
    #[error(transparent)]
    ValidationFailed(#[from] ValidationError),

    #[error("Ошибка сохранения: {0}")]
    RequestFailed(#[from] ApiError),

    #[error(transparent)]
    AssociationResolutionFailed(#[from] AssociationError),

    #[error("Запись {parent_id} сохранена, но не удалось сохранить {stage}: {source}")]
    PartialPersistenceFailure {
        parent_id: ResourceId,
        stage: ChildStage,
        compensation: Compensation,
        #[source]
        source: ChildError,
    },
}

impl SaveError {
    /// Сообщение для пользователя; подробности остаются в логе
    pub fn user_message(&self) -> String {
        match self {
            SaveError::ValidationFailed(e) => e.to_string(),
            SaveError::RequestFailed(e) => match e {
                ApiError::RequestFailed {
                    status: 401 | 403, ..
                } => "Недостаточно прав для сохранения".to_string(),
                ApiError::RequestFailed { status, .. } => {
                    format!("Сервер отклонил сохранение (код {})", status)
                }
                ApiError::EmptyResponse { .. } => {
                    "Сервер не вернул сохранённую запись".to_string()
                }
                ApiError::Decode { .. } | ApiError::Encode { .. } => {
                    "Некорректный обмен данными с сервером".to_string()
                }
                ApiError::Transport { .. } => "Не удалось связаться с сервером".to_string(),
            },
            SaveError::AssociationResolutionFailed(e) => e.to_string(),
            SaveError::PartialPersistenceFailure {
                stage,
                compensation,
                ..
            } => match compensation {
                Compensation::NotAttempted => format!(
                    "Запись обновлена, но {} сохранить не удалось",
                    stage.display_name()
                ),
                Compensation::RolledBack | Compensation::RollbackFailed(_) => format!(
                    "Не удалось сохранить {}; создание записи отменено",
                    stage.display_name()
                ),
            },
        }
    }

    /// Ошибка проверки формы
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            SaveError::ValidationFailed(e) => Some(e),
            _ => None,
        }
    }
}

/// Итог сохранения: ровно одно сообщение пользователю
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Succeeded { id: ResourceId, message: String },
    Failed { error: SaveError, message: String },
}

impl SaveOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SaveOutcome::Succeeded { .. })
    }

    pub fn id(&self) -> Option<ResourceId> {
        match self {
            SaveOutcome::Succeeded { id, .. } => Some(*id),
            SaveOutcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&SaveError> {
        match self {
            SaveOutcome::Failed { error, .. } => Some(error),
            SaveOutcome::Succeeded { .. } => None,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            SaveOutcome::Succeeded { message, .. } | SaveOutcome::Failed { message, .. } => {
                message
            }
        }
    }

    pub fn into_result(self) -> Result<ResourceId, SaveError> {
        match self {
            SaveOutcome::Succeeded { id, .. } => Ok(id),
            SaveOutcome::Failed { error, .. } => Err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_failure_message_depends_on_mode() {
        let source = ChildError::CategoryTree(TreeError::ParentNotPersisted);
        let created = SaveError::PartialPersistenceFailure {
            parent_id: 5,
            stage: ChildStage::CategoryTree,
            compensation: Compensation::RolledBack,
            source: source.clone(),
        };
        assert_eq!(
            created.user_message(),
            "Не удалось сохранить подкатегории; создание записи отменено"
        );

        let edited = SaveError::PartialPersistenceFailure {
            parent_id: 5,
            stage: ChildStage::CategoryTree,
            compensation: Compensation::NotAttempted,
            source,
        };
        assert!(edited.user_message().starts_with("Запись обновлена"));
    }

    #[test]
    fn test_request_failure_hides_endpoint() {
        let error = SaveError::RequestFailed(ApiError::RequestFailed {
            status: 500,
            endpoint: "POST empresas".into(),
        });
        assert_eq!(error.user_message(), "Сервер отклонил сохранение (код 500)");
    }
}
