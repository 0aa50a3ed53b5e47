use contracts::domain::common::{Image, ResourceId, ResourceKind};
use thiserror::Error;

use super::pending::PendingAttachment;
use crate::shared::api::{ApiError, MultipartField, ResourceClient};
use crate::shared::state::RefreshHook;
use crate::shared::validation::ValidationError;

/// Максимум файлов в одной загрузке
pub const MAX_ATTACHMENTS: usize = 3;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AttachmentError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Request(#[from] ApiError),
}

/// Результат пакетной загрузки
#[derive(Debug, Clone, Default)]
pub struct UploadResult {
    pub parent_id: ResourceId,
    pub files: usize,
    /// Изображения, которые вернул сервер (если вернул)
    pub images: Vec<Image>,
}

/// Проверка пакета файлов: от 1 до `MAX_ATTACHMENTS`
pub fn check_batch(files: &[PendingAttachment]) -> Result<(), ValidationError> {
    if files.is_empty() {
        return Err(ValidationError::NoFilesSelected);
    }
    if files.len() > MAX_ATTACHMENTS {
        return Err(ValidationError::TooManyFiles {
            count: files.len(),
            max: MAX_ATTACHMENTS,
        });
    }
    Ok(())
}

/// Загрузка и удаление изображений записей одного вида
pub struct AttachmentUploader<K: ResourceKind> {
    client: ResourceClient<K>,
}

impl<K: ResourceKind> AttachmentUploader<K> {
    pub fn new(client: ResourceClient<K>) -> Self {
        Self { client }
    }

    /// Загрузить файлы одним multipart-запросом `POST {collection}/uploads?id={parent_id}`
    pub async fn upload(
        &self,
        parent_id: ResourceId,
        files: &[PendingAttachment],
        token: Option<&str>,
    ) -> Result<UploadResult, AttachmentError> {
        check_batch(files)?;

        let fields: Vec<MultipartField> = files.iter().map(|f| f.to_field("uploads")).collect();
        let response = self
            .client
            .post_multipart("uploads", &[("id", parent_id.to_string())], fields, token)
            .await?;

        // Сервер может ответить списком изображений или просто текстом
        let images = serde_json::from_slice::<Vec<Image>>(&response.body).unwrap_or_default();

        tracing::info!(
            resource = K::collection_name(),
            parent_id,
            files = files.len(),
            "attachments uploaded"
        );

        Ok(UploadResult {
            parent_id,
            files: files.len(),
            images,
        })
    }

    /// Удалить одно изображение (`POST {collection}/deleteImg`)
    ///
    /// Последнее изображение записи удалить нельзя. После удаления изображение
    /// убирается из `images`, а список записей обновляется.
    pub async fn delete(
        &self,
        public_id: &str,
        image_id: ResourceId,
        images: &mut Vec<Image>,
        refresh: Option<&dyn RefreshHook>,
        token: Option<&str>,
    ) -> Result<(), AttachmentError> {
        if !images.iter().any(|i| i.id == image_id) {
            return Err(ValidationError::UnknownAttachment(image_id).into());
        }
        let remaining = images
            .iter()
            .filter(|i| !i.eliminado && i.id != image_id)
            .count();
        if remaining == 0 {
            return Err(ValidationError::LastAttachmentProtected.into());
        }

        let fields = vec![
            MultipartField::text("publicId", public_id),
            MultipartField::text("id", image_id.to_string()),
        ];
        self.client
            .post_multipart("deleteImg", &[], fields, token)
            .await?;

        images.retain(|i| i.id != image_id);
        tracing::info!(
            resource = K::collection_name(),
            image_id,
            public_id,
            "attachment deleted"
        );

        if let Some(hook) = refresh {
            if let Err(e) = hook.refresh().await {
                tracing::warn!(error = %e, "list refresh after image delete failed");
            }
        }
        Ok(())
    }
}
