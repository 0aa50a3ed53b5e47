use contracts::domain::a003_category::CategoryNode;
use contracts::domain::common::{FieldError, ResourceId, ResourceKind, ResourcePayload};

use crate::usecases::u502_upload_attachments::PendingAttachment;

/// Создание новой записи или обновление существующей
pub enum SaveMode<K: ResourceKind> {
    Create(K::CreateRequest),
    Update {
        id: ResourceId,
        payload: K::UpdateRequest,
    },
}

/// Отправленная форма: данные записи и выбранные файлы
pub struct SaveRequest<K: ResourceKind> {
    pub mode: SaveMode<K>,
    pub attachments: Vec<PendingAttachment>,
}

impl<K: ResourceKind> SaveRequest<K> {
    pub fn create(payload: K::CreateRequest) -> Self {
        Self {
            mode: SaveMode::Create(payload),
            attachments: Vec::new(),
        }
    }

    pub fn update(id: ResourceId, payload: K::UpdateRequest) -> Self {
        Self {
            mode: SaveMode::Update { id, payload },
            attachments: Vec::new(),
        }
    }

    pub fn with_attachments(mut self, attachments: Vec<PendingAttachment>) -> Self {
        self.attachments = attachments;
        self
    }

    pub fn is_create(&self) -> bool {
        matches!(self.mode, SaveMode::Create(_))
    }

    /// Id редактируемой записи; `None` при создании
    pub fn target_id(&self) -> Option<ResourceId> {
        match &self.mode {
            SaveMode::Create(_) => None,
            SaveMode::Update { id, .. } => Some(*id),
        }
    }

    pub fn validate_payload(&self) -> Result<(), FieldError> {
        match &self.mode {
            SaveMode::Create(payload) => payload.validate(),
            SaveMode::Update { payload, .. } => payload.validate(),
        }
    }

    /// Выбранные филиалы; учитываются только при создании
    pub fn branch_ids(&self) -> Vec<ResourceId> {
        match &self.mode {
            SaveMode::Create(payload) => payload.branch_ids(),
            SaveMode::Update { payload, .. } => payload.branch_ids(),
        }
    }

    pub fn child_tree(&self) -> &[CategoryNode] {
        match &self.mode {
            SaveMode::Create(payload) => payload.child_tree(),
            SaveMode::Update { payload, .. } => payload.child_tree(),
        }
    }
}
