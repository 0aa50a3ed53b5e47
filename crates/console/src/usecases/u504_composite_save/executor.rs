use contracts::domain::a002_branch::aggregate::Branch;
use contracts::domain::a003_category::aggregate::Category;
use contracts::domain::a003_category::tree::count_unpersisted;
use contracts::domain::common::{is_persisted, PersistedResource, ResourceId, ResourceKind};
use std::sync::Arc;

use super::error::{ChildError, Compensation, SaveError, SaveOutcome};
use super::guard::SubmitGuard;
use super::request::{SaveMode, SaveRequest};
use crate::shared::api::{ApiClient, ApiError, ResourceClient};
use crate::shared::notify::Notifier;
use crate::shared::state::RefreshHook;
use crate::shared::validation::ValidationError;
use crate::system::session::Session;
use crate::usecases::u501_resolve_branches::{AssociationError, AssociationResolver};
use crate::usecases::u502_upload_attachments::{check_batch, AttachmentUploader};
use crate::usecases::u503_category_tree::CategoryTreeReconciler;

/// Сохранение записи вместе с изображениями и подкатегориями
///
/// Порядок шагов:
/// 1. Проверка формы и выбранных филиалов (без сетевых вызовов)
/// 2. Для видов, привязанных к филиалам: выбор сверяется с филиалами компании
/// 3. Создание или обновление родителя
/// 4. Загрузка изображений, затем сохранение несохранённых подкатегорий
/// 5. Ошибка на шаге 4 при создании: родитель удаляется
/// 6. Обновление списка и одно уведомление пользователю
pub struct CompositeSaver<K: ResourceKind> {
    client: ResourceClient<K>,
    uploader: AttachmentUploader<K>,
    resolver: AssociationResolver,
    reconciler: CategoryTreeReconciler,
    notifier: Arc<dyn Notifier>,
    guard: SubmitGuard,
}

impl<K: ResourceKind> CompositeSaver<K> {
    pub fn new(api: ApiClient, notifier: Arc<dyn Notifier>) -> Self {
        let client = ResourceClient::<K>::new(api.clone());
        Self {
            uploader: AttachmentUploader::new(client.clone()),
            client,
            resolver: AssociationResolver::new(ResourceClient::<Branch>::new(api.clone())),
            reconciler: CategoryTreeReconciler::new(ResourceClient::<Category>::new(api)),
            notifier,
            guard: SubmitGuard::new(),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.guard.is_busy()
    }

    /// Сохранить форму
    ///
    /// Пока сохранение идёт, повторная отправка отклоняется без сетевых
    /// вызовов. `refresh` вызывается только после успешного сохранения.
    pub async fn save(
        &self,
        session: &Session,
        request: &SaveRequest<K>,
        refresh: Option<&dyn RefreshHook>,
    ) -> SaveOutcome {
        let Some(_ticket) = self.guard.try_begin() else {
            tracing::warn!(resource = K::collection_name(), "save already in progress");
            return self.report(Err(ValidationError::SubmitInProgress.into()));
        };

        tracing::info!(
            resource = K::collection_name(),
            user = session.username(),
            mode = if request.is_create() { "create" } else { "update" },
            attachments = request.attachments.len(),
            "save started"
        );

        let result = self.run(session, request).await;

        if let (Ok(_), Some(hook)) = (&result, refresh) {
            if let Err(e) = hook.refresh().await {
                tracing::warn!(
                    resource = K::collection_name(),
                    error = %e,
                    "list refresh after save failed"
                );
            }
        }

        self.report(result)
    }

    async fn run(&self, session: &Session, request: &SaveRequest<K>) -> Result<ResourceId, SaveError> {
        self.validate(request)?;

        if request.is_create() && K::requires_branches() {
            self.check_branches(session, &request.branch_ids()).await?;
        }

        let token = session.bearer();
        let parent_id = self.persist_parent(request, token).await?;

        if let Err(source) = self.persist_children(parent_id, request, token).await {
            let stage = source.stage();
            tracing::error!(
                resource = K::collection_name(),
                parent_id,
                stage = %stage,
                error = %source,
                "dependent save step failed"
            );

            let compensation = if request.is_create() {
                self.compensate(parent_id, token).await
            } else {
                Compensation::NotAttempted
            };

            return Err(SaveError::PartialPersistenceFailure {
                parent_id,
                stage,
                compensation,
                source,
            });
        }

        Ok(parent_id)
    }

    /// Проверки, не требующие сети
    fn validate(&self, request: &SaveRequest<K>) -> Result<(), ValidationError> {
        if request.is_create() && K::requires_branches() && request.branch_ids().is_empty() {
            return Err(ValidationError::NoBranchSelected);
        }

        request.validate_payload()?;

        if !request.attachments.is_empty() {
            if !K::supports_attachments() {
                return Err(ValidationError::AttachmentsNotSupported);
            }
            check_batch(&request.attachments)?;
        }
        Ok(())
    }

    /// Выбранные филиалы должны принадлежать компании пользователя
    async fn check_branches(&self, session: &Session, selected: &[ResourceId]) -> Result<(), SaveError> {
        let anchor_id = session.branch_id.ok_or(AssociationError::MissingAnchor)?;
        let options = self
            .resolver
            .resolve_branch_options(anchor_id, session.bearer())
            .await?;

        if let Some(unknown) = selected
            .iter()
            .find(|id| !options.iter().any(|b| b.id == **id))
        {
            return Err(ValidationError::UnknownBranch(*unknown).into());
        }
        Ok(())
    }

    async fn persist_parent(
        &self,
        request: &SaveRequest<K>,
        token: Option<&str>,
    ) -> Result<ResourceId, ApiError> {
        let (saved, endpoint) = match &request.mode {
            SaveMode::Create(payload) => (
                self.client.create_with(payload, token).await?,
                format!("POST {}", K::collection_name()),
            ),
            SaveMode::Update { id, payload } => (
                self.client.update_with(*id, payload, token).await?,
                format!("PUT {}/{}", K::collection_name(), id),
            ),
        };

        let id = match request.target_id() {
            Some(id) if !is_persisted(saved.id()) => id,
            _ => saved.id(),
        };
        if !is_persisted(id) {
            return Err(ApiError::EmptyResponse { endpoint });
        }

        tracing::info!(resource = K::collection_name(), id, "parent saved");
        Ok(id)
    }

    /// Изображения, затем подкатегории; только то, что ещё не сохранено
    async fn persist_children(
        &self,
        parent_id: ResourceId,
        request: &SaveRequest<K>,
        token: Option<&str>,
    ) -> Result<(), ChildError> {
        if !request.attachments.is_empty() {
            self.uploader
                .upload(parent_id, &request.attachments, token)
                .await?;
        }

        let tree = request.child_tree();
        if count_unpersisted(tree) > 0 {
            self.reconciler.persist(tree, parent_id, token).await?;
        }
        Ok(())
    }

    /// Удалить только что созданного родителя; ошибка удаления только логируется
    async fn compensate(&self, parent_id: ResourceId, token: Option<&str>) -> Compensation {
        match self.client.delete_with(parent_id, token).await {
            Ok(()) => {
                tracing::info!(resource = K::collection_name(), parent_id, "parent rolled back");
                Compensation::RolledBack
            }
            Err(e) if e.is_not_found() => {
                tracing::warn!(
                    resource = K::collection_name(),
                    parent_id,
                    "parent already gone during rollback"
                );
                Compensation::RolledBack
            }
            Err(e) => {
                tracing::error!(
                    resource = K::collection_name(),
                    parent_id,
                    error = %e,
                    "rollback failed, orphan record left on server"
                );
                Compensation::RollbackFailed(e)
            }
        }
    }

    fn report(&self, result: Result<ResourceId, SaveError>) -> SaveOutcome {
        match result {
            Ok(id) => {
                let message = format!("{}: запись №{} сохранена", K::element_name(), id);
                tracing::info!(resource = K::collection_name(), id, "save finished");
                self.notifier.success(&message);
                SaveOutcome::Succeeded { id, message }
            }
            Err(error) => {
                let message = error.user_message();
                tracing::warn!(resource = K::collection_name(), error = %error, "save failed");
                self.notifier.error(&message);
                SaveOutcome::Failed { error, message }
            }
        }
    }
}
