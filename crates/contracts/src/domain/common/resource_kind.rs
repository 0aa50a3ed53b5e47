use serde::{de::DeserializeOwned, Serialize};

use super::{Image, ResourceId, ResourcePayload};

/// Запись в том виде, в котором её возвращает сервер
pub trait PersistedResource {
    fn id(&self) -> ResourceId;

    /// Наименование записи для сообщений пользователю
    fn denominacion(&self) -> &str;

    /// Мягкое удаление (`eliminado`)
    fn is_deleted(&self) -> bool;

    /// Прикреплённые изображения
    fn images(&self) -> &[Image] {
        &[]
    }
}

/// Вид составного ресурса
///
/// Связывает REST-коллекцию с типами сохранённой записи и запросов
/// на создание/обновление.
pub trait ResourceKind: Send + Sync + 'static {
    type Persisted: PersistedResource
        + Serialize
        + DeserializeOwned
        + Clone
        + std::fmt::Debug
        + Send
        + Sync
        + 'static;
    type CreateRequest: ResourcePayload;
    type UpdateRequest: ResourcePayload;

    // ============================================================================
    // Метаданные вида
    // ============================================================================

    /// Индекс ресурса в системе (например, "a003")
    fn aggregate_index() -> &'static str;

    /// Сегмент пути REST-коллекции (например, "categorias")
    fn collection_name() -> &'static str;

    /// Имя элемента для UI (единственное число)
    fn element_name() -> &'static str;

    /// Имя списка для UI (множественное число)
    fn list_name() -> &'static str;

    /// Создание требует выбора хотя бы одного филиала
    fn requires_branches() -> bool {
        false
    }

    /// Изображения загружаются через `{collection}/uploads`
    fn supports_attachments() -> bool {
        true
    }

    /// Полное имя ресурса (например, "a003_categorias")
    fn full_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }
}
