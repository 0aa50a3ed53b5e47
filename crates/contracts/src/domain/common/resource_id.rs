/// Идентификатор записи, назначаемый сервером
pub type ResourceId = i64;

/// Идентификатор ещё не сохранённой записи
pub const UNSAVED_ID: ResourceId = 0;

/// Запись уже получила идентификатор от сервера
pub fn is_persisted(id: ResourceId) -> bool {
    id > UNSAVED_ID
}
