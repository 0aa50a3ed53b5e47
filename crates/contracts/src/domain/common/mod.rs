//! Общие типы и трейты для всех ресурсов

pub mod image;
pub mod payload;
pub mod refs;
pub mod resource_id;
pub mod resource_kind;

// Re-exports
pub use image::Image;
pub use payload::{FieldError, ResourcePayload};
pub use refs::IdRef;
pub use resource_id::{is_persisted, ResourceId, UNSAVED_ID};
pub use resource_kind::{PersistedResource, ResourceKind};
