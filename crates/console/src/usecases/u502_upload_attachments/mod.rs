//! Загрузка и удаление изображений записи
//!
//! - pending.rs: выбранные, но ещё не загруженные файлы
//! - uploader.rs: пакетная загрузка и удаление по одному

pub mod pending;
pub mod uploader;

pub use pending::PendingAttachment;
pub use uploader::{check_batch, AttachmentError, AttachmentUploader, UploadResult, MAX_ATTACHMENTS};
