//! Сохранение записи вместе с зависимыми данными
//!
//! Родитель сохраняется первым; изображения и подкатегории отправляются
//! только после того, как родитель получил id. Если зависимый шаг падает
//! при создании, родитель удаляется.

pub mod error;
pub mod executor;
pub mod guard;
pub mod request;

pub use error::{ChildError, ChildStage, Compensation, SaveError, SaveOutcome};
pub use executor::CompositeSaver;
pub use guard::{SubmitGuard, SubmitTicket};
pub use request::{SaveMode, SaveRequest};
