//! Разрешение филиалов, доступных для привязки записи
//!
//! - resolver.rs: филиал-якорь → компания → все её филиалы
//! - selection.rs: варианты и выбор пользователя

pub mod resolver;
pub mod selection;

pub use resolver::{AssociationError, AssociationResolver};
pub use selection::BranchSelection;
