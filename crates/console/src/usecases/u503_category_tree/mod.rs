//! Сохранение дерева подкатегорий по одному узлу

pub mod reconciler;

pub use reconciler::{CategoryTreeReconciler, ReconcileReport, TreeError};
