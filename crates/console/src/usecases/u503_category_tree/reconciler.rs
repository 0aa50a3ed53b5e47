use contracts::domain::a003_category::aggregate::Category;
use contracts::domain::a003_category::CategoryNode;
use contracts::domain::common::{is_persisted, ResourceId, ResourceKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::api::{ApiError, ResourceClient};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TreeError {
    /// У родителя ещё нет id
    #[error("Нельзя сохранить подкатегории: у родителя нет идентификатора")]
    ParentNotPersisted,

    #[error("Не удалось сохранить подкатегорию «{denominacion}»: {source}")]
    NodeFailed {
        denominacion: String,
        parent_id: ResourceId,
        /// Сколько узлов успели создать до ошибки
        created_before: usize,
        #[source]
        source: ApiError,
    },
}

impl TreeError {
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            TreeError::NodeFailed { source, .. } => Some(source),
            TreeError::ParentNotPersisted => None,
        }
    }
}

/// Созданный узел: наименование, родитель, назначенный id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedNode {
    pub denominacion: String,
    pub parent_id: ResourceId,
    pub id: ResourceId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub created: Vec<CreatedNode>,
    /// Узлы, уже имевшие id (обойдены без повторной отправки)
    pub skipped: usize,
}

/// Тело запроса `addSubCategoria`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SubCategoryCreate<'a> {
    denominacion: &'a str,
    es_insumo: bool,
    eliminado: bool,
}

/// Ответ `addSubCategoria`: голый id или созданный узел
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AssignedId {
    Bare(ResourceId),
    Node { id: ResourceId },
}

impl AssignedId {
    fn id(&self) -> ResourceId {
        match self {
            AssignedId::Bare(id) | AssignedId::Node { id } => *id,
        }
    }
}

/// Обход дерева категорий в глубину с созданием несохранённых узлов
///
/// Узел отправляется только после того, как родитель получил id; запросы
/// идут строго последовательно. Первая ошибка прерывает обход, уже созданные
/// узлы не откатываются.
pub struct CategoryTreeReconciler {
    client: ResourceClient<Category>,
}

impl CategoryTreeReconciler {
    pub fn new(client: ResourceClient<Category>) -> Self {
        Self { client }
    }

    pub async fn persist(
        &self,
        tree: &[CategoryNode],
        parent_id: ResourceId,
        token: Option<&str>,
    ) -> Result<ReconcileReport, TreeError> {
        if !is_persisted(parent_id) {
            return Err(TreeError::ParentNotPersisted);
        }

        let mut report = ReconcileReport::default();

        // Явный стек вместо рекурсии; обратный порядок сохраняет pre-order
        let mut stack: Vec<(&CategoryNode, ResourceId)> =
            tree.iter().rev().map(|node| (node, parent_id)).collect();

        while let Some((node, parent)) = stack.pop() {
            let id = if node.is_persisted() {
                report.skipped += 1;
                node.id
            } else {
                let id = self
                    .create_child(node, parent, token)
                    .await
                    .map_err(|source| TreeError::NodeFailed {
                        denominacion: node.denominacion.clone(),
                        parent_id: parent,
                        created_before: report.created.len(),
                        source,
                    })?;
                report.created.push(CreatedNode {
                    denominacion: node.denominacion.clone(),
                    parent_id: parent,
                    id,
                });
                id
            };

            stack.extend(node.sub_categorias.iter().rev().map(|child| (child, id)));
        }

        tracing::info!(
            root_id = parent_id,
            created = report.created.len(),
            skipped = report.skipped,
            "category tree persisted"
        );
        Ok(report)
    }

    async fn create_child(
        &self,
        node: &CategoryNode,
        parent_id: ResourceId,
        token: Option<&str>,
    ) -> Result<ResourceId, ApiError> {
        let action = format!("addSubCategoria/{}", parent_id);
        let body = SubCategoryCreate {
            denominacion: &node.denominacion,
            es_insumo: node.es_insumo(),
            eliminado: false,
        };
        let assigned: AssignedId = self.client.post_action(&action, &body, token).await?;

        let id = assigned.id();
        if !is_persisted(id) {
            return Err(ApiError::EmptyResponse {
                endpoint: format!("POST {}/{}", Category::collection_name(), action),
            });
        }
        tracing::debug!(parent_id, id, denominacion = %node.denominacion, "subcategory created");
        Ok(id)
    }
}
