use serde::{Deserialize, Serialize};

use super::tree::CategoryNode;
use crate::domain::common::payload::require_text;
use crate::domain::common::{
    FieldError, IdRef, PersistedResource, ResourceId, ResourceKind, ResourcePayload,
};

// ============================================================================
// Aggregate Root
// ============================================================================

/// Категория с деревом подкатегорий
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: ResourceId,
    pub denominacion: String,

    #[serde(default)]
    pub es_insumo: bool,

    #[serde(default)]
    pub sub_categorias: Vec<CategoryNode>,

    #[serde(default)]
    pub sucursales: Vec<IdRef>,

    #[serde(default)]
    pub eliminado: bool,
}

impl Category {
    /// Корень дерева для редактирования
    pub fn to_tree(&self) -> CategoryNode {
        CategoryNode::persisted(self.id, self.denominacion.clone(), self.es_insumo)
            .with_children(self.sub_categorias.clone())
    }

    /// Форма редактирования; `esInsumo` в неё не попадает
    pub fn to_update(&self) -> CategoryUpdate {
        CategoryUpdate {
            id: self.id,
            denominacion: self.denominacion.clone(),
            es_insumo: self.es_insumo,
            sub_categorias: self.sub_categorias.clone(),
        }
    }
}

impl PersistedResource for Category {
    fn id(&self) -> ResourceId {
        self.id
    }

    fn denominacion(&self) -> &str {
        &self.denominacion
    }

    fn is_deleted(&self) -> bool {
        self.eliminado
    }
}

impl ResourceKind for Category {
    type Persisted = Category;
    type CreateRequest = CategoryCreate;
    type UpdateRequest = CategoryUpdate;

    fn aggregate_index() -> &'static str {
        "a003"
    }

    fn collection_name() -> &'static str {
        "categorias"
    }

    fn element_name() -> &'static str {
        "Категория"
    }

    fn list_name() -> &'static str {
        "Категории"
    }

    fn requires_branches() -> bool {
        true
    }

    fn supports_attachments() -> bool {
        false
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// Запрос на создание корневой категории
///
/// Подкатегории в тело запроса не попадают: они сохраняются по одной
/// после того, как корень получит идентификатор.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCreate {
    pub denominacion: String,

    #[serde(default)]
    pub es_insumo: bool,

    #[serde(default)]
    pub sucursales: Vec<IdRef>,

    #[serde(default, skip_serializing)]
    pub sub_categorias: Vec<CategoryNode>,
}

/// Запрос на обновление категории
///
/// `es_insumo` служит только для проверки дерева и не отправляется:
/// после создания признак менять нельзя.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUpdate {
    pub id: ResourceId,
    pub denominacion: String,

    #[serde(default, skip_serializing)]
    pub es_insumo: bool,

    #[serde(default, skip_serializing)]
    pub sub_categorias: Vec<CategoryNode>,
}

/// Наименования узлов не пусты, признак `esInsumo` совпадает с корнем
fn validate_tree(
    denominacion: &str,
    es_insumo: bool,
    tree: &[CategoryNode],
) -> Result<(), FieldError> {
    require_text("denominacion", denominacion, "Наименование категории обязательно")?;

    if tree.iter().find_map(CategoryNode::find_blank).is_some() {
        return Err(FieldError::new(
            "subCategorias",
            "Наименование подкатегории не может быть пустым",
        ));
    }
    if let Some(node) = tree.iter().find_map(|n| n.find_flag_mismatch(es_insumo)) {
        return Err(FieldError::new(
            "esInsumo",
            format!(
                "Подкатегория «{}» не совпадает с корнем по признаку «для инсумов»",
                node.denominacion
            ),
        ));
    }
    Ok(())
}

impl CategoryCreate {
    /// Добавить подкатегорию верхнего уровня с признаком корня
    pub fn add_subcategoria(&mut self, denominacion: impl Into<String>) -> &mut CategoryNode {
        self.sub_categorias
            .push(CategoryNode::new(denominacion, self.es_insumo));
        let last = self.sub_categorias.len() - 1;
        &mut self.sub_categorias[last]
    }
}

impl ResourcePayload for CategoryCreate {
    fn validate(&self) -> Result<(), FieldError> {
        validate_tree(&self.denominacion, self.es_insumo, &self.sub_categorias)
    }

    fn branch_ids(&self) -> Vec<ResourceId> {
        self.sucursales.iter().map(|s| s.id).collect()
    }

    fn child_tree(&self) -> &[CategoryNode] {
        &self.sub_categorias
    }
}

impl ResourcePayload for CategoryUpdate {
    fn validate(&self) -> Result<(), FieldError> {
        validate_tree(&self.denominacion, self.es_insumo, &self.sub_categorias)
    }

    fn child_tree(&self) -> &[CategoryNode] {
        &self.sub_categorias
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_body_excludes_tree() {
        let mut form = CategoryCreate {
            denominacion: "Bebidas".into(),
            es_insumo: false,
            sucursales: vec![IdRef::new(1)],
            sub_categorias: vec![],
        };
        form.add_subcategoria("Gaseosas");

        let json = serde_json::to_value(&form).unwrap();
        assert!(json.get("subCategorias").is_none());
        assert_eq!(json["sucursales"][0]["id"], 1);
        assert_eq!(form.branch_ids(), vec![1]);
        assert_eq!(form.child_tree().len(), 1);
    }

    #[test]
    fn test_update_body_excludes_flag() {
        let update = CategoryUpdate {
            id: 4,
            denominacion: "Insumos".into(),
            es_insumo: true,
            sub_categorias: vec![],
        };
        let json = serde_json::to_value(&update).unwrap();
        assert!(json.get("esInsumo").is_none());
    }

    #[test]
    fn test_tree_flag_mismatch_rejected() {
        let form = CategoryCreate {
            denominacion: "Insumos".into(),
            es_insumo: true,
            sucursales: vec![IdRef::new(1)],
            sub_categorias: vec![CategoryNode::new("Bebidas", false)],
        };
        assert_eq!(form.validate().unwrap_err().field, "esInsumo");
    }

    #[test]
    fn test_blank_subcategoria_rejected() {
        let mut form = CategoryCreate {
            denominacion: "Bebidas".into(),
            ..Default::default()
        };
        form.add_subcategoria("Gaseosas").add_subcategoria(" ");
        assert_eq!(form.validate().unwrap_err().field, "subCategorias");
    }
}
