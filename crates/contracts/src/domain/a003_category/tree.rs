use serde::{Deserialize, Serialize};

use crate::domain::common::{is_persisted, ResourceId, UNSAVED_ID};

/// Узел дерева категорий
///
/// Чистое значение без привязки к отображению. Узел с `id = 0` ещё не сохранён;
/// признак `esInsumo` задаётся при создании и дальше не меняется.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryNode {
    #[serde(default)]
    pub id: ResourceId,

    pub denominacion: String,

    #[serde(default)]
    es_insumo: bool,

    #[serde(default)]
    pub sub_categorias: Vec<CategoryNode>,

    #[serde(default)]
    pub eliminado: bool,
}

impl CategoryNode {
    /// Новый, ещё не сохранённый узел
    pub fn new(denominacion: impl Into<String>, es_insumo: bool) -> Self {
        Self {
            id: UNSAVED_ID,
            denominacion: denominacion.into(),
            es_insumo,
            sub_categorias: Vec::new(),
            eliminado: false,
        }
    }

    /// Узел, уже сохранённый на сервере
    pub fn persisted(id: ResourceId, denominacion: impl Into<String>, es_insumo: bool) -> Self {
        Self {
            id,
            ..Self::new(denominacion, es_insumo)
        }
    }

    pub fn with_children(mut self, children: Vec<CategoryNode>) -> Self {
        self.sub_categorias = children;
        self
    }

    pub fn is_persisted(&self) -> bool {
        is_persisted(self.id)
    }

    pub fn es_insumo(&self) -> bool {
        self.es_insumo
    }

    pub fn rename(&mut self, denominacion: impl Into<String>) {
        self.denominacion = denominacion.into();
    }

    /// Добавить подкатегорию; признак `esInsumo` наследуется от родителя
    pub fn add_subcategoria(&mut self, denominacion: impl Into<String>) -> &mut CategoryNode {
        let es_insumo = self.es_insumo;
        self.sub_categorias.push(CategoryNode::new(denominacion, es_insumo));
        let last = self.sub_categorias.len() - 1;
        &mut self.sub_categorias[last]
    }

    /// Подкатегории без мягко удалённых
    pub fn visible_subcategorias(&self) -> impl Iterator<Item = &CategoryNode> {
        self.sub_categorias.iter().filter(|c| !c.eliminado)
    }

    /// Количество несохранённых узлов в поддереве (включая сам узел)
    pub fn unpersisted_count(&self) -> usize {
        let own = usize::from(!self.is_persisted());
        own + count_unpersisted(&self.sub_categorias)
    }

    /// Глубина поддерева (лист = 1)
    pub fn depth(&self) -> usize {
        1 + self
            .sub_categorias
            .iter()
            .map(CategoryNode::depth)
            .max()
            .unwrap_or(0)
    }

    /// Первый узел поддерева, чей признак `esInsumo` отличается от заданного
    pub fn find_flag_mismatch(&self, es_insumo: bool) -> Option<&CategoryNode> {
        if self.es_insumo != es_insumo {
            return Some(self);
        }
        self.sub_categorias
            .iter()
            .find_map(|c| c.find_flag_mismatch(es_insumo))
    }

    /// Первый узел поддерева с пустым наименованием
    pub fn find_blank(&self) -> Option<&CategoryNode> {
        if self.denominacion.trim().is_empty() {
            return Some(self);
        }
        self.sub_categorias.iter().find_map(CategoryNode::find_blank)
    }
}

/// Количество несохранённых узлов в лесе
pub fn count_unpersisted(nodes: &[CategoryNode]) -> usize {
    nodes.iter().map(CategoryNode::unpersisted_count).sum()
}
