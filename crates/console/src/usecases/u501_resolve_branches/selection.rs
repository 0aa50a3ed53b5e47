use contracts::domain::a002_branch::aggregate::Branch;
use contracts::domain::common::{IdRef, ResourceId};
use std::collections::BTreeSet;

use super::resolver::{AssociationError, AssociationResolver};

/// Доступные филиалы и выбор пользователя
#[derive(Debug, Clone, Default)]
pub struct BranchSelection {
    options: Vec<Branch>,
    selected: BTreeSet<ResourceId>,
}

impl BranchSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Загрузить варианты; при ошибке список вариантов остаётся пустым
    pub async fn load(
        &mut self,
        resolver: &AssociationResolver,
        anchor_id: ResourceId,
        token: Option<&str>,
    ) -> Result<(), AssociationError> {
        match resolver.resolve_branch_options(anchor_id, token).await {
            Ok(options) => {
                self.set_options(options);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(anchor_id, error = %e, "branch options unavailable");
                self.options.clear();
                self.selected.clear();
                Err(e)
            }
        }
    }

    /// Заменить варианты; выбор, которого больше нет среди вариантов, снимается
    pub fn set_options(&mut self, options: Vec<Branch>) {
        self.options = options;
        let available: BTreeSet<ResourceId> = self.options.iter().map(|b| b.id).collect();
        self.selected.retain(|id| available.contains(id));
    }

    pub fn options(&self) -> &[Branch] {
        &self.options
    }

    /// Переключить выбор филиала; неизвестные идентификаторы игнорируются
    pub fn toggle(&mut self, id: ResourceId) -> bool {
        if !self.options.iter().any(|b| b.id == id) {
            return false;
        }
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
        true
    }

    pub fn select_all(&mut self) {
        self.selected = self.options.iter().map(|b| b.id).collect();
    }

    pub fn is_selected(&self, id: ResourceId) -> bool {
        self.selected.contains(&id)
    }

    pub fn selected_ids(&self) -> Vec<ResourceId> {
        self.selected.iter().copied().collect()
    }

    /// Выбор в виде ссылок для тела запроса
    pub fn selected_refs(&self) -> Vec<IdRef> {
        IdRef::from_ids(&self.selected_ids())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn branch(id: ResourceId) -> Branch {
        Branch {
            id,
            nombre: format!("Sucursal {}", id),
            horario_apertura: None,
            horario_cierre: None,
            es_casa_matriz: false,
            empresa: Some(IdRef::new(1)),
            eliminado: false,
            imagenes: vec![],
        }
    }

    #[test]
    fn test_toggle_only_known_branches() {
        let mut selection = BranchSelection::new();
        selection.set_options(vec![branch(1), branch(2)]);

        assert!(selection.toggle(2));
        assert!(!selection.toggle(9));
        assert_eq!(selection.selected_ids(), vec![2]);

        assert!(selection.toggle(2));
        assert!(selection.selected_ids().is_empty());
    }

    #[test]
    fn test_replacing_options_drops_stale_selection() {
        let mut selection = BranchSelection::new();
        selection.set_options(vec![branch(1), branch(2)]);
        selection.select_all();

        selection.set_options(vec![branch(2), branch(3)]);
        assert_eq!(selection.selected_ids(), vec![2]);
        assert_eq!(selection.selected_refs(), vec![IdRef::new(2)]);
    }
}
