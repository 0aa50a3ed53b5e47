use contracts::domain::a002_branch::aggregate::Branch;
use contracts::domain::common::ResourceId;
use thiserror::Error;

use crate::shared::api::{ApiError, ResourceClient};

/// Не удалось получить список филиалов для выбора
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AssociationError {
    #[error("Не задан филиал пользователя")]
    MissingAnchor,

    #[error("У филиала {anchor_id} не указана компания")]
    OwnerMissing { anchor_id: ResourceId },

    #[error("Ошибка загрузки филиалов: {0}")]
    Request(#[from] ApiError),
}

/// Находит компанию филиала-якоря и все её филиалы
pub struct AssociationResolver {
    branches: ResourceClient<Branch>,
}

impl AssociationResolver {
    pub fn new(branches: ResourceClient<Branch>) -> Self {
        Self { branches }
    }

    /// Все действующие филиалы компании, которой принадлежит якорь
    pub async fn resolve_branch_options(
        &self,
        anchor_id: ResourceId,
        token: Option<&str>,
    ) -> Result<Vec<Branch>, AssociationError> {
        let anchor = self.branches.get_with(anchor_id, token).await?;
        let company_id = anchor
            .company_id()
            .ok_or(AssociationError::OwnerMissing { anchor_id })?;

        let siblings = self
            .branches
            .find_by(
                "findByEmpresa",
                &[("empresaId", company_id.to_string())],
                token,
            )
            .await?;

        let options: Vec<Branch> = siblings.into_iter().filter(|b| !b.eliminado).collect();
        tracing::debug!(
            anchor_id,
            company_id,
            options = options.len(),
            "branch options resolved"
        );
        Ok(options)
    }
}
