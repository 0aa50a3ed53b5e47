use serde::{Deserialize, Serialize};

use super::ResourceId;

/// Ссылка на связанную запись в виде `{ "id": n }`
///
/// Сервер принимает ссылки в таком виде, а в ответах присылает полные объекты;
/// лишние поля при разборе игнорируются.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdRef {
    pub id: ResourceId,
}

impl IdRef {
    pub fn new(id: ResourceId) -> Self {
        Self { id }
    }

    pub fn from_ids(ids: &[ResourceId]) -> Vec<IdRef> {
        ids.iter().copied().map(IdRef::new).collect()
    }
}
