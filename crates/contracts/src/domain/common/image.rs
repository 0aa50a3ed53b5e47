use serde::{Deserialize, Serialize};

use super::ResourceId;

/// Сохранённое изображение ресурса
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub id: ResourceId,

    /// Идентификатор файла во внешнем хранилище
    #[serde(default)]
    pub public_id: String,

    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub eliminado: bool,
}
