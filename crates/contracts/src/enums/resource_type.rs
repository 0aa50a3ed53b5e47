use serde::{Deserialize, Serialize};

/// Виды ресурсов консоли
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceType {
    Company,
    Branch,
    Category,
    SupplyItem,
    Product,
    Promotion,
}

impl ResourceType {
    /// Получить код вида
    pub fn code(&self) -> &'static str {
        match self {
            ResourceType::Company => "empresa",
            ResourceType::Branch => "sucursal",
            ResourceType::Category => "categoria",
            ResourceType::SupplyItem => "insumo",
            ResourceType::Product => "manufacturado",
            ResourceType::Promotion => "promocion",
        }
    }

    /// Получить человекочитаемое название
    pub fn display_name(&self) -> &'static str {
        match self {
            ResourceType::Company => "Компания",
            ResourceType::Branch => "Филиал",
            ResourceType::Category => "Категория",
            ResourceType::SupplyItem => "Инсум",
            ResourceType::Product => "Изготавливаемый товар",
            ResourceType::Promotion => "Промоакция",
        }
    }

    /// Получить все виды
    pub fn all() -> Vec<ResourceType> {
        vec![
            ResourceType::Company,
            ResourceType::Branch,
            ResourceType::Category,
            ResourceType::SupplyItem,
            ResourceType::Product,
            ResourceType::Promotion,
        ]
    }

    /// Парсинг из строки
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "empresa" => Some(ResourceType::Company),
            "sucursal" => Some(ResourceType::Branch),
            "categoria" => Some(ResourceType::Category),
            "insumo" => Some(ResourceType::SupplyItem),
            "manufacturado" => Some(ResourceType::Product),
            "promocion" => Some(ResourceType::Promotion),
            _ => None,
        }
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
