use serde::{Deserialize, Serialize};

/// Роль сотрудника
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Cajero,
    Cocinero,
    Delivery,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Cajero => "CAJERO",
            Role::Cocinero => "COCINERO",
            Role::Delivery => "DELIVERY",
        }
    }
}

/// Текущий пользователь консоли
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub email: Option<String>,
    pub rol: Role,
}

impl UserInfo {
    pub fn is_admin(&self) -> bool {
        self.rol == Role::Admin
    }
}
