use contracts::domain::common::ResourceId;
use contracts::system::auth::UserInfo;

/// Контекст текущего пользователя
///
/// Создаётся один раз и явно передаётся во все операции, которым нужны
/// токен, роль или филиал пользователя.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub access_token: Option<String>,
    pub user: Option<UserInfo>,
    /// Филиал, в котором работает пользователь
    pub branch_id: Option<ResourceId>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn with_user(mut self, user: UserInfo) -> Self {
        self.user = Some(user);
        self
    }

    pub fn with_branch(mut self, branch_id: ResourceId) -> Self {
        self.branch_id = Some(branch_id);
        self
    }

    /// Токен для заголовка `Authorization`, если пользователь вошёл
    pub fn bearer(&self) -> Option<&str> {
        self.access_token.as_deref().filter(|t| !t.trim().is_empty())
    }

    /// Имя пользователя для логов
    pub fn username(&self) -> &str {
        self.user
            .as_ref()
            .map(|u| u.username.as_str())
            .unwrap_or("anonymous")
    }
}
