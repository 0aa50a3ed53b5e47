use thiserror::Error;

/// Ошибки обращения к REST-бэкенду
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Ответ с кодом вне 2xx
    #[error("Запрос {endpoint} завершился ошибкой (HTTP {status})")]
    RequestFailed { status: u16, endpoint: String },

    /// 204 или пустое тело там, где ожидалась запись
    #[error("Сервер вернул пустой ответ на {endpoint}")]
    EmptyResponse { endpoint: String },

    #[error("Не удалось разобрать ответ {endpoint}: {message}")]
    Decode { endpoint: String, message: String },

    #[error("Не удалось сформировать запрос {endpoint}: {message}")]
    Encode { endpoint: String, message: String },

    /// Сеть недоступна, таймаут и т.п.
    #[error("Сетевая ошибка при обращении к {endpoint}: {message}")]
    Transport { endpoint: String, message: String },
}

impl ApiError {
    pub fn endpoint(&self) -> &str {
        match self {
            ApiError::RequestFailed { endpoint, .. }
            | ApiError::EmptyResponse { endpoint }
            | ApiError::Decode { endpoint, .. }
            | ApiError::Encode { endpoint, .. }
            | ApiError::Transport { endpoint, .. } => endpoint,
        }
    }

    /// HTTP-статус, если сервер успел ответить
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Запись уже отсутствует на сервере
    pub fn is_not_found(&self) -> bool {
        matches!(self.status(), Some(404) | Some(410))
    }
}
