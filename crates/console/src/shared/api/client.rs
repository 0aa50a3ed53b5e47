use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

use super::error::ApiError;
use super::transport::{ApiRequest, ApiResponse, HttpTransport};

/// Нетипизированный клиент бэкенда
///
/// Превращает ответы транспорта в `Result`. Код вне 2xx даёт `RequestFailed`,
/// пустое тело там, где нужна запись, даёт `EmptyResponse`. Повторов нет:
/// повторный POST на сервере создаёт дубликат.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn HttpTransport>,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    /// Выполнить запрос и проверить статус
    pub async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let endpoint = request.endpoint();
        tracing::debug!(endpoint = %endpoint, "api request");

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(endpoint = %endpoint, error = %e, "api transport failure");
                return Err(e);
            }
        };

        if !response.is_success() {
            tracing::warn!(
                endpoint = %endpoint,
                status = response.status,
                body = %String::from_utf8_lossy(&response.body),
                "api request failed"
            );
            return Err(ApiError::RequestFailed {
                status: response.status,
                endpoint,
            });
        }

        Ok(response)
    }

    /// Выполнить запрос и разобрать JSON-ответ
    pub async fn execute_json<T>(&self, request: ApiRequest) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let endpoint = request.endpoint();
        let response = self.execute(request).await?;
        decode_body(&endpoint, &response)
    }

    /// Выполнить запрос, тело ответа не нужно
    pub async fn execute_unit(&self, request: ApiRequest) -> Result<(), ApiError> {
        self.execute(request).await.map(|_| ())
    }
}

/// Разобрать тело ответа; 204 и пустое тело считаются ошибкой
pub fn decode_body<T>(endpoint: &str, response: &ApiResponse) -> Result<T, ApiError>
where
    T: DeserializeOwned,
{
    if response.status == 204 || response.body.iter().all(u8::is_ascii_whitespace) {
        tracing::warn!(endpoint = %endpoint, status = response.status, "empty response body");
        return Err(ApiError::EmptyResponse {
            endpoint: endpoint.to_string(),
        });
    }

    serde_json::from_slice(&response.body).map_err(|e| ApiError::Decode {
        endpoint: endpoint.to_string(),
        message: e.to_string(),
    })
}

/// Сериализовать тело запроса
pub fn encode_body<T>(endpoint: &str, body: &T) -> Result<serde_json::Value, ApiError>
where
    T: Serialize + ?Sized,
{
    serde_json::to_value(body).map_err(|e| ApiError::Encode {
        endpoint: endpoint.to_string(),
        message: e.to_string(),
    })
}
