use contracts::domain::common::{ResourceId, ResourceKind};
use serde::{de::DeserializeOwned, Serialize};
use std::marker::PhantomData;

use super::client::{encode_body, ApiClient};
use super::error::ApiError;
use super::transport::{ApiRequest, ApiResponse, Method, MultipartField};

/// Типизированный шлюз к REST-коллекции одного вида ресурсов
///
/// `GET/POST/PUT/DELETE {collection}[/{id}]`. У каждого метода есть вариант
/// `*_auth`, отправляющий `Authorization: Bearer {token}`.
pub struct ResourceClient<K: ResourceKind> {
    api: ApiClient,
    _kind: PhantomData<fn() -> K>,
}

impl<K: ResourceKind> Clone for ResourceClient<K> {
    fn clone(&self) -> Self {
        Self::new(self.api.clone())
    }
}

impl<K: ResourceKind> ResourceClient<K> {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            _kind: PhantomData,
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    fn path(suffix: Option<&str>) -> String {
        match suffix {
            Some(s) => format!("{}/{}", K::collection_name(), s),
            None => K::collection_name().to_string(),
        }
    }

    // ============================================================================
    // Чтение
    // ============================================================================

    pub async fn get(&self, id: ResourceId) -> Result<K::Persisted, ApiError> {
        self.get_with(id, None).await
    }

    pub async fn get_auth(&self, id: ResourceId, token: &str) -> Result<K::Persisted, ApiError> {
        self.get_with(id, Some(token)).await
    }

    pub async fn get_with(
        &self,
        id: ResourceId,
        token: Option<&str>,
    ) -> Result<K::Persisted, ApiError> {
        let request = ApiRequest::new(Method::Get, Self::path(Some(&id.to_string()))).bearer(token);
        self.api.execute_json(request).await
    }

    pub async fn get_all(&self) -> Result<Vec<K::Persisted>, ApiError> {
        self.get_all_with(None).await
    }

    pub async fn get_all_auth(&self, token: &str) -> Result<Vec<K::Persisted>, ApiError> {
        self.get_all_with(Some(token)).await
    }

    pub async fn get_all_with(&self, token: Option<&str>) -> Result<Vec<K::Persisted>, ApiError> {
        let request = ApiRequest::new(Method::Get, Self::path(None)).bearer(token);
        self.api.execute_json(request).await
    }

    /// `GET {collection}/{finder}?k=v...`, например `findByEmpresa?empresaId=1`
    pub async fn find_by(
        &self,
        finder: &str,
        params: &[(&str, String)],
        token: Option<&str>,
    ) -> Result<Vec<K::Persisted>, ApiError> {
        let mut request = ApiRequest::new(Method::Get, Self::path(Some(finder))).bearer(token);
        for (key, value) in params {
            request = request.query(*key, value);
        }
        self.api.execute_json(request).await
    }

    // ============================================================================
    // Запись
    // ============================================================================

    pub async fn create(&self, payload: &K::CreateRequest) -> Result<K::Persisted, ApiError> {
        self.create_with(payload, None).await
    }

    pub async fn create_auth(
        &self,
        payload: &K::CreateRequest,
        token: &str,
    ) -> Result<K::Persisted, ApiError> {
        self.create_with(payload, Some(token)).await
    }

    pub async fn create_with(
        &self,
        payload: &K::CreateRequest,
        token: Option<&str>,
    ) -> Result<K::Persisted, ApiError> {
        let request = ApiRequest::new(Method::Post, Self::path(None)).bearer(token);
        let body = encode_body(&request.endpoint(), payload)?;
        self.api.execute_json(request.json(body)).await
    }

    pub async fn update(
        &self,
        id: ResourceId,
        payload: &K::UpdateRequest,
    ) -> Result<K::Persisted, ApiError> {
        self.update_with(id, payload, None).await
    }

    pub async fn update_auth(
        &self,
        id: ResourceId,
        payload: &K::UpdateRequest,
        token: &str,
    ) -> Result<K::Persisted, ApiError> {
        self.update_with(id, payload, Some(token)).await
    }

    pub async fn update_with(
        &self,
        id: ResourceId,
        payload: &K::UpdateRequest,
        token: Option<&str>,
    ) -> Result<K::Persisted, ApiError> {
        let request =
            ApiRequest::new(Method::Put, Self::path(Some(&id.to_string()))).bearer(token);
        let body = encode_body(&request.endpoint(), payload)?;
        self.api.execute_json(request.json(body)).await
    }

    pub async fn delete(&self, id: ResourceId) -> Result<(), ApiError> {
        self.delete_with(id, None).await
    }

    pub async fn delete_auth(&self, id: ResourceId, token: &str) -> Result<(), ApiError> {
        self.delete_with(id, Some(token)).await
    }

    pub async fn delete_with(&self, id: ResourceId, token: Option<&str>) -> Result<(), ApiError> {
        let request =
            ApiRequest::new(Method::Delete, Self::path(Some(&id.to_string()))).bearer(token);
        self.api.execute_unit(request).await
    }

    // ============================================================================
    // Действия над коллекцией
    // ============================================================================

    /// `POST {collection}/{action}` с JSON-телом и JSON-ответом
    pub async fn post_action<B, R>(
        &self,
        action: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let request = ApiRequest::new(Method::Post, Self::path(Some(action))).bearer(token);
        let body = encode_body(&request.endpoint(), body)?;
        self.api.execute_json(request.json(body)).await
    }

    /// `POST {collection}/{action}` с multipart-телом; ответ не интерпретируется
    pub async fn post_multipart(
        &self,
        action: &str,
        query: &[(&str, String)],
        fields: Vec<MultipartField>,
        token: Option<&str>,
    ) -> Result<ApiResponse, ApiError> {
        let mut request = ApiRequest::new(Method::Post, Self::path(Some(action))).bearer(token);
        for (key, value) in query {
            request = request.query(*key, value);
        }
        self.api.execute(request.multipart(fields)).await
    }
}
