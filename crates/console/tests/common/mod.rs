//! Общие заготовки интеграционных тестов: транспорт-заглушка и ответы сервера.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use console::shared::api::{ApiClient, ApiError, ApiRequest, ApiResponse, HttpTransport, Method};
use console::shared::state::RefreshHook;
use console::system::session::Session;
use serde_json::{json, Value};

type Handler = Box<dyn Fn(&ApiRequest) -> ApiResponse + Send + Sync>;

/// Транспорт-заглушка: записывает запросы и отвечает сценарием из замыкания
pub struct MockTransport {
    requests: Mutex<Vec<ApiRequest>>,
    handler: Handler,
}

impl MockTransport {
    pub fn new(handler: impl Fn(&ApiRequest) -> ApiResponse + Send + Sync + 'static) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            handler: Box::new(handler),
        })
    }

    /// Транспорт, на любой запрос отвечающий 500
    pub fn failing() -> Arc<Self> {
        Self::new(|_| ApiResponse::new(500, "boom"))
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn endpoints(&self) -> Vec<String> {
        self.requests().iter().map(ApiRequest::endpoint).collect()
    }

    pub fn count(&self, method: Method) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method)
            .count()
    }

    /// Запросы указанным методом на путь, начинающийся с `prefix`
    pub fn matching(&self, method: Method, prefix: &str) -> Vec<ApiRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path.starts_with(prefix))
            .collect()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.requests.lock().unwrap().push(request.clone());
        Ok((self.handler)(&request))
    }
}

/// Счётчик обновлений списка
#[derive(Default)]
pub struct CountingRefresh {
    calls: AtomicUsize,
}

impl CountingRefresh {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RefreshHook for CountingRefresh {
    async fn refresh(&self) -> Result<(), ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub fn api(transport: &Arc<MockTransport>) -> ApiClient {
    ApiClient::new(transport.clone())
}

/// Сессия пользователя филиала 1
pub fn session() -> Session {
    Session::anonymous().with_token("secret").with_branch(1)
}

pub fn ok(value: Value) -> ApiResponse {
    ApiResponse::new(200, value.to_string())
}

pub fn branch_json(id: i64, empresa: i64) -> Value {
    json!({
        "id": id,
        "nombre": format!("Sucursal {}", id),
        "esCasaMatriz": id == 1,
        "empresa": { "id": empresa },
        "eliminado": false
    })
}

/// Ответы на разрешение филиалов: филиал 1 принадлежит компании 7,
/// у компании филиалы 1 и 2 (и удалённый 3)
pub fn branch_routes(request: &ApiRequest) -> Option<ApiResponse> {
    if request.method != Method::Get {
        return None;
    }
    match request.path.as_str() {
        "sucursales/1" => Some(ok(branch_json(1, 7))),
        "sucursales/findByEmpresa" => {
            let mut deleted = branch_json(3, 7);
            deleted["eliminado"] = json!(true);
            Some(ok(json!([branch_json(1, 7), branch_json(2, 7), deleted])))
        }
        _ => None,
    }
}

pub fn company_json(id: i64) -> Value {
    json!({
        "id": id,
        "nombre": "La Esquina",
        "razonSocial": "La Esquina S.A.",
        "cuil": "20-12345678-9",
        "eliminado": false,
        "imagenes": []
    })
}

pub fn category_json(id: i64, denominacion: &str) -> Value {
    json!({
        "id": id,
        "denominacion": denominacion,
        "esInsumo": false,
        "sucursales": [{ "id": 1 }],
        "eliminado": false
    })
}

/// JSON-тело запроса
pub fn json_body(request: &ApiRequest) -> Option<&Value> {
    match &request.body {
        console::shared::api::RequestBody::Json(value) => Some(value),
        _ => None,
    }
}

/// Родитель из пути `categorias/addSubCategoria/{parent}`
pub fn sub_category_parent(request: &ApiRequest) -> Option<i64> {
    request
        .path
        .strip_prefix("categorias/addSubCategoria/")
        .and_then(|p| p.parse().ok())
}

/// Ответ `addSubCategoria`: очередной id начиная с `first`,
/// для наименований из `failing` отвечает 500
pub fn sub_category_routes(
    first: i64,
    failing: &'static [&'static str],
) -> impl Fn(&ApiRequest) -> Option<ApiResponse> + Send + Sync + 'static {
    let next = std::sync::atomic::AtomicI64::new(first);
    move |request: &ApiRequest| {
        sub_category_parent(request)?;
        let name = json_body(request)
            .and_then(|b| b["denominacion"].as_str())
            .unwrap_or_default();
        if failing.contains(&name) {
            return Some(ApiResponse::new(500, "constraint violation"));
        }
        let id = next.fetch_add(1, Ordering::SeqCst);
        Some(ok(json!({ "id": id, "denominacion": name })))
    }
}
