//! Доступ к REST-бэкенду
//!
//! - transport.rs: транспорт (reqwest) и описание запроса/ответа
//! - client.rs: проверка статусов и разбор JSON
//! - resource_client.rs: типизированный CRUD по виду ресурса

pub mod client;
pub mod error;
pub mod resource_client;
pub mod transport;

pub use client::ApiClient;
pub use error::ApiError;
pub use resource_client::ResourceClient;
pub use transport::{
    ApiRequest, ApiResponse, HttpTransport, Method, MultipartField, ReqwestTransport, RequestBody,
};
