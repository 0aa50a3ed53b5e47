pub mod api;
pub mod config;
pub mod logger;
pub mod notify;
pub mod state;
pub mod validation;
