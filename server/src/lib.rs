//! Employee API: REST access to the `employees` table.

pub mod config;
pub mod employees;
pub mod http;
pub mod migrate;
pub mod seed;

pub use config::AppConfig;
pub use http::{AppState, ServeConfig, build_router};
