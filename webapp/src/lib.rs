//! Web front for the employee directory. Every employee operation is
//! forwarded to the API found at [`CustomProperties::api_url`].

pub mod client;
pub mod config;
pub mod http;

pub use client::{ClientError, EmployeeClient};
pub use config::CustomProperties;
