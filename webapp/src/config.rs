use anyhow::{Result, anyhow};

/// Environment key holding the API base address.
pub const API_URL_KEY: &str = "WEBAPP_API_URL";

/// Settings the web front needs to reach the employee API.
///
/// Read once in `main` and shared by reference; the URL is kept exactly as
/// supplied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomProperties {
    api_url: String,
}

impl CustomProperties {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
        }
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup(API_URL_KEY).ok_or_else(|| anyhow!("missing env {}", API_URL_KEY))?;
        Ok(Self { api_url })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}
