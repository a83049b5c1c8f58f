//! HTTP client for the employee API.

use platform_api::{EmployeeInput, EmployeeView};
use reqwest::{Response, StatusCode};
use thiserror::Error;
use tracing::instrument;

use crate::config::CustomProperties;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request to employee api failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("employee api answered {status}: {body}")]
    Status { status: StatusCode, body: String },
}

#[derive(Clone, Debug)]
pub struct EmployeeClient {
    http: reqwest::Client,
    base: String,
}

impl EmployeeClient {
    pub fn new(properties: &CustomProperties) -> Self {
        Self::with_client(reqwest::Client::new(), properties)
    }

    pub fn with_client(http: reqwest::Client, properties: &CustomProperties) -> Self {
        Self {
            http,
            base: properties.api_url().trim().trim_end_matches('/').to_string(),
        }
    }

    fn collection(&self) -> String {
        format!("{}/employees", self.base)
    }

    fn member(&self, id: i32) -> String {
        format!("{}/employees/{}", self.base, id)
    }

    #[instrument(name = "client.employees.list", skip(self))]
    pub async fn list(&self) -> Result<Vec<EmployeeView>, ClientError> {
        let response = self.http.get(self.collection()).send().await?;
        Ok(check(response).await?.json().await?)
    }

    #[instrument(name = "client.employees.get", skip(self))]
    pub async fn get(&self, id: i32) -> Result<Option<EmployeeView>, ClientError> {
        let response = self.http.get(self.member(id)).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(check(response).await?.json().await?))
    }

    /// Create the employee when `id` is `None`, otherwise update it.
    #[instrument(name = "client.employees.save", skip(self, input))]
    pub async fn save(
        &self,
        id: Option<i32>,
        input: &EmployeeInput,
    ) -> Result<EmployeeView, ClientError> {
        let request = match id {
            None => self.http.post(self.collection()),
            Some(id) => self.http.put(self.member(id)),
        };
        let response = request.json(input).send().await?;
        Ok(check(response).await?.json().await?)
    }

    #[instrument(name = "client.employees.delete", skip(self))]
    pub async fn delete(&self, id: i32) -> Result<bool, ClientError> {
        let response = self.http.delete(self.member(id)).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        check(response).await?;
        Ok(true)
    }
}

async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Status { status, body })
}
