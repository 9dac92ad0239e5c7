//! GitLab Client Abstractions
//!
//! クライアントの抽象化と実装

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Request};

#[cfg(test)]
use mockall::automock;

use crate::domain::repositories::remote_project_repository::CreateProjectRequest;

/// 認証ヘッダー名
pub const PRIVATE_TOKEN_HEADER: &str = "PRIVATE-TOKEN";

/// Trait for the GitLab project-creation endpoint
/// This enables mocking in tests while using the real client in production
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProjectsApi: Send + Sync {
    /// POST the project form and return the HTTP status code
    async fn post_project(&self, request: &CreateProjectRequest) -> Result<u16>;
}

/// reqwest-backed client implementing ProjectsApi
pub struct ReqwestProjectsApi {
    client: Client,
    api_url: String,
    private_token: String,
}

impl ReqwestProjectsApi {
    pub fn new(api_url: &str, private_token: &str) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.to_string(),
            private_token: private_token.to_string(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// 認証ヘッダー付きのフォーム POST を組み立てる
    fn build_request(&self, request: &CreateProjectRequest) -> Result<Request> {
        self.client
            .post(&self.api_url)
            .header(PRIVATE_TOKEN_HEADER, &self.private_token)
            .form(request)
            .build()
            .context(format!("Invalid GitLab API request: {}", self.api_url))
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[async_trait]
impl ProjectsApi for ReqwestProjectsApi {
    async fn post_project(&self, request: &CreateProjectRequest) -> Result<u16> {
        let http_request = self.build_request(request)?;
        let response = self
            .client
            .execute(http_request)
            .await
            .context(format!("GitLab API request failed: {}", self.api_url))?;

        Ok(response.status().as_u16())
    }
}
