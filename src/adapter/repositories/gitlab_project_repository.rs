//! GitLab Project Repository Implementation
//!
//! RemoteProjectRepositoryのGitLab実装

use async_trait::async_trait;
use log::{debug, warn};
use std::sync::Arc;

use crate::adapter::gitlab::client::ProjectsApi;
use crate::adapter::gitlab::status;
use crate::domain::errors::{StepError, StepResult};
use crate::domain::repositories::remote_project_repository::{
    CreateProjectRequest, RemoteProjectRepository,
};

/// GitLabプロジェクトリポジトリ
pub struct GitLabProjectRepository<A: ProjectsApi> {
    api: Arc<A>,
}

impl<A: ProjectsApi> GitLabProjectRepository<A> {
    /// 新しいリポジトリを作成
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl<A: ProjectsApi> RemoteProjectRepository for GitLabProjectRepository<A> {
    async fn create_project(&self, request: &CreateProjectRequest) -> StepResult {
        let code = self.api.post_project(request).await.map_err(|e| {
            debug!("{:?}", e);
            StepError::Http(format!("{:#}", e))
        })?;

        if !status::is_created(code) {
            warn!(
                "{} | something went wrong. Gitlab API Status Code: {} ({})",
                request.name,
                code,
                status::describe_failure(code)
            );
        }

        status::classify(code)
    }
}
