//! # Remote Project Repository Trait
//!
//! リモートホスティングサービス上のプロジェクト作成を抽象化

use async_trait::async_trait;
use serde::Serialize;

#[cfg(test)]
use mockall::automock;

use crate::domain::entities::project_directory::ProjectDirectory;
use crate::domain::errors::StepResult;

/// プロジェクト作成リクエスト
///
/// フォームフィールドとしてそのまま送信される
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateProjectRequest {
    pub name: String,
    pub path: String,
    pub namespace_id: String,
    pub initialize_with_readme: bool,
}

impl CreateProjectRequest {
    /// ディレクトリ名をプロジェクト名とパスに使ってリクエストを作成
    pub fn for_directory(directory: &ProjectDirectory, namespace_id: &str) -> Self {
        Self {
            name: directory.name().to_string(),
            path: directory.name().to_string(),
            namespace_id: namespace_id.to_string(),
            initialize_with_readme: false,
        }
    }
}

/// リモートプロジェクトリポジトリ
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RemoteProjectRepository: Send + Sync {
    /// リモートプロジェクトを作成する
    ///
    /// # Errors
    ///
    /// HTTP 201 以外のステータス、または通信エラーの場合にエラーを返す
    async fn create_project(&self, request: &CreateProjectRequest) -> StepResult;
}
