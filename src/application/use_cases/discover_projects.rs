//! # Discover Projects Use Case
//!
//! プロジェクトディレクトリ発見ユースケース

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use crate::domain::entities::project_directory::ProjectDirectory;
use crate::domain::repositories::directory_repository::DirectoryRepository;

/// プロジェクトディレクトリ発見ユースケース
///
/// ルート直下のサブディレクトリを名前順に返す
pub struct DiscoverProjectsUseCase<R: DirectoryRepository> {
    directory_repository: Arc<R>,
}

impl<R: DirectoryRepository> DiscoverProjectsUseCase<R> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `directory_repository` - ディレクトリリポジトリ
    pub fn new(directory_repository: Arc<R>) -> Self {
        Self {
            directory_repository,
        }
    }

    /// プロジェクトディレクトリを発見する
    ///
    /// リポジトリ実装に関わらず、結果は名前順にソートして返す
    ///
    /// # Errors
    ///
    /// ルートディレクトリの読み取りに失敗した場合にエラーを返す
    pub async fn execute(&self, root: &Path) -> Result<Vec<ProjectDirectory>> {
        let mut directories = self.directory_repository.list_project_directories(root).await?;
        directories.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(directories)
    }
}
