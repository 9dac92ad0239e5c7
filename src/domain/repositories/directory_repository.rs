//! # Directory Repository Trait
//!
//! プロジェクトディレクトリの列挙を抽象化

use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;

use crate::domain::entities::project_directory::ProjectDirectory;

/// ディレクトリリポジトリ
///
/// ルート直下のプロジェクトディレクトリの発見を担当するリポジトリ
#[async_trait]
pub trait DirectoryRepository: Send + Sync {
    /// プロジェクトディレクトリを列挙する
    ///
    /// # Arguments
    ///
    /// * `root` - ルートディレクトリのパス
    ///
    /// # Returns
    ///
    /// 名前順にソートされた直下のサブディレクトリ
    ///
    /// # Errors
    ///
    /// ルートディレクトリが読み取れない場合にエラーを返す
    async fn list_project_directories(&self, root: &Path) -> Result<Vec<ProjectDirectory>>;
}
