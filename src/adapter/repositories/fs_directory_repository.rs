//! File System Directory Repository Implementation
//!
//! DirectoryRepositoryのファイルシステム実装

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::domain::entities::project_directory::ProjectDirectory;
use crate::domain::repositories::directory_repository::DirectoryRepository;

/// ファイルシステムベースのディレクトリリポジトリ
pub struct FsDirectoryRepository;

impl FsDirectoryRepository {
    /// 新しいリポジトリを作成
    pub fn new() -> Self {
        Self
    }

    /// 直下のサブディレクトリを列挙する（内部実装）
    fn list_internal(root: &Path) -> Result<Vec<ProjectDirectory>> {
        let expanded_path = shellexpand::tilde(&root.to_string_lossy()).into_owned();
        let root = PathBuf::from(expanded_path);

        let metadata = std::fs::metadata(&root)
            .context(format!("Failed to read root directory: {}", root.display()))?;
        if !metadata.is_dir() {
            anyhow::bail!("Root path is not a directory: {}", root.display());
        }

        let mut directories = Vec::new();

        for entry in WalkDir::new(&root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            // リンク切れのシンボリックリンクなどはスキップ
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry in {}: {}", root.display(), e);
                    continue;
                }
            };
            if !entry.file_type().is_dir() {
                debug!("Skipping non-directory entry: {}", entry.path().display());
                continue;
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            directories.push(ProjectDirectory::new(name, entry.path()));
        }

        info!(
            "Found {} project directories in {}",
            directories.len(),
            root.display()
        );

        Ok(directories)
    }
}

#[async_trait]
impl DirectoryRepository for FsDirectoryRepository {
    async fn list_project_directories(&self, root: &Path) -> Result<Vec<ProjectDirectory>> {
        let root = root.to_path_buf();
        tokio::task::spawn_blocking(move || Self::list_internal(&root))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))?
    }
}

impl Default for FsDirectoryRepository {
    fn default() -> Self {
        Self::new()
    }
}
