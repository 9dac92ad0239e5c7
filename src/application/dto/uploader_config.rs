//! # Uploader Configuration DTO
//!
//! 一括アップロード設定のData Transfer Object

use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::services::remote_naming::RemoteNaming;

/// アップロード設定
///
/// 起動時に一度だけ作成され、実行中は変更されない
#[derive(Clone)]
pub struct UploaderConfig {
    root_path: PathBuf,
    api_url: String,
    private_token: String,
    group_prefix: String,
    namespace_id: String,
}

impl UploaderConfig {
    /// 新しいアップロード設定を作成します。
    ///
    /// API URL と SSH グループパスはサーバー名から導出されます。
    ///
    /// # 例
    ///
    /// ```
    /// use glbulk::application::dto::uploader_config::UploaderConfig;
    ///
    /// let config = UploaderConfig::new(
    ///     "/srv/projects",
    ///     "gitlab.example.com",
    ///     "glpat-xxxx",
    ///     "platform/services",
    ///     "42",
    /// );
    ///
    /// assert_eq!(config.api_url(), "https://gitlab.example.com/api/v4/projects/");
    /// assert_eq!(config.group_prefix(), "git@gitlab.example.com:platform/services");
    /// assert_eq!(
    ///     config.remote_url_for("proj-a"),
    ///     "git@gitlab.example.com:platform/services/proj-a.git"
    /// );
    /// ```
    pub fn new(
        root_path: impl Into<PathBuf>,
        server: &str,
        private_token: &str,
        group_path: &str,
        namespace_id: &str,
    ) -> Self {
        Self {
            root_path: root_path.into(),
            api_url: RemoteNaming::api_projects_url(server),
            private_token: private_token.to_string(),
            group_prefix: RemoteNaming::group_prefix(server, group_path),
            namespace_id: namespace_id.to_string(),
        }
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn private_token(&self) -> &str {
        &self.private_token
    }

    pub fn group_prefix(&self) -> &str {
        &self.group_prefix
    }

    pub fn namespace_id(&self) -> &str {
        &self.namespace_id
    }

    /// ディレクトリ名に対応するリモートURL
    pub fn remote_url_for(&self, dir_name: &str) -> String {
        RemoteNaming::remote_url(&self.group_prefix, dir_name)
    }
}

// トークンはログに出さない
impl fmt::Debug for UploaderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploaderConfig")
            .field("root_path", &self.root_path)
            .field("api_url", &self.api_url)
            .field("private_token", &"***")
            .field("group_prefix", &self.group_prefix)
            .field("namespace_id", &self.namespace_id)
            .finish()
    }
}
