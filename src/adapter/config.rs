//! Configuration Loading
//!
//! 環境変数または JSON ファイルから設定を読み込む

use anyhow::{Context, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use thiserror::Error;

use crate::adapter::git::identity::CommitIdentity;
use crate::application::dto::uploader_config::UploaderConfig;

pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
pub const ENV_FS_LOCAL_PATH: &str = "FS_LOCAL_PATH";
pub const ENV_GL_SERVER: &str = "GL_SERVER";
pub const ENV_GL_PRIVATE_TOKEN: &str = "GL_PRIVATE_TOKEN";
pub const ENV_GL_GROUP_PATH: &str = "GL_GROUP_PATH";
pub const ENV_GL_GROUP_ID: &str = "GL_GROUP_ID";
pub const ENV_GIT_AUTHOR_NAME: &str = "GIT_AUTHOR_NAME";
pub const ENV_GIT_AUTHOR_EMAIL: &str = "GIT_AUTHOR_EMAIL";

const DEFAULT_LOG_LEVEL: &str = "DEBUG";

/// 設定エラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("required setting {0} is missing or empty")]
    Missing(&'static str),

    #[error("invalid log level: {0}")]
    InvalidLogLevel(String),
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

#[derive(Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    pub fs_local_path: String,
    pub gl_server: String,
    pub gl_private_token: String,
    pub gl_group_path: String,
    pub gl_group_id: String,

    // Commit identity (optional, falls back to git config)
    #[serde(default)]
    pub git_author_name: Option<String>,
    #[serde(default)]
    pub git_author_email: Option<String>,
}

impl Config {
    /// JSON ファイルから読み込む
    pub fn load(path: &str) -> Result<Self> {
        let expanded = shellexpand::tilde(path);
        let content = fs::read_to_string(expanded.as_ref())
            .context(format!("Failed to read config file: {}", path))?;
        let config: Config = serde_json::from_str(&content)
            .context(format!("Failed to parse config file: {}", path))?;
        config.validate()?;
        Ok(config)
    }

    /// プロセスの環境変数から読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 任意の参照関数から読み込む
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| -> Result<String, ConfigError> {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };
        let optional = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let config = Config {
            log_level: optional(ENV_LOG_LEVEL).unwrap_or_else(default_log_level),
            fs_local_path: required(ENV_FS_LOCAL_PATH)?,
            gl_server: required(ENV_GL_SERVER)?,
            gl_private_token: required(ENV_GL_PRIVATE_TOKEN)?,
            gl_group_path: required(ENV_GL_GROUP_PATH)?,
            gl_group_id: required(ENV_GL_GROUP_ID)?,
            git_author_name: optional(ENV_GIT_AUTHOR_NAME),
            git_author_email: optional(ENV_GIT_AUTHOR_EMAIL),
        };
        config.validate()?;
        Ok(config)
    }

    /// 必須項目と LOG_LEVEL を検証
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            (ENV_FS_LOCAL_PATH, &self.fs_local_path),
            (ENV_GL_SERVER, &self.gl_server),
            (ENV_GL_PRIVATE_TOKEN, &self.gl_private_token),
            (ENV_GL_GROUP_PATH, &self.gl_group_path),
            (ENV_GL_GROUP_ID, &self.gl_group_id),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Missing(key));
            }
        }
        self.log_level_filter()?;
        Ok(())
    }

    /// LOG_LEVEL をフィルタに変換
    ///
    /// loguru 形式のレベル名（SUCCESS, WARNING, CRITICAL）も受け付ける
    pub fn log_level_filter(&self) -> Result<LevelFilter, ConfigError> {
        parse_log_level(&self.log_level)
    }

    /// ユースケースに渡す不変の設定を作成
    pub fn to_uploader_config(&self) -> UploaderConfig {
        let root = shellexpand::tilde(&self.fs_local_path).into_owned();
        UploaderConfig::new(
            root,
            &self.gl_server,
            &self.gl_private_token,
            &self.gl_group_path,
            &self.gl_group_id,
        )
    }

    /// 名前とメールの両方がある場合のみ作成者を返す
    pub fn commit_identity(&self) -> Option<CommitIdentity> {
        match (&self.git_author_name, &self.git_author_email) {
            (Some(name), Some(email)) => Some(CommitIdentity::new(name.clone(), email.clone())),
            _ => None,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("log_level", &self.log_level)
            .field("fs_local_path", &self.fs_local_path)
            .field("gl_server", &self.gl_server)
            .field("gl_private_token", &"***")
            .field("gl_group_path", &self.gl_group_path)
            .field("gl_group_id", &self.gl_group_id)
            .field("git_author_name", &self.git_author_name)
            .field("git_author_email", &self.git_author_email)
            .finish()
    }
}

/// レベル名を LevelFilter に変換（大文字小文字を区別しない）
pub fn parse_log_level(level: &str) -> Result<LevelFilter, ConfigError> {
    match level.trim().to_ascii_uppercase().as_str() {
        "OFF" => Ok(LevelFilter::Off),
        "TRACE" => Ok(LevelFilter::Trace),
        "DEBUG" => Ok(LevelFilter::Debug),
        "INFO" | "SUCCESS" => Ok(LevelFilter::Info),
        "WARN" | "WARNING" => Ok(LevelFilter::Warn),
        "ERROR" | "CRITICAL" => Ok(LevelFilter::Error),
        _ => Err(ConfigError::InvalidLogLevel(level.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::Path;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn full_env() -> HashMap<String, String> {
        env(&[
            ("LOG_LEVEL", "info"),
            ("FS_LOCAL_PATH", "/srv/projects"),
            ("GL_SERVER", "gitlab.example.com"),
            ("GL_PRIVATE_TOKEN", "glpat-secret"),
            ("GL_GROUP_PATH", "platform/services"),
            ("GL_GROUP_ID", "42"),
        ])
    }

    #[test]
    fn test_from_lookup_success() {
        let vars = full_env();
        let config = Config::from_lookup(|k| vars.get(k).cloned()).unwrap();

        assert_eq!(config.fs_local_path, "/srv/projects");
        assert_eq!(config.gl_server, "gitlab.example.com");
        assert_eq!(config.gl_group_id, "42");
        assert_eq!(config.log_level_filter().unwrap(), LevelFilter::Info);
        assert!(config.commit_identity().is_none());
    }

    #[test]
    fn test_from_lookup_default_log_level() {
        let mut vars = full_env();
        vars.remove("LOG_LEVEL");

        let config = Config::from_lookup(|k| vars.get(k).cloned()).unwrap();

        assert_eq!(config.log_level, "DEBUG");
    }

    #[test]
    fn test_from_lookup_missing_required() {
        let mut vars = full_env();
        vars.remove("GL_PRIVATE_TOKEN");

        let result = Config::from_lookup(|k| vars.get(k).cloned());

        assert_eq!(result.unwrap_err(), ConfigError::Missing("GL_PRIVATE_TOKEN"));
    }

    #[test]
    fn test_from_lookup_empty_is_missing() {
        let mut vars = full_env();
        vars.insert("GL_GROUP_ID".to_string(), "  ".to_string());

        let result = Config::from_lookup(|k| vars.get(k).cloned());

        assert_eq!(result.unwrap_err(), ConfigError::Missing("GL_GROUP_ID"));
    }

    #[test]
    fn test_from_lookup_invalid_log_level() {
        let mut vars = full_env();
        vars.insert("LOG_LEVEL".to_string(), "LOUD".to_string());

        let result = Config::from_lookup(|k| vars.get(k).cloned());

        assert_eq!(
            result.unwrap_err(),
            ConfigError::InvalidLogLevel("LOUD".to_string())
        );
    }

    #[test]
    fn test_commit_identity_requires_both() {
        let mut vars = full_env();
        vars.insert("GIT_AUTHOR_NAME".to_string(), "Uploader".to_string());
        let config = Config::from_lookup(|k| vars.get(k).cloned()).unwrap();
        assert!(config.commit_identity().is_none());

        vars.insert("GIT_AUTHOR_EMAIL".to_string(), "up@example.com".to_string());
        let config = Config::from_lookup(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(
            config.commit_identity(),
            Some(CommitIdentity::new("Uploader", "up@example.com"))
        );
    }

    #[test]
    fn test_parse_log_level_aliases() {
        assert_eq!(parse_log_level("debug").unwrap(), LevelFilter::Debug);
        assert_eq!(parse_log_level("SUCCESS").unwrap(), LevelFilter::Info);
        assert_eq!(parse_log_level("Warning").unwrap(), LevelFilter::Warn);
        assert_eq!(parse_log_level("CRITICAL").unwrap(), LevelFilter::Error);
        assert_eq!(parse_log_level("off").unwrap(), LevelFilter::Off);
        assert!(parse_log_level("verbose").is_err());
    }

    #[test]
    fn test_to_uploader_config() {
        let vars = full_env();
        let config = Config::from_lookup(|k| vars.get(k).cloned()).unwrap();

        let uploader = config.to_uploader_config();

        assert_eq!(uploader.root_path(), Path::new("/srv/projects"));
        assert_eq!(
            uploader.api_url(),
            "https://gitlab.example.com/api/v4/projects/"
        );
        assert_eq!(
            uploader.remote_url_for("proj-a"),
            "git@gitlab.example.com:platform/services/proj-a.git"
        );
        assert_eq!(uploader.namespace_id(), "42");
    }

    #[test]
    fn test_debug_redacts_token() {
        let vars = full_env();
        let config = Config::from_lookup(|k| vars.get(k).cloned()).unwrap();

        assert!(!format!("{:?}", config).contains("glpat-secret"));
    }

    #[test]
    fn test_load_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(
            &path,
            r#"{
  "fs_local_path": "/srv/projects",
  "gl_server": "gl.local",
  "gl_private_token": "token",
  "gl_group_path": "team",
  "gl_group_id": "7"
}"#,
        )
        .unwrap();

        let config = Config::load(path.to_str().unwrap()).unwrap();

        assert_eq!(config.log_level, "DEBUG");
        assert_eq!(config.gl_group_path, "team");
    }

    #[test]
    fn test_load_json_missing_value() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"fs_local_path": "", "gl_server": "gl.local", "gl_private_token": "t", "gl_group_path": "g", "gl_group_id": "1"}"#,
        )
        .unwrap();

        assert!(Config::load(path.to_str().unwrap()).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        assert!(Config::load("/nonexistent/glbulk/config.json").is_err());
    }
}
