//! # Step Errors
//!
//! パイプラインの各ステップで発生するエラー

use thiserror::Error;

/// ステップエラー
///
/// 1ディレクトリに対する1ステップの失敗理由
#[derive(Debug, Error)]
pub enum StepError {
    /// ステージされた変更がない
    #[error("nothing to commit")]
    NothingToCommit,

    /// バージョン管理操作の失敗
    #[error("git error: {0}")]
    Git(String),

    /// GitLab API が 201 以外を返した
    #[error("Gitlab API Status Code: {status}")]
    Api { status: u16 },

    /// HTTPリクエスト自体の失敗（接続エラーなど）
    #[error("http request failed: {0}")]
    Http(String),

    /// ブロッキングタスクの異常終了
    #[error("blocking task failed: {0}")]
    Task(String),

    /// ファイルシステム操作の失敗
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// ステップの結果型
pub type StepResult<T = ()> = Result<T, StepError>;
