//! # Step Outcome
//!
//! パイプラインのステップ定義と、その実行結果

use std::fmt;

use crate::domain::errors::StepError;

/// パイプラインの操作
///
/// 各ディレクトリに対して `PIPELINE` の順序で適用される
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Init,
    Add,
    CreateRemote,
    Commit,
    RemoteAdd,
    Push,
    PushTag,
}

impl Operation {
    /// 実行順序
    pub const PIPELINE: [Operation; 7] = [
        Operation::Init,
        Operation::Add,
        Operation::CreateRemote,
        Operation::Commit,
        Operation::RemoteAdd,
        Operation::Push,
        Operation::PushTag,
    ];

    /// ログ出力用のラベル
    pub fn label(&self) -> &'static str {
        match self {
            Operation::Init => "git init",
            Operation::Add => "git add .",
            Operation::CreateRemote => "create gitlab project",
            Operation::Commit => "git commit -m 'init'",
            Operation::RemoteAdd => "git remote add",
            Operation::Push => "git push",
            Operation::PushTag => "git push tag",
        }
    }

    /// 失敗時にそのディレクトリの残りのステップを中断するか
    ///
    /// init と add の失敗は回復不能として扱う
    pub fn is_fatal(&self) -> bool {
        matches!(self, Operation::Init | Operation::Add)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// ステップの状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    Succeeded,
    /// 失敗（理由付き）
    Failed(String),
    /// 先行する致命的な失敗のため未実行
    Skipped(String),
}

/// ステップ結果
///
/// 1ディレクトリ × 1操作の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub directory: String,
    pub operation: Operation,
    pub status: StepStatus,
}

impl StepOutcome {
    /// 成功結果を作成
    pub fn succeeded(directory: &str, operation: Operation) -> Self {
        Self {
            directory: directory.to_string(),
            operation,
            status: StepStatus::Succeeded,
        }
    }

    /// 失敗結果を作成
    pub fn failed(directory: &str, operation: Operation, error: &StepError) -> Self {
        Self {
            directory: directory.to_string(),
            operation,
            status: StepStatus::Failed(error.to_string()),
        }
    }

    /// スキップ結果を作成
    pub fn skipped(directory: &str, operation: Operation, reason: impl Into<String>) -> Self {
        Self {
            directory: directory.to_string(),
            operation,
            status: StepStatus::Skipped(reason.into()),
        }
    }

    /// ステップの `Result` から結果を作成
    pub fn from_result<T>(
        directory: &str,
        operation: Operation,
        result: &Result<T, StepError>,
    ) -> Self {
        match result {
            Ok(_) => Self::succeeded(directory, operation),
            Err(e) => Self::failed(directory, operation, e),
        }
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        self.status == StepStatus::Succeeded
    }

    #[inline]
    pub fn is_failure(&self) -> bool {
        matches!(self.status, StepStatus::Failed(_))
    }

    #[inline]
    pub fn is_skipped(&self) -> bool {
        matches!(self.status, StepStatus::Skipped(_))
    }
}
