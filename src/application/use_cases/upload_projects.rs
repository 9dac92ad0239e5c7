//! # Upload Projects Use Case
//!
//! プロジェクト一括アップロードユースケース
//!
//! 各ディレクトリに対して init → add → create-remote → commit →
//! remote-add → push → push-tag の順で操作を適用し、結果を集計する。

use log::{debug, error, info, warn};
use std::sync::Arc;

use crate::application::dto::uploader_config::UploaderConfig;
use crate::domain::entities::project_directory::ProjectDirectory;
use crate::domain::entities::step_outcome::{Operation, StepOutcome};
use crate::domain::entities::upload_report::UploadReport;
use crate::domain::errors::{StepError, StepResult};
use crate::domain::repositories::remote_project_repository::{
    CreateProjectRequest, RemoteProjectRepository,
};
use crate::domain::repositories::version_control::{RepositoryHandle, VersionControl};
use crate::domain::services::remote_naming::{
    RemoteNaming, BRANCH_NAME, COMMIT_MESSAGE, REMOTE_NAME, TAG_NAME,
};

/// 反復順序
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IterationOrder {
    /// 1ディレクトリの全ステップを終えてから次のディレクトリへ
    #[default]
    DirectoryMajor,
    /// 1操作を全ディレクトリに適用してから次の操作へ
    OperationMajor,
}

/// ディレクトリごとの実行状態
struct DirectoryState {
    directory: ProjectDirectory,
    handle: Option<Box<dyn RepositoryHandle>>,
    /// 致命的な失敗の理由（以降のステップはスキップ）
    aborted: Option<String>,
}

impl DirectoryState {
    fn new(directory: ProjectDirectory) -> Self {
        Self {
            directory,
            handle: None,
            aborted: None,
        }
    }
}

/// プロジェクト一括アップロードユースケース
///
/// 全ステップの失敗はログに記録され、レポートに集計される。
/// init と add の失敗はそのディレクトリの残りのステップを中断する。
pub struct UploadProjectsUseCase<V: VersionControl, R: RemoteProjectRepository> {
    version_control: Arc<V>,
    remote_repository: Arc<R>,
    config: UploaderConfig,
}

impl<V: VersionControl + 'static, R: RemoteProjectRepository> UploadProjectsUseCase<V, R> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `version_control` - ローカルリポジトリ操作
    /// * `remote_repository` - リモートプロジェクト作成
    /// * `config` - アップロード設定
    pub fn new(version_control: Arc<V>, remote_repository: Arc<R>, config: UploaderConfig) -> Self {
        Self {
            version_control,
            remote_repository,
            config,
        }
    }

    /// 全ディレクトリにパイプラインを適用する
    ///
    /// # Arguments
    ///
    /// * `directories` - 処理対象（この順序で処理される）
    /// * `order` - 反復順序
    /// * `run_id` - 実行ID
    ///
    /// # Returns
    ///
    /// 全ステップの結果を集計したレポート
    pub async fn execute(
        &self,
        directories: &[ProjectDirectory],
        order: IterationOrder,
        run_id: &str,
    ) -> UploadReport {
        let mut report = UploadReport::new(run_id);
        let mut states: Vec<DirectoryState> = directories
            .iter()
            .cloned()
            .map(DirectoryState::new)
            .collect();

        match order {
            IterationOrder::OperationMajor => {
                for operation in Operation::PIPELINE {
                    for state in states.iter_mut() {
                        let outcome = self.run_step(operation, state).await;
                        report.record(outcome);
                    }
                }
            }
            IterationOrder::DirectoryMajor => {
                for state in states.iter_mut() {
                    for operation in Operation::PIPELINE {
                        let outcome = self.run_step(operation, state).await;
                        report.record(outcome);
                    }
                }
            }
        }

        report.finish();
        report
    }

    /// ログ用のコマンド表現
    pub fn describe(&self, operation: Operation, directory: &ProjectDirectory) -> String {
        match operation {
            Operation::Init | Operation::Add => operation.label().to_string(),
            Operation::CreateRemote => format!("POST {}", self.config.api_url()),
            Operation::Commit => format!("git commit -m '{}'", COMMIT_MESSAGE),
            Operation::RemoteAdd => format!(
                "git remote add {} {}",
                REMOTE_NAME,
                self.config.remote_url_for(directory.name())
            ),
            Operation::Push => format!("git push {} {}:{}", REMOTE_NAME, BRANCH_NAME, BRANCH_NAME),
            Operation::PushTag => format!("git push {} {}", REMOTE_NAME, TAG_NAME),
        }
    }

    async fn run_step(&self, operation: Operation, state: &mut DirectoryState) -> StepOutcome {
        let name = state.directory.name().to_string();
        debug!(
            "Running: {} in directory: {}",
            operation,
            state.directory.path().display()
        );

        if let Some(reason) = &state.aborted {
            warn!("{} | skip {} ({})", name, operation, reason);
            return StepOutcome::skipped(&name, operation, reason.clone());
        }

        let result = match operation {
            Operation::Init => self.init(state).await,
            Operation::CreateRemote => self.create_remote(&state.directory).await,
            _ => self.run_local_step(operation, state).await,
        };

        let description = self.describe(operation, &state.directory);
        match &result {
            Ok(()) if operation == Operation::CreateRemote => {
                info!("{} | project created", name)
            }
            Ok(()) => debug!("{} | {}", name, description),
            Err(e) => {
                error!("{} | can't {}: {}", name, description, e);
                debug!("{:?}", e);
                if operation.is_fatal() {
                    state.aborted = Some(format!("{} failed", operation));
                }
            }
        }

        StepOutcome::from_result(&name, operation, &result)
    }

    async fn init(&self, state: &mut DirectoryState) -> StepResult {
        let version_control = Arc::clone(&self.version_control);
        let directory = state.directory.clone();
        let handle = run_blocking(move || version_control.reinitialize(&directory)).await?;
        state.handle = Some(handle);
        Ok(())
    }

    async fn create_remote(&self, directory: &ProjectDirectory) -> StepResult {
        let request = CreateProjectRequest::for_directory(directory, self.config.namespace_id());
        self.remote_repository.create_project(&request).await
    }

    async fn run_local_step(&self, operation: Operation, state: &mut DirectoryState) -> StepResult {
        let remote_url = self.config.remote_url_for(state.directory.name());
        let mut handle = state
            .handle
            .take()
            .ok_or_else(|| StepError::Git("repository is not initialized".to_string()))?;

        let (handle, result) = run_blocking(move || {
            let result = apply_local_step(operation, handle.as_mut(), &remote_url);
            Ok((handle, result))
        })
        .await?;

        state.handle = Some(handle);
        result
    }
}

/// git2 の操作（ファイルシステム・SSH）をブロッキングスレッドで実行する
async fn run_blocking<T, F>(f: F) -> StepResult<T>
where
    F: FnOnce() -> StepResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| StepError::Task(e.to_string()))?
}

fn apply_local_step(
    operation: Operation,
    handle: &mut dyn RepositoryHandle,
    remote_url: &str,
) -> StepResult {
    match operation {
        Operation::Add => handle.stage_all(),
        Operation::Commit => handle.commit(COMMIT_MESSAGE).map(|_| ()),
        Operation::RemoteAdd => handle.add_remote(REMOTE_NAME, remote_url),
        Operation::Push => handle.push(REMOTE_NAME, &RemoteNaming::branch_refspec()),
        Operation::PushTag => {
            handle.create_tag(TAG_NAME)?;
            handle.push(REMOTE_NAME, &RemoteNaming::tag_refspec(TAG_NAME))
        }
        Operation::Init | Operation::CreateRemote => {
            unreachable!("{} is not a local repository step", operation)
        }
    }
}
