//! Workflow Orchestration
//!
//! ワークフローのオーケストレーション

use anyhow::Result;
use log::info;

use std::sync::Arc;

use crate::adapter::config::Config;
use crate::adapter::git::git2_version_control::Git2VersionControl;
use crate::adapter::gitlab::client::{ProjectsApi, ReqwestProjectsApi};
use crate::adapter::repositories::fs_directory_repository::FsDirectoryRepository;
use crate::adapter::repositories::gitlab_project_repository::GitLabProjectRepository;
use crate::application::dto::uploader_config::UploaderConfig;
use crate::application::use_cases::discover_projects::DiscoverProjectsUseCase;
use crate::application::use_cases::upload_projects::{IterationOrder, UploadProjectsUseCase};
use crate::domain::entities::project_directory::ProjectDirectory;
use crate::domain::entities::step_outcome::{Operation, StepStatus};
use crate::domain::entities::upload_report::UploadReport;

use super::cli::Args;

type UploadUseCase<A> = UploadProjectsUseCase<Git2VersionControl, GitLabProjectRepository<A>>;

/// Render the end-of-run summary
pub fn summary_lines(report: &UploadReport) -> Vec<String> {
    let mut lines = Vec::new();

    let elapsed = report
        .finished_at()
        .map(|end| (end - report.started_at()).num_milliseconds() as f64 / 1000.0)
        .unwrap_or(0.0);
    lines.push(format!("✓ Run {} finished in {:.1}s", report.run_id(), elapsed));

    for operation in Operation::PIPELINE {
        let counts = report.counts_for(operation);
        lines.push(format!(
            "  {:<24} ok: {}  failed: {}  skipped: {}",
            operation.label(),
            counts.succeeded,
            counts.failed,
            counts.skipped
        ));
    }

    let failures: Vec<_> = report.failures().collect();
    if failures.is_empty() {
        lines.push("✓ Upload complete!".to_string());
    } else {
        lines.push(format!("✗ {} step(s) failed:", failures.len()));
        for outcome in failures {
            if let StepStatus::Failed(reason) = &outcome.status {
                lines.push(format!(
                    "    - {} | {}: {}",
                    outcome.directory, outcome.operation, reason
                ));
            }
        }
    }

    lines
}

/// Bulk Upload Workflow
pub struct BulkUploadWorkflow<A: ProjectsApi = ReqwestProjectsApi> {
    uploader_config: UploaderConfig,
    discover_use_case: Arc<DiscoverProjectsUseCase<FsDirectoryRepository>>,
    upload_use_case: Arc<UploadUseCase<A>>,
}

impl BulkUploadWorkflow<ReqwestProjectsApi> {
    /// Create a new workflow instance talking to the real GitLab API
    pub fn new(config: Config) -> Self {
        let uploader_config = config.to_uploader_config();
        let api = Arc::new(ReqwestProjectsApi::new(
            uploader_config.api_url(),
            uploader_config.private_token(),
        ));
        Self::with_api(config, api)
    }
}

impl<A: ProjectsApi> BulkUploadWorkflow<A> {
    /// Create a new workflow instance with an injected API client
    pub fn with_api(config: Config, api: Arc<A>) -> Self {
        let uploader_config = config.to_uploader_config();

        // Repository implementations
        let directory_repo = Arc::new(FsDirectoryRepository::new());
        let version_control = Arc::new(match config.commit_identity() {
            Some(identity) => Git2VersionControl::with_identity(identity),
            None => Git2VersionControl::new(),
        });
        let remote_repo = Arc::new(GitLabProjectRepository::new(api));

        // Use Cases construction
        let discover_use_case = Arc::new(DiscoverProjectsUseCase::new(directory_repo));
        let upload_use_case = Arc::new(UploadProjectsUseCase::new(
            version_control,
            remote_repo,
            uploader_config.clone(),
        ));

        Self {
            uploader_config,
            discover_use_case,
            upload_use_case,
        }
    }

    /// List the project directories under the configured root
    pub async fn discover(&self) -> Result<Vec<ProjectDirectory>> {
        self.discover_use_case
            .execute(self.uploader_config.root_path())
            .await
    }

    /// Describe every step that would run, in directory order
    pub fn plan(&self, directories: &[ProjectDirectory]) -> Vec<String> {
        directories
            .iter()
            .flat_map(|dir| {
                Operation::PIPELINE
                    .into_iter()
                    .map(move |op| format!("{} | {}", dir, self.upload_use_case.describe(op, dir)))
            })
            .collect()
    }

    /// Upload the given project directories
    pub async fn upload(
        &self,
        directories: &[ProjectDirectory],
        order: IterationOrder,
    ) -> UploadReport {
        let run_id = uuid::Uuid::new_v4().to_string();
        info!("Run {} with {} directories ({:?})", run_id, directories.len(), order);

        self.upload_use_case
            .execute(directories, order, &run_id)
            .await
    }

    /// Discover and upload every project directory
    pub async fn run(&self, order: IterationOrder) -> Result<UploadReport> {
        let directories = self.discover().await?;
        Ok(self.upload(&directories, order).await)
    }

    /// Execute the upload workflow
    pub async fn execute(&self, args: Args) -> Result<()> {
        info!("Starting GitLab bulk uploader...");
        info!("Dry run: {}", args.dry_run);

        println!("✓ Using configuration:");
        println!("  Root: {}", self.uploader_config.root_path().display());
        println!("  API: {}", self.uploader_config.api_url());
        println!("  Group: {}", self.uploader_config.group_prefix());
        println!("  Namespace ID: {}", self.uploader_config.namespace_id());

        let directories = self.discover().await?;
        println!(
            "✓ Found {} project directories in {}",
            directories.len(),
            self.uploader_config.root_path().display()
        );

        if directories.is_empty() {
            println!("No project directories to upload. Exiting.");
            return Ok(());
        }

        if args.dry_run {
            println!("✓ Dry-run mode (not touching git or GitLab)");
            for line in self.plan(&directories) {
                println!("    - {}", line);
            }
            return Ok(());
        }

        let report = self.upload(&directories, args.order.into()).await;
        for line in summary_lines(&report) {
            println!("{}", line);
        }

        Ok(())
    }
}
