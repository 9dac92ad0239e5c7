//! glbulk - GitLab Bulk Project Uploader
//!
//! ローカルのプロジェクトディレクトリを GitLab グループに一括アップロード

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use anyhow::Result;
use clap::Parser;

use glbulk::adapter::config::Config;
use glbulk::driver::logging::init_logger;
use glbulk::driver::{Args, BulkUploadWorkflow};

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::from_env()?,
    };

    init_logger(config.log_level_filter()?);

    // Create workflow with injected dependencies
    let workflow = BulkUploadWorkflow::new(config);

    workflow.execute(args).await
}
