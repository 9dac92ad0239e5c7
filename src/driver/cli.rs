//! CLI Argument Parsing
//!
//! CLIの引数解析

use clap::{Parser, ValueEnum};

use crate::application::use_cases::upload_projects::IterationOrder;

/// パイプラインの反復順序
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    /// Finish every step of one directory before starting the next
    Directory,
    /// Apply one step to every directory before moving to the next step
    Operation,
}

impl From<Order> for IterationOrder {
    fn from(order: Order) -> Self {
        match order {
            Order::Directory => IterationOrder::DirectoryMajor,
            Order::Operation => IterationOrder::OperationMajor,
        }
    }
}

/// ローカルのプロジェクト群をGitLabグループに一括アップロードするCLI
#[derive(Parser, Debug, Clone)]
#[command(name = "glbulk")]
#[command(about = "Bulk-upload local project directories to a GitLab group", long_about = None)]
pub struct Args {
    /// Dry run mode - print the planned steps without touching git or GitLab
    #[arg(long)]
    pub dry_run: bool,

    /// Config file path (JSON). Settings are read from the environment when omitted
    #[arg(short, long)]
    pub config: Option<String>,

    /// Iteration order of the pipeline
    #[arg(long, value_enum, default_value_t = Order::Directory)]
    pub order: Order,
}
