//! Adapter Layer
//!
//! 外部システム（git, GitLab API, ファイルシステム）との統合

pub mod config;
pub mod git;
pub mod gitlab;
pub mod repositories;
