//! Git Integration
//!
//! git2 (libgit2) によるローカルリポジトリ操作

pub mod git2_version_control;
pub mod identity;
