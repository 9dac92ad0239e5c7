//! Repository Implementations
//!
//! Domain層のRepositoryトレイトの実装

pub mod fs_directory_repository;
pub mod gitlab_project_repository;
