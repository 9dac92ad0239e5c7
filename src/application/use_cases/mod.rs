//! # Use Cases
//!
//! アプリケーションのビジネスフロー（ユースケース）
//!
//! ## ユースケース
//!
//! - **DiscoverProjectsUseCase**: プロジェクトディレクトリの列挙
//! - **UploadProjectsUseCase**: 7ステップのパイプラインを全ディレクトリに適用

pub mod discover_projects;
pub mod upload_projects;
