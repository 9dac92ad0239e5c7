//! # Domain Layer
//!
//! このモジュールは一括アップロードの核心的なルールとエンティティを定義します。
//!
//! ## 特徴
//!
//! - 外部依存を持たない（git2 や reqwest について何も知らない）
//! - フレームワークに依存しない
//! - 純粋なビジネスロジック
//!
//! ## 構成要素
//!
//! - **entities**: ビジネスエンティティ（ProjectDirectory, StepOutcome, UploadReportなど）
//! - **errors**: ステップ単位のエラー分類
//! - **repositories**: Repository trait（インターフェース定義のみ）
//! - **services**: Domain Service（リモート命名規則）

pub mod entities;
pub mod errors;
pub mod repositories;
pub mod services;
