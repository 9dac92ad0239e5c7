//! # Domain Entities
//!
//! ビジネスエンティティとバリューオブジェクトを定義するモジュール
//!
//! ## エンティティ
//!
//! - **ProjectDirectory**: アップロード対象のプロジェクトディレクトリ
//! - **Operation / StepOutcome**: パイプラインの各ステップとその結果
//! - **UploadReport**: 実行全体の集計結果

pub mod project_directory;
pub mod step_outcome;
pub mod upload_report;
