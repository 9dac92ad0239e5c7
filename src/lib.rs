//! # glbulk
//!
//! ローカルのプロジェクトディレクトリを GitLab グループへ一括アップロードするツール
//!
//! ルート直下の各サブディレクトリについて、リポジトリの再初期化・全ファイルのコミット・
//! GitLab プロジェクトの作成・`main` ブランチと `1.0.0` タグのプッシュを行います。
//!
//! このプロジェクトはクリーンアーキテクチャを採用しており、以下の4層で構成されています：
//!
//! - **Domain層**: ビジネスの核心的なルールとエンティティ（外部依存なし）
//! - **Application層**: アプリケーション固有のビジネスフロー（ユースケース）
//! - **Adapter層**: 外部システムとの統合（git2, GitLab API, ファイルシステム）
//! - **Driver層**: CLI、ロガー、依存性注入

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
// カバレッジ計測時に外部サービス依存コードを除外するために使用
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

// Domain層（純粋なビジネスロジック）
pub mod domain;

// Application層（ユースケース）
pub mod application;

// Adapter層（Infrastructure）
pub mod adapter;

// Driver層（Presentation）
pub mod driver;
