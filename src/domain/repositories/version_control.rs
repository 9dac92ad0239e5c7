//! # Version Control Trait
//!
//! ローカルリポジトリ操作（init, add, commit, remote, push, tag）を抽象化

#[cfg(test)]
use mockall::automock;

use crate::domain::entities::project_directory::ProjectDirectory;
use crate::domain::errors::StepResult;

/// リポジトリハンドル
///
/// 初期化直後のリポジトリへの生きたハンドル。
/// 以降の全ステップで同じハンドルを使い回す。
#[cfg_attr(test, automock)]
pub trait RepositoryHandle: Send {
    /// 全ファイルをインデックスに追加する（`git add --all`）
    fn stage_all(&mut self) -> StepResult;

    /// ステージ済みの変更をコミットする
    ///
    /// # Returns
    ///
    /// 作成されたコミットのID
    ///
    /// # Errors
    ///
    /// コミットする変更がない場合は `StepError::NothingToCommit`
    fn commit(&mut self, message: &str) -> StepResult<String>;

    /// リモートを登録する
    ///
    /// # Errors
    ///
    /// 同名のリモートが既に存在する場合にエラーを返す
    fn add_remote(&mut self, name: &str, url: &str) -> StepResult;

    /// リモートへ refspec をプッシュする
    fn push(&mut self, remote: &str, refspec: &str) -> StepResult;

    /// HEAD に軽量タグを作成する
    fn create_tag(&mut self, tag: &str) -> StepResult;
}

/// バージョン管理システム
///
/// ディレクトリのリポジトリをまっさらな状態で初期化する
#[cfg_attr(test, automock)]
pub trait VersionControl: Send + Sync {
    /// 既存のメタデータを削除してからリポジトリを初期化する
    ///
    /// # Arguments
    ///
    /// * `directory` - 対象のプロジェクトディレクトリ
    ///
    /// # Returns
    ///
    /// 新しいリポジトリハンドル
    ///
    /// # Errors
    ///
    /// 初期化に失敗した場合（権限エラーなど）にエラーを返す
    fn reinitialize(&self, directory: &ProjectDirectory) -> StepResult<Box<dyn RepositoryHandle>>;
}
