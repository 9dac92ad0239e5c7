//! # Remote Naming Service
//!
//! リモートURLとrefspecの命名規則

/// リモート名
pub const REMOTE_NAME: &str = "origin";
/// プッシュするブランチ名
pub const BRANCH_NAME: &str = "main";
/// コミットメッセージ
pub const COMMIT_MESSAGE: &str = "init";
/// 初回アップロードを示す固定タグ
pub const TAG_NAME: &str = "1.0.0";

/// リモート命名サービス
pub struct RemoteNaming;

impl RemoteNaming {
    /// プロジェクト作成APIのURL
    pub fn api_projects_url(server: &str) -> String {
        format!("https://{}/api/v4/projects/", server)
    }

    /// SSH形式のグループパス（`git@<server>:<group-path>`）
    pub fn group_prefix(server: &str, group_path: &str) -> String {
        format!("git@{}:{}", server, group_path)
    }

    /// ディレクトリのリモートURL（`<group-prefix>/<dir-name>.git`）
    pub fn remote_url(group_prefix: &str, dir_name: &str) -> String {
        format!("{}/{}.git", group_prefix, dir_name)
    }

    /// `main:main` の完全修飾refspec
    pub fn branch_refspec() -> String {
        format!("refs/heads/{0}:refs/heads/{0}", BRANCH_NAME)
    }

    /// タグの完全修飾refspec
    pub fn tag_refspec(tag: &str) -> String {
        format!("refs/tags/{0}:refs/tags/{0}", tag)
    }
}
