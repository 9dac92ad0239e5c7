//! Commit Identity
//!
//! コミット作成者の解決

use git2::{Repository, Signature};

/// コミット作成者
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitIdentity {
    pub name: String,
    pub email: String,
}

impl CommitIdentity {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// 署名を解決する
///
/// 明示的な作成者があればそれを優先し、なければリポジトリ設定
/// （`user.name` / `user.email`）を使う
pub fn resolve_signature(
    repo: &Repository,
    identity: Option<&CommitIdentity>,
) -> Result<Signature<'static>, git2::Error> {
    match identity {
        Some(id) => Signature::now(&id.name, &id.email),
        None => repo.signature(),
    }
}
