//! git2 Version Control Implementation
//!
//! VersionControl / RepositoryHandle の libgit2 実装

use git2::{
    Commit, Cred, CredentialType, IndexAddOption, IndexMatchedPath, ObjectType, PushOptions,
    RemoteCallbacks, Repository, RepositoryInitOptions,
};
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use super::identity::{resolve_signature, CommitIdentity};
use crate::domain::entities::project_directory::ProjectDirectory;
use crate::domain::errors::{StepError, StepResult};
use crate::domain::repositories::version_control::{RepositoryHandle, VersionControl};
use crate::domain::services::remote_naming::BRANCH_NAME;

/// 認証コールバックの最大試行回数（libgit2 は失敗した資格情報で再試行し続けるため）
const MAX_CREDENTIAL_ATTEMPTS: u32 = 3;

impl From<git2::Error> for StepError {
    fn from(e: git2::Error) -> Self {
        StepError::Git(e.message().to_string())
    }
}

/// libgit2 ベースのバージョン管理
#[derive(Debug, Clone, Default)]
pub struct Git2VersionControl {
    identity: Option<CommitIdentity>,
}

impl Git2VersionControl {
    /// リポジトリ設定の作成者でコミットする
    pub fn new() -> Self {
        Self { identity: None }
    }

    /// 指定した作成者でコミットする
    pub fn with_identity(identity: CommitIdentity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    /// 既存の `.git` を削除する（削除エラーは無視）
    fn remove_git_metadata(directory: &ProjectDirectory) {
        let git_dir = directory.git_dir();

        if git_dir.is_dir() {
            let _ = fs::remove_dir_all(&git_dir);
            info!("Removed: {}", git_dir.display());
        } else if git_dir.is_file() {
            // worktree / submodule の gitfile
            let _ = fs::remove_file(&git_dir);
            info!("Removed: {}", git_dir.display());
        }
    }
}

impl VersionControl for Git2VersionControl {
    fn reinitialize(&self, directory: &ProjectDirectory) -> StepResult<Box<dyn RepositoryHandle>> {
        Self::remove_git_metadata(directory);

        let mut opts = RepositoryInitOptions::new();
        opts.initial_head(BRANCH_NAME);
        let repo = Repository::init_opts(directory.path(), &opts)?;
        debug!("{} | git init", directory.name());

        Ok(Box::new(Git2RepositoryHandle {
            repo,
            identity: self.identity.clone(),
        }))
    }
}

/// libgit2 のリポジトリハンドル
pub struct Git2RepositoryHandle {
    repo: Repository,
    identity: Option<CommitIdentity>,
}

impl Git2RepositoryHandle {
    fn head_commit(&self) -> Option<Commit<'_>> {
        self.repo.head().ok()?.peel_to_commit().ok()
    }
}

/// ネストしたチェックアウト（`.git` を持つサブディレクトリ）かどうか
fn is_nested_checkout(workdir: &Path, relative: &Path) -> bool {
    let path = workdir.join(relative);
    path.is_dir() && path.join(".git").exists()
}

/// ssh-agent / デフォルト資格情報を使う認証コールバック
fn credentials_callback(
) -> impl FnMut(&str, Option<&str>, CredentialType) -> Result<Cred, git2::Error> {
    let mut attempts = 0;
    move |_url, username, allowed| {
        attempts += 1;
        if attempts > MAX_CREDENTIAL_ATTEMPTS {
            return Err(git2::Error::from_str("authentication failed"));
        }

        if allowed.contains(CredentialType::SSH_KEY) {
            Cred::ssh_key_from_agent(username.unwrap_or("git"))
        } else if allowed.contains(CredentialType::DEFAULT) {
            Cred::default()
        } else {
            Err(git2::Error::from_str("no supported credential type"))
        }
    }
}

impl RepositoryHandle for Git2RepositoryHandle {
    fn stage_all(&mut self) -> StepResult {
        let workdir = self
            .repo
            .workdir()
            .ok_or_else(|| StepError::Git("repository has no working directory".to_string()))?
            .to_path_buf();
        let mut nested: Vec<PathBuf> = Vec::new();

        let mut index = self.repo.index()?;
        // libgit2 はネストしたリポジトリを "invalid path" で拒否するためスキップする
        let mut skip_nested = |path: &Path, _matched: &[u8]| -> i32 {
            if is_nested_checkout(&workdir, path) {
                nested.push(path.to_path_buf());
                1
            } else {
                0
            }
        };
        index.add_all(
            ["*"].iter(),
            IndexAddOption::DEFAULT,
            Some(&mut skip_nested as &mut IndexMatchedPath),
        )?;
        index.update_all(["*"].iter(), None)?;
        index.write()?;

        for path in &nested {
            warn!("Skipping nested repository: {}", path.display());
        }
        Ok(())
    }

    fn commit(&mut self, message: &str) -> StepResult<String> {
        let mut index = self.repo.index()?;
        let tree_id = index.write_tree()?;
        let parent = self.head_commit();

        let unchanged = match &parent {
            Some(p) => p.tree_id() == tree_id,
            None => index.is_empty(),
        };
        if unchanged {
            return Err(StepError::NothingToCommit);
        }

        let tree = self.repo.find_tree(tree_id)?;
        let signature = resolve_signature(&self.repo, self.identity.as_ref())?;
        let parents: Vec<&Commit> = parent.iter().collect();

        let oid = self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &parents,
        )?;

        Ok(oid.to_string())
    }

    fn add_remote(&mut self, name: &str, url: &str) -> StepResult {
        self.repo.remote(name, url)?;
        Ok(())
    }

    fn push(&mut self, remote: &str, refspec: &str) -> StepResult {
        let mut remote = self.repo.find_remote(remote)?;
        let mut rejection: Option<String> = None;

        {
            let mut callbacks = RemoteCallbacks::new();
            callbacks.credentials(credentials_callback());
            callbacks.push_update_reference(|refname, status| {
                if let Some(msg) = status {
                    rejection = Some(format!("{} rejected: {}", refname, msg));
                }
                Ok(())
            });

            let mut opts = PushOptions::new();
            opts.remote_callbacks(callbacks);
            remote.push(&[refspec], Some(&mut opts))?;
        }

        match rejection {
            Some(msg) => Err(StepError::Git(msg)),
            None => Ok(()),
        }
    }

    fn create_tag(&mut self, tag: &str) -> StepResult {
        let target = self.repo.head()?.peel(ObjectType::Commit)?;
        self.repo.tag_lightweight(tag, &target, false)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn vcs() -> Git2VersionControl {
        Git2VersionControl::with_identity(CommitIdentity::new("Test", "test@example.com"))
    }

    fn project(root: &Path, name: &str, files: &[(&str, &str)]) -> ProjectDirectory {
        let dir = ProjectDirectory::under(root, name);
        fs::create_dir_all(dir.path()).unwrap();
        for (file, content) in files {
            let path = dir.path().join(file);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(path, content).unwrap();
        }
        dir
    }

    #[test]
    fn test_reinitialize_removes_existing_metadata() {
        let temp_dir = TempDir::new().unwrap();
        let dir = project(temp_dir.path(), "proj-a", &[("main.rs", "fn main() {}")]);
        fs::create_dir_all(dir.git_dir()).unwrap();
        fs::write(dir.git_dir().join("stale-marker"), "old").unwrap();

        vcs().reinitialize(&dir).unwrap();

        assert!(!dir.git_dir().join("stale-marker").exists());
        let repo = Repository::open(dir.path()).unwrap();
        assert!(repo.head().is_err(), "fresh repository has no commits");
        assert!(dir.path().join("main.rs").exists(), "working files are kept");
    }

    #[test]
    fn test_reinitialize_discards_previous_history() {
        let temp_dir = TempDir::new().unwrap();
        let dir = project(temp_dir.path(), "proj-a", &[("a.txt", "a")]);

        let mut first = vcs().reinitialize(&dir).unwrap();
        first.stage_all().unwrap();
        first.commit("old history").unwrap();
        first.add_remote("origin", "git@old:group/proj-a.git").unwrap();
        drop(first);

        let mut second = vcs().reinitialize(&dir).unwrap();

        let repo = Repository::open(dir.path()).unwrap();
        assert!(repo.head().is_err());
        assert!(repo.find_remote("origin").is_err());
        assert!(second.add_remote("origin", "git@new:group/proj-a.git").is_ok());
    }

    #[test]
    fn test_reinitialize_removes_gitfile() {
        let temp_dir = TempDir::new().unwrap();
        let dir = project(temp_dir.path(), "proj-a", &[(".git", "gitdir: ../elsewhere")]);

        vcs().reinitialize(&dir).unwrap();

        assert!(dir.git_dir().is_dir());
    }

    #[test]
    fn test_initial_head_is_main() {
        let temp_dir = TempDir::new().unwrap();
        let dir = project(temp_dir.path(), "proj-a", &[("a.txt", "a")]);

        let mut handle = vcs().reinitialize(&dir).unwrap();
        handle.stage_all().unwrap();
        handle.commit("init").unwrap();

        let repo = Repository::open(dir.path()).unwrap();
        assert_eq!(repo.head().unwrap().name(), Some("refs/heads/main"));
    }

    #[test]
    fn test_stage_and_commit() {
        let temp_dir = TempDir::new().unwrap();
        let dir = project(
            temp_dir.path(),
            "proj-a",
            &[("README.md", "# proj-a"), ("src/lib.rs", "pub fn f() {}")],
        );

        let mut handle = vcs().reinitialize(&dir).unwrap();
        handle.stage_all().unwrap();
        let oid = handle.commit("init").unwrap();

        assert_eq!(oid.len(), 40);
        let repo = Repository::open(dir.path()).unwrap();
        let commit = repo.head().unwrap().peel_to_commit().unwrap();
        assert_eq!(commit.message(), Some("init"));
        assert_eq!(commit.author().name(), Some("Test"));
        let tree = commit.tree().unwrap();
        assert!(tree.get_name("README.md").is_some());
        assert!(tree.get_name("src").is_some());
    }

    #[test]
    fn test_stage_all_skips_nested_checkout() {
        let temp_dir = TempDir::new().unwrap();
        let dir = project(
            temp_dir.path(),
            "proj-a",
            &[("a.txt", "a"), ("vendor/lib/lib.rs", "pub fn lib() {}")],
        );
        Repository::init(dir.path().join("vendor/lib")).unwrap();

        let mut handle = vcs().reinitialize(&dir).unwrap();
        handle.stage_all().unwrap();
        handle.commit("init").unwrap();

        let repo = Repository::open(dir.path()).unwrap();
        let tree = repo.head().unwrap().peel_to_commit().unwrap().tree().unwrap();
        assert!(tree.get_name("a.txt").is_some());
        assert!(tree.get_path(Path::new("vendor/lib/lib.rs")).is_err());
        assert!(dir.path().join("vendor/lib/.git").is_dir(), "nested checkout is untouched");
    }

    #[test]
    fn test_commit_empty_directory_is_nothing_to_commit() {
        let temp_dir = TempDir::new().unwrap();
        let dir = project(temp_dir.path(), "proj-b", &[]);

        let mut handle = vcs().reinitialize(&dir).unwrap();
        handle.stage_all().unwrap();

        assert!(matches!(handle.commit("init"), Err(StepError::NothingToCommit)));
    }

    #[test]
    fn test_commit_without_changes_is_nothing_to_commit() {
        let temp_dir = TempDir::new().unwrap();
        let dir = project(temp_dir.path(), "proj-a", &[("a.txt", "a")]);

        let mut handle = vcs().reinitialize(&dir).unwrap();
        handle.stage_all().unwrap();
        handle.commit("init").unwrap();
        handle.stage_all().unwrap();

        assert!(matches!(handle.commit("init"), Err(StepError::NothingToCommit)));
    }

    #[test]
    fn test_add_remote_twice_fails() {
        let temp_dir = TempDir::new().unwrap();
        let dir = project(temp_dir.path(), "proj-a", &[]);

        let mut handle = vcs().reinitialize(&dir).unwrap();
        handle
            .add_remote("origin", "git@gl.local:team/proj-a.git")
            .unwrap();
        let second = handle.add_remote("origin", "git@gl.local:team/proj-a.git");

        assert!(matches!(second, Err(StepError::Git(_))));
        let repo = Repository::open(dir.path()).unwrap();
        assert_eq!(
            repo.find_remote("origin").unwrap().url(),
            Some("git@gl.local:team/proj-a.git")
        );
    }

    #[test]
    fn test_push_branch_and_tag_to_bare_remote() {
        let temp_dir = TempDir::new().unwrap();
        let dir = project(temp_dir.path(), "proj-a", &[("a.txt", "a")]);
        let bare_path = temp_dir.path().join("remote.git");
        let bare = Repository::init_bare(&bare_path).unwrap();

        let mut handle = vcs().reinitialize(&dir).unwrap();
        handle.stage_all().unwrap();
        let oid = handle.commit("init").unwrap();
        handle
            .add_remote("origin", bare_path.to_str().unwrap())
            .unwrap();
        handle
            .push("origin", "refs/heads/main:refs/heads/main")
            .unwrap();
        handle.create_tag("1.0.0").unwrap();
        handle
            .push("origin", "refs/tags/1.0.0:refs/tags/1.0.0")
            .unwrap();

        let main = bare.find_reference("refs/heads/main").unwrap();
        assert_eq!(main.target().unwrap().to_string(), oid);
        let tag = bare.find_reference("refs/tags/1.0.0").unwrap();
        assert_eq!(tag.target().unwrap().to_string(), oid);
    }

    #[test]
    fn test_push_without_commit_fails() {
        let temp_dir = TempDir::new().unwrap();
        let dir = project(temp_dir.path(), "proj-b", &[]);
        let bare_path = temp_dir.path().join("remote.git");
        Repository::init_bare(&bare_path).unwrap();

        let mut handle = vcs().reinitialize(&dir).unwrap();
        handle
            .add_remote("origin", bare_path.to_str().unwrap())
            .unwrap();

        assert!(handle
            .push("origin", "refs/heads/main:refs/heads/main")
            .is_err());
    }

    #[test]
    fn test_push_without_remote_fails() {
        let temp_dir = TempDir::new().unwrap();
        let dir = project(temp_dir.path(), "proj-a", &[("a.txt", "a")]);

        let mut handle = vcs().reinitialize(&dir).unwrap();
        handle.stage_all().unwrap();
        handle.commit("init").unwrap();

        assert!(matches!(
            handle.push("origin", "refs/heads/main:refs/heads/main"),
            Err(StepError::Git(_))
        ));
    }

    #[test]
    fn test_create_tag_without_commit_fails() {
        let temp_dir = TempDir::new().unwrap();
        let dir = project(temp_dir.path(), "proj-b", &[]);

        let mut handle = vcs().reinitialize(&dir).unwrap();

        assert!(handle.create_tag("1.0.0").is_err());
    }

    #[test]
    fn test_create_tag_twice_fails() {
        let temp_dir = TempDir::new().unwrap();
        let dir = project(temp_dir.path(), "proj-a", &[("a.txt", "a")]);

        let mut handle = vcs().reinitialize(&dir).unwrap();
        handle.stage_all().unwrap();
        handle.commit("init").unwrap();
        handle.create_tag("1.0.0").unwrap();

        assert!(handle.create_tag("1.0.0").is_err());
    }
}
