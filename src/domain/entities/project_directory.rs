//! # ProjectDirectory Entity
//!
//! アップロード対象ディレクトリのバリューオブジェクト

use std::fmt;
use std::path::{Path, PathBuf};

/// プロジェクトディレクトリ
///
/// ルート直下のサブディレクトリ1つを表す。
/// 名前はそのままリモートプロジェクトの name / path として使われる。
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProjectDirectory {
    name: String,
    path: PathBuf,
}

impl ProjectDirectory {
    /// 新しいプロジェクトディレクトリを作成
    ///
    /// # Arguments
    ///
    /// * `name` - ディレクトリ名（プロジェクトの識別子）
    /// * `path` - ディレクトリのフルパス
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// ルートパスとディレクトリ名から作成
    pub fn under(root: &Path, name: &str) -> Self {
        Self::new(name, root.join(name))
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// バージョン管理メタデータ（`.git`）のパス
    pub fn git_dir(&self) -> PathBuf {
        self.path.join(".git")
    }
}

impl fmt::Display for ProjectDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_under_joins_root_and_name() {
        let dir = ProjectDirectory::under(Path::new("/srv/projects"), "proj-a");

        assert_eq!(dir.name(), "proj-a");
        assert_eq!(dir.path(), Path::new("/srv/projects/proj-a"));
        assert_eq!(dir.git_dir(), PathBuf::from("/srv/projects/proj-a/.git"));
    }

    #[test]
    fn test_display_is_name() {
        let dir = ProjectDirectory::new("proj-b", "/tmp/proj-b");
        assert_eq!(dir.to_string(), "proj-b");
    }

    #[test]
    fn test_ordering_follows_name() {
        let mut dirs = vec![
            ProjectDirectory::under(Path::new("/r"), "b"),
            ProjectDirectory::under(Path::new("/r"), "a"),
            ProjectDirectory::under(Path::new("/r"), "C"),
        ];
        dirs.sort();

        let names: Vec<&str> = dirs.iter().map(|d| d.name()).collect();
        assert_eq!(names, vec!["C", "a", "b"]);
    }
}
