//! Ordered search path for locating input files.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{Result, SpecError};

/// Ordered list of directories; the earliest directory containing a file wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPath {
    dirs: Vec<PathBuf>,
}

impl SearchPath {
    pub fn new<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            dirs: dirs.into_iter().map(Into::into).collect(),
        }
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    /// Return `dir/name` for the first directory where that is a regular file.
    ///
    /// Directories that do not exist are skipped.
    pub fn find(&self, name: &Path) -> Option<PathBuf> {
        for dir in &self.dirs {
            if !dir.is_dir() {
                warn!(dir = %dir.display(), "search directory does not exist, skipping");
                continue;
            }
            let candidate = dir.join(name);
            if candidate.is_file() {
                debug!(found = %candidate.display(), "located input file");
                return Some(candidate);
            }
        }
        None
    }

    /// Like [`SearchPath::find`], but a miss is an `InputFileNotFound` error
    /// naming every directory searched. An absolute name that already points at
    /// a file is returned unchanged.
    pub fn locate(&self, name: &Path) -> Result<PathBuf> {
        if name.is_absolute() && name.is_file() {
            return Ok(name.to_path_buf());
        }
        debug!(name = %name.display(), dirs = ?self.dirs, "searching for input_file");
        self.find(name).ok_or_else(|| SpecError::InputFileNotFound {
            name: name.display().to_string(),
            search_dirs: self.dirs.clone(),
        })
    }
}

impl<P: Into<PathBuf>> FromIterator<P> for SearchPath {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        SearchPath::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(p: &Path, s: &str) {
        if let Some(parent) = p.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(p, s).unwrap();
    }

    #[test]
    fn later_directory_is_used_when_earlier_misses() {
        let tmp = TempDir::new().unwrap();
        let dir_a = tmp.path().join("dirA");
        let dir_b = tmp.path().join("dirB");
        fs::create_dir_all(&dir_a).unwrap();
        write(&dir_b.join("a.json"), "{}");

        let search = SearchPath::new([&dir_a, &dir_b]);
        assert_eq!(search.locate(Path::new("a.json")).unwrap(), dir_b.join("a.json"));
    }

    #[test]
    fn earliest_directory_wins() {
        let tmp = TempDir::new().unwrap();
        let dir_a = tmp.path().join("dirA");
        let dir_b = tmp.path().join("dirB");
        write(&dir_a.join("a.json"), "{}");
        write(&dir_b.join("a.json"), "{}");

        let search = SearchPath::new([&dir_a, &dir_b]);
        assert_eq!(search.find(Path::new("a.json")), Some(dir_a.join("a.json")));
    }

    #[test]
    fn miss_names_every_directory() {
        let tmp = TempDir::new().unwrap();
        let dir_a = tmp.path().join("dirA");
        let dir_b = tmp.path().join("dirB");
        fs::create_dir_all(&dir_a).unwrap();
        fs::create_dir_all(&dir_b).unwrap();

        let search = SearchPath::new([&dir_a, &dir_b]);
        match search.locate(Path::new("a.json")).unwrap_err() {
            SpecError::InputFileNotFound { name, search_dirs } => {
                assert_eq!(name, "a.json");
                assert_eq!(search_dirs, vec![dir_a, dir_b]);
            }
            other => panic!("expected InputFileNotFound, got {:?}", other),
        }
    }

    #[test]
    fn directories_named_like_the_file_are_ignored() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("a.json")).unwrap();

        let search = SearchPath::new([tmp.path()]);
        assert_eq!(search.find(Path::new("a.json")), None);
    }

    #[test]
    fn missing_directories_are_skipped() {
        let tmp = TempDir::new().unwrap();
        let real = tmp.path().join("real");
        write(&real.join("a.json"), "{}");

        let search: SearchPath = [tmp.path().join("nope"), real.clone()].into_iter().collect();
        assert_eq!(search.find(Path::new("a.json")), Some(real.join("a.json")));
    }
}
