//! Candidate enumeration.
//!
//! Produces the set of file paths a run will consider, either one level deep
//! or across the whole subtree. Directories are filtered out; the pattern
//! set decides what survives. The tree is walked once and every pattern is
//! tested per path, so a path matching several patterns is enumerated once.
//!
//! Matching is intentionally asymmetric: flat mode tests the base filename,
//! recursive mode tests the full normalized path.

use crate::config::PatternSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Errors that can occur while enumerating candidates. Both are fatal.
#[derive(Debug)]
pub enum ScanError {
    /// The configured source root does not exist or is not a directory.
    RootMissing { path: PathBuf },
    /// The source root exists but could not be listed.
    RootUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl std::fmt::Display for ScanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanError::RootMissing { path } => {
                write!(f, "directory {} does not exist", path.display())
            }
            ScanError::RootUnreadable { path, source } => {
                write!(f, "reading base directory {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ScanError {}

/// Collects every candidate file under `root` that matches the pattern set.
///
/// The root is stat-checked first so a mistyped `--dir` fails fast instead
/// of silently yielding nothing. In recursive mode, subtree entries that
/// cannot be read (permission problems, races with deletion) are skipped;
/// only an unreadable root itself is an error.
pub fn collect_candidates(
    root: &Path,
    recursive: bool,
    patterns: &PatternSet,
) -> Result<Vec<PathBuf>, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::RootMissing {
            path: root.to_path_buf(),
        });
    }

    if recursive {
        collect_recursive(root, patterns)
    } else {
        collect_flat(root, patterns)
    }
}

/// Walks the whole subtree, matching patterns against the full path.
fn collect_recursive(root: &Path, patterns: &PatternSet) -> Result<Vec<PathBuf>, ScanError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(e) => e,
            // The root itself failing to read is fatal; deeper errors are not.
            Err(e) if e.path() == Some(root) => {
                return Err(ScanError::RootUnreadable {
                    path: root.to_path_buf(),
                    source: e.into(),
                });
            }
            Err(_) => continue,
        };
        if entry.file_type().is_file() && patterns.matches(&entry.path().to_string_lossy()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Lists only the immediate children, matching patterns against filenames.
fn collect_flat(root: &Path, patterns: &PatternSet) -> Result<Vec<PathBuf>, ScanError> {
    let entries = fs::read_dir(root).map_err(|e| ScanError::RootUnreadable {
        path: root.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry in entries.flatten() {
        let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
        if !is_file {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if patterns.matches(&name) {
            files.push(entry.path());
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use tempfile::TempDir;

    fn patterns(raw: &str) -> PatternSet {
        PatternSet::compile(raw).expect("patterns should compile")
    }

    fn touch(path: &Path) {
        File::create(path).expect("failed to create test file");
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let result = collect_candidates(Path::new("/no/such/root"), true, &patterns("*.jpg"));
        assert!(matches!(result, Err(ScanError::RootMissing { .. })));
    }

    #[test]
    fn test_file_as_root_is_an_error() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("not_a_dir.jpg");
        touch(&file);

        let result = collect_candidates(&file, false, &patterns("*.jpg"));
        assert!(matches!(result, Err(ScanError::RootMissing { .. })));
    }

    #[test]
    fn test_flat_mode_lists_only_immediate_children() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("a.jpg"));
        fs::create_dir(temp.path().join("sub")).unwrap();
        touch(&temp.path().join("sub").join("b.jpg"));

        let found = collect_candidates(temp.path(), false, &patterns("*.jpg")).unwrap();
        assert_eq!(found.len(), 1);
        assert!(found[0].ends_with("a.jpg"));
    }

    #[test]
    fn test_recursive_mode_walks_the_subtree() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("a.jpg"));
        fs::create_dir(temp.path().join("sub")).unwrap();
        touch(&temp.path().join("sub").join("b.jpg"));
        touch(&temp.path().join("sub").join("skip.pdf"));

        let mut found = collect_candidates(temp.path(), true, &patterns("*.jpg")).unwrap();
        found.sort();
        assert_eq!(found.len(), 2);
        assert!(found.iter().any(|p| p.ends_with("a.jpg")));
        assert!(found.iter().any(|p| p.ends_with("sub/b.jpg")));
    }

    #[test]
    fn test_directories_never_enumerate() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("folder.jpg")).unwrap();

        let found = collect_candidates(temp.path(), true, &patterns("*.jpg")).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_path_matching_multiple_patterns_enumerates_once() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("a.jpg"));

        let found =
            collect_candidates(temp.path(), true, &patterns("*.jpg,a.*,*a.jpg")).unwrap();
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_flat_mode_matches_basename_not_path() {
        // A pattern carrying a directory component can never match in flat
        // mode, where only the filename is tested.
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("a.jpg"));

        let with_dir = collect_candidates(temp.path(), false, &patterns("*/a.jpg")).unwrap();
        assert!(with_dir.is_empty());

        let by_name = collect_candidates(temp.path(), false, &patterns("a.jpg")).unwrap();
        assert_eq!(by_name.len(), 1);
    }
}
