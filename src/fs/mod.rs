use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use crate::common::errors::{Result, ShrinkError};
use crate::walker::{EntryInfo, EntryKind};

/// Size and entry count for one removed (or removable) node,
/// or the running total of many of them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStat {
    pub label: String,
    pub path: PathBuf,
    pub size_bytes: u64,
    pub file_count: u64,
}

impl FileStat {
    pub fn new(
        label: impl Into<String>,
        path: impl Into<PathBuf>,
        size_bytes: u64,
        file_count: u64,
    ) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
            size_bytes,
            file_count,
        }
    }

    /// Zero-valued aggregate labeled "result"
    pub fn result() -> Self {
        Self::new("result", "result", 0, 0)
    }

    pub fn add(&mut self, other: &FileStat) {
        self.size_bytes += other.size_bytes;
        self.file_count += other.file_count;
    }
}

/// File system operations the pipeline depends on.
///
/// Passed to the shrinker explicitly so tests can observe or fail
/// removals without touching process-wide state.
pub trait FileSystem: Send + Sync {
    fn current_dir(&self) -> Result<PathBuf>;

    /// Kind of the node at `path` without following symlinks
    fn kind(&self, path: &Path) -> Result<EntryKind>;

    /// Direct children of a directory, sorted by name. Children that
    /// cannot be read are left out.
    fn read_dir(&self, path: &Path) -> Result<Vec<EntryInfo>>;

    /// Size and count of a node; `recursive` sums every file below a directory
    fn stat(&self, path: &Path, recursive: bool) -> Result<FileStat>;

    /// Remove a node and everything below it
    fn remove_all(&self, path: &Path) -> Result<()>;

    /// Remove a single file, symlink or empty directory
    fn remove(&self, path: &Path) -> Result<()>;
}

/// The real file system
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl OsFileSystem {
    pub fn new() -> Self {
        Self
    }

    fn recursive_stat(&self, path: &Path) -> Result<FileStat> {
        let name = file_name(path);
        let mut stat = FileStat::new(name, path, 0, 0);

        // Unreadable nodes below the root are skipped, they would not be
        // removable either
        for entry in WalkDir::new(path)
            .follow_links(false)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if entry.file_type().is_dir() {
                continue;
            }
            if let Ok(metadata) = entry.metadata() {
                stat.size_bytes += metadata.len();
                stat.file_count += 1;
            }
        }

        Ok(stat)
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

impl FileSystem for OsFileSystem {
    fn current_dir(&self) -> Result<PathBuf> {
        std::env::current_dir().map_err(|e| ShrinkError::io(".", e))
    }

    fn kind(&self, path: &Path) -> Result<EntryKind> {
        let metadata = std::fs::symlink_metadata(path).map_err(|e| ShrinkError::io(path, e))?;
        Ok(metadata.file_type().into())
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<EntryInfo>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path).map_err(|e| ShrinkError::io(path, e))? {
            // A child that cannot be read is left out, the walker skips it too
            let (entry, file_type) = match entry.and_then(|e| e.file_type().map(|ft| (e, ft))) {
                Ok(pair) => pair,
                Err(e) => {
                    debug!(path = %path.display(), error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            entries.push(EntryInfo {
                name: entry.file_name().to_string_lossy().to_string(),
                path: entry.path(),
                kind: file_type.into(),
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn stat(&self, path: &Path, recursive: bool) -> Result<FileStat> {
        let metadata = std::fs::symlink_metadata(path).map_err(|e| ShrinkError::io(path, e))?;

        if recursive && metadata.is_dir() {
            return self.recursive_stat(path);
        }

        Ok(FileStat::new(file_name(path), path, metadata.len(), 1))
    }

    fn remove_all(&self, path: &Path) -> Result<()> {
        if self.kind(path)? == EntryKind::Directory {
            std::fs::remove_dir_all(path).map_err(|e| ShrinkError::io(path, e))
        } else {
            self.remove(path)
        }
    }

    fn remove(&self, path: &Path) -> Result<()> {
        let result = if self.kind(path)? == EntryKind::Directory {
            std::fs::remove_dir(path)
        } else {
            std::fs::remove_file(path)
        };
        result.map_err(|e| ShrinkError::io(path, e))
    }
}
