use std::fs::FileType;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::common::errors::{Result, ShrinkError};

/// Kind of a file system node, symlinks are never followed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
    Other,
}

impl From<FileType> for EntryKind {
    fn from(ft: FileType) -> Self {
        if ft.is_dir() {
            EntryKind::Directory
        } else if ft.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        }
    }
}

/// A node observed during traversal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl EntryInfo {
    pub fn new(path: impl Into<PathBuf>, kind: EntryKind) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        Self { name, path, kind }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    pub fn is_regular(&self) -> bool {
        self.kind == EntryKind::File
    }
}

/// What the walker should do after reporting an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkControl {
    /// Keep walking, descending into directories
    Continue,
    /// Do not descend into this directory
    SkipSubtree,
    /// Stop the walk without error
    Stop,
}

/// What the walker should do after an error on one node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorAction {
    /// Abort the walk and return the error
    Halt,
    /// Ignore this node (and its subtree) and keep going
    SkipNode,
}

/// Depth-first directory traversal.
///
/// The root itself is never reported; callbacks see its descendants only.
pub trait Walker: Send + Sync {
    fn walk(
        &self,
        root: &Path,
        on_entry: &mut dyn FnMut(&EntryInfo) -> WalkControl,
        on_error: &mut dyn FnMut(&Path, &std::io::Error) -> ErrorAction,
    ) -> Result<()>;
}

/// `walkdir`-backed walker
#[derive(Debug, Clone, Default)]
pub struct DirWalker {
    keep_order: bool,
}

impl DirWalker {
    /// `keep_order` sorts siblings by file name, otherwise entries come
    /// in whatever order the OS returns them
    pub fn new(keep_order: bool) -> Self {
        Self { keep_order }
    }
}

impl Walker for DirWalker {
    fn walk(
        &self,
        root: &Path,
        on_entry: &mut dyn FnMut(&EntryInfo) -> WalkControl,
        on_error: &mut dyn FnMut(&Path, &std::io::Error) -> ErrorAction,
    ) -> Result<()> {
        let mut walker = WalkDir::new(root).follow_links(false).min_depth(1);
        if self.keep_order {
            walker = walker.sort_by_file_name();
        }

        let mut it = walker.into_iter();
        while let Some(next) = it.next() {
            let entry = match next {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err.path().unwrap_or(root).to_path_buf();
                    let io_err: std::io::Error = err.into();
                    match on_error(&path, &io_err) {
                        ErrorAction::SkipNode => continue,
                        ErrorAction::Halt => {
                            return Err(ShrinkError::Walk {
                                path,
                                source: io_err,
                            })
                        }
                    }
                }
            };

            let info = EntryInfo {
                name: entry.file_name().to_string_lossy().to_string(),
                path: entry.path().to_path_buf(),
                kind: entry.file_type().into(),
            };

            match on_entry(&info) {
                WalkControl::Continue => {}
                WalkControl::SkipSubtree => {
                    if info.is_dir() {
                        it.skip_current_dir();
                    }
                }
                WalkControl::Stop => break,
            }
        }

        Ok(())
    }
}
