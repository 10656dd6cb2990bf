//! In-memory file system and walker for driving the pipeline in tests.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashSet};
use std::io::{Error, ErrorKind};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use shrinker::common::errors::{Result, ShrinkError};
use shrinker::walker::{ErrorAction, WalkControl};
use shrinker::{CancelToken, EntryInfo, EntryKind, FileStat, FileSystem, OsFileSystem, Walker};

fn not_found(path: &Path) -> ShrinkError {
    ShrinkError::io(path, Error::new(ErrorKind::NotFound, "no such file"))
}

/// Tree of nodes held in memory. Removals are recorded and can be made
/// to fail for chosen paths.
#[derive(Default)]
pub struct FakeFs {
    nodes: Mutex<BTreeMap<PathBuf, (EntryKind, u64)>>,
    fail_stat: HashSet<PathBuf>,
    fail_remove: HashSet<PathBuf>,
    panic_on_stat: HashSet<PathBuf>,
    fail_read_dir: HashSet<PathBuf>,
    cancel_on_remove: Option<(PathBuf, CancelToken)>,
    removed: Mutex<Vec<PathBuf>>,
}

impl FakeFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dir(self, path: &str) -> Self {
        self.nodes
            .lock()
            .unwrap()
            .insert(PathBuf::from(path), (EntryKind::Directory, 0));
        self
    }

    pub fn file(self, path: &str, size: u64) -> Self {
        self.nodes
            .lock()
            .unwrap()
            .insert(PathBuf::from(path), (EntryKind::File, size));
        self
    }

    pub fn fail_stat(mut self, path: &str) -> Self {
        self.fail_stat.insert(PathBuf::from(path));
        self
    }

    pub fn fail_remove(mut self, path: &str) -> Self {
        self.fail_remove.insert(PathBuf::from(path));
        self
    }

    pub fn panic_on_stat(mut self, path: &str) -> Self {
        self.panic_on_stat.insert(PathBuf::from(path));
        self
    }

    pub fn fail_read_dir(mut self, path: &str) -> Self {
        self.fail_read_dir.insert(PathBuf::from(path));
        self
    }

    /// Fire `cancel` while `path` is being removed
    pub fn cancel_on_remove(mut self, path: &str, cancel: &CancelToken) -> Self {
        self.cancel_on_remove = Some((PathBuf::from(path), cancel.clone()));
        self
    }

    pub fn removed(&self) -> Vec<PathBuf> {
        let mut removed = self.removed.lock().unwrap().clone();
        removed.sort();
        removed
    }

    pub fn exists(&self, path: &str) -> bool {
        self.nodes.lock().unwrap().contains_key(Path::new(path))
    }
}

impl FileSystem for FakeFs {
    fn current_dir(&self) -> Result<PathBuf> {
        Ok(PathBuf::from("/"))
    }

    fn kind(&self, path: &Path) -> Result<EntryKind> {
        self.nodes
            .lock()
            .unwrap()
            .get(path)
            .map(|(kind, _)| *kind)
            .ok_or_else(|| not_found(path))
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<EntryInfo>> {
        if self.fail_read_dir.contains(path) {
            return Err(ShrinkError::io(path, Error::new(ErrorKind::PermissionDenied, "denied")));
        }
        let nodes = self.nodes.lock().unwrap();
        if !nodes.contains_key(path) {
            return Err(not_found(path));
        }
        Ok(nodes
            .iter()
            .filter(|(p, _)| p.parent() == Some(path))
            .map(|(p, (kind, _))| EntryInfo::new(p.clone(), *kind))
            .collect())
    }

    fn stat(&self, path: &Path, recursive: bool) -> Result<FileStat> {
        if self.panic_on_stat.contains(path) {
            panic!("stat exploded on {}", path.display());
        }
        if self.fail_stat.contains(path) {
            return Err(ShrinkError::io(path, Error::new(ErrorKind::PermissionDenied, "denied")));
        }

        let nodes = self.nodes.lock().unwrap();
        let (kind, size) = *nodes.get(path).ok_or_else(|| not_found(path))?;
        let name = path.file_name().unwrap().to_string_lossy().to_string();

        if kind == EntryKind::Directory && recursive {
            let (size, count) = nodes
                .iter()
                .filter(|(p, (k, _))| p.starts_with(path) && *k != EntryKind::Directory)
                .fold((0, 0), |(s, c), (_, (_, size))| (s + size, c + 1));
            return Ok(FileStat::new(name, path, size, count));
        }

        Ok(FileStat::new(name, path, size, 1))
    }

    fn remove_all(&self, path: &Path) -> Result<()> {
        self.removed.lock().unwrap().push(path.to_path_buf());
        if let Some((target, cancel)) = &self.cancel_on_remove {
            if target == path {
                cancel.cancel();
            }
        }
        if self.fail_remove.contains(path) {
            return Err(ShrinkError::io(path, Error::new(ErrorKind::PermissionDenied, "denied")));
        }
        self.nodes
            .lock()
            .unwrap()
            .retain(|p, _| !p.starts_with(path));
        Ok(())
    }

    fn remove(&self, path: &Path) -> Result<()> {
        self.remove_all(path)
    }
}

/// Depth-first walk over a [`FakeFs`], remembering every visited path
pub struct FakeWalker {
    fs: Arc<FakeFs>,
    visited: Mutex<Vec<PathBuf>>,
}

impl FakeWalker {
    pub fn new(fs: Arc<FakeFs>) -> Self {
        Self {
            fs,
            visited: Mutex::new(Vec::new()),
        }
    }

    pub fn visited(&self) -> Vec<PathBuf> {
        self.visited.lock().unwrap().clone()
    }

    fn visit(
        &self,
        dir: &Path,
        on_entry: &mut dyn FnMut(&EntryInfo) -> WalkControl,
        on_error: &mut dyn FnMut(&Path, &std::io::Error) -> ErrorAction,
    ) -> Result<bool> {
        let entries = match self.fs.read_dir(dir) {
            Ok(entries) => entries,
            Err(_) => {
                let err = Error::new(ErrorKind::NotFound, "gone");
                return match on_error(dir, &err) {
                    ErrorAction::SkipNode => Ok(true),
                    ErrorAction::Halt => Err(ShrinkError::Walk {
                        path: dir.to_path_buf(),
                        source: err,
                    }),
                };
            }
        };

        for entry in entries {
            self.visited.lock().unwrap().push(entry.path.clone());
            match on_entry(&entry) {
                WalkControl::Stop => return Ok(false),
                WalkControl::SkipSubtree => continue,
                WalkControl::Continue => {}
            }
            if entry.is_dir() && !self.visit(&entry.path, on_entry, on_error)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl Walker for FakeWalker {
    fn walk(
        &self,
        root: &Path,
        on_entry: &mut dyn FnMut(&EntryInfo) -> WalkControl,
        on_error: &mut dyn FnMut(&Path, &std::io::Error) -> ErrorAction,
    ) -> Result<()> {
        self.visit(root, on_entry, on_error).map(|_| ())
    }
}

/// Reports the given entries, then fails as if the disk went away
pub struct FailingWalker {
    pub entries: Vec<EntryInfo>,
}

impl Walker for FailingWalker {
    fn walk(
        &self,
        root: &Path,
        on_entry: &mut dyn FnMut(&EntryInfo) -> WalkControl,
        _on_error: &mut dyn FnMut(&Path, &std::io::Error) -> ErrorAction,
    ) -> Result<()> {
        for entry in &self.entries {
            on_entry(entry);
        }
        Err(ShrinkError::Walk {
            path: root.to_path_buf(),
            source: Error::new(ErrorKind::Other, "device went away"),
        })
    }
}

/// Real file system that records every removal call
#[derive(Default)]
pub struct RecordingFs {
    inner: OsFileSystem,
    removals: Mutex<Vec<PathBuf>>,
}

impl RecordingFs {
    pub fn removals(&self) -> Vec<PathBuf> {
        self.removals.lock().unwrap().clone()
    }
}

impl FileSystem for RecordingFs {
    fn current_dir(&self) -> Result<PathBuf> {
        self.inner.current_dir()
    }

    fn kind(&self, path: &Path) -> Result<EntryKind> {
        self.inner.kind(path)
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<EntryInfo>> {
        self.inner.read_dir(path)
    }

    fn stat(&self, path: &Path, recursive: bool) -> Result<FileStat> {
        self.inner.stat(path, recursive)
    }

    fn remove_all(&self, path: &Path) -> Result<()> {
        self.removals.lock().unwrap().push(path.to_path_buf());
        self.inner.remove_all(path)
    }

    fn remove(&self, path: &Path) -> Result<()> {
        self.removals.lock().unwrap().push(path.to_path_buf());
        self.inner.remove(path)
    }
}
