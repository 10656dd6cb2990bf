pub mod layout;
pub mod pipeline;
pub mod stats;

use crossbeam_channel::bounded;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

use crate::common::config::Config;
use crate::common::errors::{Result, ShrinkError};
use crate::common::safety;
use crate::filter::Filter;
use crate::fs::{FileStat, FileSystem, OsFileSystem};
use crate::walker::{DirWalker, EntryKind, Walker};

pub use layout::LayoutPrinter;
pub use pipeline::{Pipeline, RemovalCandidate};

/// Cooperative stop signal shared by the walk and every worker.
///
/// A worker finishes the candidate it holds before it notices.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Prunes one directory tree.
///
/// Holds the validated root, the compiled filter and the injected
/// file system and walker. `clean` deletes, `dry_run` prints the plan;
/// both return the same aggregate for the same tree.
pub struct Shrinker {
    root: PathBuf,
    verbose: bool,
    dry_run: bool,
    concurrency: usize,
    filter: Filter,
    fs: Arc<dyn FileSystem>,
    walker: Arc<dyn Walker>,
}

impl Shrinker {
    /// Shrinker over the real file system. Verbose runs walk in name
    /// order so the log reads top to bottom.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_collaborators(
            config,
            Arc::new(OsFileSystem::new()),
            Arc::new(DirWalker::new(config.verbose)),
        )
    }

    /// Validate the config and build the filter. Fails before anything
    /// is walked if the root is missing, not a directory, protected, or
    /// if a name pattern does not compile.
    pub fn with_collaborators(
        config: &Config,
        fs: Arc<dyn FileSystem>,
        walker: Arc<dyn Walker>,
    ) -> Result<Self> {
        let cwd = fs.current_dir()?;
        let root = config.resolve_root(&cwd);

        match fs.kind(&root) {
            Ok(EntryKind::Directory) => {}
            Ok(_) => return Err(ShrinkError::RootNotDirectory { path: root }),
            Err(_) => return Err(ShrinkError::RootNotFound { path: root }),
        }

        if safety::is_protected_root(&root) {
            return Err(ShrinkError::ProtectedRoot { path: root });
        }

        let filter = Filter::new(&config.rules())?;

        Ok(Self {
            root,
            verbose: config.verbose,
            dry_run: config.dry_run,
            concurrency: config.concurrency_limit(),
            filter,
            fs,
            walker,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Dry run or clean, as configured. The tree listing of a dry run
    /// goes to `out`.
    pub fn run<W: Write>(&self, cancel: &CancelToken, out: W) -> Result<FileStat> {
        if self.dry_run {
            self.dry_run(cancel, out)
        } else {
            self.clean(cancel)
        }
    }

    /// Remove every selected entry and return what was freed.
    ///
    /// Entries whose stat or removal fails are skipped and not counted,
    /// so the total can be lower than what was selected.
    pub fn clean(&self, cancel: &CancelToken) -> Result<FileStat> {
        info!(root = %self.root.display(), workers = self.concurrency, "start checking directory");

        let pipeline = Pipeline {
            filter: &self.filter,
            fs: self.fs.as_ref(),
            walker: self.walker.as_ref(),
            concurrency: self.concurrency,
            verbose: self.verbose,
        };
        let total = pipeline.run(&self.root, cancel)?;

        info!(bytes = total.size_bytes, files = total.file_count, "removal finished");
        Ok(total)
    }

    /// Print what `clean` would remove and return what it would free
    pub fn dry_run<W: Write>(&self, cancel: &CancelToken, out: W) -> Result<FileStat> {
        info!(root = %self.root.display(), "dry run");

        let (stats_tx, stats_rx) = bounded(self.concurrency);
        let result_rx = stats::spawn_aggregator(stats_rx);

        let printed = LayoutPrinter::new(&self.filter, self.fs.as_ref(), out, cancel)
            .print(&self.root, &stats_tx);
        drop(stats_tx);

        let total = result_rx.recv().map_err(|_| ShrinkError::WorkerPanic {
            name: "aggregator".into(),
        })?;
        printed?;

        Ok(total)
    }
}
