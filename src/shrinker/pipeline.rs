use crossbeam_channel::{bounded, Receiver, Sender};
use std::path::{Path, PathBuf};
use std::thread;
use tracing::{debug, warn};

use super::stats;
use super::CancelToken;
use crate::common::errors::{Result, ShrinkError};
use crate::filter::{Decision, Filter};
use crate::fs::{FileStat, FileSystem};
use crate::walker::{EntryInfo, ErrorAction, WalkControl, Walker};

/// An entry selected by the filter, waiting for a worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalCandidate {
    pub is_dir: bool,
    pub name: String,
    pub full_path: PathBuf,
}

impl From<&EntryInfo> for RemovalCandidate {
    fn from(entry: &EntryInfo) -> Self {
        Self {
            is_dir: entry.is_dir(),
            name: entry.name.clone(),
            full_path: entry.path.clone(),
        }
    }
}

/// Walk → filter → remove → aggregate.
///
/// The walk runs on the calling thread and feeds a channel bounded to the
/// worker count, so it blocks once the workers fall behind. Each worker
/// stats a candidate, removes it and forwards the stat; a failed stat or
/// removal drops the candidate and the run carries on. A single
/// aggregator sums whatever arrives.
pub struct Pipeline<'a> {
    pub filter: &'a Filter,
    pub fs: &'a dyn FileSystem,
    pub walker: &'a dyn Walker,
    pub concurrency: usize,
    pub verbose: bool,
}

impl<'a> Pipeline<'a> {
    pub fn run(&self, root: &Path, cancel: &CancelToken) -> Result<FileStat> {
        let workers = self.concurrency.max(1);

        thread::scope(|s| {
            let (candidate_tx, candidate_rx) = bounded::<RemovalCandidate>(workers);
            let (stats_tx, stats_rx) = bounded::<FileStat>(workers);

            let aggregator = s.spawn(move || stats::aggregate(stats_rx));

            let handles: Vec<_> = (0..workers)
                .map(|id| {
                    let rx = candidate_rx.clone();
                    let tx = stats_tx.clone();
                    s.spawn(move || self.worker(id, rx, tx, cancel))
                })
                .collect();

            // Workers hold the only remaining ends
            drop(candidate_rx);
            drop(stats_tx);

            let walk_result = self.walker.walk(
                root,
                &mut |entry| self.on_entry(entry, &candidate_tx, cancel),
                &mut |path, err| self.on_walk_error(path, err),
            );
            drop(candidate_tx);

            let mut panicked = None;
            for (id, handle) in handles.into_iter().enumerate() {
                if handle.join().is_err() && panicked.is_none() {
                    panicked = Some(format!("worker-{}", id));
                }
            }
            let total = aggregator.join().map_err(|_| ShrinkError::WorkerPanic {
                name: "aggregator".into(),
            })?;

            if let Some(name) = panicked {
                return Err(ShrinkError::WorkerPanic { name });
            }
            walk_result?;

            Ok(total)
        })
    }

    fn on_entry(
        &self,
        entry: &EntryInfo,
        candidates: &Sender<RemovalCandidate>,
        cancel: &CancelToken,
    ) -> WalkControl {
        if cancel.is_cancelled() {
            debug!("walk cancelled");
            return WalkControl::Stop;
        }

        let decision = self.filter.check(entry);
        if decision.should_remove() {
            debug!(path = %entry.path.display(), ?decision, "selected");
            if candidates.send(RemovalCandidate::from(entry)).is_err() {
                // every worker is gone
                return WalkControl::Stop;
            }
        }

        match decision {
            Decision::SkipSubtree => WalkControl::SkipSubtree,
            Decision::Remove | Decision::Excluded | Decision::NotApplicable => {
                WalkControl::Continue
            }
        }
    }

    fn on_walk_error(&self, path: &Path, err: &std::io::Error) -> ErrorAction {
        if self.verbose {
            warn!(path = %path.display(), error = %err, "skipping unreadable entry");
        }
        ErrorAction::SkipNode
    }

    fn worker(
        &self,
        id: usize,
        candidates: Receiver<RemovalCandidate>,
        stats: Sender<FileStat>,
        cancel: &CancelToken,
    ) {
        while let Ok(candidate) = candidates.recv() {
            if cancel.is_cancelled() {
                debug!(worker = id, "cancelled, leaving queue");
                break;
            }
            if let Some(stat) = self.remove_candidate(&candidate) {
                if stats.send(stat).is_err() {
                    break;
                }
            }
        }
    }

    /// Stat then remove one candidate. `None` means it was dropped.
    pub fn remove_candidate(&self, candidate: &RemovalCandidate) -> Option<FileStat> {
        debug!(path = %candidate.full_path.display(), "removing");

        let stat = match self.fs.stat(&candidate.full_path, candidate.is_dir) {
            Ok(stat) => stat,
            Err(e) => {
                if self.verbose {
                    warn!("ERROR: {}", e);
                }
                return None;
            }
        };

        if let Err(e) = self.fs.remove_all(&candidate.full_path) {
            if self.verbose {
                warn!("ERROR: {}", e);
            }
            return None;
        }

        Some(stat)
    }
}
