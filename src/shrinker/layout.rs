use colored::*;
use crossbeam_channel::Sender;
use std::io::Write;
use std::path::Path;
use tracing::debug;

use super::CancelToken;
use crate::common::errors::{Result, ShrinkError};
use crate::common::format::format_size;
use crate::filter::Filter;
use crate::fs::{FileStat, FileSystem};
use crate::walker::EntryInfo;

const TEE: &str = "├── ";
const CORNER: &str = "└── ";
const PIPE: &str = "│   ";
const BLANK: &str = "    ";

/// Prints the tree of what a live run would remove, one directory level
/// at a time, and feeds the stats of selected entries to the aggregator.
///
/// Selected entries are stat'ed exactly like a worker would stat them, so
/// the totals match a live run. Nothing is ever removed.
pub struct LayoutPrinter<'a, W: Write> {
    filter: &'a Filter,
    fs: &'a dyn FileSystem,
    out: W,
    cancel: &'a CancelToken,
}

impl<'a, W: Write> LayoutPrinter<'a, W> {
    pub fn new(
        filter: &'a Filter,
        fs: &'a dyn FileSystem,
        out: W,
        cancel: &'a CancelToken,
    ) -> Self {
        Self {
            filter,
            fs,
            out,
            cancel,
        }
    }

    /// Print `root` and everything below it that is not already selected.
    /// An unlistable root prints nothing, as a live walk would skip it.
    pub fn print(&mut self, root: &Path, stats: &Sender<FileStat>) -> Result<()> {
        match self.fs.read_dir(root) {
            Ok(entries) => self.print_level(&entries, "", stats),
            Err(e) => {
                debug!(path = %root.display(), error = %e, "cannot list directory");
                Ok(())
            }
        }
    }

    fn print_level(
        &mut self,
        entries: &[EntryInfo],
        prefix: &str,
        stats: &Sender<FileStat>,
    ) -> Result<()> {
        for (i, entry) in entries.iter().enumerate() {
            if self.cancel.is_cancelled() {
                return Ok(());
            }

            let last = i == entries.len() - 1;
            let connector = if last { CORNER } else { TEE };
            let selected = self.filter.check(entry).should_remove();

            let stat = self.fs.stat(&entry.path, entry.is_dir()).ok();
            let line = format!(
                "{}{}{} ({})",
                prefix,
                connector,
                colorize_name(entry, selected),
                describe_size(stat.as_ref())
            );
            writeln!(self.out, "{}", line).map_err(|e| ShrinkError::io("<output>", e))?;

            if selected {
                if let Some(stat) = stat {
                    if stats.send(stat).is_err() {
                        debug!(path = %entry.path.display(), "aggregator gone, stat dropped");
                    }
                }
                continue;
            }

            if entry.is_dir() {
                let child_prefix = format!("{}{}", prefix, if last { BLANK } else { PIPE });
                match self.fs.read_dir(&entry.path) {
                    Ok(children) => self.print_level(&children, &child_prefix, stats)?,
                    Err(e) => {
                        debug!(path = %entry.path.display(), error = %e, "cannot list directory")
                    }
                }
            }
        }

        Ok(())
    }
}

fn colorize_name(entry: &EntryInfo, selected: bool) -> ColoredString {
    let name = entry.name.as_str();
    if selected {
        name.green()
    } else if entry.is_dir() {
        name.yellow()
    } else {
        name.red()
    }
}

fn describe_size(stat: Option<&FileStat>) -> ColoredString {
    match stat {
        None => "unreadable".dimmed(),
        Some(s) if s.size_bytes == 0 => "empty".yellow(),
        Some(s) => format_size(s.size_bytes).cyan(),
    }
}
