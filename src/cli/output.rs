use colored::*;
use serde::Serialize;
use std::path::Path;

use crate::common::format::{format_count, format_path, format_size, format_size_colored};
use crate::fs::FileStat;

/// Machine-readable run summary
#[derive(Debug, Serialize)]
pub struct Summary<'a> {
    pub dry_run: bool,
    pub root: &'a Path,
    pub size_bytes: u64,
    pub file_count: u64,
}

/// Header printed before the walk starts
pub fn print_start(root: &Path, dry_run: bool) {
    let verb = if dry_run { "Planning" } else { "Start checking" };
    println!("{} directory {}", verb, format_path(root).bold());
    if dry_run {
        println!("{}", "─".repeat(60).dimmed());
    }
}

/// Human-readable totals
pub fn print_summary(stats: &FileStat, dry_run: bool) {
    println!("{}", "─".repeat(60).dimmed());
    if dry_run {
        println!("  Would free:    {}", format_size_colored(stats.size_bytes));
        println!("  Would remove:  {}", format_count(stats.file_count));
        println!();
        println!("  {}", "Dry run, nothing was deleted.".dimmed());
    } else {
        println!("  Total removed: {}", format_size_colored(stats.size_bytes));
        println!("  Files removed: {}", format_count(stats.file_count));
    }
}

pub fn print_summary_json(stats: &FileStat, root: &Path, dry_run: bool) {
    let summary = Summary {
        dry_run,
        root,
        size_bytes: stats.size_bytes,
        file_count: stats.file_count,
    };
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize summary: {}", e),
    }
}

/// Just the byte count, for scripts
pub fn print_summary_quiet(stats: &FileStat) {
    println!("{}", stats.size_bytes);
}

/// One-line size for log messages
pub fn describe(stats: &FileStat) -> String {
    format!("{} in {}", format_size(stats.size_bytes), format_count(stats.file_count))
}
