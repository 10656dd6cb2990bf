//! # Shrinker
//!
//! Prunes dependency trees such as `node_modules` by deleting the files
//! and directories nobody needs at runtime: test suites, examples,
//! sources of compiled languages, docs.
//!
//! - **Name rules**: literal names and regex patterns to include or exclude
//! - **Extension rules**: `.ts`, `.map`, compound ones like `.d.ts`
//! - **Concurrent removal**: one walker feeding a bounded pool of deleters
//! - **Dry run**: a tree view of what would go, with the same totals
//! - **Best effort**: entries that fail to stat or delete are skipped, not fatal

pub mod cli;
pub mod common;
pub mod filter;
pub mod fs;
pub mod shrinker;
pub mod walker;

pub use common::config::Config;
pub use common::errors::ShrinkError;
pub use filter::{Decision, Filter, RuleSet};
pub use fs::{FileStat, FileSystem, OsFileSystem};
pub use shrinker::{CancelToken, Shrinker};
pub use walker::{DirWalker, EntryInfo, EntryKind, Walker};
