use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::common::errors::{Result, ShrinkError};
use crate::filter::RuleSet;

/// Directories removed when no other rule says otherwise
pub const DEFAULT_REMOVE_DIR_NAMES: &[&str] = &["test", "tests", "example", "examples"];

/// Sources and typings that are never loaded at runtime.
///
/// There are no default file names: deleting a package's `package.json`
/// breaks `main` and `exports` resolution for anything that requires it.
pub const DEFAULT_REMOVE_FILE_EXTENSIONS: &[&str] = &[".ts", ".d.ts", ".coffee"];

/// Directory pruned when no root is given, relative to the working directory
pub const DEFAULT_ROOT_DIR: &str = "node_modules";

/// Resolved settings for one run. Built once, never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Directory to prune; `None` means `<cwd>/node_modules`
    pub root: Option<PathBuf>,
    pub verbose: bool,
    pub dry_run: bool,
    /// Number of removal workers, 0 is treated as 1
    pub concurrency: usize,
    pub include_names: Vec<String>,
    pub exclude_names: Vec<String>,
    pub include_extensions: Vec<String>,
    pub remove_dir_names: Vec<String>,
    pub remove_file_names: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: None,
            verbose: false,
            dry_run: false,
            concurrency: 1,
            include_names: Vec::new(),
            exclude_names: Vec::new(),
            include_extensions: strings(DEFAULT_REMOVE_FILE_EXTENSIONS),
            remove_dir_names: strings(DEFAULT_REMOVE_DIR_NAMES),
            remove_file_names: Vec::new(),
        }
    }
}

fn strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

impl Config {
    /// Defaults with every value present in the config file applied on top.
    /// Without `defaults` the built-in directory names and extensions are
    /// left out; the file's own lists still apply.
    pub fn from_file(file: FileConfig, defaults: bool) -> Self {
        let mut config = Config::default();
        if !defaults {
            config.remove_dir_names.clear();
            config.include_extensions.clear();
        }
        if let Some(concurrency) = file.concurrency {
            config.concurrency = concurrency;
        }
        if let Some(names) = file.remove_dir_names {
            config.remove_dir_names = names;
        }
        if let Some(names) = file.remove_file_names {
            config.remove_file_names = names;
        }
        config.include_names = file.include;
        config.exclude_names = file.exclude;
        config.include_extensions.extend(file.extensions);
        config
    }

    pub fn concurrency_limit(&self) -> usize {
        self.concurrency.max(1)
    }

    /// Root to prune, falling back to `node_modules` under `cwd`
    pub fn resolve_root(&self, cwd: &Path) -> PathBuf {
        match &self.root {
            Some(root) if root.is_absolute() => root.clone(),
            Some(root) => cwd.join(root),
            None => cwd.join(DEFAULT_ROOT_DIR),
        }
    }

    pub fn rules(&self) -> RuleSet {
        RuleSet {
            include_names: self.include_names.clone(),
            exclude_names: self.exclude_names.clone(),
            include_extensions: self.include_extensions.clone(),
            remove_dir_names: self.remove_dir_names.clone(),
            remove_file_names: self.remove_file_names.clone(),
        }
    }
}

/// Optional TOML config file, every key may be omitted
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub concurrency: Option<usize>,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub extensions: Vec<String>,
    /// Replaces the default directory names when present
    pub remove_dir_names: Option<Vec<String>>,
    pub remove_file_names: Option<Vec<String>>,
}

impl FileConfig {
    /// Default location: `<config dir>/shrinker/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("shrinker").join("config.toml"))
    }

    /// Load a config file that must exist
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ShrinkError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&contents).map_err(|e| ShrinkError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load the file at the default location, or defaults if it is absent
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }
}
