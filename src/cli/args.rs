use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::common::config::{Config, FileConfig};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(
    name = "shrinker",
    version,
    about = "Remove tests, examples and other dead weight from dependency trees",
    long_about = "Shrinker walks a dependency tree (node_modules by default), selects files\n\
                  and directories by name, pattern and extension, and deletes them.\n\n\
                  Entries that cannot be measured or deleted are skipped and left out of\n\
                  the totals, so the reported size may be lower than what was selected.",
    after_help = "EXAMPLES:\n  \
        shrinker                                 Prune ./node_modules\n  \
        shrinker -d vendor/js --dry-run          Show what would be removed\n  \
        shrinker -i README.md -i '^CHANGELOG'    Also remove these names\n  \
        shrinker -x .ts,.map --no-defaults       Remove by extension only\n  \
        shrinker -c 8 --format json              Eight workers, JSON summary"
)]
pub struct Cli {
    /// Directory to clean up [default: ./node_modules]
    #[arg(long, short = 'd', value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// Names that must not be removed (regex if it contains * ? [ ] \ _ - ^ $)
    #[arg(long, short = 'e', value_name = "NAME", value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Names to remove (regex if it contains * ? [ ] \ _ - ^ $)
    #[arg(long, short = 'i', value_name = "NAME", value_delimiter = ',')]
    pub include: Vec<String>,

    /// File extensions to remove, e.g. .ts or .d.ts
    #[arg(long = "ext", short = 'x', value_name = "EXT", value_delimiter = ',')]
    pub extensions: Vec<String>,

    /// Number of concurrent removal workers
    #[arg(long, short = 'c', value_name = "N")]
    pub concurrency: Option<usize>,

    /// Show the tree of what would be removed without deleting anything
    #[arg(long, short = 'n')]
    pub dry_run: bool,

    /// Skip the built-in rules (test, tests, example, examples and .ts, .d.ts, .coffee)
    #[arg(long)]
    pub no_defaults: bool,

    /// Config file [default: <config dir>/shrinker/config.toml]
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "human")]
    pub format: OutputFormat,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Verbose output
    #[arg(long, short)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    Quiet,
}

impl Cli {
    /// Merge flags over the config file. List flags add to the file's
    /// lists; scalar flags replace its values.
    pub fn into_config(self, file: FileConfig) -> Config {
        let mut config = Config::from_file(file, !self.no_defaults);

        config.root = self.dir;
        config.verbose = self.verbose;
        config.dry_run = self.dry_run;
        if let Some(concurrency) = self.concurrency {
            config.concurrency = concurrency;
        }
        config.include_names.extend(self.include);
        config.exclude_names.extend(self.exclude);
        config.include_extensions.extend(self.extensions);

        config
    }
}
