use std::path::PathBuf;

use thiserror::Error;

/// Typed errors for the shrinker library.
/// The binary wraps these with `anyhow` context; modules return them
/// directly so callers can tell configuration problems from walk failures.
#[derive(Debug, Error)]
pub enum ShrinkError {
    /// Root path does not exist
    #[error("Path '{}' doesn't exist", path.display())]
    RootNotFound { path: PathBuf },

    /// Root path exists but is not a directory
    #[error("Provided path '{}' is not a directory", path.display())]
    RootNotDirectory { path: PathBuf },

    /// Root path is a system or home location that must never be pruned
    #[error("Refusing to prune protected path '{}'", path.display())]
    ProtectedRoot { path: PathBuf },

    /// A user-supplied name pattern failed to compile
    #[error("Invalid name pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// File system operation failed
    #[error("I/O error at '{}': {}", path.display(), source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory walk was halted by an unrecoverable error
    #[error("Walk failed at '{}': {}", path.display(), source)]
    Walk {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A pipeline thread panicked
    #[error("Worker thread '{name}' panicked")]
    WorkerPanic { name: String },

    /// Configuration file is invalid
    #[error("Config error in '{}': {}", path.display(), message)]
    Config { path: PathBuf, message: String },
}

impl ShrinkError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ShrinkError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for errors raised before any traversal starts
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ShrinkError::RootNotFound { .. }
                | ShrinkError::RootNotDirectory { .. }
                | ShrinkError::ProtectedRoot { .. }
                | ShrinkError::InvalidPattern { .. }
                | ShrinkError::Config { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ShrinkError>;
