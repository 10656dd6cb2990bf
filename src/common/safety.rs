use std::path::Path;

/// Roots that must never be pruned, whatever the filter selects
const PROTECTED_PATHS: &[&str] = &[
    "/",
    "/System",
    "/Applications",
    "/Users",
    "/Library",
    "/home",
    "/root",
    "/usr",
    "/bin",
    "/sbin",
    "/lib",
    "/var",
    "/etc",
    "/opt",
    "/private",
    "/Volumes",
];

/// Check if a path is too important to be used as a prune root
pub fn is_protected(path: &Path) -> bool {
    let path_str = path.to_string_lossy();
    let trimmed = if path_str.len() > 1 {
        path_str.trim_end_matches('/')
    } else {
        &path_str
    };

    if PROTECTED_PATHS.iter().any(|p| trimmed == *p) {
        return true;
    }

    if let Some(home) = dirs::home_dir() {
        if path == home {
            return true;
        }
    }

    false
}

/// Like [`is_protected`], also checking the canonical form so that
/// `..` tricks and symlinked roots are caught
pub fn is_protected_root(path: &Path) -> bool {
    if is_protected(path) {
        return true;
    }
    std::fs::canonicalize(path)
        .map(|p| is_protected(&p))
        .unwrap_or(false)
}
