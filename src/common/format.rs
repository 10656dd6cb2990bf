use colored::*;
use std::path::Path;

const UNITS: &[(&str, u64)] = &[
    ("TB", 1 << 40),
    ("GB", 1 << 30),
    ("MB", 1 << 20),
    ("KB", 1 << 10),
];

/// Human-readable size with binary units: `512 B`, `1.5 KB`, `1.00 MB`
pub fn format_size(bytes: u64) -> String {
    for &(unit, scale) in UNITS {
        if bytes >= scale {
            let value = bytes as f64 / scale as f64;
            return if unit == "KB" {
                format!("{:.1} {}", value, unit)
            } else {
                format!("{:.2} {}", value, unit)
            };
        }
    }
    format!("{} B", bytes)
}

/// Freed size for the summary line. Anything over 100 MB is worth
/// shouting about.
pub fn format_size_colored(bytes: u64) -> ColoredString {
    let s = format_size(bytes);
    match bytes {
        0 => s.dimmed(),
        b if b >= 100 << 20 => s.green().bold(),
        _ => s.cyan(),
    }
}

pub fn format_count(count: u64) -> String {
    match count {
        1 => "1 file".to_string(),
        n => format!("{} files", n),
    }
}

/// Display form of a path with the home directory shortened to `~`
pub fn format_path(path: &Path) -> String {
    dirs::home_dir()
        .and_then(|home| {
            path.strip_prefix(&home)
                .ok()
                .map(|rest| format!("~/{}", rest.display()))
        })
        .unwrap_or_else(|| path.display().to_string())
}
