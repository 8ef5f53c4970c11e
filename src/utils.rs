//! Supporting helpers: stderr prefixes and display paths.

use owo_colors::OwoColorize;
use std::path::Path;

fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

/// Prefix for fatal CLI misconfiguration messages.
pub fn error_prefix() -> String {
    if colors_enabled() {
        "✖ error:".red().bold().to_string()
    } else {
        "✖ error:".to_string()
    }
}

/// Prefix for recoverable warnings (broken artifacts, odd shapes).
pub fn note_prefix() -> String {
    if colors_enabled() {
        "▲ note:".yellow().bold().to_string()
    } else {
        "▲ note:".to_string()
    }
}

/// Prefix for informational hints.
pub fn info_prefix() -> String {
    if colors_enabled() {
        "◆ info:".blue().bold().to_string()
    } else {
        "◆ info:".to_string()
    }
}

/// Repo-relative display form of a path; falls back to the path as given
/// when it is not under the root.
pub fn display_path(root: &Path, path: &str) -> String {
    let p = Path::new(path);
    if !p.is_absolute() || !p.starts_with(root) {
        return path.to_string();
    }
    pathdiff::diff_paths(p, root)
        .map(|d| d.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string())
}
