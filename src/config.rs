//! Configuration discovery and effective settings resolution.
//!
//! Scorecard reads `scorecard.toml|yaml|yml` from the repository root (or
//! closest ancestor) and merges it with CLI flags to produce an
//! `Effective` config. Defaults:
//! - `reports_dir`: `reports`
//! - `output`: `human`
//! - `page_size`: 10
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::query::{DEFAULT_PAGE_SIZE, PAGE_SIZES};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `scorecard.toml|yaml`.
pub struct ScorecardConfig {
    /// Directory holding the audit report artifacts, relative to the
    /// repository root.
    pub reports_dir: Option<String>,
    pub output: Option<String>,
    pub page_size: Option<usize>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying
/// precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub reports_dir: PathBuf,
    pub output: String,
    pub page_size: usize,
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a `scorecard.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if cur.join("scorecard.toml").exists()
            || cur.join("scorecard.yaml").exists()
            || cur.join("scorecard.yml").exists()
        {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `ScorecardConfig` from `scorecard.toml` or `scorecard.yaml|yml`
/// if present.
pub fn load_config(root: &Path) -> Option<ScorecardConfig> {
    let toml_path = root.join("scorecard.toml");
    if toml_path.exists() {
        let s = fs::read_to_string(&toml_path).ok()?;
        let cfg: ScorecardConfig = toml::from_str(&s).ok()?;
        return Some(cfg);
    }
    for yml in ["scorecard.yaml", "scorecard.yml"] {
        let p = root.join(yml);
        if p.exists() {
            let s = fs::read_to_string(&p).ok()?;
            let cfg: ScorecardConfig = serde_yaml::from_str(&s).ok()?;
            return Some(cfg);
        }
    }
    None
}

/// Resolve `Effective` by merging CLI flags, discovered config, and
/// defaults.
pub fn resolve_effective(
    cli_repo_root: Option<&str>,
    cli_reports_dir: Option<&str>,
    cli_output: Option<&str>,
    cli_page_size: Option<usize>,
) -> Effective {
    let start = PathBuf::from(cli_repo_root.unwrap_or("."));
    let repo_root = detect_repo_root(&start);
    let cfg = load_config(&repo_root).unwrap_or_default();

    let reports_dir = cli_reports_dir
        .map(|s| s.to_string())
        .or(cfg.reports_dir)
        .unwrap_or_else(|| "reports".to_string());
    let reports_dir = {
        let p = PathBuf::from(&reports_dir);
        if p.is_absolute() {
            p
        } else {
            repo_root.join(p)
        }
    };

    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());

    let page_size = cli_page_size
        .or(cfg.page_size)
        .filter(|s| PAGE_SIZES.contains(s))
        .unwrap_or(DEFAULT_PAGE_SIZE);

    Effective {
        repo_root,
        reports_dir,
        output,
        page_size,
    }
}
