//! Artifact probe and loader.
//!
//! Each category's JSON report is probed for existence, then loaded and
//! parsed independently. All categories load in one parallel pass; one
//! missing or broken artifact never prevents the others from loading.
//! Transport or parse failures degrade to an absent artifact plus a
//! recoverable warning, never an error to the caller.

use crate::models::artifacts::{ExcludeArtifact, SummaryArtifact};
use crate::models::Category;
use glob::Pattern;
use rayon::prelude::*;
use serde_json::Value as Json;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Well-known file name stem for one category's report.
pub fn file_stem(category: Category) -> &'static str {
    match category {
        Category::LintJs => "eslint-report",
        Category::LintStyle => "stylelint-report",
        Category::Security => "security-report",
        Category::Performance => "performance-report",
        Category::Accessibility => "accessibility-report",
        Category::PageSpeed => "pagespeed-report",
        Category::Dependency => "dependency-report",
    }
}

const SUMMARY_STEM: &str = "comprehensive-summary";
const EXCLUDE_STEM: &str = "exclude-rules";

/// A recoverable load problem, recorded for diagnostics and shown as a
/// note; never raised.
#[derive(Debug, Clone)]
pub struct LoadWarning {
    pub category: Option<Category>,
    pub file: String,
    pub message: String,
}

/// Everything the load phase produced: one slot per category plus the two
/// optional cross-cutting artifacts.
#[derive(Debug, Default)]
pub struct ArtifactSet {
    slots: HashMap<Category, Json>,
    pub summary: Option<SummaryArtifact>,
    pub exclude: Option<ExcludeArtifact>,
}

impl ArtifactSet {
    pub fn get(&self, category: Category) -> Option<&Json> {
        self.slots.get(&category)
    }

    pub fn present(&self, category: Category) -> bool {
        self.slots.contains_key(&category)
    }
}

/// Resolve the on-disk path for a report stem: the exact name if present,
/// otherwise the lexicographically last timestamped variant
/// (`<stem>-*.json`). The pattern is matched against file names only, so
/// glob metacharacters in the directory path stay inert.
fn resolve_report_path(dir: &Path, stem: &str) -> Option<PathBuf> {
    let exact = dir.join(format!("{}.json", stem));
    if exact.is_file() {
        return Some(exact);
    }
    let pattern = Pattern::new(&format!("{}-*.json", stem)).ok()?;
    let mut names: Vec<String> = fs::read_dir(dir)
        .ok()?
        .flatten()
        .filter(|e| e.path().is_file())
        .filter_map(|e| e.file_name().into_string().ok())
        .filter(|n| pattern.matches(n))
        .collect();
    names.sort();
    names.pop().map(|n| dir.join(n))
}

/// Existence check only; absence is not an error anywhere downstream.
pub fn probe(dir: &Path, category: Category) -> bool {
    resolve_report_path(dir, file_stem(category)).is_some()
}

fn load_json(path: &Path) -> Result<Json, String> {
    let data = fs::read_to_string(path).map_err(|e| format!("read failed: {}", e))?;
    serde_json::from_str(&data).map_err(|e| format!("invalid JSON: {}", e))
}

fn load_stem(dir: &Path, stem: &str) -> (Option<Json>, Option<LoadWarning>) {
    let Some(path) = resolve_report_path(dir, stem) else {
        return (None, None);
    };
    match load_json(&path) {
        Ok(v) => (Some(v), None),
        Err(msg) => (
            None,
            Some(LoadWarning {
                category: None,
                file: path.to_string_lossy().to_string(),
                message: msg,
            }),
        ),
    }
}

/// Load one category's artifact. Absence yields `(None, None)`; a read
/// or parse failure yields `(None, Some(warning))`.
pub fn load(dir: &Path, category: Category) -> (Option<Json>, Option<LoadWarning>) {
    if !probe(dir, category) {
        return (None, None);
    }
    let (value, warning) = load_stem(dir, file_stem(category));
    let warning = warning.map(|mut w| {
        w.category = Some(category);
        w
    });
    (value, warning)
}

/// Probe and load every category's artifact plus the optional summary and
/// exclusion configs. Per-category loads run in parallel and each writes
/// only its own slot.
pub fn load_all(dir: &Path) -> (ArtifactSet, Vec<LoadWarning>) {
    let per_category: Vec<(Category, Option<Json>, Option<LoadWarning>)> = Category::ALL
        .par_iter()
        .map(|&category| {
            let (value, warning) = load(dir, category);
            (category, value, warning)
        })
        .collect();

    let mut set = ArtifactSet::default();
    let mut warnings = Vec::new();
    for (category, value, warning) in per_category {
        if let Some(v) = value {
            set.slots.insert(category, v);
        }
        if let Some(w) = warning {
            warnings.push(w);
        }
    }

    let (summary_json, summary_warn) = load_stem(dir, SUMMARY_STEM);
    warnings.extend(summary_warn);
    if let Some(v) = summary_json {
        match serde_json::from_value::<SummaryArtifact>(v) {
            Ok(s) => set.summary = Some(s),
            Err(e) => warnings.push(LoadWarning {
                category: None,
                file: format!("{}.json", SUMMARY_STEM),
                message: format!("unexpected summary shape: {}", e),
            }),
        }
    }

    let (exclude_json, exclude_warn) = load_stem(dir, EXCLUDE_STEM);
    warnings.extend(exclude_warn);
    if let Some(v) = exclude_json {
        match serde_json::from_value::<ExcludeArtifact>(v) {
            Ok(x) => set.exclude = Some(x),
            Err(e) => warnings.push(LoadWarning {
                category: None,
                file: format!("{}.json", EXCLUDE_STEM),
                message: format!("unexpected exclude-rules shape: {}", e),
            }),
        }
    }

    (set, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_probe_absent_then_present() {
        let dir = tempdir().unwrap();
        assert!(!probe(dir.path(), Category::Security));
        fs::write(
            dir.path().join("security-report.json"),
            r#"{"issues": []}"#,
        )
        .unwrap();
        assert!(probe(dir.path(), Category::Security));
    }

    #[test]
    fn test_timestamped_variant_picks_latest() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("eslint-report-2026-08-01.json"),
            r#"{"results": [{"filePath": "old.js", "messages": []}]}"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("eslint-report-2026-08-29.json"),
            r#"{"results": [{"filePath": "new.js", "messages": []}]}"#,
        )
        .unwrap();
        let (set, warnings) = load_all(dir.path());
        assert!(warnings.is_empty());
        let v = set.get(Category::LintJs).unwrap();
        assert_eq!(v["results"][0]["filePath"], "new.js");
    }

    #[test]
    fn test_resolves_inside_dir_with_glob_metacharacters() {
        let dir = tempdir().unwrap();
        let reports = dir.path().join("audit [prod]?");
        fs::create_dir(&reports).unwrap();
        fs::write(
            reports.join("eslint-report-2026-08-29.json"),
            r#"{"results": []}"#,
        )
        .unwrap();
        assert!(probe(&reports, Category::LintJs));
        let (set, warnings) = load_all(&reports);
        assert!(warnings.is_empty());
        assert!(set.present(Category::LintJs));
    }

    #[test]
    fn test_broken_artifact_warns_without_blocking_others() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("security-report.json"), "{not json").unwrap();
        fs::write(
            dir.path().join("accessibility-report.json"),
            r#"{"issues": [{"type": "missing-alt", "severity": "high", "message": "img"}]}"#,
        )
        .unwrap();
        let (set, warnings) = load_all(dir.path());
        assert!(!set.present(Category::Security));
        assert!(set.present(Category::Accessibility));
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].category, Some(Category::Security));
        assert!(warnings[0].message.contains("invalid JSON"));
    }

    #[test]
    fn test_summary_and_exclude_artifacts_load() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("comprehensive-summary.json"),
            r#"{"categories": {"security": {"totalIssues": 5}}}"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("exclude-rules.json"),
            r#"{"excludeRules": {"lint-js": {"enabled": true, "additionalRules": ["semi"]}}}"#,
        )
        .unwrap();
        let (set, warnings) = load_all(dir.path());
        assert!(warnings.is_empty());
        assert_eq!(set.summary.unwrap().categories["security"].total_issues, 5);
        assert!(set.exclude.unwrap().exclude_rules.contains_key("lint-js"));
    }
}
