//! Schema normalization: producer-native JSON into the canonical
//! Issue/FileResult model.
//!
//! All producer-specific parsing lives here; nothing downstream ever sees
//! a raw artifact shape. Three producer families are handled:
//! - lint-style (eslint/stylelint): per-file result lists with messages;
//! - flat-issue (security/performance/accessibility/dependency): one
//!   array element per issue;
//! - page-speed: per-target objects with nested desktop/mobile reports.
//!
//! An artifact wrapped in a meta/summary object is unwrapped via its
//! `results`/`issues` sub-field; a wrapper without either normalizes to
//! an empty set, never an error.

use crate::classify::classify;
use crate::models::artifacts::{
    ExcludeArtifact, FlatIssue, LintFileEntry, RawCoreWebVitals, RawDeviceReport,
    RawPageSpeedTarget, RawWebVital,
};
use crate::models::{
    Category, CoreWebVitals, DeviceReport, FileResult, Issue, PageSpeedTarget, RawSeverity,
    WebVitalMetric,
};
use serde_json::Value as Json;
use std::collections::HashSet;

/// Normalized output for one category.
#[derive(Debug, Clone, Default)]
pub struct Normalized {
    pub issues: Vec<Issue>,
    /// Populated for lint-style categories only.
    pub files: Vec<FileResult>,
    /// Populated for the page-speed category only.
    pub pages: Vec<PageSpeedTarget>,
}

/// Built-in noisy rules hidden unless the exclusion config overrides the
/// default list (`overrideDefault = true`).
fn default_excludes(category: Category) -> &'static [&'static str] {
    match category {
        Category::LintJs => &["max-len", "no-plusplus"],
        Category::LintStyle => &["no-descending-specificity"],
        _ => &[],
    }
}

/// Resolve the effective excluded-rule set for one category from the
/// optional exclusion artifact, merged onto the built-in defaults.
pub fn excluded_rules(cfg: Option<&ExcludeArtifact>, category: Category) -> HashSet<String> {
    let defaults = || {
        default_excludes(category)
            .iter()
            .map(|s| s.to_string())
            .collect::<HashSet<_>>()
    };
    let Some(cfg) = cfg else {
        return defaults();
    };
    let Some(entry) = cfg.exclude_rules.get(category.name()) else {
        return defaults();
    };
    if !entry.enabled {
        return HashSet::new();
    }
    let mut set = if entry.override_default {
        HashSet::new()
    } else {
        defaults()
    };
    set.extend(entry.additional_rules.iter().cloned());
    set
}

/// Extract the item list from an artifact that may be a bare array or a
/// meta/summary wrapper object holding `results` or `issues`.
pub fn artifact_items(value: &Json) -> Vec<Json> {
    match value {
        Json::Array(items) => items.clone(),
        Json::Object(map) => map
            .get("results")
            .or_else(|| map.get("issues"))
            .and_then(Json::as_array)
            .cloned()
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

/// Normalize one category's raw artifact.
pub fn normalize(category: Category, value: &Json, excludes: &HashSet<String>) -> Normalized {
    match category {
        Category::LintJs | Category::LintStyle => normalize_lint(category, value, excludes),
        Category::PageSpeed => normalize_pagespeed(value, excludes),
        Category::Security
        | Category::Performance
        | Category::Accessibility
        | Category::Dependency => normalize_flat(category, value, excludes),
    }
}

fn is_excluded(rule_id: Option<&str>, excludes: &HashSet<String>) -> bool {
    rule_id.map(|r| excludes.contains(r)).unwrap_or(false)
}

fn normalize_lint(category: Category, value: &Json, excludes: &HashSet<String>) -> Normalized {
    let mut files: Vec<FileResult> = Vec::new();
    for item in artifact_items(value) {
        // A malformed entry is skipped, not fatal; the rest of the file
        // list still normalizes.
        let entry: LintFileEntry = match serde_json::from_value(item) {
            Ok(e) => e,
            Err(_) => continue,
        };
        let mut issues: Vec<Issue> = Vec::new();
        for msg in &entry.messages {
            if is_excluded(msg.rule_id.as_deref(), excludes) {
                continue;
            }
            let severity = classify(category, msg.rule_id.as_deref(), msg.severity.as_ref());
            issues.push(Issue {
                category,
                file: Some(entry.file_path.clone()),
                line: msg.line,
                column: msg.column,
                rule_id: msg.rule_id.clone(),
                raw_severity: msg.severity.clone(),
                severity,
                message: msg.message.clone(),
                suggestions: msg.suggestions.iter().map(|s| s.text().to_string()).collect(),
                code: None,
            });
        }
        // Counts derive from the filtered issue set, never from the
        // producer's errorCount/warningCount.
        files.push(FileResult::from_issues(entry.file_path, issues));
    }
    let issues = files.iter().flat_map(|f| f.issues.iter().cloned()).collect();
    Normalized {
        issues,
        files,
        pages: Vec::new(),
    }
}

fn flat_to_issue(category: Category, fi: &FlatIssue) -> Issue {
    let raw = fi.severity.clone().map(RawSeverity::Text);
    let severity = classify(category, fi.kind.as_deref(), raw.as_ref());
    let mut suggestions = Vec::new();
    if let Some(rec) = &fi.recommendation {
        suggestions.push(rec.clone());
    }
    Issue {
        category,
        file: fi.file.clone().or_else(|| fi.url.clone()),
        line: fi.line,
        column: fi.column,
        rule_id: fi.kind.clone(),
        raw_severity: raw,
        severity,
        message: fi.message.clone(),
        suggestions,
        code: fi.code.clone(),
    }
}

fn normalize_flat(category: Category, value: &Json, excludes: &HashSet<String>) -> Normalized {
    let mut issues = Vec::new();
    for item in artifact_items(value) {
        let fi: FlatIssue = match serde_json::from_value(item) {
            Ok(f) => f,
            Err(_) => continue,
        };
        if is_excluded(fi.kind.as_deref(), excludes) {
            continue;
        }
        issues.push(flat_to_issue(category, &fi));
    }
    Normalized {
        issues,
        files: Vec::new(),
        pages: Vec::new(),
    }
}

fn normalize_pagespeed(value: &Json, excludes: &HashSet<String>) -> Normalized {
    let mut issues = Vec::new();
    let mut pages = Vec::new();
    for item in artifact_items(value) {
        let raw: RawPageSpeedTarget = match serde_json::from_value(item) {
            Ok(t) => t,
            Err(_) => continue,
        };
        for (device, report) in [("desktop", &raw.desktop), ("mobile", &raw.mobile)] {
            let Some(report) = report else { continue };
            for fi in &report.issues {
                if is_excluded(fi.kind.as_deref(), excludes) {
                    continue;
                }
                let mut issue = flat_to_issue(Category::PageSpeed, fi);
                if issue.file.is_none() {
                    issue.file = Some(raw.url.clone());
                }
                issue.message = format!("[{}] {}", device, issue.message);
                issues.push(issue);
            }
        }
        pages.push(PageSpeedTarget {
            url: raw.url.clone(),
            desktop: raw.desktop.as_ref().map(convert_device),
            mobile: raw.mobile.as_ref().map(convert_device),
        });
    }
    Normalized {
        issues,
        files: Vec::new(),
        pages,
    }
}

fn convert_device(raw: &RawDeviceReport) -> DeviceReport {
    DeviceReport {
        performance: raw.performance,
        accessibility: raw.accessibility,
        best_practices: raw.best_practices,
        seo: raw.seo,
        core_web_vitals: raw.core_web_vitals.as_ref().map(convert_vitals),
    }
}

fn convert_vitals(raw: &RawCoreWebVitals) -> CoreWebVitals {
    let conv = |m: &Option<RawWebVital>| {
        m.as_ref().map(|v| WebVitalMetric {
            value: v.value,
            unit: v.unit.clone(),
            score: v.score,
        })
    };
    CoreWebVitals {
        largest_contentful_paint: conv(&raw.largest_contentful_paint),
        total_blocking_time: conv(&raw.total_blocking_time),
        cumulative_layout_shift: conv(&raw.cumulative_layout_shift),
        first_contentful_paint: conv(&raw.first_contentful_paint),
        interaction_to_next_paint: conv(&raw.interaction_to_next_paint),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Severity;
    use serde_json::json;

    fn no_excludes() -> HashSet<String> {
        HashSet::new()
    }

    #[test]
    fn test_eslint_shape_normalizes_with_file_attribution() {
        let value = json!({
            "results": [
                {"filePath": "src/app.js", "errorCount": 99, "warningCount": 99,
                 "messages": [
                    {"line": 2, "column": 5, "ruleId": "no-undef", "severity": 2,
                     "message": "'x' is not defined."},
                    {"line": 9, "column": 1, "ruleId": "indent", "severity": 1,
                     "message": "Expected indentation of 2 spaces."}
                 ]},
                {"filePath": "src/util.js", "messages": []}
            ]
        });
        let n = normalize(Category::LintJs, &value, &no_excludes());
        assert_eq!(n.files.len(), 2);
        assert_eq!(n.issues.len(), 2);
        assert_eq!(n.issues[0].file.as_deref(), Some("src/app.js"));
        assert_eq!(n.issues[0].severity, Severity::Critical);
        assert_eq!(n.issues[1].severity, Severity::Low);
        // Producer counts (99/99) are ignored; counts derive from issues.
        assert_eq!(n.files[0].error_count, 1);
        assert_eq!(n.files[0].warning_count, 1);
        assert_eq!(n.files[1].error_count, 0);
        assert_eq!(n.files[1].warning_count, 0);
    }

    #[test]
    fn test_flat_shape_passes_severity_through() {
        let value = json!({
            "issues": [
                {"type": "sql-injection", "severity": "critical",
                 "file": "api/users.js", "line": 40,
                 "message": "Unsanitized query parameter",
                 "recommendation": "Use a parameterized query",
                 "code": "db.query(`SELECT ... ${id}`)"},
                {"type": "slow-loop", "severity": "weird",
                 "message": "Nested loop over large arrays"}
            ],
            "totalIssues": 2
        });
        let n = normalize(Category::Security, &value, &no_excludes());
        assert_eq!(n.issues.len(), 2);
        assert_eq!(n.issues[0].severity, Severity::Critical);
        assert_eq!(
            n.issues[0].raw_severity,
            Some(RawSeverity::Text("critical".into()))
        );
        assert_eq!(n.issues[0].suggestions, vec!["Use a parameterized query".to_string()]);
        // Unrecognized severity string defaults to medium.
        assert_eq!(n.issues[1].severity, Severity::Medium);
    }

    #[test]
    fn test_wrapper_without_items_is_empty_not_error() {
        let value = json!({"meta": {"generatedAt": "2026-08-30"}, "summary": {}});
        let n = normalize(Category::Performance, &value, &no_excludes());
        assert!(n.issues.is_empty());
        let scalar = json!("not a report");
        let n = normalize(Category::Performance, &scalar, &no_excludes());
        assert!(n.issues.is_empty());
    }

    #[test]
    fn test_pagespeed_devices_and_vitals() {
        let value = json!([
            {"url": "https://example.test/",
             "desktop": {"performance": 91, "accessibility": 95, "bestPractices": 100,
                         "seo": 98, "issues": []},
             "mobile": {"performance": 58, "accessibility": 90, "bestPractices": 92,
                        "seo": 96,
                        "issues": [{"type": "render-blocking", "severity": "medium",
                                    "message": "Eliminate render-blocking resources"}],
                        "coreWebVitals": {"lcp": {"value": 4.2, "unit": "s", "score": 0.3}}}}
        ]);
        let n = normalize(Category::PageSpeed, &value, &no_excludes());
        assert_eq!(n.pages.len(), 1);
        assert_eq!(n.issues.len(), 1);
        assert_eq!(n.issues[0].file.as_deref(), Some("https://example.test/"));
        assert!(n.issues[0].message.starts_with("[mobile]"));
        let mobile = n.pages[0].mobile.as_ref().unwrap();
        assert_eq!(mobile.performance, Some(58.0));
        let lcp = mobile
            .core_web_vitals
            .as_ref()
            .unwrap()
            .largest_contentful_paint
            .as_ref()
            .unwrap();
        assert_eq!(lcp.value, 4.2);
        assert_eq!(lcp.score, Some(0.3));
    }

    #[test]
    fn test_exclusion_filters_before_counts() {
        let value = json!({
            "results": [
                {"filePath": "src/app.js", "messages": [
                    {"ruleId": "no-undef", "severity": 2, "message": "a"},
                    {"ruleId": "max-len", "severity": 1, "message": "b"}
                ]}
            ]
        });
        // Built-in defaults exclude max-len for lint-js.
        let excludes = excluded_rules(None, Category::LintJs);
        let n = normalize(Category::LintJs, &value, &excludes);
        assert_eq!(n.issues.len(), 1);
        assert_eq!(n.files[0].error_count, 1);
        assert_eq!(n.files[0].warning_count, 0);
    }

    #[test]
    fn test_excluded_rules_merge_and_override() {
        let cfg: ExcludeArtifact = serde_json::from_value(json!({
            "excludeRules": {
                "lint-js": {"enabled": true, "overrideDefault": false,
                            "additionalRules": ["no-console"]},
                "lint-style": {"enabled": true, "overrideDefault": true,
                               "additionalRules": ["indentation"]},
                "security": {"enabled": false, "additionalRules": ["sql-injection"]}
            }
        }))
        .unwrap();
        let js = excluded_rules(Some(&cfg), Category::LintJs);
        assert!(js.contains("no-console"));
        assert!(js.contains("max-len"));
        let style = excluded_rules(Some(&cfg), Category::LintStyle);
        assert!(style.contains("indentation"));
        assert!(!style.contains("no-descending-specificity"));
        // Disabled entry means nothing is excluded at all.
        assert!(excluded_rules(Some(&cfg), Category::Security).is_empty());
        // Absent entry falls back to defaults.
        assert!(excluded_rules(Some(&cfg), Category::Dependency).is_empty());
    }
}
