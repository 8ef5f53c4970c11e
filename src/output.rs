//! Output rendering for report, scores, and issues commands.
//!
//! Supports `human` (default) and `json` outputs. The JSON form includes
//! per-item fields and a top-level summary. `compose_*_json` helpers are
//! pure so shapes can be snapshot-tested.

use crate::loader::LoadWarning;
use crate::models::{CategoryReport, CompositeMetrics, Issue, ScoreSource, Severity};
use crate::query::{FilePageView, PageView};
use crate::utils;
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;
use std::path::Path;

fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

fn severity_badge(sev: Severity, color: bool) -> String {
    let text = format!("⟦{}⟧", sev.name());
    if !color {
        return text;
    }
    match sev {
        Severity::Critical => text.red().bold().to_string(),
        Severity::High => text.red().to_string(),
        Severity::Medium => text.yellow().bold().to_string(),
        Severity::Low => text.blue().to_string(),
    }
}

fn score_plain(report: &CategoryReport) -> String {
    match report.score {
        Some(s) => match report.score_source {
            ScoreSource::Default => format!("{:.0} (no data)", s),
            ScoreSource::PrecomputedSummary => format!("{:.1} (summary)", s),
            ScoreSource::Computed => format!("{:.1}", s),
        },
        None => "n/a".to_string(),
    }
}

fn colorize_score(report: &CategoryReport, text: String, color: bool) -> String {
    if !color {
        return text;
    }
    match report.score {
        Some(_) if report.score_source == ScoreSource::Default => {
            text.bright_black().to_string()
        }
        Some(s) if s >= 90.0 => text.green().bold().to_string(),
        Some(s) if s >= 70.0 => text.yellow().bold().to_string(),
        Some(_) => text.red().bold().to_string(),
        None => text.bright_black().to_string(),
    }
}

fn score_text(report: &CategoryReport, color: bool) -> String {
    colorize_score(report, score_plain(report), color)
}

/// Fixed-width score cell for the scores table. Padding is applied to the
/// plain text before colorizing so ANSI escapes never count toward the
/// column width.
fn score_cell(report: &CategoryReport, color: bool) -> String {
    colorize_score(report, format!("{:>8}", score_plain(report)), color)
}

fn print_warnings(warnings: &[LoadWarning]) {
    for w in warnings {
        eprintln!(
            "{} {}: {}",
            utils::note_prefix(),
            w.file,
            w.message
        );
    }
}

fn print_issue_line(issue: &Issue, root: &Path, color: bool) {
    let badge = severity_badge(issue.severity, color);
    let loc = match (&issue.file, issue.line) {
        (Some(f), Some(l)) => format!("{}:{}", utils::display_path(root, f), l),
        (Some(f), None) => utils::display_path(root, f),
        _ => String::new(),
    };
    let loc = if color && !loc.is_empty() {
        loc.bold().to_string()
    } else {
        loc
    };
    let rule = issue.rule_id.as_deref().unwrap_or("-");
    println!("  {} {} ❲{}❳ — {}", badge, loc, rule, issue.message);
    for s in &issue.suggestions {
        println!("      ↳ {}", s);
    }
}

/// Print the full per-category report in the requested format.
pub fn print_report(
    metrics: &CompositeMetrics,
    output: &str,
    warnings: &[LoadWarning],
    root: &Path,
    only: Option<crate::models::Category>,
) {
    print_warnings(warnings);
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&compose_report_json(metrics, warnings)).unwrap()
        ),
        _ => {
            let color = use_colors(output);
            for report in &metrics.reports {
                if only.is_some_and(|c| c != report.category) {
                    continue;
                }
                let heading = format!(
                    "{} — score {}",
                    report.category.label(),
                    score_text(report, color)
                );
                if color {
                    println!("{}", heading.bold());
                } else {
                    println!("{}", heading);
                }
                if !report.artifact_present && report.score_source == ScoreSource::Default {
                    println!("  (no report artifact)");
                }
                for issue in &report.issues {
                    print_issue_line(issue, root, color);
                }
                println!(
                    "  issues={} critical={} high={} medium={} low={}",
                    report.total_issues,
                    report.by_severity.critical,
                    report.by_severity.high,
                    report.by_severity.medium,
                    report.by_severity.low
                );
            }
            let summary = format!(
                "— Summary — issues={} critical={} high={} medium={} low={} categories-with-data={}",
                metrics.totals.total_issues,
                metrics.totals.by_severity.critical,
                metrics.totals.by_severity.high,
                metrics.totals.by_severity.medium,
                metrics.totals.by_severity.low,
                metrics.totals.categories_with_data
            );
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{}", summary);
            }
        }
    }
}

/// Print composite scores only.
pub fn print_scores(metrics: &CompositeMetrics, output: &str, warnings: &[LoadWarning]) {
    print_warnings(warnings);
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&compose_scores_json(metrics)).unwrap()
        ),
        _ => {
            let color = use_colors(output);
            for report in &metrics.reports {
                let line = format!(
                    "{:<14} {}  (issues: {})",
                    report.category.name(),
                    score_cell(report, color),
                    report.total_issues
                );
                println!("{}", line);
            }
        }
    }
}

/// Print one page of a category's issue view.
pub fn print_issues(view: &PageView<'_>, output: &str, root: &Path) {
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&compose_issues_json(view)).unwrap()
        ),
        _ => {
            let color = use_colors(output);
            for issue in &view.items {
                print_issue_line(issue, root, color);
            }
            let footer = format!(
                "— Page {}/{} — {} matching issue(s)",
                view.page, view.total_pages, view.total_items
            );
            if color {
                println!("{}", footer.bold());
            } else {
                println!("{}", footer);
            }
        }
    }
}

/// Print one page of a lint category's file-grouped view.
pub fn print_files(view: &FilePageView, output: &str, root: &Path) {
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&compose_files_json(view)).unwrap()
        ),
        _ => {
            let color = use_colors(output);
            for fr in &view.items {
                let heading = format!(
                    "{} — errors={} warnings={}",
                    utils::display_path(root, &fr.file_path),
                    fr.error_count,
                    fr.warning_count
                );
                if color {
                    println!("{}", heading.bold());
                } else {
                    println!("{}", heading);
                }
                for issue in &fr.issues {
                    print_issue_line(issue, root, color);
                }
            }
            let footer = format!(
                "— Page {}/{} — {} matching file(s)",
                view.page, view.total_pages, view.total_items
            );
            if color {
                println!("{}", footer.bold());
            } else {
                println!("{}", footer);
            }
        }
    }
}

/// Compose report JSON object (pure) for testing/snapshot purposes.
pub fn compose_report_json(metrics: &CompositeMetrics, warnings: &[LoadWarning]) -> JsonVal {
    let warn_items: Vec<_> = warnings
        .iter()
        .map(|w| {
            json!({
                "category": w.category.map(|c| c.name()),
                "file": w.file,
                "message": w.message,
            })
        })
        .collect();
    let mut out = serde_json::to_value(metrics).unwrap();
    out["warnings"] = JsonVal::Array(warn_items);
    out
}

/// Compose scores JSON object (pure) for testing/snapshot purposes.
pub fn compose_scores_json(metrics: &CompositeMetrics) -> JsonVal {
    let items: Vec<_> = metrics
        .reports
        .iter()
        .map(|r| {
            json!({
                "category": r.category,
                "score": r.score,
                "score_source": r.score_source,
                "total_issues": r.total_issues,
                "by_severity": r.by_severity,
            })
        })
        .collect();
    json!({"scores": items, "totals": metrics.totals})
}

/// Compose issues-view JSON object (pure) for testing/snapshot purposes.
pub fn compose_issues_json(view: &PageView<'_>) -> JsonVal {
    let items: Vec<_> = view
        .items
        .iter()
        .map(|i| serde_json::to_value(i).unwrap())
        .collect();
    json!({
        "issues": items,
        "page": view.page,
        "total_pages": view.total_pages,
        "total_items": view.total_items,
    })
}

/// Compose file-view JSON object (pure) for testing/snapshot purposes.
pub fn compose_files_json(view: &FilePageView) -> JsonVal {
    let items: Vec<_> = view
        .items
        .iter()
        .map(|f| serde_json::to_value(f).unwrap())
        .collect();
    json!({
        "files": items,
        "page": view.page,
        "total_pages": view.total_pages,
        "total_items": view.total_items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, RawSeverity};
    use crate::query::ViewController;
    use crate::score::score_category;
    use crate::normalize::Normalized;

    fn sample_metrics() -> CompositeMetrics {
        let issues = vec![Issue {
            category: Category::Security,
            file: Some("api/users.js".into()),
            line: Some(40),
            column: None,
            rule_id: Some("sql-injection".into()),
            raw_severity: Some(RawSeverity::Text("critical".into())),
            severity: Severity::Critical,
            message: "Unsanitized query parameter".into(),
            suggestions: vec!["Use a parameterized query".into()],
            code: None,
        }];
        let norm = Normalized {
            issues,
            files: vec![],
            pages: vec![],
        };
        let report = score_category(Category::Security, norm, true, None);
        let mut totals = crate::models::Totals::default();
        totals.total_issues = report.total_issues;
        totals.by_severity.merge(&report.by_severity);
        totals.categories_with_data = 1;
        CompositeMetrics {
            reports: vec![report],
            totals,
        }
    }

    #[test]
    fn test_compose_scores_json_shape() {
        let metrics = sample_metrics();
        let out = compose_scores_json(&metrics);
        assert_eq!(out["scores"][0]["category"], "security");
        assert_eq!(out["scores"][0]["score_source"], "computed");
        assert_eq!(out["scores"][0]["total_issues"], 1);
        assert_eq!(out["totals"]["total_issues"], 1);
    }

    #[test]
    fn test_compose_report_json_includes_warnings() {
        let metrics = sample_metrics();
        let warnings = vec![LoadWarning {
            category: Some(Category::Performance),
            file: "reports/performance-report.json".into(),
            message: "invalid JSON".into(),
        }];
        let out = compose_report_json(&metrics, &warnings);
        assert_eq!(out["warnings"][0]["category"], "performance");
        assert_eq!(out["reports"][0]["by_severity"]["critical"], 1);
    }

    #[test]
    fn test_score_cell_pads_before_colorizing() {
        let metrics = sample_metrics();
        let report = &metrics.reports[0];
        let padded = format!("{:>8}", score_plain(report));
        // Plain cell is exactly the padded width; colorized cell wraps the
        // same padded text, keeping visible columns aligned.
        assert_eq!(score_cell(report, false), padded);
        assert!(score_cell(report, true).contains(&padded));
    }

    #[test]
    fn test_compose_files_json_shape() {
        let files = vec![crate::models::FileResult::from_issues(
            "src/app.js".into(),
            sample_metrics().reports[0].issues.clone(),
        )];
        let mut vc = ViewController::new();
        let view = vc.file_view(Category::LintJs, &files);
        let out = compose_files_json(&view);
        assert_eq!(out["total_items"], 1);
        assert_eq!(out["files"][0]["file_path"], "src/app.js");
        assert_eq!(out["files"][0]["error_count"], 1);
    }

    #[test]
    fn test_compose_issues_json_shape() {
        let metrics = sample_metrics();
        let issues = &metrics.reports[0].issues;
        let mut vc = ViewController::new();
        let view = vc.view(Category::Security, issues);
        let out = compose_issues_json(&view);
        assert_eq!(out["page"], 1);
        assert_eq!(out["total_pages"], 1);
        assert_eq!(out["issues"][0]["severity"], "critical");
        assert_eq!(out["issues"][0]["rule_id"], "sql-injection");
    }
}
