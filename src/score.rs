//! Composite 0–100 health scores per category.
//!
//! The local formula starts at 100 and applies a severity-weighted
//! deduction per issue, clamping to [0, 100] after every step so an
//! artificially large issue count can never drive the running total
//! negative. When the comprehensive-summary artifact carries a score or
//! counts for a category, those take total precedence over the local
//! recomputation; the override is never blended.

use crate::loader::{load_all, ArtifactSet, LoadWarning};
use crate::models::artifacts::SummaryArtifact;
use crate::models::{
    Category, CategoryReport, CompositeMetrics, Issue, ScoreSource, Severity, SeverityCounts,
    Totals,
};
use crate::normalize::{excluded_rules, normalize, Normalized};
use std::path::Path;

/// Deduction applied per issue of a given severity, on top of the flat
/// per-issue deduction.
fn severity_weight(sev: Severity) -> f64 {
    match sev {
        Severity::Critical => 15.0,
        Severity::High => 8.0,
        Severity::Medium => 3.0,
        Severity::Low => 1.0,
    }
}

const FLAT_DEDUCTION: f64 = 0.5;

/// Score a set of issues with the local deduction formula.
pub fn score_issues(issues: &[Issue]) -> f64 {
    let mut score = 100.0f64;
    for issue in issues {
        score = (score - severity_weight(issue.severity) - FLAT_DEDUCTION).clamp(0.0, 100.0);
    }
    score
}

/// Page-speed pass-through: the producer's own 0–100 performance
/// sub-score, averaged over whichever devices are present. `None` when no
/// device carried one.
fn pagespeed_score(norm: &Normalized) -> Option<f64> {
    let mut sum = 0.0;
    let mut n = 0usize;
    for page in &norm.pages {
        for device in [&page.desktop, &page.mobile].into_iter().flatten() {
            if let Some(p) = device.performance {
                sum += p;
                n += 1;
            }
        }
    }
    if n == 0 {
        None
    } else {
        Some(((sum / n as f64) * 10.0).round() / 10.0)
    }
}

/// Precomputed dashboard score for a category, when the summary artifact
/// carries one.
fn summary_score(summary: &SummaryArtifact, category: Category) -> Option<f64> {
    let dash = summary.dashboard.as_ref()?;
    match category {
        Category::Security => dash.security_score,
        Category::Performance => dash.code_performance_score,
        Category::PageSpeed => dash.runtime_performance_score,
        Category::Accessibility => dash.accessibility_score,
        _ => None,
    }
}

/// Build one scored report for a category from its normalized output.
pub fn score_category(
    category: Category,
    norm: Normalized,
    artifact_present: bool,
    summary: Option<&SummaryArtifact>,
) -> CategoryReport {
    let mut total_issues = norm.issues.len();
    let mut by_severity = SeverityCounts::tally(&norm.issues);

    // Summary counts take precedence over the local tally (Scenario C):
    // the upstream pass may have seen artifacts this run did not.
    let summary_entry = summary.and_then(|s| s.categories.get(category.name()));
    if let Some(entry) = summary_entry {
        total_issues = entry.total_issues;
        by_severity = SeverityCounts {
            critical: 0,
            high: entry.high_severity,
            medium: entry.medium_severity,
            low: entry.low_severity,
        };
    }

    let precomputed = summary.and_then(|s| summary_score(s, category));
    let (score, score_source) = if let Some(s) = precomputed {
        (Some(s.clamp(0.0, 100.0)), ScoreSource::PrecomputedSummary)
    } else if category == Category::PageSpeed {
        if artifact_present {
            (pagespeed_score(&norm), ScoreSource::Computed)
        } else if summary_entry.is_some() {
            (Some(100.0), ScoreSource::Computed)
        } else {
            (Some(100.0), ScoreSource::Default)
        }
    } else if artifact_present || summary_entry.is_some() {
        (Some(score_issues(&norm.issues)), ScoreSource::Computed)
    } else {
        // Absence of evidence is not evidence of problems, but it must be
        // distinguishable from a verified-clean 100.
        (Some(100.0), ScoreSource::Default)
    };

    CategoryReport {
        category,
        total_issues,
        by_severity,
        score,
        score_source,
        issues: norm.issues,
        files: norm.files,
        pages: norm.pages,
        artifact_present,
    }
}

/// Normalize, classify, and score every category from a loaded artifact
/// set.
pub fn compose(set: &ArtifactSet) -> CompositeMetrics {
    let mut reports = Vec::with_capacity(Category::ALL.len());
    for category in Category::ALL {
        let excludes = excluded_rules(set.exclude.as_ref(), category);
        let norm = match set.get(category) {
            Some(value) => normalize(category, value, &excludes),
            None => Normalized::default(),
        };
        reports.push(score_category(
            category,
            norm,
            set.present(category),
            set.summary.as_ref(),
        ));
    }

    let mut totals = Totals::default();
    for report in &reports {
        totals.total_issues += report.total_issues;
        totals.by_severity.merge(&report.by_severity);
        if report.artifact_present {
            totals.categories_with_data += 1;
        }
    }

    CompositeMetrics { reports, totals }
}

/// Full pipeline for a reports directory: probe, load, normalize,
/// classify, score. Warnings are recoverable diagnostics only.
pub fn run_report(reports_dir: &Path) -> (CompositeMetrics, Vec<LoadWarning>) {
    let (set, warnings) = load_all(reports_dir);
    (compose(&set), warnings)
}
