//! Shared data models for the normalized audit report pipeline.
//!
//! Raw producer schemas live in `artifacts`; everything downstream of the
//! normalizer works with the canonical types here.

pub mod artifacts;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One audit domain. Closed set; all dispatch is by enum, never by
/// free-form string lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    LintJs,
    LintStyle,
    Security,
    Performance,
    Accessibility,
    PageSpeed,
    Dependency,
}

impl Category {
    /// Every category, in canonical display order.
    pub const ALL: [Category; 7] = [
        Category::LintJs,
        Category::LintStyle,
        Category::Security,
        Category::Performance,
        Category::Accessibility,
        Category::PageSpeed,
        Category::Dependency,
    ];

    /// Kebab-case name used in config keys, JSON output, and CLI flags.
    pub fn name(&self) -> &'static str {
        match self {
            Category::LintJs => "lint-js",
            Category::LintStyle => "lint-style",
            Category::Security => "security",
            Category::Performance => "performance",
            Category::Accessibility => "accessibility",
            Category::PageSpeed => "page-speed",
            Category::Dependency => "dependency",
        }
    }

    /// Human label for report headings.
    pub fn label(&self) -> &'static str {
        match self {
            Category::LintJs => "JS Lint",
            Category::LintStyle => "Style Lint",
            Category::Security => "Security",
            Category::Performance => "Performance",
            Category::Accessibility => "Accessibility",
            Category::PageSpeed => "Page Speed",
            Category::Dependency => "Dependencies",
        }
    }

    /// True for producers that report per-file result lists with messages.
    pub fn is_lint(&self) -> bool {
        matches!(self, Category::LintJs | Category::LintStyle)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.name() == key)
            .ok_or_else(|| format!("unknown category '{}'", s))
    }
}

/// Normalized four-level severity. Variant order doubles as sort order:
/// `Critical` ranks first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }

    /// Rank for sorting; lower is more severe.
    pub fn rank(&self) -> u8 {
        match self {
            Severity::Critical => 0,
            Severity::High => 1,
            Severity::Medium => 2,
            Severity::Low => 3,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "critical" => Ok(Severity::Critical),
            "high" => Ok(Severity::High),
            "medium" => Ok(Severity::Medium),
            "low" => Ok(Severity::Low),
            _ => Err(format!("unknown severity '{}'", s)),
        }
    }
}

/// Producer-native severity value, preserved unchanged for traceability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawSeverity {
    /// Numeric level (eslint: 0 off, 1 warn, 2 error).
    Level(i64),
    /// Free-form string ("error", "warning", "critical", ...).
    Text(String),
}

impl RawSeverity {
    /// True for the producer's error level, whichever encoding it uses.
    pub fn is_error_level(&self) -> bool {
        match self {
            RawSeverity::Level(n) => *n >= 2,
            RawSeverity::Text(s) => s.eq_ignore_ascii_case("error"),
        }
    }

    /// True for the producer's warning level.
    pub fn is_warning_level(&self) -> bool {
        match self {
            RawSeverity::Level(n) => *n == 1,
            RawSeverity::Text(s) => {
                s.eq_ignore_ascii_case("warning") || s.eq_ignore_ascii_case("warn")
            }
        }
    }
}

/// One normalized finding.
#[derive(Debug, Clone, Serialize)]
pub struct Issue {
    pub category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_severity: Option<RawSeverity>,
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl Issue {
    /// Location string used by search matching: the file path when
    /// present, otherwise the message.
    pub fn search_haystack(&self) -> &str {
        self.file.as_deref().unwrap_or(&self.message)
    }
}

/// Issues grouped by originating file, for lint-style categories.
///
/// `error_count`/`warning_count` are always recomputed from `issues`;
/// producer-supplied counts are display-only history and never read back.
#[derive(Debug, Clone, Serialize)]
pub struct FileResult {
    pub file_path: String,
    pub error_count: usize,
    pub warning_count: usize,
    pub issues: Vec<Issue>,
}

impl FileResult {
    /// Build a file result, deriving counts from the issue list.
    pub fn from_issues(file_path: String, issues: Vec<Issue>) -> Self {
        let mut fr = FileResult {
            file_path,
            error_count: 0,
            warning_count: 0,
            issues,
        };
        fr.recount();
        fr
    }

    /// Recompute counts from the current issue set. Critical/high map to
    /// the error column, medium/low to the warning column.
    pub fn recount(&mut self) {
        self.error_count = self
            .issues
            .iter()
            .filter(|i| matches!(i.severity, Severity::Critical | Severity::High))
            .count();
        self.warning_count = self.issues.len() - self.error_count;
    }
}

/// Count of issues per severity level.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct SeverityCounts {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl SeverityCounts {
    pub fn tally(issues: &[Issue]) -> Self {
        let mut c = SeverityCounts::default();
        for i in issues {
            c.add(i.severity);
        }
        c
    }

    pub fn add(&mut self, sev: Severity) {
        match sev {
            Severity::Critical => self.critical += 1,
            Severity::High => self.high += 1,
            Severity::Medium => self.medium += 1,
            Severity::Low => self.low += 1,
        }
    }

    pub fn get(&self, sev: Severity) -> usize {
        match sev {
            Severity::Critical => self.critical,
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
        }
    }

    pub fn total(&self) -> usize {
        self.critical + self.high + self.medium + self.low
    }

    pub fn merge(&mut self, other: &SeverityCounts) {
        self.critical += other.critical;
        self.high += other.high;
        self.medium += other.medium;
        self.low += other.low;
    }
}

/// Where a category's score came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoreSource {
    /// Deduction formula over locally normalized issues.
    Computed,
    /// Overridden by the comprehensive-summary artifact.
    PrecomputedSummary,
    /// No artifact and no summary entry; 100 by absence, not by evidence.
    Default,
}

/// Scored report for one category.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryReport {
    pub category: Category,
    pub total_issues: usize,
    pub by_severity: SeverityCounts,
    /// 0–100; `None` only when the category is uncomputable (page-speed
    /// artifact present but carrying no performance sub-score).
    pub score: Option<f64>,
    pub score_source: ScoreSource,
    pub issues: Vec<Issue>,
    /// Per-file grouping, populated for lint-style categories only.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<FileResult>,
    /// Page-speed targets, populated for the page-speed category only.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pages: Vec<PageSpeedTarget>,
    /// True when the artifact existed (even if it normalized to nothing).
    pub artifact_present: bool,
}

/// Whole-project snapshot: one report per category plus a totals rollup.
#[derive(Debug, Clone, Serialize)]
pub struct CompositeMetrics {
    pub reports: Vec<CategoryReport>,
    pub totals: Totals,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Totals {
    pub total_issues: usize,
    pub by_severity: SeverityCounts,
    pub categories_with_data: usize,
}

impl CompositeMetrics {
    pub fn report(&self, category: Category) -> Option<&CategoryReport> {
        self.reports.iter().find(|r| r.category == category)
    }

    /// Critical findings relevant to the CI gate: the whole run, or a
    /// single category when viewing is narrowed to one.
    pub fn critical_count(&self, only: Option<Category>) -> usize {
        match only {
            Some(c) => self
                .report(c)
                .map(|r| r.by_severity.critical)
                .unwrap_or(0),
            None => self.totals.by_severity.critical,
        }
    }
}

/// Normalized page-speed target (one tested URL).
#[derive(Debug, Clone, Serialize)]
pub struct PageSpeedTarget {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desktop: Option<DeviceReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<DeviceReport>,
}

/// Per-device page-speed sub-scores plus optional core web vitals.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accessibility: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_practices: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub core_web_vitals: Option<CoreWebVitals>,
}

/// Named core-web-vitals metrics. Each metric's 0–1 producer score is
/// display-only and never rolled into the composite score.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CoreWebVitals {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub largest_contentful_paint: Option<WebVitalMetric>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_blocking_time: Option<WebVitalMetric>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cumulative_layout_shift: Option<WebVitalMetric>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_contentful_paint: Option<WebVitalMetric>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interaction_to_next_paint: Option<WebVitalMetric>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WebVitalMetric {
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Producer's 0–1 rating, used only for color-coding.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}
