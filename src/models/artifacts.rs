//! Raw producer schemas, one per artifact kind.
//!
//! These are Deserialize-only mirrors of what the external scanners emit.
//! Every field the pipeline does not strictly need is optional or
//! defaulted: producers add and drop fields freely, and a partially
//! recognizable artifact must still normalize instead of erroring.

use crate::models::RawSeverity;
use serde::Deserialize;
use serde_json::Value as Json;
use std::collections::HashMap;

/// One per-file entry from a lint-style producer (eslint/stylelint share
/// the shape; stylelint uses `rule` and string severities).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LintFileEntry {
    #[serde(default, alias = "filePath", alias = "source")]
    pub file_path: String,
    /// Producer-supplied counts; display-only, never read back after
    /// normalization.
    #[serde(default, alias = "errorCount")]
    pub error_count: Option<usize>,
    #[serde(default, alias = "warningCount")]
    pub warning_count: Option<usize>,
    #[serde(default, alias = "warnings")]
    pub messages: Vec<LintMessage>,
}

/// One lint message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LintMessage {
    #[serde(default)]
    pub line: Option<u32>,
    #[serde(default)]
    pub column: Option<u32>,
    #[serde(default, alias = "ruleId", alias = "rule")]
    pub rule_id: Option<String>,
    #[serde(default)]
    pub severity: Option<RawSeverity>,
    #[serde(default, alias = "text")]
    pub message: String,
    #[serde(default)]
    pub suggestions: Vec<LintSuggestion>,
    #[serde(default)]
    pub fix: Option<Json>,
    #[serde(default, alias = "endLine")]
    pub end_line: Option<u32>,
    #[serde(default, alias = "endColumn")]
    pub end_column: Option<u32>,
}

/// eslint emits suggestion objects with a `desc`; some producers emit
/// plain strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LintSuggestion {
    Text(String),
    Desc {
        desc: String,
    },
    Message {
        #[serde(alias = "messageId")]
        message: String,
    },
}

impl LintSuggestion {
    pub fn text(&self) -> &str {
        match self {
            LintSuggestion::Text(s) => s,
            LintSuggestion::Desc { desc } => desc,
            LintSuggestion::Message { message } => message,
        }
    }
}

/// One element of a flat-issue artifact (security, performance,
/// accessibility, dependency, and page-speed per-device issue lists).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlatIssue {
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub line: Option<u32>,
    #[serde(default)]
    pub column: Option<u32>,
    #[serde(default, alias = "description")]
    pub message: String,
    #[serde(default, alias = "suggestion")]
    pub recommendation: Option<String>,
    #[serde(default, alias = "snippet")]
    pub code: Option<String>,
}

/// One page-speed target: a tested URL with per-device sub-reports.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPageSpeedTarget {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub desktop: Option<RawDeviceReport>,
    #[serde(default)]
    pub mobile: Option<RawDeviceReport>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDeviceReport {
    #[serde(default)]
    pub performance: Option<f64>,
    #[serde(default)]
    pub accessibility: Option<f64>,
    #[serde(default, alias = "bestPractices", alias = "best-practices")]
    pub best_practices: Option<f64>,
    #[serde(default)]
    pub seo: Option<f64>,
    #[serde(default)]
    pub issues: Vec<FlatIssue>,
    #[serde(default, alias = "coreWebVitals")]
    pub core_web_vitals: Option<RawCoreWebVitals>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCoreWebVitals {
    #[serde(default, alias = "largestContentfulPaint", alias = "lcp")]
    pub largest_contentful_paint: Option<RawWebVital>,
    #[serde(default, alias = "totalBlockingTime", alias = "tbt")]
    pub total_blocking_time: Option<RawWebVital>,
    #[serde(default, alias = "cumulativeLayoutShift", alias = "cls")]
    pub cumulative_layout_shift: Option<RawWebVital>,
    #[serde(default, alias = "firstContentfulPaint", alias = "fcp")]
    pub first_contentful_paint: Option<RawWebVital>,
    #[serde(default, alias = "interactionToNextPaint", alias = "inp")]
    pub interaction_to_next_paint: Option<RawWebVital>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawWebVital {
    #[serde(default)]
    pub value: f64,
    #[serde(default)]
    pub unit: Option<String>,
    /// 0–1 rating; display-only.
    #[serde(default)]
    pub score: Option<f64>,
}

/// The optional comprehensive-summary artifact. Per-category counts and
/// dashboard scores computed by a separate, more expensive upstream pass;
/// they take total precedence over local recomputation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryArtifact {
    #[serde(default)]
    pub categories: HashMap<String, SummaryCategory>,
    #[serde(default)]
    pub summary: Option<Json>,
    #[serde(default)]
    pub dashboard: Option<DashboardScores>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryCategory {
    #[serde(default, alias = "totalIssues")]
    pub total_issues: usize,
    #[serde(default, alias = "highSeverity")]
    pub high_severity: usize,
    #[serde(default, alias = "mediumSeverity")]
    pub medium_severity: usize,
    #[serde(default, alias = "lowSeverity")]
    pub low_severity: usize,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardScores {
    #[serde(default, alias = "securityScore")]
    pub security_score: Option<f64>,
    #[serde(default, alias = "codePerformanceScore")]
    pub code_performance_score: Option<f64>,
    #[serde(default, alias = "runtimePerformanceScore")]
    pub runtime_performance_score: Option<f64>,
    #[serde(default, alias = "accessibilityScore")]
    pub accessibility_score: Option<f64>,
}

/// The optional exclusion-config artifact: per-category rule hiding.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExcludeArtifact {
    #[serde(default, alias = "excludeRules")]
    pub exclude_rules: HashMap<String, ExcludeEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExcludeEntry {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// When true, `additional_rules` replaces the built-in default list
    /// instead of extending it.
    #[serde(default, alias = "overrideDefault")]
    pub override_default: bool,
    #[serde(default, alias = "additionalRules")]
    pub additional_rules: Vec<String>,
}

impl Default for ExcludeEntry {
    fn default() -> Self {
        ExcludeEntry {
            enabled: true,
            override_default: false,
            additional_rules: Vec::new(),
        }
    }
}

fn default_true() -> bool {
    true
}
