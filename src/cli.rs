//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "scorecard",
    version,
    about = "Audit report aggregation & scoring",
    long_about = "Scorecard — aggregate heterogeneous JSON audit reports (lint, security, performance, accessibility, page-speed, dependencies) into normalized issues and composite 0-100 health scores.\n\nConfiguration precedence: CLI > scorecard.toml > defaults.",
    after_help = "Examples:\n  scorecard report --reports-dir reports\n  scorecard scores --output json\n  scorecard issues --category security --search users --sort critical --page 2",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands for reporting, scoring, and issue views.
pub enum Commands {
    /// Show version
    #[command(
        about = "Show version",
        long_about = "Print the current scorecard version."
    )]
    Version,
    /// Aggregate all report artifacts into scored category reports
    #[command(
        about = "Run the full aggregation pipeline",
        long_about = "Probe, load, normalize, classify, and score every category's report artifact. Missing or broken artifacts degrade to per-category defaults; critical findings drive a non-zero exit for CI gating.",
        after_help = "Examples:\n  scorecard report\n  scorecard report --reports-dir audit/reports --output json\n  scorecard report --category security"
    )]
    Report {
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Directory holding report artifacts (default: reports)")]
        reports_dir: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, help = "Limit output to one category (e.g. security, lint-js)")]
        category: Option<String>,
    },
    /// Composite health scores only
    #[command(
        about = "Print composite scores",
        long_about = "Print the 0-100 health score per category plus the totals rollup, without issue listings.",
        after_help = "Examples:\n  scorecard scores\n  scorecard scores --output json"
    )]
    Scores {
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Directory holding report artifacts (default: reports)")]
        reports_dir: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
    /// Filterable, sortable, paginated issue view for one category
    #[command(
        about = "Browse one category's issues",
        long_about = "Render one page of a category's normalized issue list. Search is a case-insensitive substring match over file path (or message for URL-based findings); sorting orders by severity with the selected level pinned first.",
        after_help = "Examples:\n  scorecard issues --category lint-js --search src/app\n  scorecard issues --category security --sort critical --page 2 --page-size 25"
    )]
    Issues {
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Directory holding report artifacts (default: reports)")]
        reports_dir: Option<String>,
        #[arg(long, help = "Category to browse (required)")]
        category: String,
        #[arg(long, help = "Case-insensitive substring filter")]
        search: Option<String>,
        #[arg(long, help = "Severity to sort by and pin first: critical|high|medium|low")]
        sort: Option<String>,
        #[arg(long, help = "1-based page number (clamped to the valid range)")]
        page: Option<usize>,
        #[arg(long, help = "Page size: 10|25|50|100")]
        page_size: Option<usize>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
}
