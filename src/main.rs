//! Scorecard CLI binary entry point.
//! Delegates to modules for report/scores/issues and prints results.

mod classify;
mod cli;
mod config;
mod loader;
mod models;
mod normalize;
mod output;
mod query;
mod score;
mod utils;

use clap::Parser;
use cli::{Cli, Commands};
use models::{Category, Severity};
use query::ViewController;
use std::path::Path;

fn require_reports_dir(dir: &Path) {
    if !dir.is_dir() {
        eprintln!(
            "{} {}",
            utils::error_prefix(),
            format!(
                "Reports directory not found: {} (pass --reports-dir or configure scorecard.toml)",
                dir.to_string_lossy()
            )
        );
        std::process::exit(2);
    }
}

fn note_missing_config(root: &Path) {
    if config::load_config(root).is_none() {
        eprintln!(
            "{} {}",
            utils::note_prefix(),
            "No scorecard.toml found; using defaults."
        );
    }
}

fn parse_category(s: &str) -> Category {
    match s.parse::<Category>() {
        Ok(c) => c,
        Err(e) => {
            eprintln!(
                "{} {}",
                utils::error_prefix(),
                format!("{} (expected one of: {})", e, category_names())
            );
            std::process::exit(2);
        }
    }
}

fn category_names() -> String {
    Category::ALL
        .iter()
        .map(|c| c.name())
        .collect::<Vec<_>>()
        .join(", ")
}

fn main() {
    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Report {
            repo_root,
            reports_dir,
            output,
            category,
        } => {
            let eff = config::resolve_effective(
                repo_root.as_deref(),
                reports_dir.as_deref(),
                output.as_deref(),
                None,
            );
            note_missing_config(&eff.repo_root);
            require_reports_dir(&eff.reports_dir);
            let only = category.as_deref().map(parse_category);
            let (metrics, warnings) = score::run_report(&eff.reports_dir);
            output::print_report(&metrics, &eff.output, &warnings, &eff.repo_root, only);
            // CI gate: critical findings fail the run. With --category the
            // gate follows the filter instead of the whole-run totals.
            if metrics.critical_count(only) > 0 {
                std::process::exit(1);
            }
        }
        Commands::Scores {
            repo_root,
            reports_dir,
            output,
        } => {
            let eff = config::resolve_effective(
                repo_root.as_deref(),
                reports_dir.as_deref(),
                output.as_deref(),
                None,
            );
            note_missing_config(&eff.repo_root);
            require_reports_dir(&eff.reports_dir);
            let (metrics, warnings) = score::run_report(&eff.reports_dir);
            output::print_scores(&metrics, &eff.output, &warnings);
        }
        Commands::Issues {
            repo_root,
            reports_dir,
            category,
            search,
            sort,
            page,
            page_size,
            output,
        } => {
            let eff = config::resolve_effective(
                repo_root.as_deref(),
                reports_dir.as_deref(),
                output.as_deref(),
                page_size,
            );
            note_missing_config(&eff.repo_root);
            require_reports_dir(&eff.reports_dir);
            let category = parse_category(&category);
            let sort = sort.as_deref().map(|s| match s.parse::<Severity>() {
                Ok(sev) => sev,
                Err(e) => {
                    eprintln!("{} {}", utils::error_prefix(), e);
                    std::process::exit(2);
                }
            });

            let (metrics, warnings) = score::run_report(&eff.reports_dir);
            for w in &warnings {
                eprintln!("{} {}: {}", utils::note_prefix(), w.file, w.message);
            }
            let mut vc = ViewController::new();
            vc.set_page_size(category, eff.page_size);
            if let Some(term) = search.as_deref() {
                vc.set_search(category, term);
            }
            vc.set_sort(category, sort);
            if let Some(n) = page {
                vc.set_page(category, n);
            }

            // Lint categories page through file groups; everything else
            // pages through the flat issue list.
            if category.is_lint() {
                let files: &[models::FileResult] = metrics
                    .report(category)
                    .map(|r| r.files.as_slice())
                    .unwrap_or(&[]);
                let view = vc.file_view(category, files);
                output::print_files(&view, &eff.output, &eff.repo_root);
            } else {
                let issues: &[models::Issue] = metrics
                    .report(category)
                    .map(|r| r.issues.as_slice())
                    .unwrap_or(&[]);
                let view = vc.view(category, issues);
                output::print_issues(&view, &eff.output, &eff.repo_root);
            }
        }
    }
}
