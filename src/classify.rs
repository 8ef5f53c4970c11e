//! Severity reclassification into the uniform four-level taxonomy.
//!
//! Producers do not agree on what "error" means: eslint uses numeric
//! levels, stylelint uses "error"/"warning" strings, and the flat-issue
//! producers use "critical"/"high"/"medium"/"low" directly. `classify`
//! folds all of them into one comparable ordering. It is a pure function
//! of `(category, rule_id, raw_severity)`; classifying the same triple
//! twice always yields the same result.

use crate::models::{Category, RawSeverity, Severity};
use regex::Regex;
use std::sync::OnceLock;

/// eslint rules whose error-level hits indicate a security or correctness
/// defect rather than a style preference.
const CRITICAL_JS_RULES: &[&str] = &[
    "no-undef",
    "no-eval",
    "no-implied-eval",
    "no-debugger",
    "no-console",
    "no-alert",
    "no-script-url",
    "no-unsafe-negation",
    "no-dupe-keys",
    "no-unreachable",
    "no-cond-assign",
    "use-isnan",
];

/// stylelint rules whose error-level hits indicate structurally invalid
/// CSS rather than formatting drift.
const CRITICAL_STYLE_RULES: &[&str] = &[
    "declaration-block-no-duplicate-properties",
    "color-no-invalid-hex",
    "unit-no-unknown",
    "property-no-unknown",
    "selector-pseudo-class-no-unknown",
    "selector-type-no-unknown",
    "function-calc-no-unspaced-operator",
    "no-duplicate-selectors",
];

fn cosmetic_js_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            "^(indent|quotes|semi|semi-style|comma-dangle|comma-spacing|comma-style",
            "|space-.*|.*-spacing|.*-spaces|no-trailing-spaces|no-multi-spaces",
            "|eol-last|padded-blocks|brace-style|object-curly-newline|array-bracket-newline)$",
        ))
        .unwrap()
    })
}

fn cosmetic_style_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            "^(indentation|max-line-length|.*-quotes|.*-whitespace.*",
            "|.*-empty-line.*|.*-newline.*|.*-case|number-leading-zero|length-zero-no-unit)$",
        ))
        .unwrap()
    })
}

/// Classify one normalized finding into the four-level taxonomy.
pub fn classify(
    category: Category,
    rule_id: Option<&str>,
    raw: Option<&RawSeverity>,
) -> Severity {
    match category {
        Category::LintJs => classify_lint(rule_id, raw, CRITICAL_JS_RULES, cosmetic_js_re()),
        Category::LintStyle => {
            classify_lint(rule_id, raw, CRITICAL_STYLE_RULES, cosmetic_style_re())
        }
        Category::Security
        | Category::Performance
        | Category::Accessibility
        | Category::PageSpeed
        | Category::Dependency => classify_flat(raw),
    }
}

fn classify_lint(
    rule_id: Option<&str>,
    raw: Option<&RawSeverity>,
    critical_rules: &[&str],
    cosmetic: &Regex,
) -> Severity {
    let rule = rule_id.unwrap_or("");
    match raw {
        Some(r) if r.is_error_level() => {
            if critical_rules.contains(&rule) {
                Severity::Critical
            } else {
                Severity::High
            }
        }
        Some(r) if r.is_warning_level() => {
            if !rule.is_empty() && cosmetic.is_match(rule) {
                Severity::Low
            } else {
                Severity::Medium
            }
        }
        // Unknown or absent level: most conservative middle ground.
        _ => Severity::Medium,
    }
}

fn classify_flat(raw: Option<&RawSeverity>) -> Severity {
    match raw {
        Some(RawSeverity::Text(s)) => s.parse().unwrap_or(Severity::Medium),
        _ => Severity::Medium,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_error_level_splits_on_rule_set() {
        let err = RawSeverity::Level(2);
        assert_eq!(
            classify(Category::LintJs, Some("no-undef"), Some(&err)),
            Severity::Critical
        );
        assert_eq!(
            classify(Category::LintJs, Some("eqeqeq"), Some(&err)),
            Severity::High
        );
    }

    #[test]
    fn test_js_warning_level_splits_on_cosmetic_match() {
        let warn = RawSeverity::Level(1);
        assert_eq!(
            classify(Category::LintJs, Some("indent"), Some(&warn)),
            Severity::Low
        );
        assert_eq!(
            classify(Category::LintJs, Some("keyword-spacing"), Some(&warn)),
            Severity::Low
        );
        assert_eq!(
            classify(Category::LintJs, Some("no-unused-vars"), Some(&warn)),
            Severity::Medium
        );
    }

    #[test]
    fn test_style_error_level_structural_vs_other() {
        let err = RawSeverity::Text("error".into());
        assert_eq!(
            classify(Category::LintStyle, Some("color-no-invalid-hex"), Some(&err)),
            Severity::Critical
        );
        assert_eq!(
            classify(Category::LintStyle, Some("declaration-no-important"), Some(&err)),
            Severity::High
        );
        let warn = RawSeverity::Text("warning".into());
        assert_eq!(
            classify(Category::LintStyle, Some("indentation"), Some(&warn)),
            Severity::Low
        );
        assert_eq!(
            classify(Category::LintStyle, Some("shorthand-property-no-redundant-values"), Some(&warn)),
            Severity::Medium
        );
    }

    #[test]
    fn test_flat_severity_verbatim_or_medium() {
        let high = RawSeverity::Text("high".into());
        assert_eq!(classify(Category::Security, None, Some(&high)), Severity::High);
        let crit = RawSeverity::Text("CRITICAL".into());
        assert_eq!(classify(Category::Dependency, None, Some(&crit)), Severity::Critical);
        let bogus = RawSeverity::Text("blocker".into());
        assert_eq!(classify(Category::Performance, None, Some(&bogus)), Severity::Medium);
        assert_eq!(classify(Category::Accessibility, None, None), Severity::Medium);
    }

    #[test]
    fn test_classify_is_deterministic() {
        let raw = RawSeverity::Level(2);
        let a = classify(Category::LintJs, Some("no-eval"), Some(&raw));
        let b = classify(Category::LintJs, Some("no-eval"), Some(&raw));
        assert_eq!(a, b);
        assert_eq!(a, Severity::Critical);
    }

    #[test]
    fn test_unknown_level_defaults_medium() {
        let off = RawSeverity::Level(0);
        assert_eq!(classify(Category::LintJs, Some("no-undef"), Some(&off)), Severity::Medium);
        assert_eq!(classify(Category::LintJs, None, None), Severity::Medium);
    }
}
