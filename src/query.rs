//! Live search/sort/pagination views over normalized issue collections.
//!
//! One `ViewState` per category, owned by a single `ViewController` and
//! mutated only through its operations; interacting with one category's
//! view never perturbs another's. Every operation is a synchronous pure
//! function of the prior state plus one input. A monotonic sequence
//! number per state guards against a stale recomputation overwriting a
//! newer one ("only the latest search term's results are ever shown").

use crate::models::{Category, FileResult, Issue, Severity};
use std::collections::HashMap;

/// One computed page of a lint category's file-grouped view.
#[derive(Debug, Clone)]
pub struct FilePageView {
    pub items: Vec<FileResult>,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub seq: u64,
}

/// Allowed page sizes.
pub const PAGE_SIZES: [usize; 4] = [10, 25, 50, 100];

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Search/sort/pagination state for one category's issue list.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub search_term: String,
    /// When set, the filtered list is stable-sorted by severity rank and
    /// this level is pinned to the front.
    pub sort_severity: Option<Severity>,
    /// 1-based.
    pub page: usize,
    pub page_size: usize,
    /// Monotonic request counter; bumped on every search change.
    pub seq: u64,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            search_term: String::new(),
            sort_severity: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            seq: 0,
        }
    }
}

/// One computed page of a category's filtered issue list.
#[derive(Debug, Clone)]
pub struct PageView<'a> {
    pub items: Vec<&'a Issue>,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    /// The state seq this view was computed for; `ViewController::
    /// is_current` rejects it once a newer search has been issued.
    pub seq: u64,
}

/// Owns every category's `ViewState`. No ambient globals; callers hold
/// the controller and pass it to whatever needs it.
#[derive(Debug, Default)]
pub struct ViewController {
    states: HashMap<Category, ViewState>,
}

impl ViewController {
    pub fn new() -> Self {
        Self::default()
    }

    /// The state for a category, created with defaults on first use.
    pub fn state(&mut self, category: Category) -> &ViewState {
        self.states.entry(category).or_default()
    }

    fn state_mut(&mut self, category: Category) -> &mut ViewState {
        self.states.entry(category).or_default()
    }

    /// Replace the search term; resets to page 1 and bumps the request
    /// counter so in-flight older recomputations become stale.
    pub fn set_search(&mut self, category: Category, term: &str) -> u64 {
        let st = self.state_mut(category);
        st.search_term = term.to_string();
        st.page = 1;
        st.seq += 1;
        st.seq
    }

    /// Enable or disable severity sorting.
    pub fn set_sort(&mut self, category: Category, severity: Option<Severity>) {
        self.state_mut(category).sort_severity = severity;
    }

    /// Request a page; the effective value is clamped to the current
    /// filtered set when the view is computed.
    pub fn set_page(&mut self, category: Category, page: usize) {
        self.state_mut(category).page = page.max(1);
    }

    /// Change the page size. Values outside the allowed set are ignored.
    pub fn set_page_size(&mut self, category: Category, size: usize) {
        if PAGE_SIZES.contains(&size) {
            let st = self.state_mut(category);
            st.page_size = size;
        }
    }

    /// True when `seq` still identifies the latest search request for the
    /// category; stale completions must be discarded by the caller.
    pub fn is_current(&self, category: Category, seq: u64) -> bool {
        self.states.get(&category).map(|s| s.seq).unwrap_or(0) == seq
    }

    /// Compute the visible page for a category over its issue collection.
    /// Also clamps the stored page into the valid range so subsequent
    /// operations observe the effective value.
    pub fn view<'a>(&mut self, category: Category, issues: &'a [Issue]) -> PageView<'a> {
        let st = self.state_mut(category);
        let filtered = filter_issues(issues, &st.search_term);
        let sorted = sort_issues(filtered, st.sort_severity);

        let total_items = sorted.len();
        let total_pages = total_items.div_ceil(st.page_size);
        st.page = st.page.clamp(1, total_pages.max(1));

        let start = (st.page - 1) * st.page_size;
        let items = if start >= total_items {
            Vec::new()
        } else {
            sorted[start..(start + st.page_size).min(total_items)].to_vec()
        };
        PageView {
            items,
            page: st.page,
            total_pages,
            total_items,
            seq: st.seq,
        }
    }

    /// Compute the visible page for a lint category over its file-grouped
    /// results. Pagination counts files, not issues; severity sorting is
    /// an issue-level concern and does not reorder files.
    pub fn file_view(&mut self, category: Category, files: &[FileResult]) -> FilePageView {
        let st = self.state_mut(category);
        let filtered = filter_files(files, &st.search_term);

        let total_items = filtered.len();
        let total_pages = total_items.div_ceil(st.page_size);
        st.page = st.page.clamp(1, total_pages.max(1));

        let start = (st.page - 1) * st.page_size;
        let items: Vec<FileResult> = filtered.into_iter().skip(start).take(st.page_size).collect();
        FilePageView {
            items,
            page: st.page,
            total_pages,
            total_items,
            seq: st.seq,
        }
    }
}

/// Case-insensitive substring filter over file path (or message text for
/// flat-issue categories, where the haystack falls back to the message).
pub fn filter_issues<'a>(issues: &'a [Issue], term: &str) -> Vec<&'a Issue> {
    if term.is_empty() {
        return issues.iter().collect();
    }
    let needle = term.to_lowercase();
    issues
        .iter()
        .filter(|i| i.search_haystack().to_lowercase().contains(&needle))
        .collect()
}

/// Stable-sort by severity rank; when a specific level is selected it is
/// additionally pinned to the front. Ties keep original relative order.
fn sort_issues(mut issues: Vec<&Issue>, pinned: Option<Severity>) -> Vec<&Issue> {
    if let Some(pin) = pinned {
        issues.sort_by_key(|i| (i.severity != pin, i.severity.rank()));
    }
    issues
}

/// Filter file results by search term. A file whose path matches is kept
/// whole; otherwise only its issues with a matching message survive, and
/// the file is dropped when none do. Counts are recomputed from the
/// surviving issue set.
pub fn filter_files(files: &[FileResult], term: &str) -> Vec<FileResult> {
    if term.is_empty() {
        return files.to_vec();
    }
    let needle = term.to_lowercase();
    let mut kept = Vec::new();
    for f in files {
        if f.file_path.to_lowercase().contains(&needle) {
            kept.push(f.clone());
            continue;
        }
        let issues: Vec<Issue> = f
            .issues
            .iter()
            .filter(|i| i.message.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        if !issues.is_empty() {
            kept.push(FileResult::from_issues(f.file_path.clone(), issues));
        }
    }
    kept
}
