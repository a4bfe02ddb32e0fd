//! Main page search: category filter, card list, search-box suggestions and
//! keyboard navigation over those suggestions.

use tracing::debug;

use crate::catalogue::{Catalogue, Category, TechnologyRecord};
use crate::matcher::{self, MatchPolicy};

/// Active filter button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Filter buttons in display order.
    pub fn buttons() -> Vec<CategoryFilter> {
        std::iter::once(CategoryFilter::All)
            .chain(Category::FILTERABLE.into_iter().map(CategoryFilter::Only))
            .collect()
    }

    pub fn label(self) -> &'static str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Only(category) => category.label(),
        }
    }

    /// Button for a label, matched case-insensitively.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::buttons()
            .into_iter()
            .find(|b| b.label().eq_ignore_ascii_case(label))
    }

    #[inline]
    pub fn admits(self, record: &TechnologyRecord) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => record.category == category,
        }
    }
}

/// What the card grid is currently showing.
#[derive(Debug, Clone, Default)]
pub struct FilterViewState {
    pub category: CategoryFilter,
    pub query: String,
}

impl FilterViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        debug!(category = category.label(), "filter_category_changed");
        self.category = category;
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Cards to render: category match and name substring match, by name.
    /// An empty query keeps the whole category.
    pub fn visible_records<'a>(&self, catalogue: &'a Catalogue) -> Vec<&'a TechnologyRecord> {
        let query = self.query.to_lowercase();
        let mut visible: Vec<&TechnologyRecord> = catalogue
            .all()
            .iter()
            .filter(|r| self.category.admits(r))
            .filter(|r| query.is_empty() || MatchPolicy::Substring.matches(&r.name, &query))
            .collect();
        matcher::sort_by_name(&mut visible);
        visible
    }

    /// Search-box dropdown: substring policy within the active category.
    pub fn suggestions<'a>(&self, catalogue: &'a Catalogue, limit: usize) -> Vec<&'a TechnologyRecord> {
        let category = self.category;
        matcher::suggest(
            &self.query,
            catalogue.all().iter().filter(move |r| category.admits(r)),
            limit,
            MatchPolicy::Substring,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Down,
    Up,
    Enter,
    Escape,
}

/// Outcome of a key press on the suggestion list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorAction {
    None,
    Highlight(usize),
    Select(String),
    Dismiss,
}

/// Highlighted entry in the search-box dropdown.
#[derive(Debug, Clone, Default)]
pub struct SuggestionCursor {
    items: Vec<String>,
    active: Option<usize>,
}

impl SuggestionCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the list. The highlight always starts over.
    pub fn refresh(&mut self, items: Vec<String>) {
        self.items = items;
        self.active = None;
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn clear(&mut self) {
        self.refresh(Vec::new());
    }

    pub fn press(&mut self, key: NavKey) -> CursorAction {
        let n = self.items.len();
        if n == 0 {
            return CursorAction::None;
        }
        match key {
            NavKey::Down => {
                let next = self.active.map_or(0, |i| (i + 1) % n);
                self.active = Some(next);
                CursorAction::Highlight(next)
            }
            NavKey::Up => {
                let next = self.active.map_or(n - 1, |i| (i + n - 1) % n);
                self.active = Some(next);
                CursorAction::Highlight(next)
            }
            NavKey::Enter => {
                let chosen = self.items[self.active.unwrap_or(0)].clone();
                self.clear();
                CursorAction::Select(chosen)
            }
            NavKey::Escape => {
                self.clear();
                CursorAction::Dismiss
            }
        }
    }
}
