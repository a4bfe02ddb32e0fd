//! Name matching against the catalogue.
//!
//! Two policies exist and stay separate: chat prompts complete by prefix,
//! the search box matches anywhere in the name. Both lower-case the query,
//! sort hits by name and cap the result. Nothing here is fuzzy.

use std::cmp::Ordering;

use crate::catalogue::TechnologyRecord;

/// Suggestions shown at once, in the chat and in the search box.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPolicy {
    /// Name starts with the query (chat autocomplete).
    Prefix,
    /// Name contains the query anywhere (search box).
    Substring,
}

impl MatchPolicy {
    /// `query_lower` must already be lower-cased.
    #[inline]
    pub fn matches(self, name: &str, query_lower: &str) -> bool {
        let name = name.to_lowercase();
        match self {
            MatchPolicy::Prefix => name.starts_with(query_lower),
            MatchPolicy::Substring => name.contains(query_lower),
        }
    }
}

/// Ordering used wherever names are listed: case-insensitive first, then by
/// the raw string so that equal-folding names still sort deterministically.
pub fn collate(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Rank the records of `scope` whose name matches `query` under `policy`.
/// An empty query yields nothing rather than the whole scope.
pub fn suggest<'a, I>(
    query: &str,
    scope: I,
    limit: usize,
    policy: MatchPolicy,
) -> Vec<&'a TechnologyRecord>
where
    I: IntoIterator<Item = &'a TechnologyRecord>,
{
    let query = query.to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    let mut hits: Vec<&TechnologyRecord> = scope
        .into_iter()
        .filter(|r| policy.matches(&r.name, &query))
        .collect();
    hits.sort_by(|a, b| collate(&a.name, &b.name));
    hits.truncate(limit);
    hits
}

/// Sort records in place by name, as the card list and menus show them.
pub fn sort_by_name(records: &mut [&TechnologyRecord]) {
    records.sort_by(|a, b| collate(&a.name, &b.name));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::fixtures::{record, sample};
    use crate::catalogue::{Catalogue, Category};
    use proptest::prelude::*;

    fn names(hits: &[&TechnologyRecord]) -> Vec<String> {
        hits.iter().map(|r| r.name.clone()).collect()
    }

    mod prefix {
        use super::*;

        #[test]
        fn keeps_names_starting_with_query() {
            let catalogue = sample();
            let hits = suggest("ja", catalogue.all(), 5, MatchPolicy::Prefix);
            assert_eq!(names(&hits), vec!["Java", "JavaScript"]);
        }

        #[test]
        fn ignores_inner_matches() {
            let catalogue = sample();
            let hits = suggest("script", catalogue.all(), 5, MatchPolicy::Prefix);
            assert!(hits.is_empty());
        }

        #[test]
        fn query_case_does_not_matter() {
            let catalogue = sample();
            let hits = suggest("PYT", catalogue.all(), 5, MatchPolicy::Prefix);
            assert_eq!(names(&hits), vec!["Python"]);
        }
    }

    mod substring {
        use super::*;

        #[test]
        fn keeps_names_containing_query() {
            let catalogue = sample();
            let hits = suggest("script", catalogue.all(), 5, MatchPolicy::Substring);
            assert_eq!(names(&hits), vec!["JavaScript"]);
        }

        #[test]
        fn results_are_sorted_and_capped() {
            let catalogue = Catalogue::new(
                ["Sass", "Svelte", "Spring", "SQLite", "Swift", "Scala", "Solid"]
                    .iter()
                    .map(|n| record(n, Category::ProgrammingLanguage))
                    .collect(),
            );
            let hits = suggest("s", catalogue.all(), 5, MatchPolicy::Substring);
            assert_eq!(names(&hits), vec!["Sass", "Scala", "Solid", "Spring", "SQLite"]);
        }
    }

    #[test]
    fn empty_query_is_empty() {
        let catalogue = sample();
        assert!(suggest("", catalogue.all(), 5, MatchPolicy::Prefix).is_empty());
        assert!(suggest("", catalogue.all(), 5, MatchPolicy::Substring).is_empty());
    }

    #[test]
    fn no_match_is_empty_not_error() {
        let catalogue = sample();
        assert!(suggest("zig", catalogue.all(), 5, MatchPolicy::Substring).is_empty());
    }

    #[test]
    fn collation_folds_case() {
        assert_eq!(collate("sqlite", "Swift"), Ordering::Less);
        assert_eq!(collate("C", "C#"), Ordering::Less);
        assert_eq!(collate("go", "Go"), Ordering::Greater);
    }

    fn catalogue_strategy() -> impl Strategy<Value = Catalogue> {
        prop::collection::vec("[A-Za-z#+]{1,8}", 1..20).prop_map(|names| {
            Catalogue::new(
                names
                    .iter()
                    .map(|n| record(n, Category::ProgrammingLanguage))
                    .collect(),
            )
        })
    }

    proptest! {
        #[test]
        fn suggestions_respect_policy_order_and_limit(
            catalogue in catalogue_strategy(),
            query in "[A-Za-z]{0,3}",
            limit in 0usize..8,
            prefix in any::<bool>(),
        ) {
            let policy = if prefix { MatchPolicy::Prefix } else { MatchPolicy::Substring };
            let hits = suggest(&query, catalogue.all(), limit, policy);
            let q = query.to_lowercase();

            prop_assert!(hits.len() <= limit);
            for r in &hits {
                prop_assert!(policy.matches(&r.name, &q));
            }
            for pair in hits.windows(2) {
                prop_assert_ne!(collate(&pair[0].name, &pair[1].name), Ordering::Greater);
            }
        }

        #[test]
        fn empty_query_never_suggests(catalogue in catalogue_strategy(), limit in 0usize..8) {
            prop_assert!(suggest("", catalogue.all(), limit, MatchPolicy::Prefix).is_empty());
            prop_assert!(suggest("", catalogue.all(), limit, MatchPolicy::Substring).is_empty());
        }

        #[test]
        fn exact_lookup_ignores_case(catalogue in catalogue_strategy()) {
            for r in catalogue.all() {
                let lower = catalogue.find_by_exact_name(&r.name.to_lowercase());
                let upper = catalogue.find_by_exact_name(&r.name.to_uppercase());
                // Duplicate names differing only by case resolve to the first.
                prop_assert!(lower.is_some());
                prop_assert_eq!(lower.map(|x| x.name.to_lowercase()), Some(r.name.to_lowercase()));
                prop_assert_eq!(lower, upper);
            }
        }
    }
}
