//! Title search: exact match first, otherwise substring matches.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    /// The title equal to the query, if any
    pub exact_match: Option<String>,
    /// Titles containing the query, in input order. Empty when `exact_match` is set.
    pub substring_matches: Vec<String>,
}

impl SearchResult {
    /// True when nothing matched at all
    pub fn is_empty(&self) -> bool {
        self.exact_match.is_none() && self.substring_matches.is_empty()
    }
}

/// Search `titles` for `query`.
///
/// The exact match is case-sensitive. Substring matching ignores case, so
/// "py" finds "Python". The written search contract calls substring matching
/// case-sensitive while its own example needs "py" to find "Python"; the two
/// conflict, and matching follows the example.
pub fn find<S: AsRef<str>>(query: &str, titles: &[S]) -> SearchResult {
    if let Some(exact) = titles.iter().find(|t| t.as_ref() == query) {
        return SearchResult {
            exact_match: Some(exact.as_ref().to_string()),
            substring_matches: Vec::new(),
        };
    }

    if query.is_empty() {
        return SearchResult::default();
    }

    let needle = query.to_lowercase();
    let substring_matches = titles
        .iter()
        .map(AsRef::as_ref)
        .filter(|t| t.to_lowercase().contains(&needle))
        .map(str::to_string)
        .collect();

    SearchResult {
        exact_match: None,
        substring_matches,
    }
}
