use regex::Regex;
use std::sync::LazyLock;
use url::Url;

use super::{validate, SearchFormState};
use crate::{AdvSearchError, Result};

/// An `OR` with whitespace on both sides. `x-OR-y` and a leading or
/// trailing `OR` are left as typed.
static OR_SPACING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+OR\s+").expect("OR spacing pattern is valid"));

/// Compose the advanced-search query for a form snapshot.
///
/// Clauses are emitted in a fixed order and joined with single spaces:
/// `"phrase" (a OR b) -word from:user since:D until:D filter:links filter:media`.
/// Absent fields are skipped; a blank form yields an empty string. User text
/// is not escaped, and the snapshot is not re-validated here.
pub fn build(state: &SearchFormState) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(8);

    if let Some(phrase) = state.exact_phrase() {
        parts.push(format!("\"{}\"", phrase));
    }
    if let Some(words) = state.any_words() {
        parts.push(format!("({})", OR_SPACING.replace_all(words, " OR ")));
    }
    if let Some(word) = state.exclude_word() {
        parts.push(format!("-{}", word));
    }
    if let Some(user) = state.from_user() {
        parts.push(format!("from:{}", user));
    }
    if let Some(since) = state.since_date {
        parts.push(format!("since:{}", since.format("%Y-%m-%d")));
    }
    if let Some(until) = state.until_date {
        parts.push(format!("until:{}", until.format("%Y-%m-%d")));
    }
    if state.filter_links {
        parts.push("filter:links".to_string());
    }
    if state.filter_media {
        parts.push("filter:media".to_string());
    }

    parts.join(" ")
}

/// Validate, then build. Fails on the first invalid field set or on a blank query.
pub fn build_checked(state: &SearchFormState) -> Result<String> {
    validate(state).into_result()?;
    let query = build(state);
    if query.is_empty() {
        return Err(AdvSearchError::EmptyCriteria);
    }
    Ok(query)
}

/// Search results page for `query` on the site rooted at `base`.
pub fn search_url(base: &Url, query: &str) -> Url {
    let mut url = base.clone();
    url.set_path("/search");
    url.set_fragment(None);
    url.query_pairs_mut()
        .clear()
        .append_pair("q", query)
        .append_pair("src", "typed_query");
    url
}
