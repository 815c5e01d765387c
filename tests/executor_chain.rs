//! Executor behaviour with caller-supplied strategies

use advsearch::executor::{ManualCopy, ShowSearchLink};
use advsearch::{
    build_checked, Action, AdvSearchError, Outcome, SearchExecutor, SearchFormState, Strategy,
    StrategyChain,
};
use url::Url;

struct Unavailable(&'static str);

impl Strategy for Unavailable {
    fn name(&self) -> &'static str {
        self.0
    }

    fn attempt(&mut self, _query: &str) -> advsearch::Result<Outcome> {
        Err(AdvSearchError::Navigation(format!("{} not available", self.0)))
    }
}

fn executor() -> SearchExecutor {
    let base = Url::parse("https://twitter.com").unwrap();
    SearchExecutor::new(
        StrategyChain::new(Action::Search)
            .with(Unavailable("native-input"))
            .with(ShowSearchLink::new(base)),
        StrategyChain::new(Action::Copy)
            .with(Unavailable("clipboard"))
            .with(ManualCopy),
    )
}

#[test]
fn search_falls_back_to_link() {
    let state = SearchFormState {
        any_words: "apple OR google".into(),
        ..Default::default()
    };
    let query = build_checked(&state).unwrap();

    let outcome = executor().search(&query).unwrap();
    assert_eq!(outcome.strategy, "link");
    assert_eq!(
        outcome.manual_text.as_deref(),
        Some("https://twitter.com/search?q=%28apple+OR+google%29&src=typed_query")
    );
}

#[test]
fn copy_falls_back_to_manual() {
    let outcome = executor().copy("from:x filter:links").unwrap();
    assert_eq!(outcome.strategy, "manual");
    assert_eq!(outcome.manual_text.as_deref(), Some("from:x filter:links"));
}

#[test]
fn empty_query_is_refused() {
    let mut executor = executor();
    let err = executor.search("").unwrap_err();
    assert!(matches!(err, AdvSearchError::EmptyCriteria));
    assert!(err.is_recoverable());
    assert_eq!(err.to_string(), "Please enter search criteria");
}

#[test]
fn chain_with_only_failures_is_an_error() {
    let mut chain = StrategyChain::new(Action::Copy).with(Unavailable("clipboard"));
    let err = chain.run("q").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Every copy strategy failed: clipboard: Navigation error: clipboard not available"
    );
}
