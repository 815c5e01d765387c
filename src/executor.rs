//! Search executor
//!
//! Hands a finished query to the outside world. Each action ("search",
//! "copy") is an ordered list of strategies; the first one that succeeds
//! wins, and the rest are never tried.

use std::fmt;

use tracing::{debug, info, warn};
use url::Url;

use crate::query::search_url;
use crate::{AdvSearchError, AppConfig, Result};

/// What the executor was asked to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Search,
    Copy,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Search => write!(f, "search"),
            Action::Copy => write!(f, "copy"),
        }
    }
}

/// Result of a successful strategy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Name of the strategy that handled the query
    pub strategy: &'static str,
    /// User-facing message (shown as a toast or printed)
    pub message: String,
    /// Text the user still has to act on by hand (select-and-copy, click a link)
    pub manual_text: Option<String>,
}

impl Outcome {
    pub fn done(strategy: &'static str, message: impl Into<String>) -> Self {
        Self {
            strategy,
            message: message.into(),
            manual_text: None,
        }
    }

    pub fn manual(strategy: &'static str, message: impl Into<String>, text: String) -> Self {
        Self {
            strategy,
            message: message.into(),
            manual_text: Some(text),
        }
    }
}

/// One way of carrying out an action
pub trait Strategy {
    fn name(&self) -> &'static str;
    fn attempt(&mut self, query: &str) -> Result<Outcome>;
}

/// Ordered fallback list for one action
pub struct StrategyChain {
    action: Action,
    strategies: Vec<Box<dyn Strategy>>,
}

impl StrategyChain {
    pub fn new(action: Action) -> Self {
        Self {
            action,
            strategies: Vec::new(),
        }
    }

    /// Append a strategy, tried after every strategy already in the chain
    pub fn with(mut self, strategy: impl Strategy + 'static) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    pub fn run(&mut self, query: &str) -> Result<Outcome> {
        let action = self.action;
        let mut attempts = Vec::new();

        for strategy in &mut self.strategies {
            debug!(%action, strategy = strategy.name(), "trying strategy");
            match strategy.attempt(query) {
                Ok(outcome) => {
                    info!(%action, strategy = strategy.name(), "strategy succeeded");
                    return Ok(outcome);
                }
                Err(e) => {
                    warn!(%action, strategy = strategy.name(), error = %e, "strategy failed");
                    attempts.push(format!("{}: {}", strategy.name(), e));
                }
            }
        }

        Err(AdvSearchError::AllStrategiesFailed {
            action: action.to_string(),
            attempts,
        })
    }
}

/// Runs the search and copy chains, refusing blank queries
pub struct SearchExecutor {
    search: StrategyChain,
    copy: StrategyChain,
}

impl SearchExecutor {
    pub fn new(search: StrategyChain, copy: StrategyChain) -> Self {
        Self { search, copy }
    }

    /// Default chains: browser then printed link; system clipboard then manual copy
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::with_clipboard(config, SystemClipboard::default())
    }

    /// Chains for a process that exits right after acting (the CLI).
    ///
    /// Copy keeps serving the clipboard until another owner takes it over, so
    /// success is only reported once the text outlives this process.
    pub fn one_shot(config: &AppConfig) -> Result<Self> {
        Self::with_clipboard(config, SystemClipboard::serving())
    }

    fn with_clipboard(config: &AppConfig, clipboard: SystemClipboard) -> Result<Self> {
        let base = config.base_url()?;
        let search = StrategyChain::new(Action::Search)
            .with(OpenInBrowser::new(base.clone()))
            .with(ShowSearchLink::new(base));
        let copy = StrategyChain::new(Action::Copy)
            .with(clipboard)
            .with(ManualCopy);
        Ok(Self::new(search, copy))
    }

    pub fn search(&mut self, query: &str) -> Result<Outcome> {
        ensure_criteria(query)?;
        self.search.run(query)
    }

    pub fn copy(&mut self, query: &str) -> Result<Outcome> {
        ensure_criteria(query)?;
        self.copy.run(query)
    }
}

fn ensure_criteria(query: &str) -> Result<()> {
    if query.trim().is_empty() {
        warn!("refusing to act on an empty query");
        return Err(AdvSearchError::EmptyCriteria);
    }
    Ok(())
}

// ============================================================================
// Search strategies
// ============================================================================

/// Open the site's search results page in the default browser
pub struct OpenInBrowser {
    base: Url,
}

impl OpenInBrowser {
    pub fn new(base: Url) -> Self {
        Self { base }
    }
}

impl Strategy for OpenInBrowser {
    fn name(&self) -> &'static str {
        "browser"
    }

    fn attempt(&mut self, query: &str) -> Result<Outcome> {
        let url = search_url(&self.base, query);
        open::that(url.as_str())
            .map_err(|e| AdvSearchError::Navigation(format!("failed to open {}: {}", url, e)))?;
        Ok(Outcome::done(self.name(), "Search executed"))
    }
}

/// Hand the search link to the user
pub struct ShowSearchLink {
    base: Url,
}

impl ShowSearchLink {
    pub fn new(base: Url) -> Self {
        Self { base }
    }
}

impl Strategy for ShowSearchLink {
    fn name(&self) -> &'static str {
        "link"
    }

    fn attempt(&mut self, query: &str) -> Result<Outcome> {
        let url = search_url(&self.base, query);
        Ok(Outcome::manual(
            self.name(),
            "Open the link to run the search",
            url.into(),
        ))
    }
}

// ============================================================================
// Copy strategies
// ============================================================================

/// Write the query to the system clipboard.
///
/// The clipboard handle is kept for the strategy's lifetime; on X11 and
/// Wayland the contents are served only while the owning process is alive.
#[derive(Default)]
pub struct SystemClipboard {
    clipboard: Option<arboard::Clipboard>,
    /// Block in `attempt` until another owner replaces the contents
    serve_until_replaced: bool,
}

impl SystemClipboard {
    /// Clipboard that keeps serving its text until a clipboard manager or
    /// the next copy takes ownership. Only blocks where ownership is
    /// per-process (X11/Wayland).
    pub fn serving() -> Self {
        Self {
            clipboard: None,
            serve_until_replaced: true,
        }
    }
}

impl Strategy for SystemClipboard {
    fn name(&self) -> &'static str {
        "clipboard"
    }

    fn attempt(&mut self, query: &str) -> Result<Outcome> {
        let clipboard = match self.clipboard.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new()
                .map_err(|e| AdvSearchError::Clipboard(e.to_string()))?,
        };
        let clipboard = self.clipboard.insert(clipboard);
        set_clipboard_text(clipboard, query, self.serve_until_replaced)
            .map_err(|e| AdvSearchError::Clipboard(e.to_string()))?;
        Ok(Outcome::done(self.name(), "Search query copied to clipboard"))
    }
}

fn set_clipboard_text(
    clipboard: &mut arboard::Clipboard,
    text: &str,
    serve_until_replaced: bool,
) -> std::result::Result<(), arboard::Error> {
    if serve_until_replaced {
        #[cfg(all(
            unix,
            not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
        ))]
        {
            use arboard::SetExtLinux;
            info!("serving clipboard until its contents are replaced");
            return clipboard.set().wait().text(text);
        }
    }
    clipboard.set_text(text)
}

/// Present the query for the user to select and copy by hand
pub struct ManualCopy;

impl Strategy for ManualCopy {
    fn name(&self) -> &'static str {
        "manual"
    }

    fn attempt(&mut self, query: &str) -> Result<Outcome> {
        Ok(Outcome::manual(
            self.name(),
            "Clipboard unavailable, select the query and copy it",
            query.to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records every query it sees, then fails or succeeds as configured
    struct Scripted {
        name: &'static str,
        succeed: bool,
        seen: Rc<RefCell<Vec<String>>>,
    }

    impl Strategy for Scripted {
        fn name(&self) -> &'static str {
            self.name
        }

        fn attempt(&mut self, query: &str) -> Result<Outcome> {
            self.seen.borrow_mut().push(format!("{}:{}", self.name, query));
            if self.succeed {
                Ok(Outcome::done(self.name, "ok"))
            } else {
                Err(AdvSearchError::Clipboard("denied".into()))
            }
        }
    }

    fn scripted(name: &'static str, succeed: bool, seen: &Rc<RefCell<Vec<String>>>) -> Scripted {
        Scripted {
            name,
            succeed,
            seen: Rc::clone(seen),
        }
    }

    #[test]
    fn first_success_wins() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut chain = StrategyChain::new(Action::Copy)
            .with(scripted("a", false, &seen))
            .with(scripted("b", true, &seen))
            .with(scripted("c", true, &seen));

        let outcome = chain.run("q").unwrap();
        assert_eq!(outcome.strategy, "b");
        assert_eq!(*seen.borrow(), vec!["a:q", "b:q"]);
    }

    #[test]
    fn exhausted_chain_reports_every_attempt() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut chain = StrategyChain::new(Action::Search)
            .with(scripted("a", false, &seen))
            .with(scripted("b", false, &seen));

        match chain.run("q") {
            Err(AdvSearchError::AllStrategiesFailed { action, attempts }) => {
                assert_eq!(action, "search");
                assert_eq!(
                    attempts,
                    vec!["a: Clipboard error: denied", "b: Clipboard error: denied"]
                );
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn blank_query_never_reaches_a_strategy() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut executor = SearchExecutor::new(
            StrategyChain::new(Action::Search).with(scripted("s", true, &seen)),
            StrategyChain::new(Action::Copy).with(scripted("c", true, &seen)),
        );

        assert!(matches!(executor.search(""), Err(AdvSearchError::EmptyCriteria)));
        assert!(matches!(executor.copy("   "), Err(AdvSearchError::EmptyCriteria)));
        assert!(seen.borrow().is_empty());

        assert_eq!(executor.copy("from:x").unwrap().strategy, "c");
    }

    #[test]
    fn fallbacks_hand_text_back_to_the_user() {
        let mut manual = ManualCopy;
        let outcome = manual.attempt("from:x").unwrap();
        assert_eq!(outcome.manual_text.as_deref(), Some("from:x"));

        let mut link = ShowSearchLink::new(Url::parse("https://x.com").unwrap());
        let outcome = link.attempt("from:x").unwrap();
        assert_eq!(
            outcome.manual_text.as_deref(),
            Some("https://x.com/search?q=from%3Ax&src=typed_query")
        );
    }

    #[test]
    fn default_chains_follow_fallback_order() {
        let config = AppConfig::default();
        let executor = SearchExecutor::from_config(&config).unwrap();
        assert_eq!(executor.search.names(), vec!["browser", "link"]);
        assert_eq!(executor.copy.names(), vec!["clipboard", "manual"]);
        assert_eq!(executor.search.action(), Action::Search);
    }

    #[test]
    fn one_shot_chains_keep_fallback_order() {
        let config = AppConfig::default();
        let executor = SearchExecutor::one_shot(&config).unwrap();
        assert_eq!(executor.search.names(), vec!["browser", "link"]);
        assert_eq!(executor.copy.names(), vec!["clipboard", "manual"]);
        assert_eq!(executor.copy.action(), Action::Copy);
    }

    #[test]
    fn only_serving_clipboard_waits_for_a_new_owner() {
        assert!(SystemClipboard::serving().serve_until_replaced);
        assert!(!SystemClipboard::default().serve_until_replaced);
        assert!(SystemClipboard::serving().clipboard.is_none());
    }
}
