//! Query core: the form snapshot, its validator and the query builder.
//!
//! Both [`validate`] and [`build`] are pure. They read a [`SearchFormState`]
//! snapshot and never touch the UI, the clipboard or the network.

mod build;
mod state;
mod validate;

pub use build::{build, build_checked, search_url};
pub use state::SearchFormState;
pub use validate::{validate, Field, FieldVerdict, ValidationResult};

use regex::Regex;
use std::sync::LazyLock;

/// Standalone `OR` delimiter. `ORANGE` or `COLOR` do not match.
static OR_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bOR\b").expect("OR token pattern is valid"));
