use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Snapshot of the search form, taken once per action.
///
/// Text fields are stored as typed; the core trims them before use and
/// treats empty-after-trim as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchFormState {
    pub exact_phrase: String,
    pub any_words: String,
    pub exclude_word: String,
    pub from_user: String,
    pub since_date: Option<NaiveDate>,
    pub until_date: Option<NaiveDate>,
    pub filter_links: bool,
    pub filter_media: bool,
}

impl SearchFormState {
    pub fn exact_phrase(&self) -> Option<&str> {
        present(&self.exact_phrase)
    }

    pub fn any_words(&self) -> Option<&str> {
        present(&self.any_words)
    }

    pub fn exclude_word(&self) -> Option<&str> {
        present(&self.exclude_word)
    }

    pub fn from_user(&self) -> Option<&str> {
        present(&self.from_user)
    }

    /// True when no field would contribute a clause
    pub fn is_blank(&self) -> bool {
        self.exact_phrase().is_none()
            && self.any_words().is_none()
            && self.exclude_word().is_none()
            && self.from_user().is_none()
            && self.since_date.is_none()
            && self.until_date.is_none()
            && !self.filter_links
            && !self.filter_media
    }
}

fn present(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_fields_are_absent() {
        let state = SearchFormState {
            exact_phrase: "   ".into(),
            from_user: "\t x \n".into(),
            ..Default::default()
        };
        assert_eq!(state.exact_phrase(), None);
        assert_eq!(state.from_user(), Some("x"));
        assert!(!state.is_blank());
        assert!(SearchFormState::default().is_blank());
    }

    #[test]
    fn deserializes_camel_case_json_with_missing_fields() {
        let state: SearchFormState = serde_json::from_str(
            r#"{"anyWords": "apple OR google", "sinceDate": "2024-05-01", "filterLinks": true}"#,
        )
        .unwrap();
        assert_eq!(state.any_words, "apple OR google");
        assert_eq!(state.since_date, NaiveDate::from_ymd_opt(2024, 5, 1));
        assert!(state.filter_links);
        assert!(state.until_date.is_none());
        assert!(state.exact_phrase.is_empty());
    }
}
