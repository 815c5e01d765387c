use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use super::{SearchFormState, OR_TOKEN};

/// Characters a username may not contain.
const FORBIDDEN_USER_CHARS: &str = "@#$%^&*()+=[]{};:'\"\\|,.<>/?";

pub const DATE_ORDER_REASON: &str = "end date cannot be earlier than start date";
pub const USERNAME_REASON: &str = "invalid username";
pub const OR_WORDS_REASON: &str =
    "words must be separated by OR with non-empty terms on both sides";

/// Form fields that carry a validation rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    DateRange,
    FromUser,
    AnyWords,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::DateRange => "dateRange",
            Field::FromUser => "fromUser",
            Field::AnyWords => "anyWords",
        }
    }

    pub fn all() -> &'static [Field] {
        &[Field::DateRange, Field::FromUser, Field::AnyWords]
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldVerdict {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
}

impl FieldVerdict {
    fn pass() -> Self {
        Self {
            valid: true,
            reason: None,
        }
    }

    fn fail(reason: &'static str) -> Self {
        Self {
            valid: false,
            reason: Some(reason),
        }
    }

    fn check(ok: bool, reason: &'static str) -> Self {
        if ok {
            Self::pass()
        } else {
            Self::fail(reason)
        }
    }
}

/// Per-field verdicts. An empty result (nothing checked yet) counts as valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationResult {
    verdicts: BTreeMap<Field, FieldVerdict>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.verdicts.values().all(|v| v.valid)
    }

    pub fn verdict(&self, field: Field) -> Option<FieldVerdict> {
        self.verdicts.get(&field).copied()
    }

    /// Failure reason for `field`, if it failed
    pub fn reason(&self, field: Field) -> Option<&'static str> {
        self.verdict(field).and_then(|v| v.reason)
    }

    /// Failing fields with their reasons, in field order
    pub fn errors(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.verdicts
            .iter()
            .filter_map(|(field, v)| v.reason.map(|r| (*field, r)))
    }

    pub fn into_result(self) -> crate::Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(crate::AdvSearchError::Validation(self))
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, reason) in self.errors() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, reason)?;
            first = false;
        }
        if first {
            f.write_str("all fields valid")?;
        }
        Ok(())
    }
}

/// Check every rule against the snapshot. All rules are evaluated and reported.
pub fn validate(state: &SearchFormState) -> ValidationResult {
    let mut verdicts = BTreeMap::new();
    verdicts.insert(Field::DateRange, check_date_order(state));
    verdicts.insert(Field::FromUser, check_username(state));
    verdicts.insert(Field::AnyWords, check_or_words(state));
    ValidationResult { verdicts }
}

fn check_date_order(state: &SearchFormState) -> FieldVerdict {
    let ok = match (state.since_date, state.until_date) {
        (Some(since), Some(until)) => until >= since,
        _ => true,
    };
    FieldVerdict::check(ok, DATE_ORDER_REASON)
}

fn check_username(state: &SearchFormState) -> FieldVerdict {
    let ok = !state
        .from_user()
        .is_some_and(|user| user.chars().any(|c| FORBIDDEN_USER_CHARS.contains(c)));
    FieldVerdict::check(ok, USERNAME_REASON)
}

fn check_or_words(state: &SearchFormState) -> FieldVerdict {
    let ok = match state.any_words() {
        Some(words) if OR_TOKEN.is_match(words) => OR_TOKEN
            .split(words)
            .all(|segment| !segment.trim().is_empty()),
        _ => true,
    };
    FieldVerdict::check(ok, OR_WORDS_REASON)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(s: &str) -> Option<NaiveDate> {
        Some(s.parse().unwrap())
    }

    #[test]
    fn blank_form_passes_every_rule() {
        let result = validate(&SearchFormState::default());
        assert!(result.is_valid());
        for field in Field::all() {
            assert_eq!(result.verdict(*field), Some(FieldVerdict::pass()));
        }
    }

    #[test]
    fn until_before_since_fails_date_range() {
        let state = SearchFormState {
            since_date: date("2024-05-01"),
            until_date: date("2024-01-01"),
            ..Default::default()
        };
        let result = validate(&state);
        assert!(!result.is_valid());
        assert_eq!(result.reason(Field::DateRange), Some(DATE_ORDER_REASON));
        assert_eq!(result.reason(Field::FromUser), None);
    }

    #[test]
    fn same_day_and_single_dates_are_fine() {
        let same_day = SearchFormState {
            since_date: date("2024-05-01"),
            until_date: date("2024-05-01"),
            ..Default::default()
        };
        assert!(validate(&same_day).is_valid());

        let only_until = SearchFormState {
            until_date: date("2020-01-01"),
            ..Default::default()
        };
        assert!(validate(&only_until).is_valid());
    }

    #[test]
    fn every_forbidden_char_rejects_username() {
        for c in FORBIDDEN_USER_CHARS.chars() {
            let state = SearchFormState {
                from_user: format!("foo{c}bar"),
                ..Default::default()
            };
            assert_eq!(
                validate(&state).reason(Field::FromUser),
                Some(USERNAME_REASON),
                "char {c:?} should be rejected"
            );
        }
    }

    #[test]
    fn plain_usernames_pass() {
        for user in ["x", "jack_dorsey", "  elon  ", "user-123"] {
            let state = SearchFormState {
                from_user: user.into(),
                ..Default::default()
            };
            assert!(validate(&state).is_valid(), "{user}");
        }
    }

    #[test]
    fn or_words_need_terms_on_both_sides() {
        for words in ["OR apple", "apple OR", "apple OR  OR google", "OR"] {
            let state = SearchFormState {
                any_words: words.into(),
                ..Default::default()
            };
            assert_eq!(
                validate(&state).reason(Field::AnyWords),
                Some(OR_WORDS_REASON),
                "{words}"
            );
        }
    }

    #[test]
    fn words_without_or_token_always_pass() {
        for words in ["apple google", "ORANGE", "color OReo", "a or b"] {
            let state = SearchFormState {
                any_words: words.into(),
                ..Default::default()
            };
            assert!(validate(&state).is_valid(), "{words}");
        }
    }

    #[test]
    fn rules_do_not_short_circuit() {
        let state = SearchFormState {
            any_words: "OR apple".into(),
            from_user: "foo@bar".into(),
            since_date: date("2024-05-01"),
            until_date: date("2024-01-01"),
            ..Default::default()
        };
        let result = validate(&state);
        let failing: Vec<Field> = result.errors().map(|(f, _)| f).collect();
        assert_eq!(
            failing,
            vec![Field::DateRange, Field::FromUser, Field::AnyWords]
        );
        assert_eq!(
            result.to_string(),
            format!(
                "dateRange: {DATE_ORDER_REASON}; fromUser: {USERNAME_REASON}; anyWords: {OR_WORDS_REASON}"
            )
        );
    }

    #[test]
    fn serializes_as_field_map() {
        let state = SearchFormState {
            from_user: "a.b".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(validate(&state)).unwrap();
        assert_eq!(json["fromUser"]["valid"], false);
        assert_eq!(json["fromUser"]["reason"], USERNAME_REASON);
        assert_eq!(json["anyWords"]["valid"], true);
        assert!(json["anyWords"].get("reason").is_none());
    }
}
