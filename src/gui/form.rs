use chrono::NaiveDate;
use eframe::egui;
use egui_extras::DatePickerButton;

use crate::gui::colors;
use crate::query::{Field, SearchFormState, ValidationResult};

// ============================================================================
// Form draft
// ============================================================================

/// Values currently typed into the panel
#[derive(Debug, Clone)]
pub struct FormDraft {
    pub exact_phrase: String,
    pub any_words: String,
    pub exclude_word: String,
    pub from_user: String,
    pub since_enabled: bool,
    pub since_date: NaiveDate,
    pub until_enabled: bool,
    pub until_date: NaiveDate,
    pub filter_links: bool,
    pub filter_media: bool,
}

impl FormDraft {
    /// Blank form; date pickers open on `today`
    pub fn new(today: NaiveDate) -> Self {
        Self {
            exact_phrase: String::new(),
            any_words: String::new(),
            exclude_word: String::new(),
            from_user: String::new(),
            since_enabled: false,
            since_date: today,
            until_enabled: false,
            until_date: today,
            filter_links: false,
            filter_media: false,
        }
    }

    pub fn clear(&mut self, today: NaiveDate) {
        *self = Self::new(today);
    }

    /// Snapshot handed to the validator and builder
    pub fn to_state(&self) -> SearchFormState {
        SearchFormState {
            exact_phrase: self.exact_phrase.clone(),
            any_words: self.any_words.clone(),
            exclude_word: self.exclude_word.clone(),
            from_user: self.from_user.clone(),
            since_date: self.since_enabled.then_some(self.since_date),
            until_date: self.until_enabled.then_some(self.until_date),
            filter_links: self.filter_links,
            filter_media: self.filter_media,
        }
    }
}

/// What the user did to the form this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    None,
    Edited,
    Clear,
    BuildAndSearch,
    Copy,
}

// ============================================================================
// Form rendering
// ============================================================================

pub fn show_form(
    ui: &mut egui::Ui,
    draft: &mut FormDraft,
    verdicts: &ValidationResult,
) -> FormAction {
    let mut action = FormAction::None;
    let mut edited = false;
    ui.spacing_mut().item_spacing.y = 6.0;

    edited |= text_row(
        ui,
        "Exact phrase",
        "e.g., the future of AI",
        &mut draft.exact_phrase,
        None,
    );
    edited |= text_row(
        ui,
        "Any of these words",
        "Use OR, e.g., apple OR google",
        &mut draft.any_words,
        verdicts.reason(Field::AnyWords),
    );
    edited |= text_row(
        ui,
        "Exclude words",
        "e.g., fruit",
        &mut draft.exclude_word,
        None,
    );
    edited |= text_row(
        ui,
        "From account",
        "No @, e.g., x",
        &mut draft.from_user,
        verdicts.reason(Field::FromUser),
    );

    edited |= date_row(
        ui,
        "Since date",
        "since_date",
        &mut draft.since_enabled,
        &mut draft.since_date,
    );
    edited |= date_row(
        ui,
        "Until date",
        "until_date",
        &mut draft.until_enabled,
        &mut draft.until_date,
    );
    if let Some(reason) = verdicts.reason(Field::DateRange) {
        ui.colored_label(colors::ERROR, reason);
    }

    ui.add_space(4.0);
    ui.label(egui::RichText::new("Media filters").color(colors::TEXT_SECONDARY));
    ui.horizontal(|ui| {
        edited |= ui.checkbox(&mut draft.filter_links, "Has links").changed();
        edited |= ui.checkbox(&mut draft.filter_media, "Has media").changed();
    });

    ui.separator();
    ui.horizontal(|ui| {
        if ui.button("Clear").clicked() {
            action = FormAction::Clear;
        }
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Copy query").clicked() {
                action = FormAction::Copy;
            }
            let build = egui::Button::new(
                egui::RichText::new("Build & search").color(colors::TEXT_PRIMARY).strong(),
            )
            .fill(colors::ACCENT);
            if ui.add(build).clicked() {
                action = FormAction::BuildAndSearch;
            }
        });
    });

    if action == FormAction::None && edited {
        action = FormAction::Edited;
    }
    action
}

fn text_row(
    ui: &mut egui::Ui,
    label: &str,
    hint: &str,
    value: &mut String,
    error: Option<&str>,
) -> bool {
    ui.label(egui::RichText::new(label).color(colors::TEXT_SECONDARY));
    let changed = egui::Frame::new()
        .stroke(egui::Stroke::new(1.0, colors::field_stroke(error.is_some())))
        .corner_radius(egui::CornerRadius::same(8))
        .show(ui, |ui| {
            ui.add(
                egui::TextEdit::singleline(value)
                    .hint_text(egui::RichText::new(hint).color(colors::TEXT_HINT))
                    .background_color(colors::FIELD_BG)
                    .desired_width(f32::INFINITY),
            )
            .changed()
        })
        .inner;
    if let Some(reason) = error {
        ui.colored_label(colors::ERROR, reason);
    }
    changed
}

fn date_row(
    ui: &mut egui::Ui,
    label: &str,
    id: &str,
    enabled: &mut bool,
    date: &mut NaiveDate,
) -> bool {
    ui.horizontal(|ui| {
        let mut changed = ui.checkbox(enabled, label).changed();
        if *enabled {
            changed |= ui.add(DatePickerButton::new(date).id_salt(id)).changed();
        }
        changed
    })
    .inner
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn disabled_dates_are_absent_from_snapshot() {
        let mut draft = FormDraft::new(today());
        draft.until_enabled = true;
        let state = draft.to_state();
        assert_eq!(state.since_date, None);
        assert_eq!(state.until_date, Some(today()));
    }

    #[test]
    fn snapshot_carries_text_and_filters() {
        let mut draft = FormDraft::new(today());
        draft.exact_phrase = "AI future".into();
        draft.from_user = "x".into();
        draft.filter_media = true;

        let state = draft.to_state();
        assert_eq!(crate::build(&state), "\"AI future\" from:x filter:media");
    }

    #[test]
    fn clear_resets_every_field() {
        let mut draft = FormDraft::new(today());
        draft.any_words = "a OR b".into();
        draft.since_enabled = true;
        draft.filter_links = true;

        let tomorrow = today().succ_opt().unwrap();
        draft.clear(tomorrow);
        assert!(draft.to_state().is_blank());
        assert_eq!(draft.since_date, tomorrow);
    }
}
