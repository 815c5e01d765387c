//! Panel control flow: form edits and button presses in, verdicts, toasts and
//! executor calls out. Holds no egui state, so it runs without a window.

use std::time::Instant;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::executor::{Outcome, SearchExecutor};
use crate::gui::form::{FormAction, FormDraft};
use crate::gui::toast::{ToastKind, Toasts};
use crate::query::{build_checked, validate, ValidationResult};
use crate::{AdvSearchError, Result};

pub struct PanelController {
    /// Field values being edited
    pub draft: FormDraft,
    /// Verdicts from the latest validation run
    pub verdicts: ValidationResult,
    pub toasts: Toasts,
    executor: SearchExecutor,
    /// Last query built from the form
    pub last_query: String,
    /// Text a fallback strategy left for the user to copy or open by hand
    pub manual_text: Option<String>,
}

impl PanelController {
    pub fn new(executor: SearchExecutor, toasts: Toasts, today: NaiveDate) -> Self {
        Self {
            draft: FormDraft::new(today),
            verdicts: ValidationResult::default(),
            toasts,
            executor,
            last_query: String::new(),
            manual_text: None,
        }
    }

    /// Apply one form action. `today` seeds the date pickers on Clear.
    pub fn handle(&mut self, action: FormAction, today: NaiveDate, now: Instant) {
        match action {
            FormAction::None => {}
            FormAction::Edited => {
                self.verdicts = validate(&self.draft.to_state());
            }
            FormAction::Clear => {
                self.draft.clear(today);
                self.verdicts = ValidationResult::default();
                self.manual_text = None;
                self.toasts.show("All inputs cleared", ToastKind::Info, now);
            }
            FormAction::BuildAndSearch => {
                let result = self.prepare().and_then(|q| self.executor.search(&q));
                self.report(result, now);
            }
            FormAction::Copy => {
                let result = self.prepare().and_then(|q| self.executor.copy(&q));
                self.report(result, now);
            }
        }
    }

    /// Validate the current form and build its query
    fn prepare(&mut self) -> Result<String> {
        let state = self.draft.to_state();
        self.verdicts = validate(&state);
        let query = build_checked(&state)?;
        info!(%query, "built query");
        self.last_query = query.clone();
        Ok(query)
    }

    fn report(&mut self, result: Result<Outcome>, now: Instant) {
        match result {
            Ok(outcome) => {
                let kind = if outcome.manual_text.is_some() {
                    ToastKind::Info
                } else {
                    ToastKind::Success
                };
                self.toasts.show(outcome.message, kind, now);
                self.manual_text = outcome.manual_text;
            }
            Err(AdvSearchError::Validation(_)) => {
                self.toasts.show("Please check input errors", ToastKind::Error, now);
            }
            Err(e) => {
                warn!(error = %e, "action failed");
                self.toasts.show(e.to_string(), ToastKind::Error, now);
            }
        }
    }
}
