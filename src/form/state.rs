use super::context::FormContext;
use super::field::{FieldValidity, FormFields, FormValidity, ScalarField, TouchedLists};
use super::mode::Mode;
use crate::validate::ValidationOutcome;

/// The mutable form carried by an editable session: current values, per-field
/// edit/validity bookkeeping, whole-form validity, the session mode and the
/// touched-list flags driving full-list diff emission.
#[derive(Debug, Clone)]
pub struct FormState {
    pub context: FormContext,
    pub fields: FormFields,
    pub validity: FormValidity,
    pub mode: Mode,
    pub touched: TouchedLists,
}

impl FormState {
    /// Seeds the context from the mode's reference document; a create
    /// session starts from empty values.
    pub fn new(mode: Mode) -> Self {
        let context = match mode.reference() {
            Some(resume) => FormContext::from_document(resume),
            None => FormContext::default(),
        };
        Self {
            context,
            fields: FormFields::default(),
            validity: FormValidity::Unvalidated,
            mode,
            touched: TouchedLists::default(),
        }
    }

    pub fn set_field_error(&mut self, field: ScalarField, error: String) {
        self.fields.field_mut(field).validity = FieldValidity::Invalid { error };
    }

    /// Applies a pre-submit validation outcome the way the session reducer
    /// expects it: a valid outcome marks every field valid; an invalid one
    /// marks only the failing fields, leaving the rest as they were.
    pub fn apply_validation(&mut self, outcome: &ValidationOutcome) {
        if outcome.form_valid {
            self.validity = FormValidity::Valid;
            for (field, validity) in &outcome.field_results {
                self.fields.field_mut(*field).validity = validity.clone();
            }
        } else {
            self.validity = FormValidity::Invalid;
            for (field, validity) in &outcome.field_results {
                if validity.is_invalid() {
                    self.fields.field_mut(*field).validity = validity.clone();
                }
            }
        }
    }
}
