use anyhow::{Context as _, Result};
use indexmap::IndexMap;
use jsonschema::{Validator, validator_for};
use schemars::schema_for;

use crate::form::{FieldValidity, FormContext, Mode, ScalarField};

/// Result of a pre-submit validation pass: one entry per scalar field, in
/// declaration order, plus the whole-form verdict.
#[derive(Debug, Clone)]
pub struct ValidationOutcome {
    pub field_results: IndexMap<ScalarField, FieldValidity>,
    pub form_valid: bool,
}

/// Pure validator over a form context. The per-field rules are declared as
/// schema attributes on [`FormContext`] and compiled once here; errors are
/// mapped back onto fields through their instance-path pointers.
pub struct FormValidator {
    schema: Validator,
}

impl FormValidator {
    pub fn new() -> Result<Self> {
        let schema = serde_json::to_value(schema_for!(FormContext))
            .context("failed to serialize the form context schema")?;
        let schema = validator_for(&schema).context("failed to compile the form context schema")?;
        Ok(Self { schema })
    }

    /// Blur-time check for a single field: first failing schema rule wins.
    /// Contextual mode rules are not applied on blur; they only gate a
    /// submission.
    pub fn validate_field(&self, context: &FormContext, field: ScalarField) -> FieldValidity {
        let value = match serde_json::to_value(context) {
            Ok(value) => value,
            Err(err) => {
                return FieldValidity::Invalid {
                    error: err.to_string(),
                };
            }
        };
        for error in self.schema.iter_errors(&value) {
            if error.instance_path.to_string() == field.pointer() {
                return FieldValidity::Invalid {
                    error: error.to_string(),
                };
            }
        }
        FieldValidity::Valid
    }

    /// Pre-submit check: collects every field's schema errors without
    /// stopping at the first, then applies the contextual rule — an
    /// update/clone submission where nothing differs from the reference
    /// document is rejected with a "has not been modified" message on each
    /// scalar field. Create sessions skip the contextual rule entirely.
    pub fn validate_all(&self, context: &FormContext, mode: &Mode) -> ValidationOutcome {
        let mut field_results: IndexMap<ScalarField, FieldValidity> = ScalarField::ALL
            .into_iter()
            .map(|field| (field, FieldValidity::Valid))
            .collect();

        match serde_json::to_value(context) {
            Ok(value) => {
                for error in self.schema.iter_errors(&value) {
                    let pointer = error.instance_path.to_string();
                    let Some(field) = ScalarField::from_pointer(&pointer) else {
                        continue;
                    };
                    if !field_results[&field].is_invalid() {
                        field_results[&field] = FieldValidity::Invalid {
                            error: error.to_string(),
                        };
                    }
                }
            }
            Err(err) => {
                field_results[&ScalarField::Title] = FieldValidity::Invalid {
                    error: err.to_string(),
                };
            }
        }

        if let Some(resume) = mode.reference()
            && context.matches_document(resume)
        {
            for field in ScalarField::ALL {
                if !field_results[&field].is_invalid() {
                    field_results[&field] = FieldValidity::Invalid {
                        error: format!("{} has not been modified", field.name()),
                    };
                }
            }
        }

        let form_valid = field_results
            .values()
            .all(|validity| !validity.is_invalid());
        ValidationOutcome {
            field_results,
            form_valid,
        }
    }
}
