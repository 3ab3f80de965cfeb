use serde::Deserialize;
use thiserror::Error;

use crate::form::{FormState, FormValidity, ScalarField};

/// The field-scoped error object a rejected submission may carry: a message
/// per named field, plus an optional non-field message.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ResumeFieldErrors {
    pub title: Option<String>,
    pub description: Option<String>,
    pub error: Option<String>,
}

/// How the submit collaborator reports failure.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The server rejected the submission with field-scoped messages.
    #[error("resume update rejected")]
    Rejected(ResumeFieldErrors),
    /// A plain string from the server, not tied to any field.
    #[error("{0}")]
    Message(String),
    /// An opaque transport failure.
    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

/// The error half of a `ServerErrors` session: either the field validity
/// states carry the messages, or a single non-field message stands alone.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerErrorState {
    FieldErrors,
    NonFieldError { error: String },
}

/// Maps a submit failure back into the form's validity state. Pure data
/// mapping; never triggers a network call.
pub fn reconcile_server_errors(form: &mut FormState, error: &SubmitError) -> ServerErrorState {
    match error {
        SubmitError::Rejected(errors) => {
            form.validity = FormValidity::Invalid;
            if let Some(message) = &errors.title {
                form.set_field_error(ScalarField::Title, message.clone());
            }
            if let Some(message) = &errors.description {
                form.set_field_error(ScalarField::Description, message.clone());
            }
            match &errors.error {
                Some(message) => ServerErrorState::NonFieldError {
                    error: message.clone(),
                },
                None => ServerErrorState::FieldErrors,
            }
        }
        SubmitError::Message(message) => ServerErrorState::NonFieldError {
            error: message.clone(),
        },
        SubmitError::Transport(source) => ServerErrorState::NonFieldError {
            error: source.to_string(),
        },
    }
}
