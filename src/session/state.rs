use std::mem;

use crate::form::{FormFields, FormState, FormValidity, Mode, TouchedLists};

use super::server_errors::ServerErrorState;

/// One in-progress edit of a single document. Exactly one variant is active;
/// only `Editable` accepts mutating actions. The non-terminal variants carry
/// the form so that a success can re-enter update mode and server errors can
/// be reconciled onto the fields the user is looking at.
#[derive(Debug, Clone)]
pub enum Session {
    Editable(FormState),
    Submitting(FormState),
    SubmitSuccess(FormState),
    ServerErrors {
        form: FormState,
        errors: ServerErrorState,
    },
    Closed,
}

impl Session {
    pub fn new(mode: Mode) -> Self {
        Session::Editable(FormState::new(mode))
    }

    pub fn form(&self) -> Option<&FormState> {
        match self {
            Session::Editable(form)
            | Session::Submitting(form)
            | Session::SubmitSuccess(form) => Some(form),
            Session::ServerErrors { form, .. } => Some(form),
            Session::Closed => None,
        }
    }

    pub fn server_errors(&self) -> Option<&ServerErrorState> {
        match self {
            Session::ServerErrors { errors, .. } => Some(errors),
            _ => None,
        }
    }

    pub fn is_editable(&self) -> bool {
        matches!(self, Session::Editable(_))
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, Session::Submitting(_))
    }

    pub fn is_submit_success(&self) -> bool {
        matches!(self, Session::SubmitSuccess(_))
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, Session::Closed)
    }

    /// Turns a successfully submitted session back into a fresh editable one.
    /// The context and the updated reference document survive; edit states,
    /// validity markers and touched-list flags start over. Collaborators call
    /// this to continue editing against the new baseline; any other state is
    /// left alone.
    pub fn reopen(&mut self) {
        if matches!(self, Session::SubmitSuccess(_))
            && let Session::SubmitSuccess(mut form) = mem::replace(self, Session::Closed)
        {
            form.fields = FormFields::default();
            form.validity = FormValidity::Unvalidated;
            form.touched = TouchedLists::default();
            *self = Session::Editable(form);
        }
    }

    pub(super) fn take(&mut self) -> Session {
        mem::replace(self, Session::Closed)
    }
}
