use tracing::debug;

use crate::domain::ResumeDocument;
use crate::form::{
    FieldEdit, FieldValidity, FormState, FormValidity, IndexedRecord, ListField, ListOpError,
    Mode, ScalarField, TouchedLists, compute_submission_data, insert_record, insert_string,
    move_record, move_string, remove_record, remove_string, swap_records, swap_strings,
};
use crate::validate::FormValidator;

use super::actions::{
    ActionOutcome, EducationField, ExperienceField, ListOp, ListTarget, RecordFieldRef,
    SessionAction,
};
use super::error::SessionError;
use super::server_errors::{SubmitError, reconcile_server_errors};
use super::state::Session;

/// Applies actions to a session, delegating validation to the given
/// validator. Borrow a session and a validator, dispatch, drop.
pub struct SessionEngine<'a> {
    session: &'a mut Session,
    validator: &'a FormValidator,
}

impl<'a> SessionEngine<'a> {
    pub fn new(session: &'a mut Session, validator: &'a FormValidator) -> Self {
        Self { session, validator }
    }

    pub fn dispatch(&mut self, action: SessionAction) -> Result<ActionOutcome, SessionError> {
        match action {
            SessionAction::FieldChanged { field, value } => self.field_changed(field, value),
            SessionAction::FieldBlurred { field } => self.field_blurred(field),
            SessionAction::ListOp { target, op } => self.list_op(target, op),
            SessionAction::RecordFieldChanged { field, value } => {
                self.record_field_changed(field, value)
            }
            SessionAction::Submit => self.submit(),
            SessionAction::SubmitSuccess { resume } => self.submit_success(resume),
            SessionAction::ServerErrors { error } => self.server_errors(error),
            SessionAction::Close => {
                *self.session = Session::Closed;
                debug!("session closed");
                Ok(ActionOutcome::Closed)
            }
        }
    }

    fn field_changed(
        &mut self,
        field: ScalarField,
        value: String,
    ) -> Result<ActionOutcome, SessionError> {
        let form = self.form_for_edit()?;
        match field {
            ScalarField::Title => form.context.title = value,
            ScalarField::Description => form.context.description = value,
        }
        form.fields.field_mut(field).edit = FieldEdit::Changing;
        Ok(ActionOutcome::Edited)
    }

    fn field_blurred(&mut self, field: ScalarField) -> Result<ActionOutcome, SessionError> {
        let validator = self.validator;
        let form = self.form_editable()?;
        if form.fields.field(field).edit != FieldEdit::Changing {
            return Ok(ActionOutcome::Noop);
        }
        match validator.validate_field(&form.context, field) {
            FieldValidity::Invalid { error } => {
                form.set_field_error(field, error);
                form.validity = FormValidity::Invalid;
                Ok(ActionOutcome::Edited)
            }
            _ => {
                let state = form.fields.field_mut(field);
                state.edit = FieldEdit::Changed;
                state.validity = FieldValidity::Valid;
                Ok(ActionOutcome::ScheduleSync)
            }
        }
    }

    fn list_op(&mut self, target: ListTarget, op: ListOp) -> Result<ActionOutcome, SessionError> {
        let form = self.form_for_edit()?;
        let applied = match target {
            ListTarget::Experiences => apply_record_op(&mut form.context.experiences, op)?,
            ListTarget::Education => apply_record_op(&mut form.context.education, op)?,
            ListTarget::ExperienceAchievements { record } => {
                let entry = entry_at_mut(&mut form.context.experiences, record)?;
                apply_string_op(&mut entry.achievements, op)?
            }
            ListTarget::EducationAchievements { record } => {
                let entry = entry_at_mut(&mut form.context.education, record)?;
                apply_string_op(&mut entry.achievements, op)?
            }
        };
        if !applied {
            return Ok(ActionOutcome::Noop);
        }
        form.touched.mark(target.list_field());
        Ok(ActionOutcome::ScheduleSync)
    }

    fn record_field_changed(
        &mut self,
        field: RecordFieldRef,
        value: String,
    ) -> Result<ActionOutcome, SessionError> {
        let form = self.form_for_edit()?;
        let list = match field {
            RecordFieldRef::Experience { position, field } => {
                let record = entry_at_mut(&mut form.context.experiences, position)?;
                match field {
                    ExperienceField::Position => record.position = value,
                    ExperienceField::CompanyName => record.company_name = value,
                    ExperienceField::FromDate => record.from_date = value,
                    ExperienceField::ToDate => record.to_date = value,
                }
                ListField::Experiences
            }
            RecordFieldRef::Education { position, field } => {
                let record = entry_at_mut(&mut form.context.education, position)?;
                match field {
                    EducationField::School => record.school = value,
                    EducationField::Course => record.course = value,
                    EducationField::FromDate => record.from_date = value,
                    EducationField::ToDate => record.to_date = value,
                }
                ListField::Education
            }
            RecordFieldRef::Achievement {
                list,
                record,
                entry,
            } => {
                let achievements = match list {
                    ListField::Experiences => {
                        &mut entry_at_mut(&mut form.context.experiences, record)?.achievements
                    }
                    ListField::Education => {
                        &mut entry_at_mut(&mut form.context.education, record)?.achievements
                    }
                };
                *entry_at_mut(achievements, entry)? = value;
                list
            }
        };
        form.touched.mark(list);
        Ok(ActionOutcome::ScheduleSync)
    }

    fn submit(&mut self) -> Result<ActionOutcome, SessionError> {
        let validator = self.validator;
        let payload = {
            let form = self.form_editable()?;
            let outcome = validator.validate_all(&form.context, &form.mode);
            form.apply_validation(&outcome);
            if !outcome.form_valid {
                debug!("submit rejected by validation");
                return Ok(ActionOutcome::SubmitRejected);
            }
            compute_submission_data(form)
        };
        match self.session.take() {
            Session::Editable(form) => *self.session = Session::Submitting(form),
            other => *self.session = other,
        }
        debug!("session submitting");
        Ok(ActionOutcome::SubmitReady(payload))
    }

    fn submit_success(&mut self, resume: ResumeDocument) -> Result<ActionOutcome, SessionError> {
        match self.session.take() {
            Session::Submitting(mut form) => {
                form.mode = Mode::Update { resume };
                form.touched = TouchedLists::default();
                *self.session = Session::SubmitSuccess(form);
                debug!("submission succeeded");
                Ok(ActionOutcome::Transitioned)
            }
            other => {
                *self.session = other;
                Err(SessionError::NotSubmitting)
            }
        }
    }

    fn server_errors(&mut self, error: SubmitError) -> Result<ActionOutcome, SessionError> {
        match self.session.take() {
            Session::Submitting(mut form) | Session::Editable(mut form) => {
                let errors = reconcile_server_errors(&mut form, &error);
                debug!(?errors, "submission rejected by server");
                *self.session = Session::ServerErrors { form, errors };
                Ok(ActionOutcome::Transitioned)
            }
            other => {
                *self.session = other;
                Err(SessionError::NotSubmitting)
            }
        }
    }

    /// Edit actions re-enter an error session: the user is correcting the
    /// form the server rejected.
    fn form_for_edit(&mut self) -> Result<&mut FormState, SessionError> {
        if matches!(self.session, Session::ServerErrors { .. })
            && let Session::ServerErrors { form, .. } = self.session.take()
        {
            *self.session = Session::Editable(form);
            debug!("server-error session re-entered editable");
        }
        self.form_editable()
    }

    fn form_editable(&mut self) -> Result<&mut FormState, SessionError> {
        match &mut *self.session {
            Session::Editable(form) => Ok(form),
            _ => Err(SessionError::NotEditable),
        }
    }
}

fn apply_record_op<T: IndexedRecord>(
    records: &mut Vec<T>,
    op: ListOp,
) -> Result<bool, ListOpError> {
    let next = match op {
        ListOp::Add { position } => insert_record(records, position)?,
        ListOp::Remove { position } => remove_record(records, position)?,
        ListOp::Swap { a, b } => swap_records(records, a, b)?,
        ListOp::MoveUp { position } => match move_record(records, position, -1)? {
            Some(next) => next,
            None => return Ok(false),
        },
        ListOp::MoveDown { position } => match move_record(records, position, 1)? {
            Some(next) => next,
            None => return Ok(false),
        },
    };
    *records = next;
    Ok(true)
}

fn apply_string_op(values: &mut Vec<String>, op: ListOp) -> Result<bool, ListOpError> {
    let next = match op {
        ListOp::Add { position } => insert_string(values, position)?,
        ListOp::Remove { position } => remove_string(values, position)?,
        ListOp::Swap { a, b } => swap_strings(values, a, b)?,
        ListOp::MoveUp { position } => match move_string(values, position, -1)? {
            Some(next) => next,
            None => return Ok(false),
        },
        ListOp::MoveDown { position } => match move_string(values, position, 1)? {
            Some(next) => next,
            None => return Ok(false),
        },
    };
    *values = next;
    Ok(true)
}

fn entry_at_mut<T>(entries: &mut [T], position: usize) -> Result<&mut T, ListOpError> {
    let len = entries.len();
    entries
        .get_mut(position)
        .ok_or(ListOpError::IndexOutOfRange { position, len })
}
