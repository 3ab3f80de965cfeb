use crate::domain::{ResumeDocument, UpdateResumeInput};
use crate::form::{ListField, ScalarField};

use super::server_errors::SubmitError;

/// One input into the session state machine. Actions originate from the
/// rendering collaborator (edits, blurs, list controls), the host surface
/// (submit, close) or the submit collaborator (success, server errors).
#[derive(Debug)]
pub enum SessionAction {
    FieldChanged {
        field: ScalarField,
        value: String,
    },
    FieldBlurred {
        field: ScalarField,
    },
    ListOp {
        target: ListTarget,
        op: ListOp,
    },
    RecordFieldChanged {
        field: RecordFieldRef,
        value: String,
    },
    Submit,
    SubmitSuccess {
        resume: ResumeDocument,
    },
    ServerErrors {
        error: SubmitError,
    },
    Close,
}

/// Which list a structural operation addresses: a record list itself, or the
/// achievements list nested inside one of its records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListTarget {
    Experiences,
    Education,
    ExperienceAchievements { record: usize },
    EducationAchievements { record: usize },
}

impl ListTarget {
    pub fn list_field(self) -> ListField {
        match self {
            ListTarget::Experiences | ListTarget::ExperienceAchievements { .. } => {
                ListField::Experiences
            }
            ListTarget::Education | ListTarget::EducationAchievements { .. } => {
                ListField::Education
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOp {
    Add { position: usize },
    Remove { position: usize },
    MoveUp { position: usize },
    MoveDown { position: usize },
    Swap { a: usize, b: usize },
}

/// Addresses a scalar value inside a list record: one of the record's own
/// fields, or one achievement entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFieldRef {
    Experience {
        position: usize,
        field: ExperienceField,
    },
    Education {
        position: usize,
        field: EducationField,
    },
    Achievement {
        list: ListField,
        record: usize,
        entry: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperienceField {
    Position,
    CompanyName,
    FromDate,
    ToDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EducationField {
    School,
    Course,
    FromDate,
    ToDate,
}

/// What the dispatcher wants the host to do next.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    /// Nothing changed (blur of an untouched field, boundary move).
    Noop,
    /// State changed without a synchronization trigger.
    Edited,
    /// A validated edit or list change wants a debounced submit.
    ScheduleSync,
    /// Validation passed; the session is submitting and this payload should
    /// go to the submit collaborator.
    SubmitReady(UpdateResumeInput),
    /// Validation failed; the session stayed editable and no network call
    /// may be made.
    SubmitRejected,
    /// A lifecycle transition was applied (success, server errors).
    Transitioned,
    Closed,
}
