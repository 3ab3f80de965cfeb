#![deny(rust_2018_idioms)]

mod domain;
mod form;
mod session;
mod sync;
mod validate;

pub use domain::{Education, Experience, ResumeDocument, UpdateResumeInput};
pub use form::{
    FieldEdit, FieldState, FieldValidity, FormContext, FormFields, FormState, FormValidity,
    IndexedRecord, ListField, ListOpError, Mode, ScalarField, TouchedLists,
    compute_submission_data, insert_record, insert_string, move_record, move_string,
    remove_record, remove_string, replace_list_payload, swap_records, swap_strings,
};
pub use session::{
    ActionOutcome, EducationField, ExperienceField, ListOp, ListTarget, RecordFieldRef,
    ResumeFieldErrors, ServerErrorState, Session, SessionAction, SessionEngine, SessionError,
    SubmitError, reconcile_server_errors,
};
pub use sync::{ChangeSynchronizer, SubmitResume};
pub use validate::{FormValidator, ValidationOutcome};

pub mod prelude {
    pub use super::{
        ChangeSynchronizer, FormValidator, Mode, ResumeDocument, Session, SessionAction,
        SessionEngine, SubmitResume,
    };
}
