mod actions;
mod engine;
mod error;
mod server_errors;
mod state;

pub use actions::{
    ActionOutcome, EducationField, ExperienceField, ListOp, ListTarget, RecordFieldRef,
    SessionAction,
};
pub use engine::SessionEngine;
pub use error::SessionError;
pub use server_errors::{
    ResumeFieldErrors, ServerErrorState, SubmitError, reconcile_server_errors,
};
pub use state::Session;
