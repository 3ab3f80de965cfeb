mod context;
mod diff;
mod error;
mod field;
mod mode;
mod records;
mod state;
mod strings;

pub use context::FormContext;
pub use diff::compute_submission_data;
pub use error::ListOpError;
pub use field::{
    FieldEdit, FieldState, FieldValidity, FormFields, FormValidity, ListField, ScalarField,
    TouchedLists,
};
pub use mode::Mode;
pub use records::{
    IndexedRecord, insert_record, move_record, remove_record, replace_list_payload, swap_records,
};
pub use state::FormState;
pub use strings::{insert_string, move_string, remove_string, swap_strings};
