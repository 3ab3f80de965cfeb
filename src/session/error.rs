use thiserror::Error;

use crate::form::ListOpError;

/// Precondition failures of the session state machine. The session state is
/// never modified when an action is rejected.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session is not accepting edits")]
    NotEditable,
    #[error("no submission is in flight")]
    NotSubmitting,
    #[error(transparent)]
    List(#[from] ListOpError),
}
