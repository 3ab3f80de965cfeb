use thiserror::Error;

/// Failure of a structural list operation. Signals a caller bug; the list the
/// operation was applied to is never partially mutated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListOpError {
    #[error("list position {position} is out of range for {len} entries")]
    IndexOutOfRange { position: usize, len: usize },
}

pub(crate) fn ensure_in_range(position: usize, len: usize) -> Result<(), ListOpError> {
    if position >= len {
        return Err(ListOpError::IndexOutOfRange { position, len });
    }
    Ok(())
}
