use tracing::trace;

use crate::domain::{Education, Experience};

use super::error::{ListOpError, ensure_in_range};

/// A record carrying a persisted index: the ordering hint the remote store
/// attached to the entry. It is not the array position; a freshly loaded
/// document may carry sparse or non-contiguous indices, and an entry keeps
/// its index until an operation moves it.
pub trait IndexedRecord: Clone {
    fn persisted_index(&self) -> i32;
    fn set_persisted_index(&mut self, index: i32);
    fn empty_record() -> Self;
}

impl IndexedRecord for Experience {
    fn persisted_index(&self) -> i32 {
        self.index
    }

    fn set_persisted_index(&mut self, index: i32) {
        self.index = index;
    }

    fn empty_record() -> Self {
        Self::default()
    }
}

impl IndexedRecord for Education {
    fn persisted_index(&self) -> i32 {
        self.index
    }

    fn set_persisted_index(&mut self, index: i32) {
        self.index = index;
    }

    fn empty_record() -> Self {
        Self::default()
    }
}

/// Insert an empty record immediately after `position` (at the front of an
/// empty list). Entries shifted right are renumbered to their new position
/// plus one; entries at or before `position` keep their persisted index.
pub fn insert_record<T: IndexedRecord>(
    records: &[T],
    position: usize,
) -> Result<Vec<T>, ListOpError> {
    if records.is_empty() {
        let mut entry = T::empty_record();
        entry.set_persisted_index(1);
        return Ok(vec![entry]);
    }
    ensure_in_range(position, records.len())?;

    let mut next = Vec::with_capacity(records.len() + 1);
    next.extend_from_slice(&records[..=position]);

    let mut entry = T::empty_record();
    entry.set_persisted_index(position as i32 + 2);
    next.push(entry);

    for (offset, record) in records[position + 1..].iter().enumerate() {
        let mut shifted = record.clone();
        let new_position = position + 2 + offset;
        shifted.set_persisted_index(new_position as i32 + 1);
        next.push(shifted);
    }
    Ok(next)
}

/// Delete the record at `position`. Entries shifted left are renumbered to
/// their new position plus one; earlier entries keep their persisted index.
pub fn remove_record<T: IndexedRecord>(
    records: &[T],
    position: usize,
) -> Result<Vec<T>, ListOpError> {
    ensure_in_range(position, records.len())?;

    let mut next = Vec::with_capacity(records.len() - 1);
    next.extend_from_slice(&records[..position]);
    for (offset, record) in records[position + 1..].iter().enumerate() {
        let mut shifted = record.clone();
        shifted.set_persisted_index((position + offset) as i32 + 1);
        next.push(shifted);
    }
    Ok(next)
}

/// Exchange the records at `a` and `b`. Only the two swapped records are
/// renumbered; every other entry is untouched.
pub fn swap_records<T: IndexedRecord>(
    records: &[T],
    a: usize,
    b: usize,
) -> Result<Vec<T>, ListOpError> {
    ensure_in_range(a, records.len())?;
    ensure_in_range(b, records.len())?;

    let mut next = records.to_vec();
    if a != b {
        next.swap(a, b);
        next[a].set_persisted_index(a as i32 + 1);
        next[b].set_persisted_index(b as i32 + 1);
    }
    Ok(next)
}

/// Adjacent swap towards `delta`. `Ok(None)` when the target position falls
/// off either end of the list.
pub fn move_record<T: IndexedRecord>(
    records: &[T],
    position: usize,
    delta: i32,
) -> Result<Option<Vec<T>>, ListOpError> {
    ensure_in_range(position, records.len())?;
    let target = position as i32 + delta;
    if target < 0 || target >= records.len() as i32 {
        return Ok(None);
    }
    swap_records(records, position, target as usize).map(Some)
}

/// The wire representation of a structurally changed list: the full `after`
/// list. No per-item patches are attempted; entries that kept their position
/// still carry their original persisted index, so the receiver can recognize
/// no-op entries.
pub fn replace_list_payload<T: Clone + PartialEq>(before: &[T], after: &[T]) -> Vec<T> {
    let unchanged = after
        .iter()
        .zip(before.iter())
        .filter(|(next, prev)| next == prev)
        .count();
    trace!(unchanged, total = after.len(), "emitting full list replacement");
    after.to_vec()
}
