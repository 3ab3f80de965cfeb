use super::error::{ListOpError, ensure_in_range};

/// Insert an empty string immediately after `position` (at the front of an
/// empty list). String lists carry no persisted identity, so there is no
/// renumbering; the full array is always the emitted representation.
pub fn insert_string(values: &[String], position: usize) -> Result<Vec<String>, ListOpError> {
    if values.is_empty() {
        return Ok(vec![String::new()]);
    }
    ensure_in_range(position, values.len())?;
    let mut next = values.to_vec();
    next.insert(position + 1, String::new());
    Ok(next)
}

pub fn remove_string(values: &[String], position: usize) -> Result<Vec<String>, ListOpError> {
    ensure_in_range(position, values.len())?;
    let mut next = values.to_vec();
    next.remove(position);
    Ok(next)
}

pub fn swap_strings(values: &[String], a: usize, b: usize) -> Result<Vec<String>, ListOpError> {
    ensure_in_range(a, values.len())?;
    ensure_in_range(b, values.len())?;
    let mut next = values.to_vec();
    next.swap(a, b);
    Ok(next)
}

/// Adjacent swap towards `delta`. `Ok(None)` when the target position falls
/// off either end of the list.
pub fn move_string(
    values: &[String],
    position: usize,
    delta: i32,
) -> Result<Option<Vec<String>>, ListOpError> {
    ensure_in_range(position, values.len())?;
    let target = position as i32 + delta;
    if target < 0 || target >= values.len() as i32 {
        return Ok(None);
    }
    swap_strings(values, position, target as usize).map(Some)
}
