//! Field-level predicates shared by the entity validators.
//!
//! Lengths are counted in characters, not bytes.

use crate::errors::ModelError;

pub fn check_len(field: &str, value: &str, min: usize, max: usize) -> Result<(), ModelError> {
    let n = value.chars().count();
    if n < min || n > max {
        return Err(ModelError::invalid(format!(
            "{field} must be between {min} and {max} characters (got {n})"
        )));
    }
    Ok(())
}

pub fn check_range(field: &str, value: i32, min: i32, max: i32) -> Result<(), ModelError> {
    if !(min..=max).contains(&value) {
        return Err(ModelError::invalid(format!("{field} must be between {min} and {max} (got {value})")));
    }
    Ok(())
}
