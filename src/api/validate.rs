//! Local checks run before any request is sent, mirroring the limits documented by Todoist.
use crate::error::{Error, Result};

/// Maximum page size accepted by every paginated endpoint.
pub const MAX_PAGE_LIMIT: u32 = 200;

/// Implemented by every request payload with documented bounds.
pub trait Validate {
    /// Fails with [`Error::Validation`] if any field is out of bounds.
    fn validate(&self) -> Result<()>;
}

pub(crate) fn length(field: &str, value: &str, min: usize, max: usize) -> Result<()> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(Error::validation(format!(
            "`{field}` must be between {min} and {max} characters long, got {len}"
        )));
    }
    Ok(())
}

pub(crate) fn optional_length(field: &str, value: Option<&str>, min: usize, max: usize) -> Result<()> {
    value.map_or(Ok(()), |v| length(field, v, min, max))
}

pub(crate) fn each_length(field: &str, values: Option<&[String]>, max: usize) -> Result<()> {
    for value in values.unwrap_or_default() {
        length(field, value, 0, max)?;
    }
    Ok(())
}

pub(crate) fn language_code(field: &str, value: Option<&str>) -> Result<()> {
    match value {
        Some(code) if code.chars().count() != 2 => Err(Error::validation(format!(
            "`{field}` must be a two letter language code, got {code:?}"
        ))),
        _ => Ok(()),
    }
}

pub(crate) fn at_least(field: &str, value: Option<u32>, min: u32) -> Result<()> {
    match value {
        Some(v) if v < min => Err(Error::validation(format!(
            "`{field}` must be at least {min}, got {v}"
        ))),
        _ => Ok(()),
    }
}

/// Checks the page size of a listing.
pub(crate) fn limit(value: Option<u32>) -> Result<()> {
    match value {
        Some(v) if !(1..=MAX_PAGE_LIMIT).contains(&v) => Err(Error::validation(format!(
            "`limit` must be between 1 and {MAX_PAGE_LIMIT}, got {v}"
        ))),
        _ => Ok(()),
    }
}

/// Fails unless at least one of the named optional values is set.
pub(crate) fn one_of(fields: &[(&str, bool)]) -> Result<()> {
    if fields.iter().any(|(_, set)| *set) {
        return Ok(());
    }
    let names: Vec<_> = fields.iter().map(|(name, _)| format!("`{name}`")).collect();
    Err(Error::validation(format!(
        "at least one of {} must be provided",
        names.join(", ")
    )))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn lengths_count_characters() {
        assert!(length("name", "héllo", 1, 5).is_ok());
        assert!(length("name", "", 1, 5).is_err());
        assert!(length("name", "abcdef", 1, 5).is_err());
        assert!(optional_length("name", None, 1, 5).is_ok());
    }

    #[test]
    fn limits() {
        assert!(limit(None).is_ok());
        assert!(limit(Some(1)).is_ok());
        assert!(limit(Some(200)).is_ok());
        assert!(matches!(limit(Some(0)), Err(Error::Validation(_))));
        assert!(matches!(limit(Some(201)), Err(Error::Validation(_))));
    }

    #[test]
    fn language_codes() {
        assert!(language_code("due_lang", Some("en")).is_ok());
        assert!(language_code("due_lang", Some("eng")).is_err());
        assert!(language_code("due_lang", None).is_ok());
    }

    #[test]
    fn one_of_requires_any() {
        assert!(one_of(&[("project_id", false), ("task_id", true)]).is_ok());
        let err = one_of(&[("project_id", false), ("task_id", false)]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid input: at least one of `project_id`, `task_id` must be provided"
        );
    }
}
