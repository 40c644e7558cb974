use std::str::FromStr;

use log::warn;

use crate::error::FieldError;

// ---------------------------------------------------------------------------
// Field parsing – explicit outcomes, lenient substitution decided by caller
// ---------------------------------------------------------------------------

/// Parse one trimmed text field. `field` names the value in diagnostics.
pub fn parse_field<T>(field: &str, raw: &str) -> Result<T, FieldError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| FieldError::new(field, raw, e))
}

/// Collects every field that was replaced by its zero default during a run.
#[derive(Debug, Default, Clone)]
pub struct Substitutions {
    issues: Vec<FieldError>,
}

impl Substitutions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unwrap a parse outcome, or log it and fall back to `T::default()`.
    pub fn take<T: Default>(&mut self, outcome: Result<T, FieldError>) -> T {
        match outcome {
            Ok(v) => v,
            Err(e) => {
                warn!("{e}; using 0");
                self.issues.push(e);
                T::default()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn issues(&self) -> &[FieldError] {
        &self.issues
    }

    pub fn into_issues(self) -> Vec<FieldError> {
        self.issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_trimmed_floats() {
        let v: f64 = parse_field("signal", "  12.5\r").unwrap();
        assert_eq!(v, 12.5);
    }

    #[test]
    fn failure_keeps_raw_text() {
        let err = parse_field::<i32>("angle", "9O").unwrap_err();
        assert_eq!(err.field, "angle");
        assert_eq!(err.raw, "9O");
    }

    #[test]
    fn take_substitutes_zero_and_records() {
        let mut subs = Substitutions::new();
        let ok: f64 = subs.take(parse_field("a", "3"));
        let bad: f64 = subs.take(parse_field("b", "x"));
        assert_eq!(ok, 3.0);
        assert_eq!(bad, 0.0);
        assert_eq!(subs.len(), 1);
        assert_eq!(subs.issues()[0].field, "b");
    }
}
