//! Field-scoped validation errors and form input parsing.
//!
//! Forms collect every problem before reporting back, so a submit attempt
//! shows all offending fields at once instead of one per round trip.

use std::collections::BTreeMap;

use serde::Serialize;

/// Mapping from form field name to a user-facing message.
///
/// A later message for the same field replaces the earlier one, matching how
/// a form shows a single message under each input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// A single-field error, typically from mapping a server rejection.
    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.insert(field, message);
        errors
    }

    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Clears the message for one field (the user edited that input).
    pub fn clear_field(&mut self, field: &str) {
        self.0.remove(field);
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// `Ok(value)` when no field failed, otherwise the collected errors.
    pub fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, FieldErrors> {
        if self.is_empty() { Ok(value()) } else { Err(self) }
    }
}

impl core::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// Outcome of reading an integer typed into a text/number input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegerInput {
    /// Nothing (or only whitespace) was entered.
    Empty,
    /// Something was entered but it is not a whole number (`2.5`, `abc`).
    NotInteger,
    Value(i64),
}

/// Parses form input as a whole number.
///
/// Decimal notation is rejected even when the fraction is zero: quantities
/// and thresholds are counted in units.
pub fn parse_integer(input: &str) -> IntegerInput {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return IntegerInput::Empty;
    }
    match trimmed.parse::<i64>() {
        Ok(value) => IntegerInput::Value(value),
        Err(_) => IntegerInput::NotInteger,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_message_replaces_earlier_one() {
        let mut errors = FieldErrors::new();
        errors.insert("cantidad", "first");
        errors.insert("cantidad", "second");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("cantidad"), Some("second"));
    }

    #[test]
    fn clear_field_removes_only_that_field() {
        let mut errors = FieldErrors::new();
        errors.insert("sku", "required");
        errors.insert("nombre", "required");
        errors.clear_field("sku");
        assert!(!errors.contains("sku"));
        assert!(errors.contains("nombre"));
    }

    #[test]
    fn into_result_only_builds_value_when_clean() {
        assert_eq!(FieldErrors::new().into_result(|| 5), Ok(5));
        let err = FieldErrors::single("x", "bad").into_result(|| 5).unwrap_err();
        assert_eq!(err.to_string(), "x: bad");
    }

    #[test]
    fn parse_integer_classifies_input() {
        assert_eq!(parse_integer(""), IntegerInput::Empty);
        assert_eq!(parse_integer("   "), IntegerInput::Empty);
        assert_eq!(parse_integer("12"), IntegerInput::Value(12));
        assert_eq!(parse_integer(" -4 "), IntegerInput::Value(-4));
        assert_eq!(parse_integer("2.5"), IntegerInput::NotInteger);
        assert_eq!(parse_integer("3.0"), IntegerInput::NotInteger);
        assert_eq!(parse_integer("diez"), IntegerInput::NotInteger);
    }
}
