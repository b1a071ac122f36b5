//! Value objects: equality by value, not identity.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values; to
/// "change" one, build a new one.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

/// Stock-keeping unit: the unique, human-entered product code.
///
/// Surrounding whitespace is dropped; uniqueness is enforced by the API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sku(String);

impl Sku {
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("sku cannot be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for Sku {}

impl core::fmt::Display for Sku {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// An email-shaped login identifier (`local@domain.tld`).
///
/// This is a shape check only; deliverability is not our concern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let trimmed = raw.trim();
        if !is_email_shaped(trimmed) {
            return Err(DomainError::validation(format!("'{trimmed}' is not an email address")));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for Email {}

impl core::fmt::Display for Email {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_email_shaped(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.rsplit_once('@') else {
        return false;
    };
    if local.is_empty() {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sku_is_trimmed_and_required() {
        assert_eq!(Sku::parse("  SKU-001 ").unwrap().as_str(), "SKU-001");
        assert!(Sku::parse("   ").is_err());
    }

    #[test]
    fn email_shape() {
        assert!(Email::parse("ana@empresa.mx").is_ok());
        assert!(Email::parse(" ana@empresa.com.mx ").is_ok());
        assert!(Email::parse("ana@empresa").is_err());
        assert!(Email::parse("@empresa.mx").is_err());
        assert!(Email::parse("ana@.mx").is_err());
        assert!(Email::parse("ana maria@empresa.mx").is_err());
        assert!(Email::parse("").is_err());
    }
}
