//! Interchange hub types.

use std::fmt;

use super::{Coordinate, DomainError};

/// Identifier of a hub (e.g. `dmrt_agargaon`).
///
/// Never empty and never padded with whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HubId(String);

impl HubId {
    /// Parse a hub id, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidHub("id must not be empty"));
        }
        Ok(HubId(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HubId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named interchange point where a connector trip meets the trunk.
#[derive(Debug, Clone, PartialEq)]
pub struct Hub {
    pub id: HubId,
    pub name: String,
    pub coordinate: Coordinate,
}

impl Hub {
    /// Create a hub. The name must not be blank.
    pub fn new(
        id: HubId,
        name: impl Into<String>,
        coordinate: Coordinate,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::InvalidHub("name must not be empty"));
        }
        Ok(Self {
            id,
            name,
            coordinate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hub_id_trims() {
        let id = HubId::parse("  dhk_farmgate ").unwrap();
        assert_eq!(id.as_str(), "dhk_farmgate");
        assert_eq!(id.to_string(), "dhk_farmgate");
    }

    #[test]
    fn hub_id_rejects_blank() {
        assert!(HubId::parse("").is_err());
        assert!(HubId::parse("   ").is_err());
    }

    #[test]
    fn hub_rejects_blank_name() {
        let id = HubId::parse("x").unwrap();
        let c = Coordinate::new(0.0, 0.0).unwrap();
        assert_eq!(
            Hub::new(id, " ", c),
            Err(DomainError::InvalidHub("name must not be empty"))
        );
    }
}
