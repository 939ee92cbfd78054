//! Contract identifier type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A server-assigned contract identifier.
///
/// Contract ids are assigned by the billing API and returned in the
/// `resource_id` response header when a contract is created. They are
/// treated as opaque strings.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContractId(String);

impl ContractId {
    /// Create a contract id from its string form.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ContractId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ContractId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_raw_id() {
        let id = ContractId::new("4711");
        assert_eq!(id.to_string(), "4711");
        assert_eq!(id.as_str(), "4711");
    }

    #[test]
    fn serializes_transparently() {
        let id = ContractId::new("abc-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc-1\"");
    }
}
