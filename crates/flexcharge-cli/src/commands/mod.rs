//! Subcommand implementations.

pub mod contracts;
pub mod orders;

use std::path::Path;

use anyhow::{Context, Result};

use flexcharge::Customer;

/// Load a customer record from a JSON file.
pub fn load_customer(path: &Path) -> Result<Customer> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read customer file {}", path.display()))?;

    serde_json::from_str(&json).context("Invalid customer file")
}

/// Parse a `key=value` query parameter argument.
pub fn parse_param(raw: &str) -> Result<(String, String)> {
    let (key, value) = raw
        .split_once('=')
        .with_context(|| format!("Invalid parameter '{raw}', expected key=value"))?;

    Ok((key.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_key_value_params() {
        assert_eq!(
            parse_param("status=active").unwrap(),
            ("status".to_string(), "active".to_string())
        );
        assert!(parse_param("nonsense").is_err());
    }
}
