//! Credential configuration loading.
//!
//! Credentials come from a JSON file (by default under the platform config
//! directory) with `FLEXCHARGE_*` environment variables taking precedence.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use flexcharge::{ApiUrl, Credentials, DEFAULT_BASE_URL, TokenAuthenticator};

/// Connection settings for the billing API.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// API base URL; the production host when absent.
    pub base_url: Option<String>,
    pub company: String,
    pub username: String,
    pub password: String,
    pub client_id: String,
    pub client_secret: String,
}

impl Settings {
    /// Build an authenticator from these settings.
    pub fn authenticator(&self) -> Result<TokenAuthenticator> {
        let base = ApiUrl::new(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))
            .context("Invalid base URL")?;

        let credentials = Credentials::new(
            &self.company,
            &self.username,
            &self.password,
            &self.client_id,
            &self.client_secret,
        );

        Ok(TokenAuthenticator::new(base, credentials))
    }
}

/// Get the default credentials file path.
fn default_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("", "", "flexcharge").context("Could not determine config directory")?;

    Ok(dirs.config_dir().join("credentials.json"))
}

/// Load settings from the given file (or the default location) and apply
/// environment overrides.
pub fn load(path: Option<&Path>) -> Result<Settings> {
    let mut settings = match path {
        Some(path) => read(path)?,
        None => {
            let path = default_path()?;
            if path.exists() {
                read(&path)?
            } else {
                Settings::default()
            }
        }
    };

    apply_env(&mut settings);
    ensure_complete(&settings)?;

    Ok(settings)
}

fn read(path: &Path) -> Result<Settings> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read credentials file {}", path.display()))?;

    tracing::debug!(path = %path.display(), "loaded credentials file");

    serde_json::from_str(&json).context("Invalid credentials file")
}

fn apply_env(settings: &mut Settings) {
    if let Ok(value) = env::var("FLEXCHARGE_BASE_URL") {
        settings.base_url = Some(value);
    }
    for (var, field) in [
        ("FLEXCHARGE_COMPANY", &mut settings.company),
        ("FLEXCHARGE_USERNAME", &mut settings.username),
        ("FLEXCHARGE_PASSWORD", &mut settings.password),
        ("FLEXCHARGE_CLIENT_ID", &mut settings.client_id),
        ("FLEXCHARGE_CLIENT_SECRET", &mut settings.client_secret),
    ] {
        if let Ok(value) = env::var(var) {
            *field = value;
        }
    }
}

fn ensure_complete(settings: &Settings) -> Result<()> {
    let missing: Vec<&str> = [
        ("company", &settings.company),
        ("username", &settings.username),
        ("password", &settings.password),
        ("client_id", &settings.client_id),
        ("client_secret", &settings.client_secret),
    ]
    .into_iter()
    .filter(|(_, value)| value.is_empty())
    .map(|(name, _)| name)
    .collect();

    if !missing.is_empty() {
        bail!(
            "Missing credentials: {}. Provide a credentials file or FLEXCHARGE_* environment variables.",
            missing.join(", ")
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_settings() -> Settings {
        Settings {
            base_url: None,
            company: "acme".into(),
            username: "alice".into(),
            password: "pw".into(),
            client_id: "cid".into(),
            client_secret: "cs".into(),
        }
    }

    #[test]
    fn complete_settings_pass_validation() {
        assert!(ensure_complete(&complete_settings()).is_ok());
    }

    #[test]
    fn missing_fields_are_named() {
        let mut settings = complete_settings();
        settings.password = String::new();
        settings.client_secret = String::new();

        let err = ensure_complete(&settings).unwrap_err().to_string();
        assert!(err.contains("password"));
        assert!(err.contains("client_secret"));
        assert!(!err.contains("company,"));
    }

    #[test]
    fn reads_partial_credentials_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        fs::write(&path, r#"{"company": "acme", "username": "alice"}"#).unwrap();

        let settings = read(&path).unwrap();
        assert_eq!(settings.company, "acme");
        assert!(settings.password.is_empty());
    }

    #[test]
    fn authenticator_uses_production_host_by_default() {
        let auth = complete_settings().authenticator().unwrap();
        assert_eq!(auth.base().host(), Some("api.billercentral.com"));
    }
}
