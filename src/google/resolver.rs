//! Credential resolution
//!
//! Credentials come from one of two sources, tried in order:
//! 1. `GOOGLE_CLIENT_ID` / `GOOGLE_CLIENT_SECRET` (+ optional `GOOGLE_REDIRECT_URI`)
//! 2. A credentials JSON file, either the `installed` layout the Google Cloud
//!    console downloads or a flat `client_id` / `client_secret` object
//!
//! Nothing is cached. Every call re-reads the environment and the file.

use serde::Deserialize;
use serde_json::Value;
use std::io;

use super::config::{
    CLIENT_ID_VAR, CLIENT_SECRET_VAR, DEFAULT_REDIRECT_URI, REDIRECT_URI_VAR,
};
use super::credentials::{ClientCredentials, CredentialError, OAuthCredentials};
use super::env::{Environment, ProcessEnv};
use super::file::{CredentialsFile, LocalFile};

/// `{"installed": {...}}` section
#[derive(Debug, Deserialize)]
struct InstalledSection {
    client_id: String,
    client_secret: String,
    redirect_uris: Vec<String>,
}

/// Flat `{"client_id": ..., "client_secret": ...}` layout
#[derive(Debug, Deserialize)]
struct FlatCredentials {
    client_id: String,
    client_secret: String,
    #[serde(default)]
    redirect_uris: Option<Vec<String>>,
}

/// Parse the contents of a credentials file
pub fn parse_credentials_json(contents: &str) -> Result<OAuthCredentials, CredentialError> {
    let value: Value = serde_json::from_str(contents)?;

    let Some(object) = value.as_object() else {
        return Err(CredentialError::InvalidFormat(
            "expected a JSON object at the top level".to_string(),
        ));
    };

    if let Some(installed) = object.get("installed").filter(|v| v.is_object()) {
        if let Ok(section) = InstalledSection::deserialize(installed) {
            return OAuthCredentials::new(
                section.client_id,
                section.client_secret,
                section.redirect_uris,
            )
            .map_err(|reason| CredentialError::InvalidFormat(format!("installed.{}", reason)));
        }
    }

    if let Ok(flat) = FlatCredentials::deserialize(&value) {
        let redirect_uris = flat
            .redirect_uris
            .filter(|uris| !uris.is_empty())
            .unwrap_or_else(|| vec![DEFAULT_REDIRECT_URI.to_string()]);

        return OAuthCredentials::new(flat.client_id, flat.client_secret, redirect_uris)
            .map_err(|reason| CredentialError::InvalidFormat(reason.to_string()));
    }

    Err(CredentialError::InvalidFormat(
        "expected an \"installed\" object or top-level \"client_id\" and \"client_secret\""
            .to_string(),
    ))
}

/// Resolves credentials from an environment and a credentials file
#[derive(Debug, Clone)]
pub struct CredentialResolver<E, F> {
    env: E,
    file: F,
}

impl CredentialResolver<ProcessEnv, LocalFile> {
    /// Resolver over the live process environment and the default file path
    pub fn from_process() -> Self {
        Self::new(ProcessEnv, LocalFile::default())
    }
}

impl<E: Environment, F: CredentialsFile> CredentialResolver<E, F> {
    pub fn new(env: E, file: F) -> Self {
        Self { env, file }
    }

    /// Where the file source lives
    pub fn file_location(&self) -> String {
        self.file.location()
    }

    /// Read credentials from `GOOGLE_CLIENT_ID` / `GOOGLE_CLIENT_SECRET`
    ///
    /// Empty values count as missing. The redirect URI falls back to
    /// [`DEFAULT_REDIRECT_URI`] when `GOOGLE_REDIRECT_URI` is unset or empty.
    pub fn resolve_from_environment(&self) -> Result<OAuthCredentials, CredentialError> {
        let client_id = self.env.non_empty_var(CLIENT_ID_VAR);
        let client_secret = self.env.non_empty_var(CLIENT_SECRET_VAR);

        let (client_id, client_secret) = match (client_id, client_secret) {
            (Some(id), Some(secret)) => (id, secret),
            (None, Some(_)) => {
                return Err(CredentialError::MissingConfig(format!(
                    "{} is not set",
                    CLIENT_ID_VAR
                )))
            }
            (Some(_), None) => {
                return Err(CredentialError::MissingConfig(format!(
                    "{} is not set",
                    CLIENT_SECRET_VAR
                )))
            }
            (None, None) => {
                return Err(CredentialError::MissingConfig(format!(
                    "{} and {} are not set",
                    CLIENT_ID_VAR, CLIENT_SECRET_VAR
                )))
            }
        };

        let redirect_uri = self
            .env
            .non_empty_var(REDIRECT_URI_VAR)
            .unwrap_or_else(|| DEFAULT_REDIRECT_URI.to_string());

        OAuthCredentials::new(client_id, client_secret, vec![redirect_uri])
            .map_err(|reason| CredentialError::MissingConfig(reason.to_string()))
    }

    /// Read credentials from the credentials file
    pub async fn resolve_from_file(&self) -> Result<OAuthCredentials, CredentialError> {
        let contents = self.file.read_to_string().await.map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                CredentialError::FileNotFound {
                    path: self.file.location(),
                }
            } else {
                CredentialError::ReadError {
                    path: self.file.location(),
                    source: e,
                }
            }
        })?;

        parse_credentials_json(&contents)
    }

    /// Environment first, then the file
    ///
    /// The file is only read when the environment is unusable. If both fail the
    /// error carries both messages and how to fix them.
    pub async fn resolve_with_fallback(&self) -> Result<OAuthCredentials, CredentialError> {
        let env_error = match self.resolve_from_environment() {
            Ok(creds) => {
                log::info!("Google OAuth credentials loaded from environment variables");
                return Ok(creds);
            }
            Err(e) => e,
        };

        log::debug!(
            "Environment credentials unavailable ({}), trying {}",
            env_error,
            self.file.location()
        );

        match self.resolve_from_file().await {
            Ok(creds) => {
                log::info!(
                    "Google OAuth credentials loaded from {}",
                    self.file.location()
                );
                Ok(creds)
            }
            Err(file_error) => {
                log::warn!("No usable Google OAuth credentials found");
                Err(CredentialError::CredentialsUnavailable {
                    path: self.file.location(),
                    env: Box::new(env_error),
                    file: Box::new(file_error),
                })
            }
        }
    }

    /// Resolve and keep only the client id and secret
    pub async fn load_minimal_credentials(&self) -> Result<ClientCredentials, CredentialError> {
        let creds = ClientCredentials::from(self.resolve_with_fallback().await?);

        if creds.client_id.is_empty() {
            return Err(CredentialError::IncompleteCredentials(
                "client_id is empty".to_string(),
            ));
        }
        if creds.client_secret.is_empty() {
            return Err(CredentialError::IncompleteCredentials(
                "client_secret is empty".to_string(),
            ));
        }

        Ok(creds)
    }
}
