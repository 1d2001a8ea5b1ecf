//! Credential records and the error type shared by every resolution step

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use super::config::{CLIENT_ID_VAR, CLIENT_SECRET_VAR, REDIRECT_URI_VAR};

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("Missing configuration: {0}")]
    MissingConfig(String),
    #[error("Invalid credentials file format: {0}")]
    InvalidFormat(String),
    #[error("Credentials file not found at {path}")]
    FileNotFound { path: String },
    #[error("Failed to read credentials file {path}: {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON parsing error: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error(
        "Google OAuth credentials unavailable. Set {id} and {secret} (optionally {redirect}), \
         or place a credentials JSON file at {path}. Env: {env}. File: {file}",
        id = CLIENT_ID_VAR,
        secret = CLIENT_SECRET_VAR,
        redirect = REDIRECT_URI_VAR
    )]
    CredentialsUnavailable {
        path: String,
        env: Box<CredentialError>,
        file: Box<CredentialError>,
    },
    #[error("Failed to initialize OAuth2 client: {0}")]
    ClientInitialization(String),
    #[error("Incomplete credentials: {0}")]
    IncompleteCredentials(String),
}

/// A resolved OAuth client configuration
///
/// Only constructed through [`OAuthCredentials::new`], so `client_id`,
/// `client_secret` and `redirect_uris` are never empty.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct OAuthCredentials {
    client_id: String,
    #[serde(skip_serializing)]
    client_secret: String,
    redirect_uris: Vec<String>,
}

impl OAuthCredentials {
    /// Validate and build a credentials record
    ///
    /// Returns the name of the first offending field on failure so callers can
    /// wrap it in the error variant that fits their source.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uris: Vec<String>,
    ) -> Result<Self, &'static str> {
        let client_id = client_id.into();
        let client_secret = client_secret.into();

        if client_id.is_empty() {
            return Err("client_id is empty");
        }
        if client_secret.is_empty() {
            return Err("client_secret is empty");
        }
        if redirect_uris.is_empty() {
            return Err("redirect_uris is empty");
        }

        Ok(Self {
            client_id,
            client_secret,
            redirect_uris,
        })
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    pub fn redirect_uris(&self) -> &[String] {
        &self.redirect_uris
    }

    /// The redirect URI used when building a client
    pub fn default_redirect_uri(&self) -> &str {
        // non-empty by construction
        &self.redirect_uris[0]
    }
}

impl fmt::Debug for OAuthCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[redacted]")
            .field("redirect_uris", &self.redirect_uris)
            .finish()
    }
}

/// Client id and secret without redirect URIs
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct ClientCredentials {
    pub client_id: String,
    #[serde(skip_serializing)]
    pub client_secret: String,
}

impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[redacted]")
            .finish()
    }
}

impl From<OAuthCredentials> for ClientCredentials {
    fn from(creds: OAuthCredentials) -> Self {
        Self {
            client_id: creds.client_id,
            client_secret: creds.client_secret,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uris() -> Vec<String> {
        vec!["http://x/cb".to_string()]
    }

    #[test]
    fn test_new_rejects_empty_fields() {
        assert_eq!(
            OAuthCredentials::new("", "secret", uris()).unwrap_err(),
            "client_id is empty"
        );
        assert_eq!(
            OAuthCredentials::new("id", "", uris()).unwrap_err(),
            "client_secret is empty"
        );
        assert_eq!(
            OAuthCredentials::new("id", "secret", vec![]).unwrap_err(),
            "redirect_uris is empty"
        );
    }

    #[test]
    fn test_default_redirect_is_first() {
        let creds = OAuthCredentials::new(
            "id",
            "secret",
            vec!["http://first/cb".to_string(), "http://second/cb".to_string()],
        )
        .unwrap();
        assert_eq!(creds.default_redirect_uri(), "http://first/cb");
    }

    #[test]
    fn test_secret_hidden_from_debug_and_json() {
        let creds = OAuthCredentials::new("id", "hunter2", uris()).unwrap();

        let debug = format!("{:?}", creds);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("[redacted]"));

        let json = serde_json::to_string(&creds).unwrap();
        assert!(!json.contains("hunter2"));
        assert!(json.contains("\"client_id\":\"id\""));
    }

    #[test]
    fn test_minimal_drops_redirects() {
        let creds = OAuthCredentials::new("id", "secret", uris()).unwrap();
        let minimal = ClientCredentials::from(creds);
        assert_eq!(minimal.client_id, "id");
        assert_eq!(minimal.client_secret, "secret");
    }

    #[test]
    fn test_unavailable_message_labels_both_sources() {
        let err = CredentialError::CredentialsUnavailable {
            path: "/tmp/credentials.json".to_string(),
            env: Box::new(CredentialError::MissingConfig("GOOGLE_CLIENT_ID is not set".to_string())),
            file: Box::new(CredentialError::FileNotFound {
                path: "/tmp/credentials.json".to_string(),
            }),
        };
        let message = err.to_string();
        assert!(message.contains("Set GOOGLE_CLIENT_ID and GOOGLE_CLIENT_SECRET"));
        assert!(message.contains("Env: Missing configuration: GOOGLE_CLIENT_ID is not set"));
        assert!(message.contains("File: Credentials file not found at /tmp/credentials.json"));
    }
}
