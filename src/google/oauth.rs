//! Google OAuth 2.0 client construction
//!
//! Builds an `oauth2` client from resolved credentials. Running the
//! authorization flow is left to the caller.

use oauth2::basic::BasicClient;
use oauth2::{
    AuthUrl, ClientId, ClientSecret, EndpointNotSet, EndpointSet, RedirectUrl, TokenUrl,
};
use std::fmt;

use super::config::{GOOGLE_AUTH_URL, GOOGLE_TOKEN_URL};
use super::credentials::{ClientCredentials, CredentialError, OAuthCredentials};
use super::env::Environment;
use super::file::CredentialsFile;
use super::resolver::CredentialResolver;

/// `BasicClient` with the auth and token endpoints set
pub type GoogleBasicClient =
    BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

/// An OAuth2 client configured for Google
pub struct GoogleOAuthClient {
    inner: GoogleBasicClient,
    client_id: String,
    redirect_uri: String,
}

impl GoogleOAuthClient {
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// The redirect URI the client was configured with
    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    /// The underlying `oauth2` client, for running authorization flows
    pub fn inner(&self) -> &GoogleBasicClient {
        &self.inner
    }

    pub fn into_inner(self) -> GoogleBasicClient {
        self.inner
    }
}

impl fmt::Debug for GoogleOAuthClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleOAuthClient")
            .field("client_id", &self.client_id)
            .field("redirect_uri", &self.redirect_uri)
            .finish_non_exhaustive()
    }
}

/// Build a Google OAuth2 client from resolved credentials
///
/// Uses the first redirect URI.
pub fn build_client(creds: &OAuthCredentials) -> Result<GoogleOAuthClient, CredentialError> {
    let redirect_uri = creds.default_redirect_uri().to_string();

    let auth_url = AuthUrl::new(GOOGLE_AUTH_URL.to_string())
        .map_err(|e| CredentialError::ClientInitialization(format!("Invalid auth URL: {}", e)))?;
    let token_url = TokenUrl::new(GOOGLE_TOKEN_URL.to_string())
        .map_err(|e| CredentialError::ClientInitialization(format!("Invalid token URL: {}", e)))?;
    let redirect_url = RedirectUrl::new(redirect_uri.clone()).map_err(|e| {
        CredentialError::ClientInitialization(format!(
            "Invalid redirect URI '{}': {}",
            redirect_uri, e
        ))
    })?;

    let inner = BasicClient::new(ClientId::new(creds.client_id().to_string()))
        .set_client_secret(ClientSecret::new(creds.client_secret().to_string()))
        .set_auth_uri(auth_url)
        .set_token_uri(token_url)
        .set_redirect_uri(redirect_url);

    log::debug!("OAuth2 client built with redirect URI {}", redirect_uri);

    Ok(GoogleOAuthClient {
        inner,
        client_id: creds.client_id().to_string(),
        redirect_uri,
    })
}

/// Resolve credentials through `resolver` and build a client
///
/// Every failure, whether resolution or construction, comes back as a single
/// `ClientInitialization` error.
pub async fn initialize_client<E, F>(
    resolver: &CredentialResolver<E, F>,
) -> Result<GoogleOAuthClient, CredentialError>
where
    E: Environment,
    F: CredentialsFile,
{
    resolver
        .resolve_with_fallback()
        .await
        .and_then(|creds| build_client(&creds))
        .map_err(|e| match e {
            CredentialError::ClientInitialization(_) => e,
            other => CredentialError::ClientInitialization(other.to_string()),
        })
}

/// Build a Google OAuth2 client from the process environment or the default
/// credentials file
///
/// Always resolves live. Tests should go through [`initialize_client`] with an
/// injected environment and file instead.
pub async fn initialize_oauth2_client() -> Result<GoogleOAuthClient, CredentialError> {
    initialize_client(&CredentialResolver::from_process()).await
}

/// Load the client id and secret from the process environment or the default
/// credentials file
pub async fn load_credentials() -> Result<ClientCredentials, CredentialError> {
    CredentialResolver::from_process()
        .load_minimal_credentials()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::google::file::LocalFile;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn creds(redirect: &str) -> OAuthCredentials {
        OAuthCredentials::new("abc", "xyz", vec![redirect.to_string(), "http://other/cb".to_string()])
            .unwrap()
    }

    #[test]
    fn test_build_client_uses_first_redirect() {
        let client = build_client(&creds("http://localhost:3000/oauth2callback")).unwrap();

        assert_eq!(client.client_id(), "abc");
        assert_eq!(client.redirect_uri(), "http://localhost:3000/oauth2callback");
    }

    #[test]
    fn test_build_client_rejects_bad_redirect() {
        match build_client(&creds("not a url")) {
            Err(CredentialError::ClientInitialization(msg)) => {
                assert!(msg.contains("not a url"))
            }
            other => panic!("expected ClientInitialization, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_initialize_client_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials.json");
        std::fs::write(
            &path,
            r#"{"installed":{"client_id":"a","client_secret":"b","redirect_uris":["http://x/cb"]}}"#,
        )
        .unwrap();

        let resolver = CredentialResolver::new(HashMap::<String, String>::new(), LocalFile::new(&path));
        let client = initialize_client(&resolver).await.unwrap();

        assert_eq!(client.client_id(), "a");
        assert_eq!(client.redirect_uri(), "http://x/cb");
    }

    #[tokio::test]
    async fn test_initialize_client_wraps_resolution_failure() {
        let dir = TempDir::new().unwrap();
        let resolver = CredentialResolver::new(
            HashMap::<String, String>::new(),
            LocalFile::new(dir.path().join("missing.json")),
        );

        match initialize_client(&resolver).await {
            Err(CredentialError::ClientInitialization(msg)) => {
                assert!(msg.contains("Env:"));
                assert!(msg.contains("File:"));
            }
            other => panic!("expected ClientInitialization, got {:?}", other),
        }
    }
}
