//! Google integration module
//!
//! Resolves OAuth 2.0 client credentials and builds the client handle.

pub mod config;
pub mod credentials;
pub mod env;
pub mod file;
pub mod oauth;
pub mod resolver;

pub use credentials::{ClientCredentials, CredentialError, OAuthCredentials};
pub use env::{Environment, ProcessEnv};
pub use file::{CredentialsFile, LocalFile};
pub use oauth::{
    build_client, initialize_client, initialize_oauth2_client, load_credentials,
    GoogleOAuthClient,
};
pub use resolver::CredentialResolver;
