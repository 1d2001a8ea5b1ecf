//! Google OAuth client credential resolution
//!
//! Credentials come from `GOOGLE_CLIENT_ID` / `GOOGLE_CLIENT_SECRET` first and
//! a local credentials JSON file second. See [`google::resolver`].

pub mod google;

pub use google::{
    initialize_oauth2_client, load_credentials, ClientCredentials, CredentialError,
    CredentialResolver, GoogleOAuthClient, OAuthCredentials,
};
