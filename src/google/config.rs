//! Google OAuth configuration
//!
//! Credentials are read at runtime, never embedded in the binary.
//!
//! To run with environment credentials:
//!   GOOGLE_CLIENT_ID="your-id" GOOGLE_CLIENT_SECRET="your-secret" gcreds
//!
//! Otherwise place the JSON downloaded from the Google Cloud console at
//! [`default_credentials_path`].

use directories::ProjectDirs;
use std::path::PathBuf;

/// Environment variable holding the OAuth client id
pub const CLIENT_ID_VAR: &str = "GOOGLE_CLIENT_ID";

/// Environment variable holding the OAuth client secret
pub const CLIENT_SECRET_VAR: &str = "GOOGLE_CLIENT_SECRET";

/// Optional environment variable overriding the redirect URI
pub const REDIRECT_URI_VAR: &str = "GOOGLE_REDIRECT_URI";

/// Redirect URI used when neither the environment nor the file provides one
pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:3000/oauth2callback";

pub const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// File name of the credentials JSON inside the config directory
pub const CREDENTIALS_FILE_NAME: &str = "credentials.json";

/// Get the path where the credentials file is expected
///
/// Uses the platform config directory (e.g. `~/.config/gcreds` on Linux).
/// Falls back to `credentials.json` in the working directory when no home
/// directory can be determined.
pub fn default_credentials_path() -> PathBuf {
    ProjectDirs::from("com", "gcreds", "gcreds")
        .map(|dirs| dirs.config_dir().join(CREDENTIALS_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(CREDENTIALS_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_credentials_path_file_name() {
        let path = default_credentials_path();
        assert_eq!(
            path.file_name().and_then(|n| n.to_str()),
            Some(CREDENTIALS_FILE_NAME)
        );
    }
}
