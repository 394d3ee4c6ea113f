//! Target repository configuration
//!
//! An immutable value set once at client construction. Nothing is
//! validated eagerly; the first API call is where a bad owner, repo or
//! credential pair shows up.

use serde::{Deserialize, Serialize};

/// Configuration for one target repository
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoConfig {
    /// Repository owner (user or organization)
    pub owner: String,

    /// Repository name
    pub repo: String,

    /// Optional subdirectory to scope tree and commit lookups to
    pub subdir: Option<String>,

    /// OAuth application client id, sent as a query parameter
    pub client_id: String,

    /// OAuth application client secret, sent as a query parameter
    pub client_secret: String,

    /// User-Agent header value; defaults to the owner name
    pub user_agent: String,
}

impl RepoConfig {
    /// Create a config for `owner/repo` with no subdirectory and empty
    /// credentials. The user agent defaults to the owner name.
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        let owner = owner.into();
        Self {
            user_agent: owner.clone(),
            owner,
            repo: repo.into(),
            subdir: None,
            client_id: String::new(),
            client_secret: String::new(),
        }
    }

    /// Scope tree and commit lookups to a subdirectory
    pub fn with_subdir(mut self, subdir: impl Into<String>) -> Self {
        self.subdir = Some(subdir.into());
        self
    }

    /// Set the OAuth application credentials
    pub fn with_credentials(
        mut self,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        self.client_id = client_id.into();
        self.client_secret = client_secret.into();
        self
    }

    /// Override the default User-Agent value
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
