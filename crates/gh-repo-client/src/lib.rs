//! Synchronous GitHub repository-metadata client with cached commit lookups
//!
//! This crate fetches a repository's file tree and per-file last-commit
//! metadata over the GitHub REST API. Commit lookups go through an
//! injected load-or-compute cache so repeated queries for the same path
//! do not re-hit the network.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │               RepositoryClient                │
//! │  - file_last_commit(path, use_cache)          │
//! │  - files_tree()                               │
//! │  - refresh_cache()                            │
//! └───────────────────────────────────────────────┘
//!          │                          │
//!          ▼                          ▼
//! ┌─────────────────┐      ┌─────────────────────┐
//! │  ApiTransport   │      │   gh-kv-cache       │
//! │  (HttpTransport │      │   Cache<V> trait,   │
//! │   or a mock)    │      │   MemoryCache       │
//! └─────────────────┘      └─────────────────────┘
//! ```
//!
//! Everything is blocking and single-threaded: each call completes (or
//! fails) before the next request is issued, including the per-file loop
//! in `refresh_cache`.
//!
//! # Example
//!
//! ```rust,no_run
//! use gh_repo_client::{HttpTransport, MemoryCache, RepoConfig, RepositoryClient};
//!
//! # fn example() -> Result<(), gh_repo_client::RequestError> {
//! let config = RepoConfig::new("octocat", "hello-world")
//!     .with_subdir("docs")
//!     .with_credentials("client-id", "client-secret");
//!
//! let transport = HttpTransport::new(&config)?;
//! let cache = MemoryCache::with_bucket("github");
//! let client = RepositoryClient::new(config, transport, cache);
//!
//! let tree = client.files_tree()?;
//! let last_commit = client.file_last_commit("guide.md", true)?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod transport;
pub mod types;

/// Base URL for repository endpoints of the public GitHub API
pub const GITHUB_API_URL: &str = "https://api.github.com/repos";

pub use client::RepositoryClient;
pub use config::RepoConfig;
pub use error::RequestError;
pub use transport::{ApiResponse, ApiTransport, HttpTransport};
pub use types::{CommitInfo, NodeType, TreeNode};

// Re-export cache types for convenience
pub use gh_kv_cache::{Cache, CacheStats, MemoryCache};
