//! Repository client
//!
//! Fetches a repository's file tree and per-file last-commit metadata,
//! backed by an injected load-or-compute cache so repeated commit
//! lookups do not re-hit the API.

use crate::config::RepoConfig;
use crate::error::RequestError;
use crate::transport::ApiTransport;
use crate::types::{CommitInfo, CommitResponse, NodeType, RefResponse, TreeNode, TreeResponse};
use crate::GITHUB_API_URL;
use gh_kv_cache::Cache;
use log::{debug, warn};
use serde::de::DeserializeOwned;

/// Client for one configured repository
///
/// Generic over the transport (mockable in tests) and the cache
/// collaborator. Construction validates nothing; the first request is
/// where bad configuration surfaces.
///
/// # Example
///
/// ```rust,no_run
/// use gh_repo_client::{HttpTransport, MemoryCache, RepoConfig, RepositoryClient};
///
/// # fn example() -> Result<(), gh_repo_client::RequestError> {
/// let config = RepoConfig::new("octocat", "hello-world")
///     .with_credentials("client-id", "client-secret");
/// let transport = HttpTransport::new(&config)?;
/// let client = RepositoryClient::new(config, transport, MemoryCache::with_bucket("github"));
///
/// for node in client.files_tree()? {
///     let last_commit = client.file_last_commit(&node.path, true)?;
///     println!("{}: {:?}", node.path, last_commit);
/// }
/// # Ok(())
/// # }
/// ```
pub struct RepositoryClient<T, C> {
    config: RepoConfig,
    transport: T,
    cache: C,
}

impl<T, C> RepositoryClient<T, C>
where
    T: ApiTransport,
    C: Cache<Option<CommitInfo>>,
{
    /// Create a client from a config, a transport and a cache
    pub fn new(config: RepoConfig, transport: T, cache: C) -> Self {
        Self {
            config,
            transport,
            cache,
        }
    }

    /// The repository configuration this client was built with
    pub fn config(&self) -> &RepoConfig {
        &self.config
    }

    /// Last commit touching `file_name`, or `None` if it has no history
    ///
    /// With `use_cache` the answer is served from the cache when present;
    /// on a miss the commits endpoint is queried and the first element of
    /// the returned array is cached (a cached `None` is a real entry).
    /// `use_cache = false` evicts the entry first, forcing a fresh fetch.
    ///
    /// Request failures propagate and are never cached.
    pub fn file_last_commit(
        &self,
        file_name: &str,
        use_cache: bool,
    ) -> Result<Option<CommitInfo>, RequestError> {
        if !use_cache {
            self.cache.remove(file_name);
        }

        self.cache.load(file_name, || {
            let path = match &self.config.subdir {
                Some(subdir) => format!("{}/", subdir),
                None => String::new(),
            };
            let url = format!(
                "{}/{}/{}/commits?path={}{}",
                GITHUB_API_URL, self.config.owner, self.config.repo, path, file_name
            );
            let commits: Vec<CommitInfo> = self.run_decoded(&url)?;
            debug!(
                "Fetched {} commit(s) for path '{}{}'",
                commits.len(),
                path,
                file_name
            );
            Ok(commits.into_iter().next())
        })
    }

    /// File tree of the repository's master branch
    ///
    /// Three dependent requests: the branch reference, its commit object,
    /// then the commit's tree listing. When a subdirectory is configured
    /// and present in the top-level tree, one more request fetches that
    /// subtree and returns it instead; when it is absent the top-level
    /// tree is returned unchanged.
    ///
    /// Never cached; every call goes to the API.
    pub fn files_tree(&self) -> Result<Vec<TreeNode>, RequestError> {
        let master_url = format!(
            "{}/{}/{}/git/refs/heads/master",
            GITHUB_API_URL, self.config.owner, self.config.repo
        );
        let reference: RefResponse = self.run_decoded(&master_url)?;
        let commit: CommitResponse = self.run_decoded(&reference.object.url)?;
        let mut listing: TreeResponse = self.run_decoded(&commit.tree.url)?;

        if let Some(subdir) = &self.config.subdir {
            let subtree_url = listing
                .tree
                .iter()
                .find(|node| node.node_type == NodeType::Tree && node.path == *subdir)
                .map(|node| node.url.clone());

            match subtree_url {
                Some(url) => listing = self.run_decoded(&url)?,
                None => warn!(
                    "configured subdirectory '{}' not found in {}/{}, using top-level tree",
                    subdir, self.config.owner, self.config.repo
                ),
            }
        }

        Ok(listing.tree)
    }

    /// Refresh the cached last-commit entry for every file in the tree
    ///
    /// Fetches the tree, then forces a fresh commit lookup per entry,
    /// strictly one at a time. The first failure aborts the loop;
    /// entries refreshed before it keep their new values, later ones
    /// stay stale.
    pub fn refresh_cache(&self) -> Result<(), RequestError> {
        let tree = self.files_tree()?;
        debug!(
            "Refreshing commit cache for {} entries in {}/{}",
            tree.len(),
            self.config.owner,
            self.config.repo
        );

        for node in &tree {
            self.file_last_commit(&node.path, false)?;
        }

        Ok(())
    }

    /// Run a request and decode the JSON body into `D`
    fn run_decoded<D: DeserializeOwned>(&self, url: &str) -> Result<D, RequestError> {
        let value = self.run(url)?;
        serde_json::from_value(value).map_err(|err| RequestError::decode(url, err))
    }

    /// Execute one GET with credentials appended as query parameters
    ///
    /// `client_id` and `client_secret` are joined with `&` when the URL
    /// already carries a query string, `?` otherwise. A status >= 400
    /// becomes a `RequestError` with the raw body as its message.
    fn run(&self, url: &str) -> Result<serde_json::Value, RequestError> {
        let separator = if url.contains('?') { '&' } else { '?' };
        let url = format!(
            "{}{}client_id={}&client_secret={}",
            url, separator, self.config.client_id, self.config.client_secret
        );

        let response = self.transport.execute(&url)?;
        if response.status >= 400 {
            return Err(RequestError::http(response.status, response.body));
        }

        serde_json::from_str(&response.body).map_err(|err| RequestError::decode(&url, err))
    }
}
