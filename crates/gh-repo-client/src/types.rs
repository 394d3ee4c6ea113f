//! GitHub API data transfer objects
//!
//! Minimal structural types for the fields this client actually reads.
//! Everything else in the API payloads is ignored during decoding, and
//! commit records pass through opaquely.

use serde::{Deserialize, Serialize};

/// Kind of a tree entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    /// A directory
    Tree,
    /// A file
    Blob,
    /// Anything else the API may return (e.g. a submodule commit entry)
    #[serde(other)]
    Other,
}

/// One entry in a repository tree listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Path of the entry, relative to the tree it was listed in
    pub path: String,

    /// Entry kind
    #[serde(rename = "type")]
    pub node_type: NodeType,

    /// API URL of the underlying git object
    pub url: String,
}

/// Tree listing response (`git/trees/{sha}`)
#[derive(Debug, Clone, Deserialize)]
pub struct TreeResponse {
    /// The entries of this tree level
    pub tree: Vec<TreeNode>,
}

/// Branch reference response (`git/refs/heads/{branch}`)
#[derive(Debug, Clone, Deserialize)]
pub struct RefResponse {
    /// The git object the reference points at
    pub object: ObjectRef,
}

/// Pointer to a git object embedded in a reference response
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectRef {
    /// API URL of the commit object
    pub url: String,
}

/// Commit object response (`git/commits/{sha}`)
#[derive(Debug, Clone, Deserialize)]
pub struct CommitResponse {
    /// The tree recorded by this commit
    pub tree: TreeRef,
}

/// Pointer to a tree embedded in a commit response
#[derive(Debug, Clone, Deserialize)]
pub struct TreeRef {
    /// API URL of the tree listing
    pub url: String,
}

/// Opaque last-commit record for a file
///
/// Whatever the commits endpoint returns per element is kept as-is;
/// interpreting its shape is the caller's business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommitInfo(pub serde_json::Value);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tree_response_decodes_known_and_unknown_entry_types() {
        let body = r#"{
            "sha": "9fb037",
            "url": "https://api.github.com/repos/o/r/git/trees/9fb037",
            "tree": [
                {"path": "README.md", "mode": "100644", "type": "blob", "sha": "a1", "size": 12, "url": "https://api.github.com/repos/o/r/git/blobs/a1"},
                {"path": "docs", "mode": "040000", "type": "tree", "sha": "b2", "url": "https://api.github.com/repos/o/r/git/trees/b2"},
                {"path": "vendored", "mode": "160000", "type": "commit", "sha": "c3", "url": "https://api.github.com/repos/o/r/git/trees/c3"}
            ]
        }"#;

        let response: TreeResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.tree.len(), 3);
        assert_eq!(response.tree[0].node_type, NodeType::Blob);
        assert_eq!(response.tree[1].node_type, NodeType::Tree);
        assert_eq!(response.tree[2].node_type, NodeType::Other);
        assert_eq!(response.tree[1].path, "docs");
    }

    #[test]
    fn ref_and_commit_responses_expose_only_urls() {
        let reference: RefResponse = serde_json::from_str(
            r#"{"ref": "refs/heads/master", "object": {"sha": "d4", "type": "commit", "url": "https://api.github.com/repos/o/r/git/commits/d4"}}"#,
        )
        .unwrap();
        assert_eq!(
            reference.object.url,
            "https://api.github.com/repos/o/r/git/commits/d4"
        );

        let commit: CommitResponse = serde_json::from_str(
            r#"{"sha": "d4", "tree": {"sha": "e5", "url": "https://api.github.com/repos/o/r/git/trees/e5"}, "message": "init"}"#,
        )
        .unwrap();
        assert_eq!(
            commit.tree.url,
            "https://api.github.com/repos/o/r/git/trees/e5"
        );
    }

    #[test]
    fn commit_info_is_a_transparent_passthrough() {
        let raw = r#"{"sha": "a1", "commit": {"message": "fix"}}"#;
        let info: CommitInfo = serde_json::from_str(raw).unwrap();
        assert_eq!(info.0["commit"]["message"], "fix");
        let back = serde_json::to_value(&info).unwrap();
        assert_eq!(back["sha"], "a1");
    }
}
