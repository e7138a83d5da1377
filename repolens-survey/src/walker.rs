//! Repository structure traversal.
//!
//! Walks a remote file tree depth-first, one directory listing at a time,
//! bounded by a global file-count ceiling so a single request stays
//! bounded in API calls and response size.

use crate::github::{ContentEntry, GitHubClient, GitHubError, RepoRef};
use async_trait::async_trait;
use repolens_graph::{EntryKind, TreeNode};
use std::future::Future;
use std::pin::Pin;

/// Source of directory listings for one repository at one ref.
///
/// Abstracts the hosting API so the traversal can run against an
/// in-memory tree in tests.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// List the entries directly under `path` (empty for the root).
    async fn list_dir(&self, path: &str) -> Result<Vec<ContentEntry>, GitHubError>;
}

/// Live provider bound to a repository and branch.
pub struct RepoContents<'a> {
    client: &'a GitHubClient,
    repo: &'a RepoRef,
    branch: &'a str,
}

impl<'a> RepoContents<'a> {
    /// Bind a client to one repository and branch.
    pub fn new(client: &'a GitHubClient, repo: &'a RepoRef, branch: &'a str) -> Self {
        Self {
            client,
            repo,
            branch,
        }
    }
}

#[async_trait]
impl ContentProvider for RepoContents<'_> {
    async fn list_dir(&self, path: &str) -> Result<Vec<ContentEntry>, GitHubError> {
        self.client.list_dir(self.repo, self.branch, path).await
    }
}

/// Counts file entries against the traversal ceiling.
///
/// Threaded explicitly through the recursion; only files consume budget,
/// directories are free.
#[derive(Debug)]
pub struct FileBudget {
    limit: usize,
    used: usize,
}

impl FileBudget {
    /// Create a budget allowing up to `limit` file entries.
    pub fn new(limit: usize) -> Self {
        Self { limit, used: 0 }
    }

    /// Whether the ceiling has been reached.
    pub fn is_exhausted(&self) -> bool {
        self.used >= self.limit
    }

    /// Record one enumerated file.
    pub fn record_file(&mut self) {
        self.used += 1;
    }

    /// Number of files recorded so far.
    pub fn used(&self) -> usize {
        self.used
    }
}

/// Walks a remote file tree into a [`TreeNode`] structure.
#[derive(Debug, Clone)]
pub struct StructureWalker {
    max_files: usize,
}

impl StructureWalker {
    /// Create a walker with the given file-count ceiling.
    pub fn new(max_files: usize) -> Self {
        Self { max_files }
    }

    /// Traverse the repository and build its structure tree.
    ///
    /// Traversal is depth-first in listing order: a directory's entry is
    /// recorded before its subtree is expanded. Once the ceiling is
    /// reached, the remaining entries of the directory currently being
    /// listed are skipped; directories already descended into keep what
    /// they collected. A directory whose listing fails is logged and
    /// skipped without aborting the traversal.
    ///
    /// The root node is always returned, partially populated if needed.
    pub async fn walk<P: ContentProvider>(
        &self,
        provider: &P,
        root_name: &str,
        root_url: &str,
    ) -> TreeNode {
        let mut root = TreeNode::directory(root_name, "", root_url);
        let mut budget = FileBudget::new(self.max_files);

        expand(provider, String::new(), &mut root, &mut budget).await;

        tracing::debug!(files = budget.used(), "structure traversal finished");
        root
    }
}

/// Recursive expansion of one directory; boxed because async recursion
/// needs indirection.
fn expand<'a, P: ContentProvider>(
    provider: &'a P,
    path: String,
    parent: &'a mut TreeNode,
    budget: &'a mut FileBudget,
) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
    Box::pin(async move {
        let entries = match provider.list_dir(&path).await {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!(path = %path, error = %err, "failed to list directory, skipping subtree");
                return;
            }
        };

        for entry in entries {
            if budget.is_exhausted() {
                break;
            }

            let mut node = match entry.kind {
                EntryKind::Directory => TreeNode::directory(entry.name, entry.path, entry.url),
                EntryKind::File => TreeNode::file(entry.name, entry.path, entry.url),
            };

            match node.kind {
                EntryKind::Directory => {
                    expand(provider, node.path.clone(), &mut node, budget).await;
                }
                EntryKind::File => budget.record_file(),
            }

            parent.children.push(node);
        }
    })
}
