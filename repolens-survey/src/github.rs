//! GitHub API client for repository metadata and content listings.
//!
//! This module provides functionality for:
//! - Parsing browser URLs into repository references
//! - Fetching repository metadata (description, stars, default branch)
//! - Listing directory contents at a given ref
//! - Fetching a single file's decoded content
//!
//! The client uses the `octocrab` library for GitHub API interactions.
//! A personal access token is optional; without one, requests go out
//! unauthenticated and are subject to the lower anonymous rate limits.

use chrono::{DateTime, Utc};
use octocrab::Octocrab;
use repolens_graph::EntryKind;
use serde::Serialize;
use thiserror::Error;
use url::Url;

/// Errors that can occur during GitHub operations
#[derive(Debug, Error)]
pub enum GitHubError {
    /// GitHub API request failed
    #[error("GitHub API error: {0}")]
    Api(#[from] octocrab::Error),

    /// The supplied URL is not a GitHub repository URL
    #[error("Invalid GitHub repository URL: {0}")]
    InvalidRepoUrl(String),

    /// The requested path does not exist in the repository
    #[error("Path not found in repository: {0}")]
    PathNotFound(String),

    /// The API returned an entry without usable content
    #[error("No content returned for {0}")]
    MissingContent(String),

    /// Failed to build octocrab client
    #[error("Failed to build GitHub client: {0}")]
    ClientBuild(String),
}

impl GitHubError {
    /// Whether this error means the remote resource is absent.
    pub fn is_not_found(&self) -> bool {
        match self {
            GitHubError::PathNotFound(_) => true,
            GitHubError::Api(err) => api_error_is_not_found(err),
            _ => false,
        }
    }
}

fn api_error_is_not_found(err: &octocrab::Error) -> bool {
    matches!(err, octocrab::Error::GitHub { source, .. } if source.status_code.as_u16() == 404)
}

/// Reference to one remote repository.
///
/// Parsed once from a browser URL; identifies the repository for all
/// subsequent API calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    /// Owner or organization
    pub owner: String,

    /// Repository name
    pub name: String,
}

impl RepoRef {
    /// Parse a browser URL of the form `https://github.com/<owner>/<repo>`.
    ///
    /// The host must be exactly `github.com` and the path must carry at
    /// least two segments; extra segments (branch views, file views) are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns [`GitHubError::InvalidRepoUrl`] for any other shape.
    pub fn parse_url(input: &str) -> Result<Self, GitHubError> {
        let url =
            Url::parse(input).map_err(|_| GitHubError::InvalidRepoUrl(input.to_string()))?;

        if url.host_str() != Some("github.com") {
            return Err(GitHubError::InvalidRepoUrl(input.to_string()));
        }

        let mut segments = url.path().split('/').filter(|s| !s.is_empty());
        match (segments.next(), segments.next()) {
            (Some(owner), Some(name)) => Ok(Self {
                owner: owner.to_string(),
                name: name.to_string(),
            }),
            _ => Err(GitHubError::InvalidRepoUrl(input.to_string())),
        }
    }

    /// Full name in `owner/repo` form.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

/// Repository metadata returned to the caller of `/analyze`.
#[derive(Debug, Clone, Serialize)]
pub struct RepoSummary {
    /// Repository name
    pub name: String,

    /// Full name: "owner/repo"
    pub full_name: String,

    /// Repository description, if any
    pub description: Option<String>,

    /// Primary language as detected by GitHub
    pub language: Option<String>,

    /// Star count
    pub stars: u32,

    /// Fork count
    pub forks: u32,

    /// Creation timestamp
    pub created_at: Option<DateTime<Utc>>,

    /// Last update timestamp
    pub updated_at: Option<DateTime<Utc>>,

    /// Canonical browser URL
    pub url: String,
}

/// Repository metadata plus the default branch used for traversal.
#[derive(Debug, Clone)]
pub struct RepoOverview {
    /// Serializable metadata
    pub summary: RepoSummary,

    /// Default branch name
    pub default_branch: String,
}

/// One entry of a directory listing.
#[derive(Debug, Clone)]
pub struct ContentEntry {
    /// Entry name (final path segment)
    pub name: String,

    /// Path relative to the repository root
    pub path: String,

    /// File or directory
    pub kind: EntryKind,

    /// Browser URL of the entry
    pub url: String,

    /// Size in bytes as reported by the API (0 for directories)
    pub size: u64,
}

/// A single file fetched from the repository.
#[derive(Debug, Clone)]
pub struct RemoteFile {
    /// Path relative to the repository root
    pub path: String,

    /// Size in bytes as reported by the API
    pub size: u64,

    /// Decoded text content; absent when the API withheld it
    pub content: Option<String>,
}

/// GitHub API client wrapper
pub struct GitHubClient {
    client: Octocrab,
}

impl GitHubClient {
    /// Create a new GitHub client.
    ///
    /// # Arguments
    ///
    /// * `token` - Optional personal access token; anonymous without one
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be built
    pub fn new(token: Option<&str>) -> Result<Self, GitHubError> {
        let mut builder = Octocrab::builder();

        if let Some(token) = token {
            builder = builder.personal_token(token.to_string());
        }

        let client = builder
            .build()
            .map_err(|e| GitHubError::ClientBuild(e.to_string()))?;

        Ok(Self { client })
    }

    /// Fetch repository metadata and the default branch.
    pub async fn repo_overview(&self, repo: &RepoRef) -> Result<RepoOverview, GitHubError> {
        let data = self.client.repos(&repo.owner, &repo.name).get().await?;

        let default_branch = data
            .default_branch
            .clone()
            .unwrap_or_else(|| "main".to_string());

        Ok(RepoOverview {
            summary: summary_from(&data, repo),
            default_branch,
        })
    }

    /// List the entries directly under `path` at the given ref.
    ///
    /// Pass an empty `path` for the repository root. Entries come back in
    /// the order the API returned them.
    pub async fn list_dir(
        &self,
        repo: &RepoRef,
        branch: &str,
        path: &str,
    ) -> Result<Vec<ContentEntry>, GitHubError> {
        let contents = self
            .client
            .repos(&repo.owner, &repo.name)
            .get_content()
            .path(path)
            .r#ref(branch)
            .send()
            .await?;

        Ok(contents
            .items
            .into_iter()
            .map(|item| {
                let kind = if item.r#type == "dir" {
                    EntryKind::Directory
                } else {
                    EntryKind::File
                };

                ContentEntry {
                    kind,
                    size: item.size.max(0) as u64,
                    url: item.html_url.map(|u| u.to_string()).unwrap_or_default(),
                    name: item.name,
                    path: item.path,
                }
            })
            .collect())
    }

    /// Fetch a single file's metadata and decoded content.
    ///
    /// # Errors
    ///
    /// Returns [`GitHubError::PathNotFound`] when the path does not exist
    /// or is not a file.
    pub async fn fetch_file(&self, repo: &RepoRef, path: &str) -> Result<RemoteFile, GitHubError> {
        let contents = self
            .client
            .repos(&repo.owner, &repo.name)
            .get_content()
            .path(path)
            .send()
            .await
            .map_err(|err| {
                if api_error_is_not_found(&err) {
                    GitHubError::PathNotFound(path.to_string())
                } else {
                    GitHubError::Api(err)
                }
            })?;

        let item = contents
            .items
            .into_iter()
            .next()
            .ok_or_else(|| GitHubError::PathNotFound(path.to_string()))?;

        let size = item.size.max(0) as u64;
        let content = item.decoded_content();

        Ok(RemoteFile {
            path: path.to_string(),
            size,
            content,
        })
    }
}

/// Convert an octocrab Repository to our RepoSummary
fn summary_from(data: &octocrab::models::Repository, repo: &RepoRef) -> RepoSummary {
    RepoSummary {
        name: data.name.clone(),
        full_name: data.full_name.clone().unwrap_or_else(|| repo.full_name()),
        description: data.description.clone(),
        // Convert Value to String - language can be a JSON string or null
        language: data
            .language
            .as_ref()
            .and_then(|v| v.as_str())
            .map(|s| s.to_string()),
        stars: data.stargazers_count.unwrap_or(0),
        forks: data.forks_count.unwrap_or(0),
        created_at: data.created_at,
        updated_at: data.updated_at,
        url: data
            .html_url
            .as_ref()
            .map(|u| u.to_string())
            .unwrap_or_default(),
    }
}
