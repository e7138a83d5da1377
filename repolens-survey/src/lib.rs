//! Repository traversal and analysis for Repolens.
//!
//! This crate fetches and analyzes a repository's structure:
//!
//! - **GitHub Integration**: repository metadata, directory listings, and
//!   raw file content via the GitHub API
//! - **Traversal**: depth-first walk of the remote tree, bounded by a
//!   file-count ceiling, behind a [`ContentProvider`] trait so it can be
//!   tested against an in-memory tree
//! - **Graph building**: structural containment links plus a small rule
//!   set of naming-pattern heuristics
//! - **Quality summary**: a language histogram and explicitly synthetic
//!   per-file complexity samples
//!
//! # Architecture
//!
//! Everything here is deterministic given the remote listings, with one
//! documented exception: the complexity samples in [`quality`] are random
//! placeholder values, not measurements.
//!
//! # Modules
//!
//! - [`github`]: GitHub API client and repository references
//! - [`walker`]: bounded structure traversal
//! - [`graph_builder`]: dependency-graph construction
//! - [`quality`]: language distribution and synthetic complexity

pub mod github;
pub mod graph_builder;
pub mod quality;
pub mod walker;

pub use github::{
    ContentEntry, GitHubClient, GitHubError, RemoteFile, RepoOverview, RepoRef, RepoSummary,
};
pub use graph_builder::{add_inferred_links, build_dependency_graph};
pub use quality::{summarize, ComplexityEntry, LanguageShare, QualityReport};
pub use walker::{ContentProvider, FileBudget, RepoContents, StructureWalker};
