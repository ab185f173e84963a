//! Common types and utilities shared across Inkling crates.
//!
//! This crate holds the shared error type, the [`Fetched`] outcome used by the
//! lenient fetchers, and the logging initialiser. It stays dependency-light so
//! every other crate in the workspace can depend on it.
//!
//! # Overview
//!
//! - [`InklingError`] and [`Result`]: Shared error handling
//! - [`Fetched`]: Outcome of a fetch that is allowed to degrade to a fallback
//! - [`observability`]: Centralised tracing/logging initialisation
//!
//! # Examples
//!
//! ```rust
//! use inkling_common::Fetched;
//!
//! let failed: Fetched<String> = Fetched::Failed("timeout".into());
//! assert!(failed.is_failed());
//! assert_eq!(failed.or_fallback(String::new()), "");
//! ```
use serde::{Deserialize, Serialize};

pub mod observability;

/// Error types used across the Inkling workspace.
#[derive(thiserror::Error, Debug)]
pub enum InklingError {
    /// A required option was missing or malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The remote side rejected the request or could not be reached.
    #[error("HTTP error: {0}")]
    Http(String),

    /// A response arrived but did not have the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The remote side answered, but the requested item was not in it.
    #[error("Not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenient alias for results that use [`InklingError`].
pub type Result<T> = std::result::Result<T, InklingError>;

/// Outcome of a fetch whose caller may choose to degrade instead of failing.
///
/// `Absent` means the remote call worked and there was nothing to return;
/// `Failed` carries the rendered error of a call that did not work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Fetched<T> {
    Found(T),
    Absent,
    Failed(String),
}

impl<T> Fetched<T> {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Collapse to a plain value, using `fallback` for both `Absent` and `Failed`.
    pub fn or_fallback(self, fallback: T) -> T {
        match self {
            Self::Found(value) => value,
            Self::Absent | Self::Failed(_) => fallback,
        }
    }
}

impl Fetched<String> {
    /// The found text, or an empty string for both absence and failure.
    pub fn into_text(self) -> String {
        self.or_fallback(String::new())
    }
}
