//! Error types for shape-graph-core.
//!
//! This module defines the central error type [`CoreError`] used throughout
//! the crate, along with the [`CoreResult<T>`] type alias.
//!
//! # Examples
//!
//! ```rust
//! use shape_graph_core::CoreError;
//!
//! fn check_k(k: usize) -> Result<(), CoreError> {
//!     if k == 0 {
//!         return Err(CoreError::InvalidK { k });
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_k(0).is_err());
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Top-level error type for shape-graph-core operations.
///
/// The first three variants are the KNN builder's own failure modes; the rest
/// come from the I/O wrappers around it (point sources, rendering, config).
///
/// # Examples
///
/// ```rust
/// use shape_graph_core::CoreError;
///
/// let error = CoreError::KExceedsPointCount { k: 10, max: 4 };
///
/// match &error {
///     CoreError::KExceedsPointCount { k, max } => {
///         assert_eq!(*k, 10);
///         assert_eq!(*max, 4);
///     }
///     _ => panic!("unexpected variant"),
/// }
///
/// assert!(error.to_string().contains("10"));
/// ```
#[derive(Debug, Error)]
pub enum CoreError {
    /// Requested neighbor count is below 1.
    #[error("Invalid k: {k} (k must be at least 1)")]
    InvalidK {
        /// The rejected neighbor count
        k: usize,
    },

    /// Fewer than two points are available, so no edge can be formed.
    #[error("Insufficient points: {count} point(s) available, at least 2 required")]
    InsufficientPoints {
        /// Number of points in the point set
        count: usize,
    },

    /// Requested k exceeds N - 1 under the strict k policy.
    ///
    /// # When This Occurs
    ///
    /// - `KPolicy::Strict` is configured and `k > N - 1`
    /// - Never raised under `KPolicy::Clamp`, which clamps instead
    #[error("k = {k} exceeds the number of other points ({max})")]
    KExceedsPointCount {
        /// The requested neighbor count
        k: usize,
        /// Largest valid k for this point set (N - 1)
        max: usize,
    },

    /// A point coordinate is NaN or infinite.
    #[error("Invalid coordinate at point {index}: {axis} = {value}")]
    InvalidCoordinate {
        /// Index of the offending point
        index: usize,
        /// Axis name (x, y or z)
        axis: char,
        /// The non-finite value
        value: f32,
    },

    /// An edge or graph violates a structural invariant.
    ///
    /// # When This Occurs
    ///
    /// - Constructing a self-loop edge
    /// - Edge distance is negative or non-finite
    /// - `KnnGraph::validate` finds an out-of-range index or wrong out-degree
    #[error("Graph invariant violated: {0}")]
    GraphInvariant(String),

    /// A point set was constructed from an empty sequence.
    #[error("Point set must contain at least one point")]
    EmptyPointSet,

    /// A point source could not produce a sample.
    #[error("Point source error: {0}")]
    SourceError(String),

    /// A point file line could not be parsed.
    #[error("Parse error in {} at line {line}: {message}", .path.display())]
    ParseError {
        /// File being parsed
        path: PathBuf,
        /// 1-based line number
        line: usize,
        /// What went wrong
        message: String,
    },

    /// Rendering failed.
    #[error("Render error: {0}")]
    RenderError(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// JSON (de)serialization failed.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Underlying filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Build a [`CoreError::ParseError`] for `path` at 1-based `line`.
    pub fn parse_error(path: &Path, line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            path: path.to_path_buf(),
            line,
            message: message.into(),
        }
    }

    /// True for errors caused by the caller's input rather than the environment.
    ///
    /// The CLI uses this to pick between the "invalid input" and "runtime
    /// failure" exit codes.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidK { .. }
                | Self::InsufficientPoints { .. }
                | Self::KExceedsPointCount { .. }
                | Self::InvalidCoordinate { .. }
                | Self::EmptyPointSet
                | Self::ParseError { .. }
                | Self::ConfigError(_)
        )
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::SerializationError(err.to_string())
    }
}

impl From<config::ConfigError> for CoreError {
    fn from(err: config::ConfigError) -> Self {
        CoreError::ConfigError(err.to_string())
    }
}

/// Result type alias for shape-graph-core operations.
pub type CoreResult<T> = Result<T, CoreError>;
