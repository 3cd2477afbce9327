use crate::types::{ImageId, ViewIdPair};

/// Errors returned by the view graph filters.
///
/// Bad geometry is never an error: inconsistent or unresolvable view pairs are
/// removed from the collection instead. Only misuse of the API is reported.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ViewGraphError {
    /// A filter option is out of its valid range.
    #[error("Invalid option `{name}`: {value}")]
    InvalidOptions {
        /// Name of the offending option.
        name: &'static str,
        /// Offending value, formatted for display.
        value: String,
    },

    /// The relative rotation threshold is not a number.
    #[error("Relative rotation threshold must be a number, got {0}")]
    InvalidRotationThreshold(f64),

    /// The same view pair appears more than once in the collection.
    #[error("Duplicate view pair ({}, {})", .0.image_id1(), .0.image_id2())]
    DuplicatePair(ViewIdPair),

    /// A view pair links an image with itself.
    #[error("View pair links image {0} with itself")]
    SelfPair(ImageId),

    /// The worker thread pool could not be created.
    #[error("Failed to build thread pool: {0}")]
    ThreadPool(String),
}
