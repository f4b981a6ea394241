//! Errors
//!
//! Custom error types used throughout the `cartree` crate.
use thiserror::Error;

/// Errors that can occur when building or applying a CART classifier.
#[derive(Debug, Error)]
pub enum CartError {
    /// Dataset with no instances.
    #[error("A dataset must contain at least one instance.")]
    EmptyDataset,
    /// Instances without attributes.
    #[error("Instances must carry at least one attribute besides the class label.")]
    NoAttributes,
    /// Instance width differs from the rest of the dataset.
    #[error("Instance {0} has {2} attributes, expected {1}.")]
    RaggedInstance(usize, usize, usize),
    /// Attribute vector length differs from the trained dimensionality.
    #[error("Expected an attribute vector of length {0}, but {1} was provided.")]
    DimensionMismatch(usize, usize),
    /// Prediction was requested before the classifier was fitted.
    #[error("The classifier has not been fitted yet.")]
    NotFitted,
    /// Unable to write model or predictions to file.
    #[error("Unable to write to file: {0}")]
    UnableToWrite(String),
    /// Unable to read data or model from a file.
    #[error("Unable to read from a file {0}")]
    UnableToRead(String),
}
