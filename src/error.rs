use thiserror::Error;

/// Errors returned by sketch construction and merging.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SketchError {
    /// A structural parameter was rejected at construction time.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    /// Two HyperLogLog sketches with different register counts cannot be merged.
    #[error("cannot merge sketches with {lhs} and {rhs} registers")]
    RegisterCountMismatch { lhs: usize, rhs: usize },
}

impl SketchError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        SketchError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
