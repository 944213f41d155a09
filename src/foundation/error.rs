/// Convenience result type used across stackcomp.
pub type StackcompResult<T> = Result<T, StackcompError>;

/// Error taxonomy for session construction and rendering.
///
/// The accumulator itself never fails; errors only come from validating the
/// inputs handed to a render session or from pixel sources failing to deliver
/// samples.
#[derive(thiserror::Error, Debug)]
pub enum StackcompError {
    /// Inputs that do not line up (source counts, raster sizes, options).
    #[error("validation error: {0}")]
    Validation(String),

    /// A pixel source could not produce the requested samples.
    #[error("sample error: {0}")]
    Sample(String),

    /// Failures of the render machinery itself (thread pool setup).
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from a collaborator.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StackcompError {
    /// Build a [`StackcompError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StackcompError::Sample`] value.
    pub fn sample(msg: impl Into<String>) -> Self {
        Self::Sample(msg.into())
    }

    /// Build a [`StackcompError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
