/// Convenience result type used across the crate.
pub type EncarteResult<T> = Result<T, EncarteError>;

/// Top-level error taxonomy used by pipeline APIs.
///
/// Fatal variants ([`EncarteError::TemplateInvalid`],
/// [`EncarteError::NoFormatSelected`], [`EncarteError::MappingIncomplete`])
/// abort a batch before any row is processed. [`EncarteError::Composition`]
/// is always recovered per row and never aborts a batch;
/// [`EncarteError::Export`] is surfaced per output format.
#[derive(thiserror::Error, Debug)]
pub enum EncarteError {
    /// Template markup is missing required placeholder ids or is not SVG.
    #[error("invalid template: {0}")]
    TemplateInvalid(String),

    /// No export format was selected for the batch.
    #[error("no export format selected")]
    NoFormatSelected,

    /// Field mapping does not bind all required roles.
    #[error("incomplete field mapping: {0}")]
    MappingIncomplete(String),

    /// Decode, rasterize or draw failure for one row's composition.
    #[error("composition error: {0}")]
    Composition(String),

    /// Failure while serializing one output format.
    #[error("export error: {0}")]
    Export(String),

    /// Invalid user-provided data outside the taxonomy above.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EncarteError {
    /// Build an [`EncarteError::TemplateInvalid`] value.
    pub fn template_invalid(msg: impl Into<String>) -> Self {
        Self::TemplateInvalid(msg.into())
    }

    /// Build an [`EncarteError::MappingIncomplete`] value.
    pub fn mapping_incomplete(msg: impl Into<String>) -> Self {
        Self::MappingIncomplete(msg.into())
    }

    /// Build an [`EncarteError::Composition`] value.
    pub fn composition(msg: impl Into<String>) -> Self {
        Self::Composition(msg.into())
    }

    /// Build an [`EncarteError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Build an [`EncarteError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
