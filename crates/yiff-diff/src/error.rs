//! Error types for document loading.

/// Errors that can occur while loading a YAML document.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The input is not syntactically valid YAML.
    #[error("invalid YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The stream holds content past its first document.
    #[error("invalid YAML: expected a single document, found content in document {index}")]
    MultipleDocuments { index: usize },

    /// The document parsed, but its top-level node is not a mapping.
    #[error("top-level YAML node must be a mapping, found {found}")]
    Shape { found: &'static str },
}

impl LoadError {
    /// Returns `true` for syntax errors, `false` for shape errors.
    pub fn is_parse(&self) -> bool {
        matches!(self, LoadError::Parse(_) | LoadError::MultipleDocuments { .. })
    }
}

/// Convenience alias for load results.
pub type LoadResult<T> = Result<T, LoadError>;
