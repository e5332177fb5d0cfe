use thiserror::Error;

/// Result type for splitter operations
pub type Result<T> = std::result::Result<T, SplitError>;

/// Errors that can occur while splitting a Markdown document
#[derive(Error, Debug)]
pub enum SplitError {
    /// Failed to read the input
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed front matter header
    #[error("Front matter error: {0}")]
    FrontMatter(String),

    /// The tokenizer does not know the requested model
    #[error("Unknown tokenizer model: {0}")]
    UnknownModel(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl SplitError {
    /// Create a front matter error
    pub fn front_matter(msg: impl Into<String>) -> Self {
        Self::FrontMatter(msg.into())
    }

    /// Create an unknown model error
    pub fn unknown_model(model: impl Into<String>) -> Self {
        Self::UnknownModel(model.into())
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
