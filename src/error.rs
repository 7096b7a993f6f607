use thiserror::Error;

/// Unified error type for git-bump operations
#[derive(Error, Debug)]
pub enum BumpError {
    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Selection error: {0}")]
    Selection(String),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("the created tag '{tag}' was automatically deleted: {source}")]
    Push {
        tag: String,
        #[source]
        source: Box<BumpError>,
    },

    #[error("Prompt failed: {0}")]
    Prompt(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-bump
pub type Result<T> = std::result::Result<T, BumpError>;

impl BumpError {
    /// Create a repository error with context
    pub fn repository(msg: impl Into<String>) -> Self {
        BumpError::Repository(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        BumpError::Version(msg.into())
    }

    /// Create a selection error with context
    pub fn selection(msg: impl Into<String>) -> Self {
        BumpError::Selection(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        BumpError::Tag(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        BumpError::Remote(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        BumpError::Config(msg.into())
    }

    /// Wrap a push failure for a tag that has already been rolled back
    pub fn push(tag: impl Into<String>, source: BumpError) -> Self {
        BumpError::Push {
            tag: tag.into(),
            source: Box::new(source),
        }
    }
}

impl From<dialoguer::Error> for BumpError {
    fn from(err: dialoguer::Error) -> Self {
        BumpError::Prompt(err.to_string())
    }
}
