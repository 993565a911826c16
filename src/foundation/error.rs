pub type FolioResult<T> = Result<T, FolioError>;

#[derive(thiserror::Error, Debug)]
pub enum FolioError {
    /// Drawing surface unavailable, image failed to decode, or pixel read blocked.
    #[error("pixel access error: {0}")]
    PixelAccess(String),

    /// Key-value store or attribute surface write/read failed.
    #[error("persistence error: {0}")]
    Persistence(String),

    #[error("malformed hex color: {0}")]
    MalformedHex(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FolioError {
    pub fn pixel_access(msg: impl Into<String>) -> Self {
        Self::PixelAccess(msg.into())
    }

    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    pub fn malformed_hex(msg: impl Into<String>) -> Self {
        Self::MalformedHex(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
