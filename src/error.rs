use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    ConfigValidation(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("task store error ({}): {message}", .path.display())]
    Store { path: PathBuf, message: String },

    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("network error: {0}")]
    Network(String),

    #[error("{0}")]
    Usage(String),
}

impl Error {
    pub(crate) fn store(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::Store {
            path: path.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
