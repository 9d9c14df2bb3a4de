use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShelfError {
    #[error("Unknown property: {0}")]
    UnknownProperty(String),

    #[error("Property not supported by this host: {0}")]
    UnsupportedProperty(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid frontmatter in {path}: {message}")]
    Frontmatter { path: PathBuf, message: String },

    #[error("Config error: {0}")]
    Config(String),
}

impl From<confique::Error> for ShelfError {
    fn from(err: confique::Error) -> Self {
        ShelfError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ShelfError>;
