use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("no platform for {filename}")]
    UnrecognizedPlatform { filename: String },

    #[error("unknown architecture: {0}")]
    UnknownArch(String),

    #[error("empty platform rule suffix at position {0}")]
    EmptySuffix(usize),
}
