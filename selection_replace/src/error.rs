use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("settings I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("command `{0}` is already registered")]
    DuplicateCommand(String),
}

pub type Result<T> = std::result::Result<T, Error>;
