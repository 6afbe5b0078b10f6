use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedloomError {
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Invalid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unrecognized feed format: {0}")]
    UnknownFormat(String),

    #[error("Feed parsing error: {0}")]
    FeedParse(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, FeedloomError>;
