use thiserror::Error;

#[derive(Debug, Error)]
pub enum DavError {
    #[error("Building http client failed")]
    Client(#[from] reqwest::Error),
    #[error("Server url is invalid: {0}")]
    InvalidUrl(String),
}
