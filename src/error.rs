use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The selector you are trying to scrape for is missing. Selector: {0}")]
    ParseMissingSelector(String),

    #[error("The cookie endpoint answered without setting a cookie: {0}")]
    MissingCookie(String),
    #[error("Leaders request for '{country}' was rejected again after a cookie refresh: {status}")]
    CredentialRejected { country: String, status: StatusCode },
    #[error("Unexpected payload from {url}: {reason}")]
    UnexpectedPayload { url: String, reason: String },
    #[error("Leader record in '{country}' has no '{field}' field")]
    MissingField { country: String, field: &'static str },

    #[error("Io Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Json Error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Csv Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Tokio Join Error, couldn't await a task! {0}")]
    RuntimeJoin(#[from] tokio::task::JoinError),

    #[error("Reqwest Error: {0}")]
    Reqwest(#[from] reqwest::Error),
}
