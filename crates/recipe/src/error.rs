use thiserror::Error;

pub type SourceResult<T> = Result<T, SourceError>;

/// Failures raised by a recipe data source. Pure pipeline stages never
/// produce these; only the upstream fetch can fail.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream rejected request: {0}")]
    Rejected(String),

    #[error("unexpected payload: {0}")]
    Decode(#[from] serde_json::Error),
}
