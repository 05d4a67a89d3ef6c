use thiserror::Error;

/// Analysis gateway errors
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Configuration Error: {0}")]
    ConfigError(String),

    #[error("Request Error: {0}")]
    RequestError(String),

    #[error("Response Error: {0}")]
    ResponseError(String),

    #[error("Parsing Error: {0}")]
    ParsingError(String),

    #[error("HTTP Error: {status_code} - {message}")]
    HttpError { status_code: u16, message: String },

    /// The single failure kind callers see for a submission. Network,
    /// HTTP-status, and parse failures all collapse into this.
    #[error("Analysis failed")]
    AnalysisFailed,

    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),

    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),

    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;
