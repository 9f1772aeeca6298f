use thiserror::Error;

use super::models::Downstream;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProxyError {
    #[error("{0} is unavailable: {1}")]
    Unavailable(Downstream, String),

    #[error("{0} did not answer in time")]
    Timeout(Downstream),

    #[error("Invalid downstream response from {0}: {1}")]
    InvalidResponse(Downstream, String),
}
