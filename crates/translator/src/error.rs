use thiserror::Error;

/// Why a single backend attempt produced no translation.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unreachable, {0}")]
    Unreachable(#[source] reqwest::Error),
    #[error("rejected, {0}")]
    Rejected(String),
    #[error("no usable translation returned")]
    NoResult,
    #[error("app id or secret key missing")]
    InvalidCredentials,
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Error::Rejected(format!("malformed payload, {err}"))
        } else {
            Error::Unreachable(err)
        }
    }
}
