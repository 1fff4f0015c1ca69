use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("input is empty")]
    EmptyInput,
    #[error("both app id and secret key are required")]
    IncompleteCredentials,
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}
