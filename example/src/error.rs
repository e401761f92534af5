use std::fmt::Display;

#[derive(Debug)]
pub enum Error {
    InvalidEmail(String),
    UserNotFound(u64),
    UnexpectedStatus(u16),
    FetchError(denock::Error),
    DeserializationError(serde_json::Error),
}

impl std::error::Error for Error {}

impl From<denock::Error> for Error {
    fn from(e: denock::Error) -> Self {
        Error::FetchError(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::DeserializationError(e)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidEmail(email) => write!(f, "\"{}\" is not an email address", email),
            Error::UserNotFound(id) => write!(f, "User {} not found", id),
            Error::UnexpectedStatus(status) => write!(f, "Unexpected status code {}", status),
            Error::FetchError(e) => write!(f, "{}", e),
            Error::DeserializationError(e) => write!(f, "{}", e),
        }
    }
}
