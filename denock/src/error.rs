use hyper::http;
use std::{fmt::Display, io};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderDifference {
    pub header_name: String,
    pub expected_value: String,
    pub actual_value: Option<String>,
}

/// The first request dimension that didn't match the interception.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MismatchDifference {
    Url {
        expected: String,
        actual: String,
    },
    Method {
        expected: String,
        actual: String,
    },
    Body {
        expected: String,
        actual: Option<String>,
    },
    Header(HeaderDifference),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MismatchKind {
    Url,
    Method,
    Body,
    Header,
}

#[derive(Debug)]
pub enum Error {
    UnrecognizedInputType(&'static str),
    Mismatch(MismatchDifference),
    InvalidBody,
    InvalidHeaderName,
    InvalidHeaderValue,
    ParseUriError,
    IoError(io::Error),
    HyperError(hyper::Error),
    HttpError(http::Error),
    JsonError(serde_json::Error),
}

impl Error {
    pub fn mismatch_kind(&self) -> Option<MismatchKind> {
        match self {
            Error::Mismatch(MismatchDifference::Url { .. }) => Some(MismatchKind::Url),
            Error::Mismatch(MismatchDifference::Method { .. }) => Some(MismatchKind::Method),
            Error::Mismatch(MismatchDifference::Body { .. }) => Some(MismatchKind::Body),
            Error::Mismatch(MismatchDifference::Header(_)) => Some(MismatchKind::Header),
            _ => None,
        }
    }
}

impl std::error::Error for Error {}

fn describe(value: &Option<String>) -> String {
    match value {
        Some(value) => format!("\"{}\"", value.escape_default()),
        None => "<not specified>".into(),
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::UnrecognizedInputType(type_name) => {
                write!(f, "Denock: Unknown type for input: {}", type_name)
            }
            Error::Mismatch(difference) => match difference {
                MismatchDifference::Url { expected, actual } => write!(
                    f,
                    "Denock: URL mismatch. Expected: \"{}\". Actual: \"{}\"",
                    expected, actual
                ),
                MismatchDifference::Method { expected, actual } => write!(
                    f,
                    "Denock: method mismatch. Expected: \"{}\". Actual: \"{}\"",
                    expected, actual
                ),
                MismatchDifference::Body { expected, actual } => write!(
                    f,
                    "Denock: body mismatch. Expected: \"{}\". Actual: {}",
                    expected.escape_default(),
                    describe(actual)
                ),
                MismatchDifference::Header(HeaderDifference {
                    header_name,
                    expected_value,
                    actual_value,
                }) => write!(
                    f,
                    "Denock: headers mismatch for \"{}\". Expected: \"{}\". Actual: {}",
                    header_name,
                    expected_value,
                    describe(actual_value)
                ),
            },
            Error::InvalidBody => write!(f, "Invalid body"),
            Error::InvalidHeaderName => write!(f, "Invalid header name"),
            Error::InvalidHeaderValue => write!(f, "Invalid header value"),
            Error::ParseUriError => write!(f, "Parse URI Error"),
            Error::IoError(e) => write!(f, "IoError: {}", e),
            Error::HyperError(e) => write!(f, "Hyper error: {}", e),
            Error::HttpError(e) => write!(f, "Http Error: {}", e),
            Error::JsonError(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::IoError(e)
    }
}

impl From<hyper::header::InvalidHeaderName> for Error {
    fn from(_: hyper::header::InvalidHeaderName) -> Self {
        Error::InvalidHeaderName
    }
}

impl From<hyper::header::InvalidHeaderValue> for Error {
    fn from(_: hyper::header::InvalidHeaderValue) -> Self {
        Error::InvalidHeaderValue
    }
}

impl From<http::uri::InvalidUri> for Error {
    fn from(_: http::uri::InvalidUri) -> Self {
        Error::ParseUriError
    }
}

impl From<hyper::Error> for Error {
    fn from(e: hyper::Error) -> Self {
        Error::HyperError(e)
    }
}

impl From<http::Error> for Error {
    fn from(e: http::Error) -> Self {
        Error::HttpError(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::JsonError(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrecognized_input_names_the_type() {
        let error = Error::UnrecognizedInputType("u32");

        assert_eq!(error.to_string(), "Denock: Unknown type for input: u32");
        assert_eq!(error.mismatch_kind(), None);
    }

    #[test]
    fn header_mismatch_reports_missing_value() {
        let error = Error::Mismatch(MismatchDifference::Header(HeaderDifference {
            header_name: "x-api-key".into(),
            expected_value: "secret".into(),
            actual_value: None,
        }));

        assert_eq!(error.mismatch_kind(), Some(MismatchKind::Header));
        assert_eq!(
            error.to_string(),
            "Denock: headers mismatch for \"x-api-key\". Expected: \"secret\". Actual: <not specified>"
        );
    }

    #[test]
    fn body_mismatch_escapes_newlines() {
        let error = Error::Mismatch(MismatchDifference::Body {
            expected: "a\nb".into(),
            actual: Some("a".into()),
        });

        assert_eq!(
            error.to_string(),
            "Denock: body mismatch. Expected: \"a\\nb\". Actual: \"a\""
        );
    }
}
