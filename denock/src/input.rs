use crate::error::Error;
use hyper::{Body, Request, Uri};
use std::{any::Any, fmt};

/// Anything handed to `fetch` as the request target.
///
/// Strings, `Uri`s and full `Request<Body>`s are understood. Other values can be
/// wrapped with `RequestInput::new` but fail classification.
pub struct RequestInput {
    value: Box<dyn Any + Send>,
    type_name: &'static str,
}

impl RequestInput {
    pub fn new<T: Any + Send>(value: T) -> Self {
        Self {
            value: Box::new(value),
            type_name: std::any::type_name::<T>(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn classify(self) -> Result<ClassifiedInput, Error> {
        let RequestInput { value, type_name } = self;

        let value = match value.downcast::<String>() {
            Ok(url) => return Ok(ClassifiedInput::StringUrl(*url)),
            Err(value) => value,
        };
        let value = match value.downcast::<&'static str>() {
            Ok(url) => return Ok(ClassifiedInput::StringUrl(String::from(*url))),
            Err(value) => value,
        };
        let value = match value.downcast::<Uri>() {
            Ok(uri) => return Ok(ClassifiedInput::UrlObject(*uri)),
            Err(value) => value,
        };
        match value.downcast::<Request<Body>>() {
            Ok(request) => Ok(ClassifiedInput::RequestObject(*request)),
            Err(_) => Err(Error::UnrecognizedInputType(type_name)),
        }
    }
}

impl fmt::Debug for RequestInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestInput")
            .field("type_name", &self.type_name)
            .finish()
    }
}

impl From<&'static str> for RequestInput {
    fn from(url: &'static str) -> Self {
        Self::new(url)
    }
}

impl From<String> for RequestInput {
    fn from(url: String) -> Self {
        Self::new(url)
    }
}

impl From<Uri> for RequestInput {
    fn from(uri: Uri) -> Self {
        Self::new(uri)
    }
}

impl From<Request<Body>> for RequestInput {
    fn from(request: Request<Body>) -> Self {
        Self::new(request)
    }
}

#[derive(Debug)]
pub enum ClassifiedInput {
    StringUrl(String),
    UrlObject(Uri),
    RequestObject(Request<Body>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strings_are_string_urls() {
        let owned = RequestInput::from(String::from("https://api.example.com/a"));
        let borrowed = RequestInput::from("https://api.example.com/b");

        assert!(matches!(
            owned.classify(),
            Ok(ClassifiedInput::StringUrl(url)) if url == "https://api.example.com/a"
        ));
        assert!(matches!(
            borrowed.classify(),
            Ok(ClassifiedInput::StringUrl(url)) if url == "https://api.example.com/b"
        ));
    }

    #[test]
    fn uris_are_url_objects() {
        let uri: Uri = "https://api.example.com/v1/users?id=1".parse().unwrap();

        match RequestInput::from(uri).classify() {
            Ok(ClassifiedInput::UrlObject(uri)) => {
                assert_eq!(uri.to_string(), "https://api.example.com/v1/users?id=1")
            }
            other => panic!("unexpected classification: {:?}", other),
        }
    }

    #[test]
    fn requests_are_request_objects() {
        let request = Request::builder()
            .method("POST")
            .uri("https://api.example.com/v1/users")
            .body(Body::from("{}"))
            .unwrap();

        match RequestInput::from(request).classify() {
            Ok(ClassifiedInput::RequestObject(request)) => {
                assert_eq!(request.method(), "POST");
            }
            other => panic!("unexpected classification: {:?}", other),
        }
    }

    #[test]
    fn anything_else_is_rejected_by_name() {
        let input = RequestInput::new(42u32);
        assert_eq!(input.type_name(), "u32");

        let error = input.classify().unwrap_err();
        assert!(matches!(error, Error::UnrecognizedInputType("u32")));
        assert!(error.to_string().contains("Unknown type for input"));
    }
}
