//! Intercepts `fetch` calls in tests: the next request is checked against a declared
//! expectation and answered with a canned response, without any network I/O.
//!
//! ```no_run
//! use denock::{denock, fetch, DenockOptions};
//!
//! # async fn run() -> Result<(), denock::Error> {
//! let interceptor = denock(
//!     DenockOptions::new("https", "api.example.com", "/v1/users")
//!         .with_method("GET")
//!         .with_response_body("[]"),
//! );
//!
//! let response = fetch("https://api.example.com/v1/users", None).await?;
//! assert!(response.ok());
//! assert_eq!(interceptor.called(), 1);
//! # Ok(())
//! # }
//! ```

mod data;
mod denock_options;
pub mod error;
mod extractor;
mod fetch;
mod input;
mod interceptor;
mod url_formatter;
mod util;
mod verifier;

pub use data::{RequestFacts, RequestInit, Response};
pub use denock_options::DenockOptions;
pub use error::{Error, HeaderDifference, MismatchDifference, MismatchKind};
pub use extractor::{drain_body, extract_request_facts};
pub use fetch::{fetch, Fetch, FetchBinding, HyperFetch};
pub use input::{ClassifiedInput, RequestInput};
pub use interceptor::{denock, denock_on, InterceptionState, Interceptor};
pub use url_formatter::format_target_url;
pub use verifier::verify_match;

pub use async_trait::async_trait;
