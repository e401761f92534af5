use crate::{error::Error, input::ClassifiedInput, util, RequestFacts, RequestInit};
use hyper::{body::HttpBody, Body, Request};

/// Collects URL, method, body and headers from a classified input and its init options.
///
/// Request objects override the init method and headers. Their body only overrides the
/// init body when draining it produced something.
pub async fn extract_request_facts(
    input: ClassifiedInput,
    init: Option<RequestInit>,
) -> Result<RequestFacts, Error> {
    match input {
        ClassifiedInput::StringUrl(url) => Ok(facts_from_init(url, init)),
        ClassifiedInput::UrlObject(uri) => Ok(facts_from_init(uri.to_string(), init)),
        ClassifiedInput::RequestObject(request) => {
            let init_body = init.and_then(|init| init.body);
            facts_from_request(request, init_body).await
        }
    }
}

pub fn facts_from_init(url: String, init: Option<RequestInit>) -> RequestFacts {
    let RequestInit {
        method,
        body,
        headers,
    } = init.unwrap_or_default();

    RequestFacts {
        url,
        method,
        body,
        headers,
    }
}

pub async fn facts_from_request(
    request: Request<Body>,
    fallback_body: Option<String>,
) -> Result<RequestFacts, Error> {
    let (parts, body) = request.into_parts();
    let drained = drain_body(body).await?;

    Ok(RequestFacts {
        url: parts.uri.to_string(),
        method: Some(parts.method.as_str().to_uppercase()),
        body: if drained.is_empty() {
            fallback_body
        } else {
            Some(drained)
        },
        headers: Some(util::extract_headers(&parts.headers)),
    })
}

/// Reads the body chunk by chunk until it's exhausted. The body is consumed.
pub async fn drain_body(mut body: Body) -> Result<String, Error> {
    let mut bytes = Vec::new();

    while let Some(chunk) = body.data().await {
        let chunk = chunk.map_err(|_| Error::InvalidBody)?;
        bytes.extend_from_slice(&chunk);
    }

    Ok(String::from_utf8_lossy(&bytes).into())
}
