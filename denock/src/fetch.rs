use crate::{
    error::Error,
    input::{ClassifiedInput, RequestInput},
    util, RequestInit, Response,
};
use async_trait::async_trait;
use hyper::{body, Body, Request};
use hyper_tls::HttpsConnector;
use lazy_static::lazy_static;
use std::{
    fmt::Debug,
    sync::{Arc, Mutex},
};

lazy_static! {
    static ref GLOBAL_BINDING: FetchBinding = FetchBinding::new(Arc::new(HyperFetch::new()));
}

/// The fetch contract: an input plus optional init options in, a response out.
#[async_trait]
pub trait Fetch: Debug + Send + Sync {
    async fn fetch(
        &self,
        input: RequestInput,
        init: Option<RequestInit>,
    ) -> Result<Response, Error>;
}

/// A swappable slot holding the fetch implementation callers go through.
#[derive(Debug, Clone)]
pub struct FetchBinding {
    slot: Arc<Mutex<Arc<dyn Fetch>>>,
}

impl FetchBinding {
    pub fn new(fetch: Arc<dyn Fetch>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(fetch)),
        }
    }

    /// The process-wide binding used by [`fetch`].
    pub fn global() -> Self {
        GLOBAL_BINDING.clone()
    }

    pub fn current(&self) -> Arc<dyn Fetch> {
        // the slot only ever holds a complete Arc, a poisoned lock is still consistent
        self.slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Installs `fetch` and hands back whatever was there before.
    pub fn replace(&self, fetch: Arc<dyn Fetch>) -> Arc<dyn Fetch> {
        let mut slot = self
            .slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        std::mem::replace(&mut *slot, fetch)
    }

    /// Builds a fetch around the current one and installs it, under a single lock.
    pub fn wrap<F, B>(&self, build: B) -> Arc<F>
    where
        F: Fetch + 'static,
        B: FnOnce(Arc<dyn Fetch>) -> F,
    {
        let mut slot = self
            .slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let wrapper = Arc::new(build(slot.clone()));
        let installed: Arc<dyn Fetch> = wrapper.clone();
        *slot = installed;
        wrapper
    }

    /// Installs `fetch` only while `expected` is still the current implementation.
    pub fn replace_if_current(&self, expected: &dyn Fetch, fetch: Arc<dyn Fetch>) -> bool {
        let mut slot = self
            .slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if same_fetch(&slot, expected) {
            *slot = fetch;
            true
        } else {
            false
        }
    }

    pub fn is_bound_to(&self, fetch: &dyn Fetch) -> bool {
        same_fetch(&self.current(), fetch)
    }

    pub async fn fetch<I: Into<RequestInput>>(
        &self,
        input: I,
        init: Option<RequestInit>,
    ) -> Result<Response, Error> {
        let fetch = self.current();
        fetch.fetch(input.into(), init).await
    }
}

// Compares the data pointers only, vtable pointers may differ between codegen units.
fn same_fetch(lhs: &Arc<dyn Fetch>, rhs: &dyn Fetch) -> bool {
    Arc::as_ptr(lhs) as *const () == rhs as *const _ as *const ()
}

/// Calls whatever fetch implementation is currently installed process-wide.
pub async fn fetch<I: Into<RequestInput>>(
    input: I,
    init: Option<RequestInit>,
) -> Result<Response, Error> {
    FetchBinding::global().fetch(input, init).await
}

/// Performs real HTTP(S) requests with hyper.
#[derive(Debug)]
pub struct HyperFetch {}

impl HyperFetch {
    pub fn new() -> Self {
        Self {}
    }

    fn build_request(url: &str, init: Option<RequestInit>) -> Result<Request<Body>, Error> {
        let init = init.unwrap_or_default();
        let mut request_builder = Request::builder()
            .uri(url)
            .method(init.method.as_deref().unwrap_or("GET"));

        if let (Some(headers_mut), Some(headers)) = (request_builder.headers_mut(), &init.headers)
        {
            util::put_headers(headers_mut, headers)?;
        }

        Ok(request_builder.body(init.body.unwrap_or_default().into())?)
    }
}

#[async_trait]
impl Fetch for HyperFetch {
    async fn fetch(
        &self,
        input: RequestInput,
        init: Option<RequestInit>,
    ) -> Result<Response, Error> {
        let request = match input.classify()? {
            ClassifiedInput::StringUrl(url) => Self::build_request(&url, init)?,
            ClassifiedInput::UrlObject(uri) => Self::build_request(&uri.to_string(), init)?,
            ClassifiedInput::RequestObject(request) => request,
        };

        let client = hyper::Client::builder().build::<_, Body>(HttpsConnector::new());

        let response = client.request(request).await?;

        let status_code = response.status().as_u16();
        let headers = util::extract_headers(response.headers());
        let body = body::to_bytes(response.into_body()).await?;

        Ok(Response::new(
            status_code,
            headers,
            String::from_utf8_lossy(&body).into(),
        ))
    }
}

impl Default for HyperFetch {
    fn default() -> Self {
        Self::new()
    }
}
