use crate::{
    error::Error,
    extractor::extract_request_facts,
    fetch::{Fetch, FetchBinding},
    input::RequestInput,
    url_formatter::format_target_url,
    verifier::verify_match,
    DenockOptions, RequestInit, Response,
};
use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, warn};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum InterceptionState {
    Installed,
    Restored,
}

#[derive(Debug)]
struct CallStatus {
    called: usize,
    state: InterceptionState,
}

/// The fetch installed in place of the original one while an interception is active.
///
/// Once restored it forwards every call to the fetch it replaced, so an interception
/// stacked on top of it keeps working.
#[derive(Debug)]
struct DenockFetch {
    options: DenockOptions,
    target_url: String,
    call_limit: usize,
    original: Arc<dyn Fetch>,
    binding: FetchBinding,
    status: Mutex<CallStatus>,
}

impl DenockFetch {
    fn new(options: DenockOptions, binding: FetchBinding, original: Arc<dyn Fetch>) -> Self {
        Self {
            target_url: format_target_url(&options),
            call_limit: options.interception(),
            options,
            original,
            binding,
            status: Mutex::new(CallStatus {
                called: 0,
                state: InterceptionState::Installed,
            }),
        }
    }

    fn status(&self) -> MutexGuard<'_, CallStatus> {
        self.status
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Counts the call if the interception is still installed. Claiming the last call of
    /// the budget restores the original right away.
    fn claim_call(&self) -> Option<usize> {
        let mut status = self.status();

        if status.state == InterceptionState::Restored {
            return None;
        }

        status.called += 1;
        let call_number = status.called;

        if call_number >= self.call_limit {
            debug!(target_url = %self.target_url, call_number, "interception budget reached");
            self.restore_locked(&mut status);
        }

        Some(call_number)
    }

    fn restore(&self) {
        let mut status = self.status();
        self.restore_locked(&mut status);
    }

    fn restore_locked(&self, status: &mut CallStatus) {
        if status.state == InterceptionState::Restored {
            return;
        }
        status.state = InterceptionState::Restored;

        if self.binding.replace_if_current(self, self.original.clone()) {
            debug!(target_url = %self.target_url, "original fetch restored");
        } else {
            debug!(
                target_url = %self.target_url,
                "interception restored underneath a newer one, forwarding calls"
            );
        }
    }

    async fn verify(&self, input: RequestInput, init: Option<RequestInit>) -> Result<(), Error> {
        let classified = input.classify()?;
        let facts = extract_request_facts(classified, init).await?;

        verify_match(&self.target_url, &self.options, &facts)
    }

    fn response(&self) -> Response {
        Response::new(
            self.options.response_status(),
            self.options.response_headers().clone(),
            self.options.response_body().unwrap_or_default().into(),
        )
    }
}

#[async_trait]
impl Fetch for DenockFetch {
    async fn fetch(
        &self,
        input: RequestInput,
        init: Option<RequestInit>,
    ) -> Result<Response, Error> {
        let call_number = match self.claim_call() {
            Some(call_number) => call_number,
            None => return self.original.fetch(input, init).await,
        };

        debug!(
            target_url = %self.target_url,
            call_number,
            call_limit = self.call_limit,
            input_type = input.type_name(),
            "intercepted fetch"
        );

        if let Err(error) = self.verify(input, init).await {
            warn!(target_url = %self.target_url, %error, "intercepted request did not match");
            self.restore();
            return Err(error);
        }

        Ok(self.response())
    }
}

/// Handle on an installed interception.
#[derive(Debug, Clone)]
pub struct Interceptor {
    fetch: Arc<DenockFetch>,
}

impl Interceptor {
    /// Puts the original fetch back now, whatever the call count is.
    pub fn destroy(&self) {
        self.fetch.restore();
    }

    /// Number of calls intercepted so far.
    pub fn called(&self) -> usize {
        self.fetch.status().called
    }

    pub fn state(&self) -> InterceptionState {
        self.fetch.status().state
    }

    pub fn target_url(&self) -> &str {
        &self.fetch.target_url
    }
}

/// Intercepts the process-wide [`fetch`](crate::fetch()).
pub fn denock(options: DenockOptions) -> Interceptor {
    denock_on(&FetchBinding::global(), options)
}

/// Intercepts the fetch held by `binding`.
pub fn denock_on(binding: &FetchBinding, options: DenockOptions) -> Interceptor {
    let fetch = binding.wrap(|original| DenockFetch::new(options, binding.clone(), original));

    debug!(
        target_url = %fetch.target_url,
        call_limit = fetch.call_limit,
        "interception installed"
    );

    Interceptor { fetch }
}
