use crate::error::Error;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Describes one expected request and the canned response returned for it.
#[derive(Debug, Clone, Default)]
pub struct DenockOptions {
    protocol: String,
    host: String,
    port: Option<u16>,
    path: String,
    query_params: BTreeMap<String, String>,
    method: Option<String>,
    body: Option<String>,
    headers: Option<HashMap<String, String>>,
    response_status: Option<u16>,
    response_headers: HashMap<String, String>,
    response_body: Option<String>,
    interception: Option<usize>,
}

impl DenockOptions {
    pub fn new<S1: Into<String>, S2: Into<String>, S3: Into<String>>(
        protocol: S1,
        host: S2,
        path: S3,
    ) -> Self {
        Self {
            protocol: protocol.into(),
            host: host.into(),
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_query_param<S1: Into<String>, S2: Into<String>>(
        mut self,
        key: S1,
        value: S2,
    ) -> Self {
        self.query_params.insert(key.into(), value.into());
        self
    }

    pub fn with_method<S: Into<String>>(mut self, method: S) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn with_body<S: Into<String>>(mut self, body: S) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Expect the request to carry this header. Other headers on the request are ignored.
    pub fn with_header<S1: Into<String>, S2: Into<String>>(mut self, name: S1, value: S2) -> Self {
        self.headers
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn with_response_status(mut self, status: u16) -> Self {
        self.response_status = Some(status);
        self
    }

    pub fn with_response_header<S1: Into<String>, S2: Into<String>>(
        mut self,
        name: S1,
        value: S2,
    ) -> Self {
        self.response_headers.insert(name.into(), value.into());
        self
    }

    pub fn with_response_body<S: Into<String>>(mut self, body: S) -> Self {
        self.response_body = Some(body.into());
        self
    }

    pub fn with_response_json<T: Serialize>(mut self, body: &T) -> Result<Self, Error> {
        self.response_body = Some(serde_json::to_string(body)?);
        Ok(self)
    }

    /// Number of calls intercepted before the original fetch is put back.
    pub fn with_interception(mut self, interception: usize) -> Self {
        self.interception = Some(interception);
        self
    }

    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> Option<u16> {
        self.port.filter(|port| *port != 0)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query_params(&self) -> &BTreeMap<String, String> {
        &self.query_params
    }

    pub fn method(&self) -> Option<&str> {
        self.method.as_deref()
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn headers(&self) -> Option<&HashMap<String, String>> {
        self.headers.as_ref()
    }

    pub fn response_status(&self) -> u16 {
        match self.response_status {
            Some(status) if status != 0 => status,
            _ => 200,
        }
    }

    pub fn response_headers(&self) -> &HashMap<String, String> {
        &self.response_headers
    }

    pub fn response_body(&self) -> Option<&str> {
        self.response_body.as_deref()
    }

    pub fn interception(&self) -> usize {
        match self.interception {
            Some(interception) if interception != 0 => interception,
            _ => 1,
        }
    }
}
