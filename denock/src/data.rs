use crate::error::Error;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// Request options passed next to the fetch input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestInit {
    pub method: Option<String>,
    pub body: Option<String>,
    pub headers: Option<HashMap<String, String>>,
}

impl RequestInit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_method<S: Into<String>>(mut self, method: S) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn with_body<S: Into<String>>(mut self, body: S) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_header<S1: Into<String>, S2: Into<String>>(mut self, name: S1, value: S2) -> Self {
        self.headers
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }
}

/// What was observed about an intercepted request. `None` means "not given",
/// which is not the same as an empty body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestFacts {
    pub url: String,
    pub method: Option<String>,
    pub body: Option<String>,
    pub headers: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: u16,
    ok: bool,
    headers: HashMap<String, String>,
    body: String,
}

impl Response {
    pub fn new(status: u16, headers: HashMap<String, String>, body: String) -> Self {
        Self {
            status,
            ok: (200..=299).contains(&status),
            headers,
            body,
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn ok(&self) -> bool {
        self.ok
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    pub fn text(&self) -> &str {
        &self.body
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[test]
    fn ok_covers_the_2xx_range() {
        let ok = |status| Response::new(status, HashMap::new(), String::new()).ok();

        assert!(!ok(199));
        assert!(ok(200));
        assert!(ok(299));
        assert!(!ok(300));
        assert!(!ok(404));
    }

    #[test]
    fn json_body_is_deserialized() {
        #[derive(Deserialize)]
        struct User {
            name: String,
        }

        let response = Response::new(200, HashMap::new(), r#"{"name":"ada"}"#.into());
        let user: User = response.json().unwrap();

        assert_eq!(user.name, "ada");
        assert!(matches!(
            Response::new(200, HashMap::new(), "nope".into()).json::<User>(),
            Err(Error::JsonError(_))
        ));
    }
}
