use crate::{
    data::user::{NewUser, User, UserPage},
    error::Error,
};
use denock::{fetch, RequestInit, Response};

const DEFAULT_DOMAIN_NAME: &str = "https://api.example.com";

/// Builder used to build a UsersApiClient instance
#[derive(Debug, Clone, Default)]
pub struct UsersApiClientBuilder {
    domain_name: Option<String>,
    token: Option<String>,
}

impl UsersApiClientBuilder {
    /// Create a new UsersApiClientBuilder instance.
    pub fn new() -> Self {
        Self {
            domain_name: None,
            token: None,
        }
    }

    /// Use the given domain_name when building a UsersApiClient instance.
    ///
    /// # Arguments
    /// `domain_name` - a domain name, including the protocol, to use when calling the API.
    ///
    /// # Returns
    /// This builder.
    pub fn with_domain_name<T: Into<String>>(mut self, domain_name: T) -> Self {
        self.domain_name = Some(domain_name.into());
        self
    }

    /// Send the given bearer token with every request.
    ///
    /// # Arguments
    /// `token` - an API token.
    ///
    /// # Returns
    /// This builder.
    pub fn with_token<T: Into<String>>(mut self, token: T) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Consume the builder and create a UsersApiClient instance using all of the previously configured values or
    /// their defaults.
    pub fn build(mut self) -> UsersApiClient {
        UsersApiClient {
            domain_name: self
                .domain_name
                .take()
                .unwrap_or_else(|| String::from(DEFAULT_DOMAIN_NAME)),
            token: self.token.take(),
        }
    }
}

/// A client for a users REST API. All requests go through `denock::fetch`.
#[derive(Debug, Clone)]
pub struct UsersApiClient {
    domain_name: String,
    token: Option<String>,
}

impl UsersApiClient {
    /// Create a UsersApiClient for the default domain, without a token.
    pub fn new() -> Self {
        UsersApiClientBuilder::new().build()
    }

    /// Gets a page of users.
    ///
    /// # Arguments
    /// `page` - the page number, starting from 1.
    pub async fn list_users(&self, page: u32) -> Result<UserPage, Error> {
        let url = format!("{}/v1/users?page={}", self.domain_name, page);
        let response = fetch(url, Some(self.init("GET"))).await?;

        Ok(Self::check_status(response)?.json()?)
    }

    /// Gets a single user.
    ///
    /// # Returns
    /// `Error::UserNotFound` when the API answers 404.
    pub async fn get_user(&self, id: u64) -> Result<User, Error> {
        let url = format!("{}/v1/users/{}", self.domain_name, id);
        let response = fetch(url, Some(self.init("GET"))).await?;

        if response.status() == 404 {
            return Err(Error::UserNotFound(id));
        }

        Ok(Self::check_status(response)?.json()?)
    }

    /// Creates a user and returns it with its new id.
    pub async fn create_user(&self, new_user: &NewUser) -> Result<User, Error> {
        if !new_user.email.contains('@') {
            return Err(Error::InvalidEmail(new_user.email.clone()));
        }

        let url = format!("{}/v1/users", self.domain_name);
        let init = self
            .init("POST")
            .with_header("content-type", "application/json")
            .with_body(serde_json::to_string(new_user)?);
        let response = fetch(url, Some(init)).await?;

        Ok(Self::check_status(response)?.json()?)
    }

    fn init(&self, method: &str) -> RequestInit {
        let init = RequestInit::new().with_method(method);

        match &self.token {
            Some(token) => init.with_header("authorization", format!("Bearer {}", token)),
            None => init,
        }
    }

    fn check_status(response: Response) -> Result<Response, Error> {
        if response.ok() {
            Ok(response)
        } else {
            Err(Error::UnexpectedStatus(response.status()))
        }
    }
}

impl Default for UsersApiClient {
    fn default() -> Self {
        Self::new()
    }
}
