mod data;
mod error;
mod users_api_client;

pub use data::user::{NewUser, User, UserPage};
pub use error::Error;
pub use users_api_client::{UsersApiClient, UsersApiClientBuilder};
