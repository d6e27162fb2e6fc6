//! The remote user service the store pulls data from.

pub mod http;
pub mod wire;

use async_trait::async_trait;

use crate::domain::{CreatedUser, NewUser, UserRecord};
use crate::error::RemoteError;

pub use http::ReqresClient;

/// Server-side operations the user list depends on.
#[async_trait]
pub trait RemoteUserService: Send + Sync + 'static {
    /// Fetches one page of users, in server order.
    async fn list_users(&self, page: u32) -> Result<Vec<UserRecord>, RemoteError>;

    /// Creates a user and returns what the server echoed back.
    async fn create_user(&self, user: NewUser) -> Result<CreatedUser, RemoteError>;
}
