use tokio::sync::mpsc;
use tracing::{debug, instrument};

use super::macros::client_method;
use crate::domain::UserId;
use crate::error::StoreError;
use crate::messages::StoreRequest;
use crate::store::{CreateForm, Settlement, ViewSnapshot};

/// Handle to a running [`UserListActor`](crate::store::UserListActor).
///
/// Cheap to clone. Every method is one request/reply round trip; `load` and
/// `create` reply only after their remote call has settled.
#[derive(Clone, Debug)]
pub struct UserListClient {
    sender: mpsc::Sender<StoreRequest>,
}

impl UserListClient {
    pub fn new(sender: mpsc::Sender<StoreRequest>) -> Self {
        Self { sender }
    }

    /// Asks the actor to stop. Requests queued behind it are dropped.
    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), StoreError> {
        debug!("Sending shutdown request");
        self.sender
            .send(StoreRequest::Shutdown)
            .await
            .map_err(|e| StoreError::ActorCommunicationError(e.to_string()))
    }
}

client_method!(UserListClient => fn load() -> Settlement as StoreRequest::Load);
client_method!(UserListClient => fn create(name: String, job: String) -> Settlement as StoreRequest::Create);
client_method!(UserListClient => fn delete(id: UserId) -> () as StoreRequest::Delete);
client_method!(UserListClient => fn set_draft(id: UserId, text: String) -> () as StoreRequest::SetDraft);
client_method!(UserListClient => fn apply_draft(id: UserId) -> () as StoreRequest::ApplyDraft);
client_method!(UserListClient => fn set_search(text: String) -> () as StoreRequest::SetSearch);
client_method!(UserListClient => fn set_form(form: CreateForm) -> () as StoreRequest::SetForm);
client_method!(UserListClient => fn snapshot() -> ViewSnapshot as StoreRequest::Snapshot);
