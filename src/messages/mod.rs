use tokio::sync::oneshot;

use crate::domain::UserId;
use crate::store::{CreateForm, Settlement, ViewSnapshot};

/// Reply channel carried by every request.
pub type Response<T> = oneshot::Sender<T>;

/// Typed messages for the user list actor. Each variant carries its
/// parameters and a oneshot channel for the reply.
#[derive(Debug)]
pub enum StoreRequest {
    /// Fetch the configured page; replies once the fetch has settled.
    Load {
        respond_to: Response<Settlement>,
    },
    /// Create a user remotely; replies once the create has settled.
    Create {
        name: String,
        job: String,
        respond_to: Response<Settlement>,
    },
    Delete {
        id: UserId,
        respond_to: Response<()>,
    },
    SetDraft {
        id: UserId,
        text: String,
        respond_to: Response<()>,
    },
    ApplyDraft {
        id: UserId,
        respond_to: Response<()>,
    },
    SetSearch {
        text: String,
        respond_to: Response<()>,
    },
    SetForm {
        form: CreateForm,
        respond_to: Response<()>,
    },
    Snapshot {
        respond_to: Response<ViewSnapshot>,
    },
    Shutdown,
}
