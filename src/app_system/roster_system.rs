use std::sync::Arc;

use tracing::{error, info, instrument};

use crate::clients::UserListClient;
use crate::config::Settings;
use crate::error::RemoteError;
use crate::remote::{RemoteUserService, ReqresClient};
use crate::store::UserListActor;

/// Starts the user list actor, wires in its remote service, and handles
/// shutdown. One system per view session.
pub struct RosterSystem {
    pub client: UserListClient,
    handle: tokio::task::JoinHandle<()>,
}

impl RosterSystem {
    /// Builds the system against the HTTP API described by `settings`.
    #[instrument(name = "roster_system", skip(settings), fields(base_url = %settings.base_url))]
    pub fn new(settings: &Settings) -> Result<Self, RemoteError> {
        let remote = ReqresClient::new(&settings.base_url, &settings.api_key, settings.timeout())?;
        Ok(Self::with_remote(Arc::new(remote), settings.mailbox, settings.page))
    }

    /// Builds the system around any remote service.
    pub fn with_remote(remote: Arc<dyn RemoteUserService>, buffer_size: usize, page: u32) -> Self {
        info!("Starting roster system");

        let (actor, client) = UserListActor::new(buffer_size, remote, page);
        let handle = tokio::spawn(actor.run());

        info!("Roster system started");
        Self { client, handle }
    }

    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down roster system");

        // Already stopped when the mailbox is closed.
        let _ = self.client.shutdown().await;
        drop(self.client);

        if let Err(e) = self.handle.await {
            error!(error = ?e, "Actor task failed");
            return Err(format!("Actor task failed: {:?}", e));
        }

        info!("Roster system shutdown complete");
        Ok(())
    }
}
