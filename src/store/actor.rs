use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

use super::state::{RequestTicket, Settlement, UserListStore};
use crate::clients::UserListClient;
use crate::domain::{CreatedUser, UserRecord};
use crate::error::RemoteError;
use crate::messages::{Response, StoreRequest};
use crate::remote::RemoteUserService;

/// Outcome of a remote call, routed back into the actor's mailbox.
#[derive(Debug)]
enum Resolution {
    Loaded {
        ticket: RequestTicket,
        outcome: Result<Vec<UserRecord>, RemoteError>,
        respond_to: Response<Settlement>,
    },
    Created {
        ticket: RequestTicket,
        outcome: Result<CreatedUser, RemoteError>,
        respond_to: Response<Settlement>,
    },
}

/// Owns one [`UserListStore`] and applies requests to it one at a time.
///
/// Remote calls run in spawned tasks so the mailbox keeps draining while they
/// are in flight. Their outcomes come back as [`Resolution`]s and are applied in
/// a single step, which is where stale responses get discarded.
pub struct UserListActor {
    receiver: mpsc::Receiver<StoreRequest>,
    resolutions: mpsc::UnboundedReceiver<Resolution>,
    resolution_sender: mpsc::UnboundedSender<Resolution>,
    remote: Arc<dyn RemoteUserService>,
    store: UserListStore,
    page: u32,
}

impl UserListActor {
    pub fn new(
        buffer_size: usize,
        remote: Arc<dyn RemoteUserService>,
        page: u32,
    ) -> (Self, UserListClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (resolution_sender, resolutions) = mpsc::unbounded_channel();
        let actor = Self {
            receiver,
            resolutions,
            resolution_sender,
            remote,
            store: UserListStore::new(),
            page,
        };
        let client = UserListClient::new(sender);
        (actor, client)
    }

    #[instrument(name = "user_list_actor", skip(self), fields(page = self.page))]
    pub async fn run(mut self) {
        info!("UserListActor starting");

        loop {
            tokio::select! {
                msg = self.receiver.recv() => match msg {
                    Some(StoreRequest::Shutdown) => {
                        info!("UserListActor shutting down");
                        break;
                    }
                    Some(request) => self.handle_request(request),
                    None => break,
                },
                Some(resolution) = self.resolutions.recv() => {
                    self.handle_resolution(resolution);
                }
            }
        }

        info!("UserListActor stopped");
    }

    fn handle_request(&mut self, request: StoreRequest) {
        match request {
            StoreRequest::Load { respond_to } => self.handle_load(respond_to),
            StoreRequest::Create {
                name,
                job,
                respond_to,
            } => self.handle_create(name, job, respond_to),
            StoreRequest::Delete { id, respond_to } => {
                self.store.delete(&id);
                let _ = respond_to.send(());
            }
            StoreRequest::SetDraft {
                id,
                text,
                respond_to,
            } => {
                self.store.set_draft(id, text);
                let _ = respond_to.send(());
            }
            StoreRequest::ApplyDraft { id, respond_to } => {
                self.store.apply_draft(&id);
                let _ = respond_to.send(());
            }
            StoreRequest::SetSearch { text, respond_to } => {
                self.store.set_search(text);
                let _ = respond_to.send(());
            }
            StoreRequest::SetForm { form, respond_to } => {
                self.store.set_form(form);
                let _ = respond_to.send(());
            }
            StoreRequest::Snapshot { respond_to } => {
                let _ = respond_to.send(self.store.snapshot());
            }
            StoreRequest::Shutdown => {}
        }
    }

    /// **Background Handler** - the spawned task owns the reply channel until
    /// the remote call finishes, then hands both back to the actor.
    #[instrument(skip(self, respond_to))]
    fn handle_load(&mut self, respond_to: Response<Settlement>) {
        let ticket = self.store.begin_load();
        debug!(seq = ticket.seq, "Load issued");

        let remote = Arc::clone(&self.remote);
        let resolutions = self.resolution_sender.clone();
        let page = self.page;
        tokio::spawn(async move {
            let outcome = remote.list_users(page).await;
            let _ = resolutions.send(Resolution::Loaded {
                ticket,
                outcome,
                respond_to,
            });
        });
    }

    #[instrument(fields(user_name = %name, job = %job), skip(self, name, job, respond_to))]
    fn handle_create(&mut self, name: String, job: String, respond_to: Response<Settlement>) {
        let (ticket, user) = self.store.begin_create(name, job);
        debug!(seq = ticket.seq, "Create issued");

        let remote = Arc::clone(&self.remote);
        let resolutions = self.resolution_sender.clone();
        tokio::spawn(async move {
            let outcome = remote.create_user(user).await;
            let _ = resolutions.send(Resolution::Created {
                ticket,
                outcome,
                respond_to,
            });
        });
    }

    fn handle_resolution(&mut self, resolution: Resolution) {
        match resolution {
            Resolution::Loaded {
                ticket,
                outcome,
                respond_to,
            } => {
                let settlement = self.store.settle_load(ticket, outcome);
                debug!(seq = ticket.seq, settlement = ?settlement, "Load settled");
                let _ = respond_to.send(settlement);
            }
            Resolution::Created {
                ticket,
                outcome,
                respond_to,
            } => {
                let settlement = self.store.settle_create(ticket, outcome);
                debug!(seq = ticket.seq, settlement = ?settlement, "Create settled");
                let _ = respond_to.send(settlement);
            }
        }
    }
}
