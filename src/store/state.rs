use std::collections::{HashMap, HashSet};

use tracing::{debug, error, info};

use crate::domain::{CreatedUser, NamePatch, NewUser, UserId, UserRecord};
use crate::error::RemoteError;

pub const LOAD_FAILED: &str = "Error fetching users";
pub const CREATE_FAILED: &str = "Failed to create user.";
pub const UNEXPECTED_FAILURE: &str = "An unexpected error occurred.";

/// Which remote operation a ticket belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Load,
    Create,
}

/// Identity of one issued remote request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    pub kind: RequestKind,
    pub seq: u64,
}

/// What happened when a remote outcome was handed to the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Settlement {
    Applied,
    Failed { message: String },
    /// A newer request of the same kind was issued first; nothing changed.
    Superseded,
}

/// Inputs of the create form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateForm {
    pub name: String,
    pub job: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Notices {
    pub success: Option<String>,
    pub error: Option<String>,
}

/// Everything a view needs to render the store once.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSnapshot {
    /// The filtered view, in list order.
    pub users: Vec<UserRecord>,
    pub total: usize,
    pub search: String,
    pub drafts: HashMap<UserId, String>,
    pub form: CreateForm,
    pub notices: Notices,
    pub create_pending: bool,
}

impl ViewSnapshot {
    /// Whether the view should show its "No users found." hint.
    pub fn shows_empty_hint(&self) -> bool {
        self.users.is_empty() && self.notices.error.is_none()
    }
}

/// In-memory user list with search, per-user name drafts and notices.
///
/// Mutations are synchronous. Operations that need the server are split in two:
/// `begin_*` issues a [`RequestTicket`], and `settle_*` applies the outcome only
/// if that ticket is still the latest of its kind.
#[derive(Debug, Default)]
pub struct UserListStore {
    users: Vec<UserRecord>,
    search: String,
    drafts: HashMap<UserId, String>,
    form: CreateForm,
    notices: Notices,
    next_seq: u64,
    latest: HashMap<RequestKind, u64>,
}

impl UserListStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> &[UserRecord] {
        &self.users
    }

    pub fn get(&self, id: &UserId) -> Option<&UserRecord> {
        self.users.iter().find(|user| &user.id == id)
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn draft(&self, id: &UserId) -> Option<&str> {
        self.drafts.get(id).map(String::as_str)
    }

    pub fn form(&self) -> &CreateForm {
        &self.form
    }

    pub fn notices(&self) -> &Notices {
        &self.notices
    }

    /// Whether a request of this kind has been issued and not yet settled.
    pub fn is_pending(&self, kind: RequestKind) -> bool {
        self.latest.contains_key(&kind)
    }

    fn issue(&mut self, kind: RequestKind) -> RequestTicket {
        self.next_seq += 1;
        self.latest.insert(kind, self.next_seq);
        RequestTicket {
            kind,
            seq: self.next_seq,
        }
    }

    /// Marks the ticket settled. Returns false when a newer ticket of the same
    /// kind exists, or the ticket was already settled.
    fn accept(&mut self, ticket: RequestTicket) -> bool {
        if self.latest.get(&ticket.kind) == Some(&ticket.seq) {
            self.latest.remove(&ticket.kind);
            true
        } else {
            debug!(seq = ticket.seq, kind = ?ticket.kind, "Discarding stale resolution");
            false
        }
    }

    pub fn begin_load(&mut self) -> RequestTicket {
        self.issue(RequestKind::Load)
    }

    /// Applies a list fetch.
    ///
    /// Success replaces the list wholesale and reseeds every draft with the
    /// user's full name. Failure only sets the error notice.
    pub fn settle_load(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<Vec<UserRecord>, RemoteError>,
    ) -> Settlement {
        if !self.accept(ticket) {
            return Settlement::Superseded;
        }

        match outcome {
            Ok(fetched) => {
                let mut seen = HashSet::new();
                let users: Vec<UserRecord> = fetched
                    .into_iter()
                    .filter(|user| seen.insert(user.id.clone()))
                    .collect();

                self.drafts = users
                    .iter()
                    .map(|user| (user.id.clone(), user.full_name()))
                    .collect();
                self.users = users;
                self.notices.error = None;

                info!(user_count = self.users.len(), "User list loaded");
                Settlement::Applied
            }
            Err(e) => {
                error!(error = %e, "Error fetching users");
                self.notices.error = Some(LOAD_FAILED.to_string());
                Settlement::Failed {
                    message: LOAD_FAILED.to_string(),
                }
            }
        }
    }

    pub fn begin_create(
        &mut self,
        name: impl Into<String>,
        job: impl Into<String>,
    ) -> (RequestTicket, NewUser) {
        let ticket = self.issue(RequestKind::Create);
        let user = NewUser {
            name: name.into(),
            job: job.into(),
        };
        (ticket, user)
    }

    /// Applies a create response: the new record goes to the front of the list.
    pub fn settle_create(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<CreatedUser, RemoteError>,
    ) -> Settlement {
        if !self.accept(ticket) {
            return Settlement::Superseded;
        }

        match outcome {
            Ok(created) => {
                let record = UserRecord::from(created);
                // Keep ids unique if the server hands back one we already hold.
                self.users.retain(|user| user.id != record.id);

                self.notices.success = Some(format!("User created with ID: {}", record.id));
                self.notices.error = None;
                self.form = CreateForm::default();

                info!(user_id = %record.id, "User added to list");
                self.users.insert(0, record);
                Settlement::Applied
            }
            Err(e) => {
                let message = create_failure_message(&e);
                error!(error = %e, message = %message, "Failed to create user");
                self.notices.error = Some(message.clone());
                Settlement::Failed { message }
            }
        }
    }

    /// Removes the user locally. Unknown ids are ignored.
    pub fn delete(&mut self, id: &UserId) {
        let before = self.users.len();
        self.users.retain(|user| &user.id != id);
        self.drafts.remove(id);

        if self.users.len() < before {
            info!(user_id = %id, "User deleted");
        } else {
            debug!(user_id = %id, "Delete ignored, no such user");
        }
    }

    pub fn set_draft(&mut self, id: UserId, text: impl Into<String>) {
        self.drafts.insert(id, text.into());
    }

    /// Commits the draft for `id` into the record's name fields.
    ///
    /// A blank or missing draft, or an id with no record, is a no-op. Otherwise
    /// the draft is cleared and so is the search query.
    pub fn apply_draft(&mut self, id: &UserId) {
        let Some(patch) = self.drafts.get(id).and_then(|draft| NamePatch::from_draft(draft))
        else {
            debug!(user_id = %id, "Empty draft, nothing to apply");
            return;
        };

        let Some(user) = self.users.iter_mut().find(|user| &user.id == id) else {
            debug!(user_id = %id, "No such user, draft not applied");
            return;
        };
        user.rename(patch);
        info!(user_id = %id, user_name = %user.full_name(), "User renamed");

        self.drafts.insert(id.clone(), String::new());
        self.search.clear();
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    pub fn set_form(&mut self, form: CreateForm) {
        self.form = form;
    }

    /// Records whose full name contains the search query, ignoring case.
    ///
    /// Borrowing and lazy: calling it again starts over.
    pub fn filtered_view(&self) -> impl Iterator<Item = &UserRecord> + '_ {
        let needle = self.search.to_lowercase();
        self.users
            .iter()
            .filter(move |user| needle.is_empty() || user.full_name().to_lowercase().contains(&needle))
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        let users: Vec<UserRecord> = self.filtered_view().cloned().collect();
        let drafts = users
            .iter()
            .filter_map(|user| {
                self.drafts
                    .get(&user.id)
                    .map(|draft| (user.id.clone(), draft.clone()))
            })
            .collect();

        ViewSnapshot {
            users,
            total: self.users.len(),
            search: self.search.clone(),
            drafts,
            form: self.form.clone(),
            notices: self.notices.clone(),
            create_pending: self.is_pending(RequestKind::Create),
        }
    }
}

fn create_failure_message(error: &RemoteError) -> String {
    match error {
        RemoteError::Decode(_) => UNEXPECTED_FAILURE.to_string(),
        other => other
            .api_message()
            .map(str::to_string)
            .unwrap_or_else(|| CREATE_FAILED.to_string()),
    }
}
