use std::fmt;

/// Identifier of a user record.
///
/// The list endpoint issues numeric ids while the create endpoint issues its own
/// string ids, so the two origins are kept apart: `Listed(7)` and
/// `Created("7")` are different users.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UserId {
    Listed(u64),
    Created(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Listed(id) => write!(f, "{}", id),
            UserId::Created(id) => f.write_str(id),
        }
    }
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        UserId::Listed(id)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        UserId::Created(id.to_string())
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        UserId::Created(id)
    }
}

/// One user entry in the displayed list.
///
/// Listed users carry `email` and `avatar`; users created during the session
/// carry `job`. A created user's combined name lives in `first_name`.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub job: Option<String>,
}

/// Payload for creating a new user on the remote service.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: String,
    pub job: String,
}

/// What the remote service returns for a successful create.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedUser {
    pub id: String,
    pub name: String,
    pub job: String,
}

/// Replacement name fields produced by applying a draft.
#[derive(Debug, Clone, PartialEq)]
pub struct NamePatch {
    pub first_name: String,
    pub last_name: String,
}

impl UserRecord {
    /// Creates a record as the list endpoint describes it.
    pub fn listed(
        id: u64,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        avatar: impl Into<String>,
    ) -> Self {
        Self {
            id: UserId::Listed(id),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: Some(email.into()),
            avatar: Some(avatar.into()),
            job: None,
        }
    }

    /// The combined "first last" name used for search and draft seeding.
    pub fn full_name(&self) -> String {
        if self.last_name.is_empty() {
            self.first_name.clone()
        } else {
            format!("{} {}", self.first_name, self.last_name)
        }
    }

    /// Replaces the name fields, leaving every other field as it was.
    pub fn rename(&mut self, patch: NamePatch) {
        self.first_name = patch.first_name;
        self.last_name = patch.last_name;
    }
}

impl From<CreatedUser> for UserRecord {
    fn from(created: CreatedUser) -> Self {
        Self {
            id: UserId::Created(created.id),
            first_name: created.name,
            last_name: String::new(),
            email: None,
            avatar: None,
            job: Some(created.job),
        }
    }
}

impl NamePatch {
    /// Parses a draft into name fields.
    ///
    /// The first whitespace-separated token becomes the first name and the rest,
    /// joined by single spaces, the last name. Returns `None` for a blank draft.
    pub fn from_draft(draft: &str) -> Option<Self> {
        let mut tokens = draft.split_whitespace();
        let first_name = tokens.next()?.to_string();
        let last_name = tokens.collect::<Vec<_>>().join(" ");
        Some(Self {
            first_name,
            last_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_patch_splits_first_token() {
        let patch = NamePatch::from_draft("  Jane Smith Extra ").unwrap();
        assert_eq!(patch.first_name, "Jane");
        assert_eq!(patch.last_name, "Smith Extra");
    }

    #[test]
    fn test_name_patch_collapses_inner_whitespace() {
        let patch = NamePatch::from_draft("Jane \t Smith   Extra").unwrap();
        assert_eq!(patch.last_name, "Smith Extra");
    }

    #[test]
    fn test_name_patch_single_token_has_empty_last_name() {
        let patch = NamePatch::from_draft("Cher").unwrap();
        assert_eq!(patch.first_name, "Cher");
        assert_eq!(patch.last_name, "");
    }

    #[test]
    fn test_name_patch_blank_draft() {
        assert_eq!(NamePatch::from_draft(""), None);
        assert_eq!(NamePatch::from_draft("   \n"), None);
    }

    #[test]
    fn test_listed_and_created_ids_never_collide() {
        assert_ne!(UserId::Listed(7), UserId::Created("7".into()));
        assert_eq!(UserId::Listed(7).to_string(), UserId::Created("7".into()).to_string());
    }

    #[test]
    fn test_created_user_becomes_record() {
        let record = UserRecord::from(CreatedUser {
            id: "101".into(),
            name: "Ann".into(),
            job: "Eng".into(),
        });
        assert_eq!(record.id, UserId::Created("101".into()));
        assert_eq!(record.first_name, "Ann");
        assert_eq!(record.job.as_deref(), Some("Eng"));
        assert_eq!(record.email, None);
    }

    #[test]
    fn test_full_name_without_last_name_has_no_trailing_space() {
        let record = UserRecord::from(CreatedUser {
            id: "102".into(),
            name: "Ann Lee".into(),
            job: "Eng".into(),
        });
        assert_eq!(record.full_name(), "Ann Lee");

        let mononym = UserRecord::listed(7, "Cher", "", "cher@reqres.in", "7.jpg");
        assert_eq!(mononym.full_name(), "Cher");
    }

    #[test]
    fn test_rename_keeps_other_fields() {
        let mut record = UserRecord::listed(1, "John", "Doe", "john@reqres.in", "a.png");
        record.rename(NamePatch {
            first_name: "Johnny".into(),
            last_name: "Doe".into(),
        });
        assert_eq!(record.full_name(), "Johnny Doe");
        assert_eq!(record.email.as_deref(), Some("john@reqres.in"));
        assert_eq!(record.avatar.as_deref(), Some("a.png"));
    }
}
