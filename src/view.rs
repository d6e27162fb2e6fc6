//! Terminal rendering of the user list and the line-based session that drives it.

use std::io::Write;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, instrument, warn};

use crate::clients::UserListClient;
use crate::domain::{UserId, UserRecord};
use crate::store::{CreateForm, Settlement, ViewSnapshot};

pub const EMPTY_HINT: &str = "No users found.";

const HELP: &str = "\
commands:
  search <text>        filter by name (empty clears)
  draft <id> <name>    edit the name draft of a user
  apply <id>           apply the draft to the user
  delete <id>          remove a user from the list
  name <text>          set the create form's name
  job <text>           set the create form's job
  create               create a user from the form
  reload               fetch the list again
  show                 print the list
  help                 print this help
  quit                 leave the session";

/// One line of session input.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Search(String),
    Draft { id: String, text: String },
    Apply(String),
    Delete(String),
    FormName(String),
    FormJob(String),
    Create,
    Reload,
    Show,
    Help,
    Quit,
}

impl SessionCommand {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let required = |what: &str| -> Result<String, String> {
            if rest.is_empty() {
                Err(format!("usage: {} {}", verb, what))
            } else {
                Ok(rest.to_string())
            }
        };

        match verb.to_lowercase().as_str() {
            "search" => Ok(Self::Search(rest.to_string())),
            "draft" => {
                let (id, text) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                if id.is_empty() {
                    return Err("usage: draft <id> <name>".to_string());
                }
                Ok(Self::Draft {
                    id: id.to_string(),
                    text: text.trim_start().to_string(),
                })
            }
            "apply" => required("<id>").map(Self::Apply),
            "delete" => required("<id>").map(Self::Delete),
            "name" => Ok(Self::FormName(rest.to_string())),
            "job" => Ok(Self::FormJob(rest.to_string())),
            "create" => Ok(Self::Create),
            "reload" => Ok(Self::Reload),
            "show" | "" => Ok(Self::Show),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(format!("unknown command: {} (try help)", other)),
        }
    }
}

/// Resolves an id typed by the user.
///
/// Visible records win, in list order, so a freshly created `"7"` is found
/// before a listed `7`. Otherwise digits mean a listed id.
pub fn resolve_user_id(text: &str, visible: &[UserRecord]) -> UserId {
    if let Some(user) = visible.iter().find(|user| user.id.to_string() == text) {
        return user.id.clone();
    }
    match text.parse::<u64>() {
        Ok(id) => UserId::Listed(id),
        Err(_) => UserId::Created(text.to_string()),
    }
}

pub fn render(snapshot: &ViewSnapshot) -> String {
    let mut out = String::new();

    if let Some(error) = &snapshot.notices.error {
        out.push_str(&format!("error: {}\n", error));
    }
    if let Some(success) = &snapshot.notices.success {
        out.push_str(&format!("{}\n", success));
    }
    if snapshot.create_pending {
        out.push_str("creating user...\n");
    }
    if snapshot.shows_empty_hint() {
        out.push_str(EMPTY_HINT);
        out.push('\n');
    }

    for user in &snapshot.users {
        out.push_str(&render_user(user, snapshot.drafts.get(&user.id)));
        out.push('\n');
    }

    if !snapshot.search.is_empty() {
        out.push_str(&format!(
            "showing {} of {} users matching \"{}\"\n",
            snapshot.users.len(),
            snapshot.total,
            snapshot.search
        ));
    }

    out
}

fn render_user(user: &UserRecord, draft: Option<&String>) -> String {
    let mut line = format!("[{}] {}", user.id, user.full_name());
    if let Some(email) = &user.email {
        line.push_str(&format!(" <{}>", email));
    }
    if let Some(job) = &user.job {
        line.push_str(&format!(" ({})", job));
    }
    if let Some(draft) = draft.filter(|draft| !draft.is_empty()) {
        line.push_str(&format!("  draft: \"{}\"", draft));
    }
    line
}

fn report(out: &mut impl Write, settlement: &Settlement) -> Result<()> {
    match settlement {
        Settlement::Superseded => writeln!(out, "(response discarded, a newer request is pending)")?,
        Settlement::Applied | Settlement::Failed { .. } => {}
    }
    Ok(())
}

/// Reads commands until EOF or `quit`, printing the list after each one.
#[instrument(skip_all)]
pub async fn run_session<R, W>(client: &UserListClient, input: R, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let settlement = client.load().await?;
    report(out, &settlement)?;
    write!(out, "{}", render(&client.snapshot().await?))?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await.context("reading session input")? {
        let command = match SessionCommand::parse(&line) {
            Ok(command) => command,
            Err(usage) => {
                writeln!(out, "{}", usage)?;
                continue;
            }
        };
        debug!(command = ?command, "Session command");

        if command == SessionCommand::Quit {
            break;
        }
        if command == SessionCommand::Help {
            writeln!(out, "{}", HELP)?;
            continue;
        }

        execute(client, command, out).await?;
        write!(out, "{}", render(&client.snapshot().await?))?;
    }

    out.flush()?;
    Ok(())
}

async fn execute<W: Write>(client: &UserListClient, command: SessionCommand, out: &mut W) -> Result<()> {
    let snapshot = client.snapshot().await?;
    let id = |text: &str| resolve_user_id(text, &snapshot.users);

    match command {
        SessionCommand::Search(text) => client.set_search(text).await?,
        SessionCommand::Draft { id: target, text } => client.set_draft(id(&target), text).await?,
        SessionCommand::Apply(target) => client.apply_draft(id(&target)).await?,
        SessionCommand::Delete(target) => client.delete(id(&target)).await?,
        SessionCommand::FormName(name) => {
            let form = CreateForm {
                name,
                ..snapshot.form.clone()
            };
            client.set_form(form).await?
        }
        SessionCommand::FormJob(job) => {
            let form = CreateForm {
                job,
                ..snapshot.form.clone()
            };
            client.set_form(form).await?
        }
        SessionCommand::Create => {
            let CreateForm { name, job } = snapshot.form.clone();
            if name.trim().is_empty() || job.trim().is_empty() {
                warn!("Create requested with an incomplete form");
                writeln!(out, "name and job are required (use: name <text>, job <text>)")?;
                return Ok(());
            }
            let settlement = client.create(name, job).await?;
            report(out, &settlement)?;
        }
        SessionCommand::Reload => {
            let settlement = client.load().await?;
            report(out, &settlement)?;
        }
        SessionCommand::Show | SessionCommand::Help | SessionCommand::Quit => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Notices;
    use std::collections::HashMap;

    fn snapshot(users: Vec<UserRecord>) -> ViewSnapshot {
        ViewSnapshot {
            total: users.len(),
            users,
            search: String::new(),
            drafts: HashMap::new(),
            form: CreateForm::default(),
            notices: Notices::default(),
            create_pending: false,
        }
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            SessionCommand::parse("search  jo "),
            Ok(SessionCommand::Search("jo".into()))
        );
        assert_eq!(SessionCommand::parse("search"), Ok(SessionCommand::Search(String::new())));
        assert_eq!(
            SessionCommand::parse("draft 3 Jane  Smith"),
            Ok(SessionCommand::Draft {
                id: "3".into(),
                text: "Jane  Smith".into()
            })
        );
        assert_eq!(SessionCommand::parse("APPLY 3"), Ok(SessionCommand::Apply("3".into())));
        assert_eq!(SessionCommand::parse("quit"), Ok(SessionCommand::Quit));
        assert_eq!(SessionCommand::parse(""), Ok(SessionCommand::Show));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(SessionCommand::parse("delete").is_err());
        assert!(SessionCommand::parse("draft").is_err());
        assert!(SessionCommand::parse("frobnicate 1").is_err());
    }

    #[test]
    fn test_resolve_prefers_visible_records() {
        let created = UserRecord::from(crate::domain::CreatedUser {
            id: "7".into(),
            name: "Ann".into(),
            job: "Eng".into(),
        });
        let listed = UserRecord::listed(7, "Michael", "Lawson", "m@reqres.in", "7.jpg");

        assert_eq!(
            resolve_user_id("7", &[created.clone(), listed.clone()]),
            UserId::Created("7".into())
        );
        assert_eq!(resolve_user_id("7", &[listed]), UserId::Listed(7));
        assert_eq!(resolve_user_id("7", &[]), UserId::Listed(7));
        assert_eq!(resolve_user_id("abc", &[]), UserId::Created("abc".into()));
    }

    #[test]
    fn test_render_empty_hint_and_error() {
        let mut view = snapshot(vec![]);
        assert_eq!(render(&view), "No users found.\n");

        view.notices.error = Some("Error fetching users".into());
        assert_eq!(render(&view), "error: Error fetching users\n");
    }

    #[test]
    fn test_render_users_with_drafts() {
        let john = UserRecord::listed(1, "John", "Doe", "john@reqres.in", "1.jpg");
        let mut view = snapshot(vec![john]);
        view.drafts.insert(UserId::Listed(1), "Johnny Doe".into());
        view.search = "jo".into();
        view.total = 6;

        let rendered = render(&view);
        assert!(rendered.contains("[1] John Doe <john@reqres.in>  draft: \"Johnny Doe\""));
        assert!(rendered.contains("showing 1 of 6 users matching \"jo\""));
    }
}
