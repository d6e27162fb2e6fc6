use clap::{Parser, Subcommand};

use crate::config::Settings;

#[derive(Debug, Parser)]
#[command(name = "roster", version, about = "Browse and edit the reqres.in user list")]
pub struct Cli {
    #[command(flatten)]
    pub settings: Settings,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Load the user list and print it
    List {
        /// Only show users whose name contains this text
        #[arg(long, short)]
        search: Option<String>,
    },
    /// Create a user, then print the list with the new user first
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        job: String,
    },
    /// Interactive session reading commands from stdin (the default)
    Session,
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_API_KEY, DEFAULT_BASE_URL};

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["roster"]).unwrap();
        assert_eq!(cli.command(), Command::Session);
        assert_eq!(cli.settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(cli.settings.api_key, DEFAULT_API_KEY);
        assert_eq!(cli.settings.page, 1);
        assert_eq!(cli.settings.mailbox, 32);
    }

    #[test]
    fn test_list_with_search_and_global_flags() {
        let cli = Cli::try_parse_from([
            "roster",
            "list",
            "--search",
            "jan",
            "--page",
            "2",
            "--base-url",
            "http://localhost:8080/api",
        ])
        .unwrap();
        assert_eq!(
            cli.command(),
            Command::List {
                search: Some("jan".into())
            }
        );
        assert_eq!(cli.settings.page, 2);
        assert_eq!(cli.settings.base_url, "http://localhost:8080/api");
    }

    #[test]
    fn test_create_requires_name_and_job() {
        assert!(Cli::try_parse_from(["roster", "create", "--name", "Ann"]).is_err());
        let cli = Cli::try_parse_from(["roster", "create", "--name", "Ann", "--job", "Eng"]).unwrap();
        assert_eq!(
            cli.command(),
            Command::Create {
                name: "Ann".into(),
                job: "Eng".into()
            }
        );
    }
}
