use std::io::Write;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info, Instrument};

use roster::app_system::{setup_tracing, RosterSystem};
use roster::cli::{Cli, Command};
use roster::store::Settlement;
use roster::view;

#[tokio::main]
async fn main() -> Result<()> {
    setup_tracing();

    let cli = Cli::parse();
    info!(base_url = %cli.settings.base_url, page = cli.settings.page, "Starting roster");

    let system = RosterSystem::new(&cli.settings)?;
    let result = run(&system, cli.command()).await;

    if let Err(e) = &result {
        error!(error = %e, "Roster failed");
    }
    system.shutdown().await.map_err(anyhow::Error::msg)?;
    result
}

async fn run(system: &RosterSystem, command: Command) -> Result<()> {
    let client = &system.client;
    let mut stdout = std::io::stdout().lock();

    match command {
        Command::List { search } => {
            let span = tracing::info_span!("list");
            async {
                client.load().await?;
                if let Some(search) = search {
                    client.set_search(search).await?;
                }
                write!(stdout, "{}", view::render(&client.snapshot().await?))?;
                Ok::<_, anyhow::Error>(())
            }
            .instrument(span)
            .await?;
        }
        Command::Create { name, job } => {
            let span = tracing::info_span!("create");
            async {
                client.load().await?;
                if let Settlement::Failed { message } = client.create(name, job).await? {
                    info!(message = %message, "Create rejected");
                }
                write!(stdout, "{}", view::render(&client.snapshot().await?))?;
                Ok::<_, anyhow::Error>(())
            }
            .instrument(span)
            .await?;
        }
        Command::Session => {
            let input = tokio::io::BufReader::new(tokio::io::stdin());
            view::run_session(client, input, &mut stdout).await?;
        }
    }

    Ok(())
}
