use std::io::{self, BufRead};

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use mailverdict::mx::SystemResolver;
use mailverdict::vendors::BlockingClient;
use mailverdict::{DiscoveryQuery, discover_email, verify_email, verify_email_with};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[path = "mailverdict-cli/args.rs"]
mod args;
#[path = "mailverdict-cli/output.rs"]
mod output;

use args::Cli;
use output::Report;

fn main() -> Result<()> {
    // le .env doit être chargé avant clap pour que les clés d'API soient lues
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let mut rows: Vec<Report> = Vec::new();

    if cli.find {
        let (Some(domain), Some(first), Some(last)) = (
            cli.domain.as_deref(),
            cli.first_name.as_deref(),
            cli.last_name.as_deref(),
        ) else {
            Cli::clap_command()
                .error(
                    ErrorKind::MissingRequiredArgument,
                    "--find requires --domain, --first-name and --last-name",
                )
                .exit();
        };
        let keys = cli.api_keys();
        let query = DiscoveryQuery::new(domain, first, last);
        let report = discover_email(query, keys.hunter.as_deref())
            .context("discovery setup failed")?;
        rows.push(Report::Discovery(report));
    } else if cli.stdin {
        let options = cli.verify_options();
        let client = BlockingClient::new().context("verification setup failed")?;
        for line in io::stdin().lock().lines() {
            let email = line.context("read stdin")?;
            if email.trim().is_empty() {
                continue;
            }
            let report = verify_email_with(&email, &options, &SystemResolver, &client);
            rows.push(Report::Verification(report));
        }
    } else if let Some(email) = cli.email.as_deref() {
        let report =
            verify_email(email, &cli.verify_options()).context("verification setup failed")?;
        rows.push(Report::Verification(report));
    } else {
        Cli::clap_command()
            .error(
                ErrorKind::MissingRequiredArgument,
                "EMAIL is required for verification mode (or use --stdin / --find)",
            )
            .exit();
    }

    output::write_reports(&rows, &cli)?;

    // un run terminé sort en 0 quel que soit le verdict; clap sort en 2 sur erreur d'usage
    Ok(())
}
