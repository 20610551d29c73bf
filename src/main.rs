//! CLI entry point: `airtable-backup <EMAIL> <PASSWORD>`

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Back up every Airtable base reachable from a web login: records, API
/// documentation, and file attachments, into timestamped directories under
/// `backups/`.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Account email for the web login
    email: String,

    /// Account password for the web login
    password: String,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "airtable_backup=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // --help and --version land on stdout and exit 0; everything
            // else (missing arguments included) is usage on stderr, exit 1.
            let _ = e.print();
            std::process::exit(if e.use_stderr() { 1 } else { 0 });
        }
    };

    let config = airtable_backup::Config::default();
    if let Err(error) = airtable_backup::run(&config, &args.email, &args.password).await {
        tracing::error!(%error, "Backup run failed");
        std::process::exit(1);
    }
}
