use anyhow::Context;
use clap::{Parser, Subcommand};
use kb_ticket_sync::{
    config::{Config, ConfigArgs},
    dispatcher::ChangeDispatcher,
    helpdesk::FreshserviceSystem,
    webhook::{self, CHANGES_ROUTE},
};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tokio::io::AsyncReadExt;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// ----------------------------------------------------------------------
/// 1  Command line
/// ----------------------------------------------------------------------
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the webhook server
    Serve {
        /// Port (default 8000)
        #[arg(short, long, env = "PORT", default_value_t = 8000)]
        port: u16,
    },
    /// Process a single payload and print the JSON report
    Process {
        /// JSON file with a list of change records, `-` for stdin
        #[arg(default_value = "-")]
        input: PathBuf,
    },
}

/// ----------------------------------------------------------------------
/// 2  Startup
/// ----------------------------------------------------------------------
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // a) Logging, on stderr so `process` output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    // b) CLI and configuration
    let cli = Cli::parse();
    let config = Config::load(&cli.config).context("invalid configuration")?;

    // c) Helpdesk and dispatcher
    let helpdesk = Arc::new(
        FreshserviceSystem::new(config.freshservice.clone())
            .context("failed to set up Freshservice client")?,
    );
    let dispatcher = ChangeDispatcher::from_config(helpdesk, &config.freshservice);

    match cli.command {
        Command::Serve { port } => serve(dispatcher, port).await,
        Command::Process { input } => process(dispatcher, input).await,
    }
}

/// ----------------------------------------------------------------------
/// 3  Modes
/// ----------------------------------------------------------------------
async fn serve(dispatcher: ChangeDispatcher, port: u16) -> anyhow::Result<()> {
    let app = webhook::router(dispatcher);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Listening on http://{addr}{CHANGES_ROUTE}");

    axum::serve(listener, app).await.context("server error")
}

async fn process(dispatcher: ChangeDispatcher, input: PathBuf) -> anyhow::Result<()> {
    let body = if input.as_os_str() == "-" {
        let mut body = Vec::new();
        tokio::io::stdin()
            .read_to_end(&mut body)
            .await
            .context("failed to read payload from stdin")?;
        body
    } else {
        tokio::fs::read(&input)
            .await
            .with_context(|| format!("failed to read payload from {}", input.display()))?
    };

    let report = match webhook::parse_payload(&body) {
        Ok(payload) => webhook::process_payload(&dispatcher, payload).await,
        Err(report) => report,
    };

    println!("{}", serde_json::to_string(&report)?);
    Ok(())
}
