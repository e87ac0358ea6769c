//! mockups CLI entry point

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use mockups_cli::cli::{Cli, Commands, GenerateArgs, ServerArgs};
use mockups_cli::config::{self, Config, InputConfig};
use mockups_cli::server::{SyncServer, DEFAULT_HOST, DEFAULT_PORT};
use mockups_cli::{generate, Result};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(cli: &Cli) {
    let default_directive = if cli.silent {
        "off"
    } else if cli.debug {
        "debug"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Generate(args) => run_generate(args).await,
        Commands::Server(args) => run_server(args).await,
    }
}

async fn run_generate(args: GenerateArgs) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config = Config::resolve(&args.overrides(), &cwd)?;
    generate::run(&config)?;

    if args.start_server {
        let project = config::load_project_config(&cwd)?;
        let (host, port) = server_endpoint(None, None, project.as_ref());
        SyncServer::bind(&host, port).await?.run().await?;
    }
    Ok(())
}

async fn run_server(args: ServerArgs) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let project = config::load_project_config(&cwd)?;
    let (host, port) = server_endpoint(args.host, args.port, project.as_ref());
    SyncServer::bind(&host, port).await?.run().await
}

/// CLI arguments win over `mockups.toml` values, which win over defaults.
fn server_endpoint(
    host: Option<String>,
    port: Option<u16>,
    project: Option<&InputConfig>,
) -> (String, u16) {
    let host = host
        .or_else(|| project.and_then(|c| c.host.clone()))
        .unwrap_or_else(|| DEFAULT_HOST.to_string());
    let port = port
        .or_else(|| project.and_then(|c| c.port))
        .unwrap_or(DEFAULT_PORT);
    (host, port)
}
