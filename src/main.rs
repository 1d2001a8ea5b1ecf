use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use gcreds::google::{build_client, CredentialResolver, LocalFile, ProcessEnv};

/// Check which Google OAuth credentials would be used
#[derive(Parser, Debug)]
#[command(name = "gcreds", version, about)]
struct Cli {
    /// Credentials JSON file to fall back to (defaults to the config directory)
    #[arg(short, long, value_name = "PATH")]
    credentials: Option<PathBuf>,

    /// Print only the client id, as `load_credentials` returns it
    #[arg(long)]
    minimal: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Initialize logger - debug for our crate, warn for others
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("gcreds=debug,warn"))
        .format_timestamp_secs()
        .init();

    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            log::warn!("Failed to load .env file: {}", e);
        }
    }

    let cli = Cli::parse();

    let file = cli
        .credentials
        .map(LocalFile::new)
        .unwrap_or_default();
    let resolver = CredentialResolver::new(ProcessEnv, file);

    match run(&resolver, cli.minimal).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(
    resolver: &CredentialResolver<ProcessEnv, LocalFile>,
    minimal: bool,
) -> Result<String, Box<dyn std::error::Error>> {
    if minimal {
        let creds = resolver.load_minimal_credentials().await?;
        return Ok(serde_json::to_string_pretty(&creds)?);
    }

    let creds = resolver.resolve_with_fallback().await?;
    let client = build_client(&creds)?;
    log::info!("OAuth2 client ready for {}", client.client_id());

    Ok(serde_json::to_string_pretty(&creds)?)
}
