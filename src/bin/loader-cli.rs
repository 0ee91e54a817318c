use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use integration_loader::config::{load_config, LoaderConfig};
use integration_loader::integrations::{Credentials, IntegrationRegistry};
use integration_loader::loader::{DataLoader, StderrNotifier};
use integration_loader::observability::logging;
use integration_loader::IntegrationClient;

#[derive(Parser)]
#[command(name = "loader-cli")]
#[command(about = "Load data from integration backends", long_about = None)]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Integration backend base URL (overrides client.base_url)
    #[arg(short, long)]
    url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List supported integrations and their backend paths
    Integrations,
    /// Load data once and print it
    Load(LoadArgs),
    /// Interactive form: load, clear, show, credentials, quit
    Session(LoadArgs),
}

#[derive(Args)]
struct LoadArgs {
    /// Integration label (e.g. Notion, Airtable, HubSpot)
    #[arg(short, long)]
    integration: String,

    /// Credentials as a JSON object
    #[arg(long, conflicts_with = "credentials_file")]
    credentials: Option<String>,

    /// Read credentials from a JSON file
    #[arg(long)]
    credentials_file: Option<PathBuf>,
}

impl LoadArgs {
    fn credentials(&self) -> Result<Credentials, Box<dyn std::error::Error>> {
        let text = match (&self.credentials, &self.credentials_file) {
            (Some(json), _) => json.clone(),
            (None, Some(path)) => std::fs::read_to_string(path)?,
            (None, None) => return Ok(Credentials::new()),
        };
        Ok(Credentials::from_json(&text)?)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => LoaderConfig::default(),
    };
    if let Some(url) = cli.url {
        config.client.base_url = url;
    }

    logging::init_logging(&config.observability);

    let registry = IntegrationRegistry::with_overrides(&config.integrations);
    let client = IntegrationClient::with_registry(&config.client.base_url, registry)?;

    match cli.command {
        Commands::Integrations => {
            for descriptor in client.registry().iter() {
                println!("{:<12} {}", descriptor.label, descriptor.path());
            }
        }
        Commands::Load(args) => {
            let mut loader =
                DataLoader::new(client, args.integration.clone(), args.credentials()?, StderrNotifier);
            if !loader.load().await {
                std::process::exit(1);
            }
            println!("{}", loader.display());
        }
        Commands::Session(args) => {
            let loader =
                DataLoader::new(client, args.integration.clone(), args.credentials()?, StderrNotifier);
            run_session(loader).await?;
        }
    }

    Ok(())
}

async fn run_session(
    mut loader: DataLoader<StderrNotifier>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!(
        "Loaded Data ({}): commands are load, clear, show, credentials <json>, quit",
        loader.integration()
    );
    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let (command, rest) = line.trim().split_once(' ').unwrap_or((line.trim(), ""));
        match command {
            "" => {}
            "load" => {
                if loader.load().await {
                    println!("{}", loader.display());
                }
            }
            "clear" => {
                loader.clear();
                println!("(cleared)");
            }
            "show" => println!("{}", loader.display()),
            "credentials" => match Credentials::from_json(rest.trim()) {
                Ok(credentials) => {
                    loader.set_credentials(credentials);
                    println!("(credentials updated)");
                }
                Err(e) => eprintln!("invalid credentials: {}", e),
            },
            "quit" | "exit" => break,
            other => eprintln!(
                "unknown command '{}': use load, clear, show, credentials <json>, quit",
                other
            ),
        }
    }

    Ok(())
}
