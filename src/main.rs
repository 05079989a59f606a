//! Items API entry point.

use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use items_api::client::ItemsClient;
use items_api::config::{Config, LogFormat};
use items_api::error::ClientError;
use items_api::server;
use items_api::store::Item;

/// Read-only REST API over a fixed item list.
#[derive(Parser, Debug)]
#[command(name = "items-api")]
#[command(about = "Serve or query a read-only REST API over a fixed item list")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Base URL used by the client commands (overrides API_URL).
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP server (default).
    Serve {
        /// Interface to bind (overrides HOST).
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check configuration validity.
    CheckConfig,

    /// List all items from the API.
    List,

    /// Show one item from the API.
    Show {
        /// Item id.
        id: String,
    },

    /// Query the API health endpoint.
    Health,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration
    let mut config = Config::load()?;
    if let Some(api_url) = args.api_url {
        config.api_url = api_url;
    }

    init_logging(&config, args.verbose);

    // Handle subcommands
    match args.command {
        Some(Command::Serve { host, port }) => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            cmd_serve(config).await
        }
        Some(Command::CheckConfig) => cmd_check_config(&config),
        Some(Command::List) => cmd_list(&config).await,
        Some(Command::Show { id }) => cmd_show(&config, &id).await,
        Some(Command::Health) => cmd_health(&config).await,
        None => cmd_serve(config).await,
    }
}

/// Install the global tracing subscriber.
fn init_logging(config: &Config, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("items_api=debug,info")
    } else {
        EnvFilter::try_new(&config.rust_log).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let registry = tracing_subscriber::registry().with(filter);
    match config.log_format().unwrap_or(LogFormat::Pretty) {
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(fmt::layer()).init(),
    }
}

/// Run the HTTP server until a shutdown signal arrives.
async fn cmd_serve(config: Config) -> anyhow::Result<()> {
    if let Err(e) = server::run(config).await {
        error!("Server failed: {}", e);
        return Err(e.into());
    }
    Ok(())
}

/// Check configuration validity.
fn cmd_check_config(config: &Config) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("ITEMS API - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Bind Address: {}:{}", config.host, config.port);
    println!("  API URL: {}", config.api_url);
    println!("  CORS: {}", if config.cors_enabled { "Enabled" } else { "Disabled" });
    println!("  Metrics: {}", if config.metrics_enabled { "Enabled" } else { "Disabled" });
    println!("  Log Level: {}", config.rust_log);
    println!("  Log Format: {}", config.log_format);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Shown when the item list cannot be fetched.
const LIST_ERROR: &str = "Error fetching items. Please try again later.";

/// Shown when an item cannot be fetched, including when it does not exist.
const DETAIL_ERROR: &str = "Error fetching item details. Please try again later.";

/// Map a list fetch to the items or the generic list error.
fn list_outcome(result: Result<Vec<Item>, ClientError>) -> anyhow::Result<Vec<Item>> {
    result.map_err(|e| {
        error!("Error fetching items: {}", e);
        anyhow::anyhow!(LIST_ERROR)
    })
}

/// Map a detail fetch to the item or the generic detail error.
///
/// A missing item is a non-2xx response like any other and gets the same
/// message.
fn show_outcome(result: Result<Option<Item>, ClientError>) -> anyhow::Result<Item> {
    match result {
        Ok(Some(item)) => Ok(item),
        Ok(None) => {
            error!("Error fetching item: not found");
            Err(anyhow::anyhow!(DETAIL_ERROR))
        }
        Err(e) => {
            error!("Error fetching item: {}", e);
            Err(anyhow::anyhow!(DETAIL_ERROR))
        }
    }
}

/// Print every item with a pointer to its detail view.
async fn cmd_list(config: &Config) -> anyhow::Result<()> {
    let client = ItemsClient::from_config(config)?;
    let items = list_outcome(client.list_items().await)?;

    println!("Items");
    println!("----------------------------------------------------------------------");
    for item in &items {
        println!("{}", item.name);
        println!("  {}", item.description);
        println!("  View details: items-api show {}", item.id);
    }

    Ok(())
}

/// Print a single item.
async fn cmd_show(config: &Config, id: &str) -> anyhow::Result<()> {
    let client = ItemsClient::from_config(config)?;
    let item = show_outcome(client.get_item(id).await)?;

    println!("{}", item.name);
    println!("  {}", item.description);
    Ok(())
}

/// Print the API health status.
async fn cmd_health(config: &Config) -> anyhow::Result<()> {
    let client = ItemsClient::from_config(config)?;
    let health = client.health().await?;
    println!("{}: {}", client.base_url(), health.status);
    Ok(())
}
