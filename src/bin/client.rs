//! Message API client CLI
//!
//! Sends GraphQL requests to a running message server and prints the
//! result as JSON.

use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use graphql_messages::client::DEFAULT_ENDPOINT;
use graphql_messages::{ClientConfig, MessageClient, MessageId, Record};

#[derive(Parser)]
#[command(name = "graphql-messages-client")]
#[command(about = "Query and mutate messages on a GraphQL message server")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// GraphQL endpoint URL
    #[arg(long, env = "GRAPHQL_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Request timeout in milliseconds
    #[arg(long, default_value_t = 30_000)]
    timeout_ms: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a message by ID
    Get {
        id: String,
    },

    /// Create a message
    Create {
        #[arg(long)]
        content: Option<String>,

        #[arg(long)]
        author: Option<String>,
    },

    /// Replace an existing message (omitted fields become null)
    Update {
        id: String,

        #[arg(long)]
        content: Option<String>,

        #[arg(long)]
        author: Option<String>,
    },

    /// Ask the server to say hello
    Hello,

    /// Roll some dice
    RollDice {
        num_dice: i32,

        /// Sides per die (server default is 6)
        #[arg(long)]
        sides: Option<i32>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let client = MessageClient::new(ClientConfig {
        endpoint: cli.endpoint,
        timeout_ms: cli.timeout_ms,
    })?;

    match cli.command {
        Commands::Get { id } => print(&client.get_message(&MessageId::from(id)).await?),
        Commands::Create { content, author } => {
            print(&client.create_message(&Record::new(content, author)).await?)
        }
        Commands::Update {
            id,
            content,
            author,
        } => print(
            &client
                .update_message(&MessageId::from(id), &Record::new(content, author))
                .await?,
        ),
        Commands::Hello => print(&client.hello().await?),
        Commands::RollDice { num_dice, sides } => {
            print(&client.roll_dice(num_dice, sides).await?)
        }
    }
}

fn print<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
