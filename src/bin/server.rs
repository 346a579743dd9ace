// GraphQL message server
// Run with: cargo run --bin server

//! # Message Server Binary
//!
//! Starts the HTTP server with an empty in-memory store. Once running:
//! - Visit http://localhost:4000/graphql for the GraphiQL explorer
//! - POST GraphQL documents to http://localhost:4000/graphql
//! - GET http://localhost:4000/health for a liveness check

use clap::Parser;
use dotenv::dotenv;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use graphql_messages::GraphQLServerBuilder;

#[derive(Parser, Debug)]
#[command(name = "graphql-messages-server")]
#[command(about = "Serve the message API over GraphQL")]
#[command(version)]
struct Args {
    /// Interface to bind
    #[arg(long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(short, long, env = "SERVER_PORT", default_value_t = 4000)]
    port: u16,

    /// Disable the permissive CORS layer
    #[arg(long)]
    no_cors: bool,

    /// Log level used when RUST_LOG is not set
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional; read it before clap so its values feed `env = ...`
    let dotenv_result = dotenv();

    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = dotenv_result {
        warn!("Could not load .env file: {}", e);
    }

    info!("Starting GraphQL message server");
    info!("Server: {}:{}", args.host, args.port);

    GraphQLServerBuilder::new()
        .with_host(args.host)
        .with_port(args.port)
        .with_cors(!args.no_cors)
        .build_and_run()
        .await
}
