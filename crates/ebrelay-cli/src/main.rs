mod render;
mod search;

use clap::{Parser, Subcommand};

use crate::search::SearchApi;

#[derive(Debug, Parser)]
#[command(name = "ebrelay-cli")]
#[command(about = "Terminal client for the ebrelay search relay")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search listings through a running ebrelay server and print them as cards
    Search {
        /// Search text
        #[arg(default_value = "drone")]
        query: String,
        /// Which relay endpoint to use
        #[arg(long, value_enum, default_value_t = SearchApi::Browse)]
        path: SearchApi,
        /// Base URL of the ebrelay server
        #[arg(long, env = "EBRELAY_SERVER", default_value = "http://localhost:3001")]
        server: String,
    },
    /// Compute the account-deletion challenge response locally
    Challenge {
        /// `challenge_code` sent by eBay
        #[arg(long)]
        code: String,
        /// Verification token registered in the developer portal
        #[arg(long, env = "EBAY_NOTIFICATION_TOKEN")]
        token: Option<String>,
        /// Endpoint URL exactly as registered in the developer portal
        #[arg(long)]
        endpoint: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Search {
            query,
            path,
            server,
        }) => search::run_search(&server, path, &query).await?,
        Some(Commands::Challenge {
            code,
            token,
            endpoint,
        }) => {
            if token.is_none() {
                eprintln!("warning: no verification token given; the digest will not match eBay's");
            }
            println!(
                "{}",
                ebrelay_ebay::challenge_response(&code, token.as_deref(), &endpoint)
            );
        }
        None => println!("ebrelay-cli ready; try `ebrelay-cli search drone`"),
    }

    Ok(())
}
