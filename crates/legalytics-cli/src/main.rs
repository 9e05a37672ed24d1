//! legalytics - fact extraction and analytics for Indonesian legal documents.
//!
//! Fetches a regulation from the document index, extracts money amounts,
//! dates and prohibitions, and prints the dashboard payload as JSON.

mod cli;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (before anything else)
    let _ = dotenvy::dotenv();

    let default_filter = if cli::is_verbose() {
        "legalytics=info"
    } else {
        "legalytics=warn"
    };

    // Logs go to stderr so stdout stays pure JSON.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    cli::run().await
}
