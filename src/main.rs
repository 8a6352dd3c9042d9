//! Personnel Console
//!
//! Terminal front-end for the personnel records REST API.

use std::sync::Arc;

use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use personnel_console::console::{self, ConsoleNotifier, HELP};
use personnel_console::{Config, HttpPersonnelClient, Session};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging; stdout belongs to the screens
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting Personnel Console");
    tracing::info!("API root: {}", config.api_url);
    tracing::debug!("Request timeout: {:?}", config.request_timeout);

    if config.discard_stale_responses {
        tracing::info!("Responses for screens that are no longer shown will be discarded");
    }

    let client = HttpPersonnelClient::new(&config)?;
    let mut session = Session::new(Arc::new(client), Arc::new(ConsoleNotifier), &config);

    println!("{}\n", HELP);
    console::run(
        &mut session,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    )
    .await?;

    tracing::info!("Bye");
    Ok(())
}
