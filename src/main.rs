//! Binary entrypoint: one pipeline pass, then exit.

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

use newsdrop::cli::Cli;
use newsdrop::illustrate::PollinationsIllustrator;
use newsdrop::ledger::Ledger;
use newsdrop::orchestrator::{Orchestrator, RunOutcome};
use newsdrop::publish::TelegramPublisher;
use newsdrop::rewrite::OpenAiRewriter;
use newsdrop::sources::{default_sources, http_client};
use newsdrop::vocab::Vocabulary;
use newsdrop::BoxError;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("newsdrop starting up");

    // Missing credentials abort here, before any pipeline work.
    let args = Cli::parse();
    debug!(ledger = %args.ledger_path.display(), retention_days = args.retention_days, model = %args.model, "Parsed configuration");

    let client = http_client()?;
    let ledger = Ledger::load(&args.ledger_path);

    let mut orchestrator = Orchestrator {
        sources: default_sources(&client),
        rewriter: Box::new(OpenAiRewriter::new(
            client.clone(),
            args.openai_api_key,
            args.model,
            args.footer_text,
        )),
        illustrator: Box::new(PollinationsIllustrator::new(client.clone())),
        publisher: Box::new(TelegramPublisher::new(
            client,
            args.telegram_bot_token,
            args.channel_id,
        )),
        ledger,
        vocab: Vocabulary::default(),
        retention_days: args.retention_days,
        max_attempts: args.max_attempts,
    };

    let outcome = orchestrator.run().await?;
    let elapsed = start_time.elapsed();
    match outcome {
        RunOutcome::Published { id } => {
            info!(%id, ?elapsed, "Run complete: published one post")
        }
        RunOutcome::NothingToPost => {
            info!(?elapsed, "Run complete: no suitable candidates")
        }
        RunOutcome::Exhausted { attempted } => {
            info!(attempted, ?elapsed, "Run complete: all attempts failed, nothing posted")
        }
    }

    Ok(())
}
