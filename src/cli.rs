//! Command-line interface definitions for newsdrop.
//!
//! Every option can be supplied as a flag or through the environment, which
//! is how the scheduled job passes secrets. The three credentials are
//! required: if any is missing from both the command line and the
//! environment, startup fails before the pipeline runs.

use clap::Parser;
use std::path::PathBuf;

use crate::orchestrator::DEFAULT_MAX_ATTEMPTS;

/// Command-line arguments for the newsdrop autoposter.
///
/// # Examples
///
/// ```sh
/// # Credentials from the environment, defaults for everything else
/// OPENAI_API_KEY=... TELEGRAM_BOT_TOKEN=... CHANNEL_ID=@mychannel newsdrop
///
/// # Custom ledger location and retention
/// newsdrop -l /var/lib/newsdrop/posted.json -r 14
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// API key for the OpenAI-compatible rewriter endpoint
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: String,

    /// Telegram bot token used for publishing
    #[arg(long, env = "TELEGRAM_BOT_TOKEN", hide_env_values = true)]
    pub telegram_bot_token: String,

    /// Destination channel identifier (e.g. @channelname or a numeric chat id)
    #[arg(long, env = "CHANNEL_ID")]
    pub channel_id: String,

    /// Text appended to every post after the attribution line
    #[arg(long, env = "FOOTER_TEXT", default_value = "")]
    pub footer_text: String,

    /// Model name for the rewriter
    #[arg(long, env = "OPENAI_MODEL", default_value = "gpt-4o-mini")]
    pub model: String,

    /// Path of the posted-articles ledger file
    #[arg(short, long, default_value = "posted_articles.json")]
    pub ledger_path: PathBuf,

    /// Ledger retention window in days
    #[arg(short, long, default_value_t = 7)]
    pub retention_days: u32,

    /// How many ranked survivors to try before giving up on the run
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: usize,
}
