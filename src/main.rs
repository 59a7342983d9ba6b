use anyhow::Context;
use slack_log_handler::SlackLayer;
use slack_log_handler::config::load_options;
use std::error::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;

/// Sends a couple of test records to the configured channel
fn main() -> anyhow::Result<()> {
    let options = load_options().context("failed to load SLACK_LOG_* configuration")?;
    let channel = options.channel.clone();

    let slack = SlackLayer::connect(options)
        .context("failed to set up Slack log handler")?
        .with_filter(LevelFilter::WARN);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_line_number(true)
                .with_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new("slack_log_handler=debug,info")),
                ),
        )
        .with(slack)
        .init();

    tracing::info!(channel = %channel, "Sending test records");

    tracing::warn!(check = "connectivity", "Slack log handler test warning");

    if let Err(err) = std::fs::read_to_string("/nonexistent/slack-log-handler.toml")
        .context("failed to read demo config")
    {
        let source: &(dyn Error + 'static) = err.as_ref();
        tracing::error!(error = source, "Slack log handler test error");
    }

    tracing::info!("Done");
    Ok(())
}
