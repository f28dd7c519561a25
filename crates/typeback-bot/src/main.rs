//! typeback — watches one Slack user (or channel) for typing and types
//! right back at them.
//!
//! ```bash
//! SLACK_API_KEY=xoxb-... typeback alice      # annoy a user over DM
//! SLACK_API_KEY=xoxb-... typeback "#general" # annoy a whole channel
//! ```

mod config;
mod reactor;
mod resolver;

use config::BotConfig;
use slack_rtm::{RtmClient, WebApi};
use typeback_std::SystemEnv;

#[tokio::main]
async fn main() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to initialize tracing: {e}");
    }

    let config = match BotConfig::load(&SystemEnv, std::env::args().skip(1)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };

    let api = WebApi::with_base(config.api_key.clone(), config.api_base.clone());

    let target = match resolver::resolve(&api, &config.target).await {
        Ok(t) => t,
        Err(e) => {
            eprintln!("could not find {}: {e}", config.target);
            std::process::exit(1);
        }
    };

    tracing::info!(
        target = %config.target,
        channel = target.is_channel,
        "found target, waiting for them to type"
    );

    let wss_url = match api.rtm_connect().await {
        Ok(url) => url,
        Err(e) => {
            eprintln!("rtm.connect failed: {e}");
            std::process::exit(1);
        }
    };

    let client = match RtmClient::connect(&wss_url).await {
        Ok(c) => c,
        Err(e) => {
            eprintln!("could not open RTM websocket: {e}");
            std::process::exit(1);
        }
    };
    let (sender, events) = client.split();

    reactor::run(&target, &api, &sender, events).await;

    // The loop only returns when Slack closes the connection; there is no
    // reconnect.
    tracing::warn!("event stream ended, exiting");
}
