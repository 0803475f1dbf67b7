use anyhow::Context;
use clap::Parser;
use log::info;
use std::time::Instant;

use nervease::web::{self, AppState};
use nervease::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    nervease::init_logger();
    let config = AppConfig::parse();

    info!("=== Starting NervEase ===");
    info!("Model: {:?}", config.model);
    info!("Tokenizer: {:?}", config.tokenizer);

    let start_time = Instant::now();
    let classifier = config.load_classifier()
        .with_context(|| format!(
            "failed to load classifier from {:?} and {:?}",
            config.model, config.tokenizer
        ))?;
    info!("=== Classifier loaded (took {:.2?}) ===", start_time.elapsed());

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;

    web::serve(listener, AppState::new(classifier), web::shutdown_signal())
        .await
        .context("server error")?;

    info!("=== NervEase stopped ===");
    Ok(())
}
