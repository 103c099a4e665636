mod app_state;
mod commands;
mod error;
mod models;
mod services;
mod utils;

use anyhow::{Context, Result};
use log::info;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use app_state::AppState;

fn main() -> Result<()> {
    utils::config::load_dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings_path = utils::config::settings_path();
    let settings = utils::config::load_settings(&settings_path)?;
    info!(
        "loaded settings from {} (language={}, seeded={})",
        settings_path.display(),
        settings.general.language,
        settings.general.seed.is_some()
    );

    // Built outside the runtime: the speech client is a blocking reqwest client.
    let state = AppState::from_settings(settings, settings_path)?;
    if let Ok(generator) = state.generator() {
        info!("artifacts go to {}", generator.artifacts().dir().display());
    }

    let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
    runtime.block_on(serve(&state))
}

/// Invoke loop: one JSON request per stdin line, one JSON response per stdout line.
async fn serve(state: &AppState) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let response = commands::handle_line(state, line).await;
        stdout.write_all(response.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }

    info!("input closed, session ends");
    Ok(())
}
