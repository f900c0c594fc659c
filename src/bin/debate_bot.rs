use anyhow::{anyhow, Result};
use dotenvy::dotenv;
use log::info;
use std::sync::Arc;

use debate_bot::core::Config;
use debate_bot::features::debate::{DebateOrchestrator, OpenAiArgumentGenerator};
use debate_bot::features::presentation::Typewriter;
use debate_bot::features::session::{spawn_session_sweeper, SessionStore};
use debate_bot::web::{serve, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    // The openai crate reads its key from the environment
    std::env::set_var("OPENAI_API_KEY", &config.openai_api_key);
    std::env::set_var("OPENAI_KEY", &config.openai_api_key);

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting AI Debate Bot...");

    let stylesheet = std::fs::read_to_string(&config.stylesheet_path).map_err(|e| {
        anyhow!(
            "Failed to read stylesheet {}: {}",
            config.stylesheet_path,
            e
        )
    })?;
    info!("🎨 Loaded stylesheet from {}", config.stylesheet_path);

    let generator = Arc::new(OpenAiArgumentGenerator::new(config.openai_model.clone()));
    info!("🤖 Using model {}", generator.model());
    let typewriter = Typewriter::new(config.typewriter_delay());
    info!("⌨️ Typewriter delay {:?} per word", typewriter.delay());
    let orchestrator = Arc::new(DebateOrchestrator::new(generator, typewriter));

    let sessions = SessionStore::new();
    spawn_session_sweeper(sessions.clone(), config.session_ttl());

    let state = AppState::new(sessions, orchestrator, stylesheet);
    serve(&config, state).await
}
