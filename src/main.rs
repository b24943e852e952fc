use std::sync::Arc;

use clap::Parser;

use delegate_agent::agent::ConversationEngine;
use delegate_agent::cli::{Cli, Console, InputManager};
use delegate_agent::config::Settings;
use delegate_agent::conversation::Turn;
use delegate_agent::llm::{ChatCompletionsClient, Transport};
use delegate_agent::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Held for the whole process so buffered log lines get flushed
    let _log_guard = logging::init_logging(&cli.log_dir)?;

    tracing::info!("=== Delegate Agent Starting ===");

    let settings = Settings::resolve(&cli)?;
    let transport = Arc::new(ChatCompletionsClient::from_settings(&settings));
    let model = transport.model().to_string();
    let engine = ConversationEngine::standard(transport, settings.engine.clone());

    tracing::info!(
        "Registered {} tools: {:?}",
        engine.tools().len(),
        engine.tools().tool_names()
    );

    let console = Console::new();
    let mut input = InputManager::stdin();

    console.print_banner(&model);

    let mut history: Vec<Turn> = Vec::new();
    loop {
        console.print_prompt();
        let Some(line) = input.read_line().await else {
            console.println();
            break;
        };

        if line.trim().is_empty() {
            continue;
        }

        history.push(Turn::user(line));
        match engine.drive(std::mem::take(&mut history), Some(&console)).await {
            Ok(turns) => history = turns,
            Err(failure) => {
                console.print_error(&failure.to_string());
                history = failure.turns;
                break;
            }
        }
    }

    input.cleanup();
    tracing::info!(
        "=== Delegate Agent Shutting Down ({} turns) ===",
        history.len()
    );

    Ok(())
}
