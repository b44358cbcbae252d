//! CLI REPL — a minimal surface over the assistant pipeline.
//!
//! One process = one session. Type a message, get a reply; `/reset` clears
//! the conversation, `/quit` exits.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use truyen_assist::catalog::{CatalogGateway, CatalogProvider};
use truyen_assist::llm::{GeminiClient, LlmProvider};
use truyen_assist::{Assistant, AssistantConfig, Session};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    // Missing credential is the one fatal condition: report it once, here.
    let config = AssistantConfig::from_env()?;

    let catalog: Arc<dyn CatalogProvider> = Arc::new(CatalogGateway::new(
        config.catalog_base_url.clone(),
        config.http_timeout,
    )?);
    let llm: Arc<dyn LlmProvider> = Arc::new(GeminiClient::new(&config)?);

    eprintln!("📖 truyen-assist v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Model: {}", llm.model_name());
    eprintln!("   Catalog: {}", config.catalog_base_url);
    eprintln!("   Gõ tin nhắn rồi Enter. /reset xoá hội thoại, /quit thoát.\n");

    let assistant = Assistant::new(catalog, llm);
    let mut session = Session::new();

    let stdin = tokio::io::stdin();
    let mut lines = BufReader::new(stdin).lines();

    eprint!("> ");
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        match line {
            "" => {}
            "/quit" => break,
            "/reset" => {
                session.reset();
                eprintln!("(đã xoá hội thoại)");
            }
            message => {
                let outcome = assistant.run_turn(&mut session, message).await;
                if let Some(e) = &outcome.error {
                    tracing::warn!(error = %e, "Turn failed");
                }
                println!("\n{}\n", outcome.reply);
            }
        }
        eprint!("> ");
    }

    Ok(())
}
