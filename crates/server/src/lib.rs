#![forbid(unsafe_code)]

pub mod api;
pub mod config;
pub mod routes;

use std::sync::Arc;

use anyhow::Context;
use services::{Clock, InterviewService, LlmInterviewProvider, OpenAiClient};
use storage::repository::InMemoryRepository;

use crate::config::Cli;
use crate::routes::AppState;

/// Wire the store and provider, then serve until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the listen address cannot be bound.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let client = OpenAiClient::from_env();
    match client.model() {
        Some(model) => tracing::info!(model, "provider configured"),
        None => tracing::warn!("INTERVIEW_AI_API_KEY is not set; provider calls will fail"),
    }

    let service = InterviewService::new(
        Clock::default_clock(),
        Arc::new(InMemoryRepository::new()),
        Arc::new(LlmInterviewProvider::new(Arc::new(client))),
    );
    let state = AppState {
        service,
        max_questions: cli.max_questions,
    };

    let (addr, server) = warp::serve(routes::routes(state))
        .try_bind_with_graceful_shutdown(cli.bind, async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %err, "failed to listen for shutdown signal");
            }
        })
        .with_context(|| format!("binding {}", cli.bind))?;

    tracing::info!(%addr, "interview server listening");
    server.await;
    tracing::info!("interview server stopped");
    Ok(())
}
