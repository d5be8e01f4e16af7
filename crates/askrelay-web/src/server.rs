//! HTTP server for the question form.

use anyhow::Result;
use askrelay_runtime::FallbackOrchestrator;
use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::{Form, Router};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::page::{render, PageView};

/// Application state shared across handlers
pub struct AppState {
    pub orchestrator: Arc<FallbackOrchestrator>,
}

impl AppState {
    pub fn new(orchestrator: FallbackOrchestrator) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AskForm {
    #[serde(default)]
    question: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(show_form).post(ask))
        .with_state(Arc::new(state))
        .layer(TraceLayer::new_for_http())
}

/// Run the HTTP server
pub async fn run(state: AppState, addr: SocketAddr) -> Result<()> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

async fn show_form() -> Html<String> {
    Html(render(&PageView::default()))
}

async fn ask(State(state): State<Arc<AppState>>, Form(form): Form<AskForm>) -> Html<String> {
    let question = form.question.trim().to_string();
    if question.is_empty() {
        return Html(render(&PageView::default()));
    }

    // The orchestrator never fails; a panic inside the task is still shown
    // to the developer instead of dropping the connection.
    let orchestrator = state.orchestrator.clone();
    let task_question = question.clone();
    let outcome = tokio::spawn(async move { orchestrator.ask(&task_question).await }).await;

    match outcome {
        Ok(record) => Html(render(&PageView {
            question: &question,
            record: Some(&record),
            error: None,
        })),
        Err(join_error) => {
            error!(error = %join_error, "Question task failed");
            let detail = format!("{}\n{:?}", join_error, join_error);
            Html(render(&PageView {
                question: &question,
                record: None,
                error: Some(&detail),
            }))
        }
    }
}
