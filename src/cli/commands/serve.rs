//! HTTP API server for integration with other systems.
//!
//! Provides REST endpoints for processing uploaded material and asking
//! tutor questions against an in-process session.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::error::Result as LesResult;
use crate::session::Session;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use uuid::Uuid;

/// Shared application state.
///
/// Sessions live in memory only and vanish when the process exits.
struct AppState {
    settings: Settings,
    sessions: RwLock<HashMap<Uuid, Arc<Session>>>,
}

/// Run the HTTP API server.
pub async fn run_serve(host: &str, port: u16, settings: Settings) -> anyhow::Result<()> {
    // Pre-flight checks
    if let Err(e) = preflight::check(Operation::Serve, &settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'les doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let state = Arc::new(AppState {
        settings,
        sessions: RwLock::new(HashMap::new()),
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health))
        .route("/study", post(study))
        .route("/ask", post(ask))
        .layer(cors)
        .with_state(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Les API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET  /health");
    Output::kv("Study (upload)", "POST /study");
    Output::kv("Ask (tutor)", "POST /ask");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

// === Request/Response Types ===

#[derive(Serialize)]
struct PanelOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl From<&LesResult<String>> for PanelOutput {
    fn from(result: &LesResult<String>) -> Self {
        match result {
            Ok(content) => PanelOutput {
                content: Some(content.clone()),
                error: None,
            },
            Err(e) => PanelOutput {
                content: None,
                error: Some(e.to_string()),
            },
        }
    }
}

#[derive(Serialize)]
struct StudyResponse {
    session_id: Uuid,
    material_kind: String,
    detected_language: Option<String>,
    translated: bool,
    summary: PanelOutput,
    quiz: PanelOutput,
    scenarios: PanelOutput,
}

#[derive(Deserialize)]
struct AskRequest {
    session_id: Uuid,
    question: String,
}

#[derive(Serialize)]
struct AskResponse {
    answer: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Accept a multipart file upload, run the pipeline, and return all panels.
async fn study(State(state): State<Arc<AppState>>, mut multipart: Multipart) -> impl IntoResponse {
    // Pull the first file field from the upload
    let (file_name, bytes) = loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                let Some(name) = field.file_name().map(|n| n.to_string()) else {
                    continue;
                };
                match field.bytes().await {
                    Ok(bytes) => break (name, bytes),
                    Err(e) => {
                        return (
                            StatusCode::BAD_REQUEST,
                            Json(ErrorResponse {
                                error: format!("Failed to read upload: {}", e),
                            }),
                        )
                            .into_response()
                    }
                }
            }
            Ok(None) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: "No file field in upload".to_string(),
                    }),
                )
                    .into_response()
            }
            Err(e) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: format!("Invalid multipart request: {}", e),
                    }),
                )
                    .into_response()
            }
        }
    };

    let session = match Session::from_bytes(&file_name, &bytes, &state.settings).await {
        Ok(session) => Arc::new(session),
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    };

    let guide = session.generate_guide().await;

    let response = StudyResponse {
        session_id: Uuid::new_v4(),
        material_kind: session.kind().to_string(),
        detected_language: session.detected_language().map(|l| l.code.clone()),
        translated: session.translated(),
        summary: PanelOutput::from(&guide.summary),
        quiz: PanelOutput::from(&guide.quiz),
        scenarios: PanelOutput::from(&guide.scenarios),
    };

    state
        .sessions
        .write()
        .await
        .insert(response.session_id, session);

    Json(response).into_response()
}

/// Answer a tutor question against a stored session.
async fn ask(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AskRequest>,
) -> impl IntoResponse {
    let session = {
        let sessions = state.sessions.read().await;
        sessions.get(&req.session_id).cloned()
    };

    let Some(session) = session else {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Session not found: {}", req.session_id),
            }),
        )
            .into_response();
    };

    match session.ask(&req.question).await {
        Ok(answer) => Json(AskResponse { answer }).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
    }
}
