use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::response::AppJson;

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

// ============================================================================
// Handler
// ============================================================================

/// Answer a free-text message with one of two canned replies.
///
/// Keyword dispatch only — no conversation state, no model behind it.
pub async fn chat_endpoint(AppJson(req): AppJson<ChatRequest>) -> Json<ChatResponse> {
    Json(ChatResponse {
        response: canned_reply(&req.message).to_string(),
    })
}

fn canned_reply(message: &str) -> &'static str {
    if message.to_lowercase().contains("usage") {
        "Your water usage has been stable this month."
    } else {
        "I'm not sure, please ask something about water usage."
    }
}
