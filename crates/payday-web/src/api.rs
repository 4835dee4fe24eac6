use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use payday::{DestinationStore, Messenger, RecordStore, commands};

/// The slice of a Telegram update the bot cares about. Unknown fields are
/// ignored by serde, so richer updates deserialize fine.
#[derive(Debug, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Chat {
    pub id: i64,
}

pub fn router<S, M, D>(state: AppState<S, M, D>) -> Router
where
    S: RecordStore,
    M: Messenger,
    D: DestinationStore,
{
    Router::new()
        .route("/webhook", post(webhook::<S, M, D>))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Always answers 200 so Telegram does not redeliver the update; failures
/// are logged and dealt with per request.
async fn webhook<S, M, D>(
    State(state): State<AppState<S, M, D>>,
    Json(update): Json<Update>,
) -> StatusCode
where
    S: RecordStore,
    M: Messenger,
    D: DestinationStore,
{
    let Some(message) = update.message else {
        return StatusCode::OK;
    };
    let Some(text) = message.text else {
        return StatusCode::OK;
    };
    let chat = message.chat.id;
    tracing::debug!(update.update_id, chat, "handling update");

    let reply = commands::handle(
        state.store.as_ref(),
        &state.ledger,
        state.destination.as_ref(),
        chat,
        state.today(),
        &text,
    )
    .await;

    if let Err(e) = state.messenger.send_message(chat, &reply).await {
        tracing::warn!(chat, "failed to deliver reply: {e}");
    }
    StatusCode::OK
}
