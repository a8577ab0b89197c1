use axum::{body::Bytes, extract::State, http::HeaderMap, http::StatusCode};

use crate::{
    error::BotError,
    line::{
        event::{EventAction, InboundEvent, WebhookBody},
        message::ReplyMessage,
        signature, SIGNATURE_HEADER,
    },
    prefecture::{self, Prefecture},
    reply,
    state::AppState,
    stats::{self, PrefectureStats, StatsSource},
};

/// LINE webhook callback.
///
/// Rejects the delivery when the signature does not verify. Once it does,
/// every event is handled in order and the caller always gets `200 OK`;
/// per-event failures are only logged.
pub async fn handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, BotError> {
    let header = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok());

    if let Err(error) = signature::verify(&state.channel_secret, &body, header) {
        tracing::warn!(error = %error, "Rejected webhook delivery");
        return Err(error);
    }

    let payload: WebhookBody = serde_json::from_slice(&body)
        .map_err(|e| BotError::BadRequest(format!("invalid webhook body: {e}")))?;

    tracing::debug!(events = payload.events.len(), "Processing webhook delivery");

    for event in &payload.events {
        if let Err(error) = handle_event(&state, event).await {
            tracing::warn!(
                error = %error,
                event_type = %event.event_type,
                "Failed to handle webhook event"
            );
        }
    }

    Ok(StatusCode::OK)
}

async fn handle_event(state: &AppState, event: &InboundEvent) -> Result<(), BotError> {
    let (reply_token, message) = match event.action() {
        EventAction::Ignore => return Ok(()),
        EventAction::OtherMessage { reply_token } => (reply_token, reply::prompt()),
        EventAction::Text { reply_token, text } => (reply_token, resolve_text(state, text).await),
    };

    tracing::debug!(summary = %message.summary(), "Sending reply");
    state.replies.reply(reply_token, &[message]).await
}

/// Turn a user's text into the reply to send. Unknown input, a failed fetch
/// and a missing record all fall back to the prompt.
async fn resolve_text(state: &AppState, text: &str) -> ReplyMessage {
    let Some(prefecture) = prefecture::lookup(text) else {
        return reply::prompt();
    };

    match lookup_stats(state.stats.as_ref(), prefecture).await {
        Ok(stats) => reply::stats_reply(state.reply_format, &stats),
        Err(error) => {
            tracing::warn!(
                error = %error,
                prefecture = prefecture.name,
                "Statistics lookup failed"
            );
            reply::prompt()
        }
    }
}

async fn lookup_stats(
    source: &dyn StatsSource,
    prefecture: &Prefecture,
) -> Result<PrefectureStats, BotError> {
    let records = source.fetch().await?;
    stats::find_prefecture(&records, prefecture).ok_or_else(|| {
        BotError::Upstream(format!("no statistics record for {}", prefecture.api_name))
    })
}
