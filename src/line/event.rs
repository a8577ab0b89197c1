use serde::Deserialize;

/// Body of a webhook delivery.
#[derive(Clone, Debug, Deserialize)]
pub struct WebhookBody {
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub events: Vec<InboundEvent>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct InboundEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(rename = "replyToken", default)]
    pub reply_token: Option<String>,
    #[serde(default)]
    pub message: Option<InboundMessage>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct InboundMessage {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub text: Option<String>,
}

/// What the bot should do with one event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EventAction<'a> {
    /// A text message to resolve.
    Text { reply_token: &'a str, text: &'a str },
    /// A non-text message. Answered with the prompt.
    OtherMessage { reply_token: &'a str },
    Ignore,
}

impl InboundEvent {
    pub fn action(&self) -> EventAction<'_> {
        if self.event_type != "message" {
            return EventAction::Ignore;
        }
        let Some(reply_token) = self.reply_token.as_deref() else {
            return EventAction::Ignore;
        };

        match &self.message {
            Some(InboundMessage {
                kind,
                text: Some(text),
            }) if kind == "text" => EventAction::Text { reply_token, text },
            _ => EventAction::OtherMessage { reply_token },
        }
    }
}
