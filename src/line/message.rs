use serde::Serialize;
use serde_json::Value;

/// An outbound message object, serialized with its LINE `type` tag.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ReplyMessage {
    Text {
        text: String,
    },
    Flex {
        #[serde(rename = "altText")]
        alt_text: String,
        contents: Value,
    },
}

impl ReplyMessage {
    pub fn text(text: impl Into<String>) -> Self {
        ReplyMessage::Text { text: text.into() }
    }

    /// Text a human would read, used for logging and for tests.
    pub fn summary(&self) -> &str {
        match self {
            ReplyMessage::Text { text } => text,
            ReplyMessage::Flex { alt_text, .. } => alt_text,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReplyRequest<'a> {
    #[serde(rename = "replyToken")]
    pub reply_token: &'a str,
    pub messages: &'a [ReplyMessage],
}
