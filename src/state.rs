use std::sync::Arc;

use crate::{
    config::BotConfig,
    error::BotError,
    line::client::{LineClient, ReplySender},
    reply::ReplyFormat,
    stats::{HttpStatsSource, StatsSource},
};

#[derive(Clone)]
pub struct AppState {
    pub channel_secret: Arc<str>,
    pub reply_format: ReplyFormat,
    pub stats: Arc<dyn StatsSource>,
    pub replies: Arc<dyn ReplySender>,
}

impl AppState {
    pub fn from_env() -> Result<Self, BotError> {
        Ok(Self::new(BotConfig::from_env()?))
    }

    pub fn new(config: BotConfig) -> Self {
        let http = reqwest::Client::new();

        tracing::info!(
            stats_api_url = %config.stats_api_url,
            line_api_base = %config.line_api_base,
            reply_format = ?config.reply_format,
            "Bot configuration loaded"
        );

        let stats = Arc::new(HttpStatsSource::new(http.clone(), config.stats_api_url));
        let replies = Arc::new(LineClient::new(
            http,
            &config.line_api_base,
            config.channel_token,
        ));

        Self {
            channel_secret: config.channel_secret.into(),
            reply_format: config.reply_format,
            stats,
            replies,
        }
    }
}
