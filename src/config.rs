use std::env;

use crate::{error::BotError, reply::ReplyFormat};

pub const DEFAULT_STATS_API_URL: &str = "https://covid19-japan-web-api.now.sh/api/v1/prefectures";
pub const DEFAULT_LINE_API_BASE: &str = "https://api.line.me";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BotConfig {
    pub channel_secret: String,
    pub channel_token: String,
    pub stats_api_url: String,
    pub line_api_base: String,
    pub reply_format: ReplyFormat,
}

impl BotConfig {
    pub fn from_env() -> Result<Self, BotError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// `LINE_CHANNEL_SECRET` and `LINE_CHANNEL_TOKEN` are required and must be
    /// non-empty. Everything else has a default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BotError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| BotError::Config(format!("{key} is not set")))
        };

        let channel_secret = required("LINE_CHANNEL_SECRET")?;
        let channel_token = required("LINE_CHANNEL_TOKEN")?;

        let optional = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let stats_api_url =
            optional("STATS_API_URL").unwrap_or_else(|| DEFAULT_STATS_API_URL.to_string());
        let line_api_base = optional("LINE_API_BASE")
            .map(|base| base.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_LINE_API_BASE.to_string());

        let reply_format = match optional("REPLY_FORMAT") {
            Some(raw) => ReplyFormat::parse(&raw).unwrap_or_else(|| {
                tracing::warn!(value = %raw, "Unknown REPLY_FORMAT, using flex");
                ReplyFormat::Flex
            }),
            None => ReplyFormat::Flex,
        };

        Ok(Self {
            channel_secret,
            channel_token,
            stats_api_url,
            line_api_base,
            reply_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_applied_when_optional_keys_missing() {
        let config = BotConfig::from_lookup(lookup_from(&[
            ("LINE_CHANNEL_SECRET", "secret"),
            ("LINE_CHANNEL_TOKEN", "token"),
        ]))
        .unwrap();

        assert_eq!(config.channel_secret, "secret");
        assert_eq!(config.channel_token, "token");
        assert_eq!(config.stats_api_url, DEFAULT_STATS_API_URL);
        assert_eq!(config.line_api_base, DEFAULT_LINE_API_BASE);
        assert_eq!(config.reply_format, ReplyFormat::Flex);
    }

    #[test]
    fn test_missing_channel_secret_is_config_error() {
        let result = BotConfig::from_lookup(lookup_from(&[("LINE_CHANNEL_TOKEN", "token")]));
        match result {
            Err(BotError::Config(msg)) => assert!(msg.contains("LINE_CHANNEL_SECRET")),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_channel_token_is_config_error() {
        let result = BotConfig::from_lookup(lookup_from(&[
            ("LINE_CHANNEL_SECRET", "secret"),
            ("LINE_CHANNEL_TOKEN", "   "),
        ]));
        assert!(matches!(result, Err(BotError::Config(_))));
    }

    #[test]
    fn test_overrides_and_text_format() {
        let config = BotConfig::from_lookup(lookup_from(&[
            ("LINE_CHANNEL_SECRET", "secret"),
            ("LINE_CHANNEL_TOKEN", "token"),
            ("STATS_API_URL", "http://localhost:9000/prefectures"),
            ("LINE_API_BASE", "http://localhost:9001/"),
            ("REPLY_FORMAT", "TEXT"),
        ]))
        .unwrap();

        assert_eq!(config.stats_api_url, "http://localhost:9000/prefectures");
        assert_eq!(config.line_api_base, "http://localhost:9001");
        assert_eq!(config.reply_format, ReplyFormat::Text);
    }

    #[test]
    fn test_blank_optional_values_use_defaults() {
        let config = BotConfig::from_lookup(lookup_from(&[
            ("LINE_CHANNEL_SECRET", "secret"),
            ("LINE_CHANNEL_TOKEN", "token"),
            ("STATS_API_URL", ""),
            ("LINE_API_BASE", "  "),
            ("REPLY_FORMAT", ""),
        ]))
        .unwrap();

        assert_eq!(config.stats_api_url, DEFAULT_STATS_API_URL);
        assert_eq!(config.line_api_base, DEFAULT_LINE_API_BASE);
        assert_eq!(config.reply_format, ReplyFormat::Flex);
    }

    #[test]
    fn test_unknown_reply_format_falls_back_to_flex() {
        let config = BotConfig::from_lookup(lookup_from(&[
            ("LINE_CHANNEL_SECRET", "secret"),
            ("LINE_CHANNEL_TOKEN", "token"),
            ("REPLY_FORMAT", "carousel"),
        ]))
        .unwrap();

        assert_eq!(config.reply_format, ReplyFormat::Flex);
    }
}
