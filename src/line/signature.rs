use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::BotError;

type HmacSha256 = Hmac<Sha256>;

fn keyed_mac(channel_secret: &str, body: &[u8]) -> Result<HmacSha256, BotError> {
    let mac = HmacSha256::new_from_slice(channel_secret.as_bytes())
        .map_err(|e| BotError::Internal(format!("failed to create HMAC: {e}")))?;
    Ok(mac.chain_update(body))
}

/// Compute the `X-Line-Signature` value for a request body:
/// base64 of HMAC-SHA256 keyed with the channel secret.
pub fn sign(channel_secret: &str, body: &[u8]) -> Result<String, BotError> {
    let mac = keyed_mac(channel_secret, body)?;
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Check a received signature header against the body.
///
/// A missing header is a bad request, a mismatch is unauthorized.
pub fn verify(channel_secret: &str, body: &[u8], signature: Option<&str>) -> Result<(), BotError> {
    let signature = signature
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| BotError::BadRequest("missing x-line-signature header".into()))?;

    let decoded = STANDARD
        .decode(signature)
        .map_err(|_| BotError::Unauthorized("signature is not valid base64".into()))?;

    keyed_mac(channel_secret, body)?
        .verify_slice(&decoded)
        .map_err(|_| BotError::Unauthorized("signature mismatch".into()))
}
