// state_token.rs - Signed State Tokens
// The osu! link command hands the user a state payload carrying their local
// user id; the login endpoint gets it back through the OAuth redirect and must
// not trust it without a signature check. Tokens are `payload.signature` with
// both parts URL-safe base64 and an HMAC-SHA256 signature keyed by the
// instance secret, domain-separated with an "osu" salt.
//
// Used by: api/osu_login.rs

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::error::PackError;

type HmacSha256 = Hmac<Sha256>;

const STATE_SALT: &[u8] = b"osu";

#[derive(Debug, Serialize, Deserialize)]
struct StatePayload {
    uid: i64,
}

fn keyed_mac(secret: &str) -> Result<HmacSha256, PackError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| PackError::forbidden(format!("invalid signing key: {}", e)))?;
    mac.update(STATE_SALT);
    Ok(mac)
}

/// Sign a local user id into a state token safe to round-trip through a URL.
pub fn sign(user_id: i64, secret: &str) -> Result<String, PackError> {
    let payload = serde_json::to_vec(&StatePayload { uid: user_id })
        .map_err(|e| PackError::forbidden(e.to_string()))?;
    let payload_part = URL_SAFE_NO_PAD.encode(payload);

    let mut mac = keyed_mac(secret)?;
    mac.update(payload_part.as_bytes());
    let sig_part = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    Ok(format!("{}.{}", payload_part, sig_part))
}

/// Verify a state token and recover the user id it was signed for.
pub fn verify(token: &str, secret: &str) -> Result<i64, PackError> {
    let (payload_part, sig_part) = token
        .split_once('.')
        .ok_or_else(|| PackError::forbidden("malformed state token"))?;

    let mut mac = keyed_mac(secret)?;
    mac.update(payload_part.as_bytes());
    let sig = URL_SAFE_NO_PAD
        .decode(sig_part)
        .map_err(|_| PackError::forbidden("malformed state token"))?;
    mac.verify_slice(&sig)
        .map_err(|_| PackError::forbidden("state token signature mismatch"))?;

    let payload = URL_SAFE_NO_PAD
        .decode(payload_part)
        .map_err(|_| PackError::forbidden("malformed state token"))?;
    let payload: StatePayload = serde_json::from_slice(&payload)
        .map_err(|_| PackError::forbidden("malformed state token"))?;

    Ok(payload.uid)
}
