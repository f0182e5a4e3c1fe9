//! Bearer token inspection.
//!
//! The portal issues JWTs. Only the `exp` claim is read, without verifying the
//! signature: the check exists to skip requests that would certainly be rejected,
//! not to authenticate anything.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

use crate::Clock;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TokenError {
    #[error("token is not a three-part JWT")]
    Malformed,
    #[error("token payload is not valid base64url")]
    Encoding,
    #[error("token payload is not a JSON claim set")]
    Claims,
    #[error("token has no usable exp claim")]
    MissingExpiry,
}

#[derive(Debug, Deserialize)]
struct Claims {
    exp: Option<i64>,
}

/// Expiry instant encoded in the token's `exp` claim.
///
/// # Errors
///
/// Returns `TokenError` if the token cannot be decoded or has no `exp`.
pub fn expires_at(token: &str) -> Result<DateTime<Utc>, TokenError> {
    let mut parts = token.trim().split('.');
    let (Some(_header), Some(payload), Some(_signature), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(TokenError::Malformed);
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|_| TokenError::Encoding)?;
    let claims: Claims = serde_json::from_slice(&bytes).map_err(|_| TokenError::Claims)?;
    let exp = claims.exp.ok_or(TokenError::MissingExpiry)?;
    DateTime::<Utc>::from_timestamp(exp, 0).ok_or(TokenError::MissingExpiry)
}

/// True when the token has expired according to `clock`.
///
/// A token that cannot be decoded is treated as expired. A token without an
/// `exp` claim never expires.
#[must_use]
pub fn is_expired(token: &str, clock: &Clock) -> bool {
    match expires_at(token) {
        Ok(exp) => clock.has_passed(exp),
        Err(TokenError::MissingExpiry) => false,
        Err(_) => true,
    }
}

/// Builds an unsigned JWT carrying only an `exp` claim. Test helper.
#[must_use]
pub fn unsigned_token_expiring_at(exp: DateTime<Utc>) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"exp":{}}}"#, exp.timestamp()));
    format!("{header}.{payload}.sig")
}
