use axum::http::HeaderMap;
use axum_extra::extract::cookie::CookieJar;
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::Deserialize;
use tracing::debug;

use crate::config::SessionConfig;

/// Caller identity resolved from the gateway's own authentication
/// session. Anonymous is the default; it is never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    token: Option<String>,
}

impl CallerIdentity {
    pub fn anonymous() -> Self {
        Self { token: None }
    }

    pub fn authenticated(token: impl Into<String>) -> Self {
        Self { token: Some(token.into()) }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

#[derive(Debug, Deserialize)]
struct Claims {
    #[allow(dead_code)]
    sub: Option<String>,
    #[allow(dead_code)]
    exp: usize,
}

/// Resolve the caller from the session cookie. The token must pass
/// signature and expiry checks before it is considered relayable;
/// anything else degrades to an anonymous pass-through.
pub fn resolve(headers: &HeaderMap, session: &SessionConfig) -> CallerIdentity {
    let jar = CookieJar::from_headers(headers);
    let Some(cookie) = jar.get(&session.cookie_name) else {
        return CallerIdentity::anonymous();
    };
    let token = cookie.value().to_string();
    let key = DecodingKey::from_secret(session.jwt_secret.as_bytes());
    match decode::<Claims>(&token, &key, &Validation::default()) {
        Ok(_) => CallerIdentity::authenticated(token),
        Err(e) => {
            debug!(error = %e, "session token rejected; treating caller as anonymous");
            CallerIdentity::anonymous()
        }
    }
}
