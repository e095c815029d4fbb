use axum::http::{header, HeaderMap, HeaderValue};
use tracing::warn;

use crate::identity::CallerIdentity;

/// A pure, synchronous transform applied to the outbound request before
/// the single forward attempt. Interceptors run in a fixed order and
/// may touch headers only.
pub trait RequestInterceptor: Send + Sync {
    fn name(&self) -> &'static str;
    fn apply(&self, headers: &mut HeaderMap, identity: &CallerIdentity);
}

/// Attaches the caller's identity token as a bearer credential,
/// replacing any prior Authorization value. Anonymous callers pass
/// through untouched.
pub struct BearerRelay;

impl RequestInterceptor for BearerRelay {
    fn name(&self) -> &'static str {
        "bearer-relay"
    }

    fn apply(&self, headers: &mut HeaderMap, identity: &CallerIdentity) {
        let Some(token) = identity.token() else { return };
        match HeaderValue::from_str(&format!("Bearer {token}")) {
            Ok(value) => {
                headers.insert(header::AUTHORIZATION, value);
            }
            Err(e) => {
                warn!(error = %e, "identity token is not header-safe; request left untouched");
            }
        }
    }
}

/// The fixed pipeline every forwarded request goes through.
pub fn standard_pipeline() -> Vec<Box<dyn RequestInterceptor>> {
    vec![Box::new(BearerRelay)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authenticated_caller_gets_bearer_header() {
        let mut headers = HeaderMap::new();
        BearerRelay.apply(&mut headers, &CallerIdentity::authenticated("tok-123"));
        assert_eq!(
            headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()),
            Some("Bearer tok-123")
        );
    }

    #[test]
    fn prior_credential_is_replaced() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer stale"));
        BearerRelay.apply(&mut headers, &CallerIdentity::authenticated("fresh"));
        assert_eq!(
            headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()),
            Some("Bearer fresh")
        );
        assert_eq!(headers.get_all(header::AUTHORIZATION).iter().count(), 1);
    }

    #[test]
    fn anonymous_caller_leaves_headers_untouched() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer client-own"));
        BearerRelay.apply(&mut headers, &CallerIdentity::anonymous());
        assert_eq!(
            headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()),
            Some("Bearer client-own")
        );
    }

    #[test]
    fn pipeline_contains_the_relay() {
        let pipeline = standard_pipeline();
        assert_eq!(pipeline.len(), 1);
        assert_eq!(pipeline[0].name(), "bearer-relay");
    }
}
