use crate::config::RouteRule;

/// Pick the longest prefix rule matching the path at a segment
/// boundary, so `/api/users` matches `/api/users` and `/api/users/42`
/// but never `/api/users-export`.
pub fn resolve<'a>(rules: &'a [RouteRule], path: &str) -> Option<&'a RouteRule> {
    rules
        .iter()
        .filter(|r| prefix_matches(&r.prefix, path))
        .max_by_key(|r| r.prefix.trim_end_matches('/').len())
}

fn prefix_matches(prefix: &str, path: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        return true;
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GatewayConfig;

    fn rule(prefix: &str, service: &str) -> RouteRule {
        RouteRule {
            prefix: prefix.to_string(),
            service: service.to_string(),
            target: format!("http://127.0.0.1:1/{}", service),
        }
    }

    #[test]
    fn matches_exact_prefix_and_subpaths() {
        let rules = GatewayConfig::default().routes;
        assert_eq!(resolve(&rules, "/api/orders").unwrap().service, "order-service");
        assert_eq!(resolve(&rules, "/api/orders/42").unwrap().service, "order-service");
        assert_eq!(
            resolve(&rules, "/api/inventory/quantity/ABC").unwrap().service,
            "inventory-service"
        );
    }

    #[test]
    fn does_not_match_across_segment_boundaries() {
        let rules = vec![rule("/api/users", "user-backend")];
        assert!(resolve(&rules, "/api/users-export").is_none());
        assert!(resolve(&rules, "/api/user").is_none());
    }

    #[test]
    fn unmatched_path_yields_none() {
        let rules = GatewayConfig::default().routes;
        assert!(resolve(&rules, "/health").is_none());
        assert!(resolve(&rules, "/api/payments/1").is_none());
    }

    #[test]
    fn longest_prefix_wins() {
        let rules = vec![
            rule("/api", "catch-all"),
            rule("/api/orders", "order-service"),
        ];
        assert_eq!(resolve(&rules, "/api/orders/1").unwrap().service, "order-service");
        assert_eq!(resolve(&rules, "/api/other").unwrap().service, "catch-all");
    }

    #[test]
    fn trailing_slash_in_rule_is_tolerated() {
        let rules = vec![rule("/api/orders/", "order-service")];
        assert_eq!(resolve(&rules, "/api/orders/1").unwrap().service, "order-service");
        assert_eq!(resolve(&rules, "/api/orders").unwrap().service, "order-service");
    }
}
