use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default)]
    pub listen: ListenConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default = "default_routes")]
    pub routes: Vec<RouteRule>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListenConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".to_string(), port: 8080 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Cookie holding the caller's identity token.
    pub cookie_name: String,
    /// Secret used to validate session tokens before they are relayed.
    pub jwt_secret: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "auth_token".to_string(),
            jwt_secret: "dev-secret-change-me".to_string(),
        }
    }
}

/// One entry of the static dispatch table: requests whose path falls
/// under `prefix` are forwarded to `target`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRule {
    pub prefix: String,
    pub service: String,
    pub target: String,
}

fn default_routes() -> Vec<RouteRule> {
    vec![
        RouteRule {
            prefix: "/api/users".to_string(),
            service: "user-backend".to_string(),
            target: "http://127.0.0.1:8081".to_string(),
        },
        RouteRule {
            prefix: "/api/products".to_string(),
            service: "product-service".to_string(),
            target: "http://127.0.0.1:8082".to_string(),
        },
        RouteRule {
            prefix: "/api/inventory".to_string(),
            service: "inventory-service".to_string(),
            target: "http://127.0.0.1:8083".to_string(),
        },
        RouteRule {
            prefix: "/api/orders".to_string(),
            service: "order-service".to_string(),
            target: "http://127.0.0.1:8084".to_string(),
        },
    ]
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen: ListenConfig::default(),
            session: SessionConfig::default(),
            routes: default_routes(),
        }
    }
}

impl GatewayConfig {
    pub fn load_from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: GatewayConfig = serde_json::from_str(&content)?;
        Ok(config)
    }
}
