use std::collections::HashMap;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | PORT | 3000 | HTTP listen port |
/// | DATABASE_PATH | orders.db | SQLite database file |
/// | ENVIRONMENT | development | development \| production |
/// | PRINT_METHOD | (unset) | printnode \| webhook \| local |
/// | PRINTNODE_API_KEY | (unset) | PrintNode credential |
/// | PRINTER_IDS | {} | JSON map businessId -> printer id |
/// | PRINT_WEBHOOKS | {} | JSON map businessId -> webhook URL |
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API listen port
    pub http_port: u16,
    /// SQLite database file path
    pub database_path: String,
    /// Runtime environment: development | production
    pub environment: String,

    // === Print channel configuration ===
    /// Selected print channel name, unset disables printing
    pub print_method: Option<String>,
    /// PrintNode API key (basic-auth username)
    pub printnode_api_key: String,
    /// Per-business PrintNode printer ids
    pub printer_ids: HashMap<String, String>,
    /// Per-business ticket webhook URLs
    pub print_webhooks: HashMap<String, String>,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "orders.db".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),

            print_method: std::env::var("PRINT_METHOD")
                .ok()
                .filter(|m| !m.is_empty()),
            printnode_api_key: std::env::var("PRINTNODE_API_KEY").unwrap_or_default(),
            printer_ids: env_json_map("PRINTER_IDS"),
            print_webhooks: env_json_map("PRINT_WEBHOOKS"),
        }
    }

    /// Create a config with custom overrides
    ///
    /// Mostly used by tests
    pub fn with_overrides(database_path: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.database_path = database_path.into();
        config.http_port = http_port;
        config
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Read a `{"businessId": "value"}` style mapping from an env var.
/// Malformed JSON degrades to an empty map rather than failing startup.
fn env_json_map(name: &str) -> HashMap<String, String> {
    match std::env::var(name) {
        Ok(raw) => parse_json_map(name, &raw),
        Err(_) => HashMap::new(),
    }
}

fn parse_json_map(name: &str, raw: &str) -> HashMap<String, String> {
    match serde_json::from_str(raw) {
        Ok(map) => map,
        Err(e) => {
            tracing::warn!(var = name, error = %e, "Malformed JSON mapping, ignoring");
            HashMap::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_business_mapping() {
        let map = parse_json_map("PRINTER_IDS", r#"{"default":"7001","cafe":"7002"}"#);
        assert_eq!(map.get("default"), Some(&"7001".to_string()));
        assert_eq!(map.get("cafe"), Some(&"7002".to_string()));
    }

    #[test]
    fn malformed_mapping_degrades_to_empty() {
        assert!(parse_json_map("PRINTER_IDS", "not json").is_empty());
        assert!(parse_json_map("PRINTER_IDS", "[1, 2]").is_empty());
    }
}
