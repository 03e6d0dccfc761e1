use std::env;

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub environment: String,
    pub database_url: String,
    pub database_max_connections: u32,
    pub jwt_secret: String,
    pub jwt_expires_in_hours: i64,
    pub admin_emails: Vec<String>,
    pub otel_service_name: String,
    pub otel_exporter_endpoint: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a number")?,
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "25".to_string())
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a number")?,
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            jwt_expires_in_hours: env::var("JWT_EXPIRES_IN_HOURS")
                .unwrap_or_else(|_| "168".to_string())
                .parse()
                .context("JWT_EXPIRES_IN_HOURS must be a number")?,
            admin_emails: parse_admin_emails(&env::var("ADMIN_EMAILS").unwrap_or_default()),
            otel_service_name: env::var("OTEL_SERVICE_NAME")
                .unwrap_or_else(|_| "deals-api".to_string()),
            otel_exporter_endpoint: env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
                .unwrap_or_else(|_| "http://localhost:4317".to_string()),
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Lowercased so they compare equal to normalized account emails.
fn parse_admin_emails(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_admins(raw: &str) -> Config {
        Config {
            port: 8080,
            environment: "test".to_string(),
            database_url: "postgres://localhost/deals".to_string(),
            database_max_connections: 5,
            jwt_secret: "secret".to_string(),
            jwt_expires_in_hours: 1,
            admin_emails: parse_admin_emails(raw),
            otel_service_name: "deals-api".to_string(),
            otel_exporter_endpoint: "http://localhost:4317".to_string(),
        }
    }

    #[test]
    fn test_parse_admin_emails_skips_blanks() {
        assert_eq!(
            parse_admin_emails(" a@x.com, ,B@Y.com,"),
            vec!["a@x.com".to_string(), "b@y.com".to_string()]
        );
        assert!(parse_admin_emails("").is_empty());
    }

    #[test]
    fn test_is_production() {
        let mut config = config_with_admins("");
        assert!(!config.is_production());
        config.environment = "production".to_string();
        assert!(config.is_production());
    }
}
