use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub workflow: WorkflowConfig,
    pub security: SecurityConfig,
    pub mail: MailConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    /// Public base URL used to build links in outgoing mail
    pub site_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

/// Knobs of the request lifecycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowConfig {
    pub rate_limit_max_requests: i64,
    pub rate_limit_window_hours: i64,
    pub download_link_ttl_days: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub cors_origins: Vec<String>,
    pub require_https: bool,
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
    /// Account seeded at startup when no admin exists
    #[serde(default)]
    pub bootstrap_admin_email: Option<String>,
    #[serde(default, skip_serializing)]
    pub bootstrap_admin_password: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MailProvider {
    Smtp,
    Resend,
    Log,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    pub provider: MailProvider,
    pub from_address: String,
    pub smtp_host: Option<String>,
    pub smtp_port: u16,
    pub smtp_user: Option<String>,
    #[serde(skip_serializing)]
    pub smtp_password: Option<String>,
    #[serde(skip_serializing)]
    pub resend_api_key: Option<String>,
    /// Used when the settings table has no `contact_email`
    pub admin_email: Option<String>,
    /// Used when the settings table has no `whatsapp_number`
    pub admin_whatsapp: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Some(v) = env::var("PORT").ok().or_else(|| env::var("READY_API_PORT").ok()) {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }
        if let Ok(v) = env::var("SITE_URL") {
            self.server.site_url = v.trim_end_matches('/').to_string();
        }

        // Database overrides
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = Some(v);
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }

        // Workflow overrides
        if let Ok(v) = env::var("REQUEST_RATE_LIMIT_MAX") {
            self.workflow.rate_limit_max_requests = v.parse().unwrap_or(self.workflow.rate_limit_max_requests);
        }
        if let Ok(v) = env::var("REQUEST_RATE_LIMIT_WINDOW_HOURS") {
            self.workflow.rate_limit_window_hours = v.parse().unwrap_or(self.workflow.rate_limit_window_hours);
        }
        if let Ok(v) = env::var("DOWNLOAD_LINK_TTL_DAYS") {
            self.workflow.download_link_ttl_days = v.parse().unwrap_or(self.workflow.download_link_ttl_days);
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Ok(v) = env::var("SECURITY_REQUIRE_HTTPS") {
            self.security.require_https = v.parse().unwrap_or(self.security.require_https);
        }
        if let Ok(v) = env::var("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("SECURITY_JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = v.parse().unwrap_or(self.security.jwt_expiry_hours);
        }
        if let Ok(v) = env::var("ADMIN_BOOTSTRAP_EMAIL") {
            self.security.bootstrap_admin_email = Some(v).filter(|v| !v.trim().is_empty());
        }
        if let Ok(v) = env::var("ADMIN_BOOTSTRAP_PASSWORD") {
            self.security.bootstrap_admin_password = Some(v).filter(|v| !v.is_empty());
        }

        // Mail overrides
        if let Ok(v) = env::var("MAIL_PROVIDER") {
            self.mail.provider = match v.to_ascii_lowercase().as_str() {
                "smtp" => MailProvider::Smtp,
                "resend" => MailProvider::Resend,
                "log" => MailProvider::Log,
                other => {
                    tracing::warn!("Unknown MAIL_PROVIDER '{}', keeping {:?}", other, self.mail.provider);
                    self.mail.provider
                }
            };
        }
        if let Ok(v) = env::var("MAIL_FROM") {
            self.mail.from_address = v;
        }
        if let Ok(v) = env::var("SMTP_HOST") {
            self.mail.smtp_host = Some(v);
        }
        if let Ok(v) = env::var("SMTP_PORT") {
            self.mail.smtp_port = v.parse().unwrap_or(self.mail.smtp_port);
        }
        if let Ok(v) = env::var("SMTP_USER") {
            self.mail.smtp_user = Some(v);
        }
        if let Ok(v) = env::var("SMTP_PASSWORD") {
            self.mail.smtp_password = Some(v);
        }
        if let Ok(v) = env::var("RESEND_API_KEY") {
            self.mail.resend_api_key = Some(v);
        }
        if let Ok(v) = env::var("ADMIN_CONTACT_EMAIL") {
            self.mail.admin_email = Some(v);
        }
        if let Ok(v) = env::var("ADMIN_WHATSAPP_NUMBER") {
            self.mail.admin_whatsapp = Some(v);
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                port: 3000,
                site_url: "http://localhost:3000".to_string(),
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 5,
                connection_timeout: 30,
            },
            workflow: WorkflowConfig::default(),
            security: SecurityConfig {
                cors_origins: Vec::new(),
                require_https: false,
                jwt_secret: "development-secret-change-me".to_string(),
                jwt_expiry_hours: 24 * 7, // 1 week
                bootstrap_admin_email: None,
                bootstrap_admin_password: None,
            },
            mail: MailConfig {
                provider: MailProvider::Log,
                ..MailConfig::default()
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                port: 3000,
                site_url: "https://staging.projectready4u.com".to_string(),
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 10,
                connection_timeout: 10,
            },
            workflow: WorkflowConfig::default(),
            security: SecurityConfig {
                cors_origins: vec!["https://staging.projectready4u.com".to_string()],
                require_https: true,
                jwt_secret: String::new(),
                jwt_expiry_hours: 24,
                bootstrap_admin_email: None,
                bootstrap_admin_password: None,
            },
            mail: MailConfig::default(),
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                port: 3000,
                site_url: "https://projectready4u.com".to_string(),
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 20,
                connection_timeout: 5,
            },
            workflow: WorkflowConfig::default(),
            security: SecurityConfig {
                cors_origins: vec!["https://projectready4u.com".to_string()],
                require_https: true,
                jwt_secret: String::new(),
                jwt_expiry_hours: 8,
                bootstrap_admin_email: None,
                bootstrap_admin_password: None,
            },
            mail: MailConfig::default(),
        }
    }
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            rate_limit_max_requests: 3,
            rate_limit_window_hours: 24,
            download_link_ttl_days: 30,
        }
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            provider: MailProvider::Smtp,
            from_address: "Project Ready <noreply@projectready4u.com>".to_string(),
            smtp_host: None,
            smtp_port: 587,
            smtp_user: None,
            smtp_password: None,
            resend_api_key: None,
            admin_email: None,
            admin_whatsapp: None,
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.mail.provider, MailProvider::Log);
        assert!(!config.security.jwt_secret.is_empty());
        assert!(!config.security.require_https);
        assert_eq!(config.workflow.rate_limit_max_requests, 3);
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert!(config.is_production());
        assert!(config.security.require_https);
        assert!(config.security.jwt_secret.is_empty(), "production secret must come from the environment");
        assert_eq!(config.workflow.download_link_ttl_days, 30);
        assert_eq!(config.workflow.rate_limit_window_hours, 24);
    }
}
