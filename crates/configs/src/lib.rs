use anyhow::{anyhow, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub ids: IdsConfig,
    #[serde(default)]
    pub email: EmailConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080 }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
        }
    }
}

/// Lengths of the generated public identifiers and the email-verification
/// token. Public ids are alphanumeric and independent of the internal
/// storage keys.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct IdsConfig {
    #[serde(default = "default_user_id_length")]
    pub user_id_length: usize,
    #[serde(default = "default_address_id_length")]
    pub address_id_length: usize,
    #[serde(default = "default_token_length")]
    pub verification_token_length: usize,
}

impl Default for IdsConfig {
    fn default() -> Self {
        Self {
            user_id_length: default_user_id_length(),
            address_id_length: default_address_id_length(),
            verification_token_length: default_token_length(),
        }
    }
}

/// Outbound verification-email settings (SES region, sender, and the base
/// URL the token gets appended to).
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    pub from_address: String,
    #[serde(default)]
    pub from_name: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default = "default_verification_base_url")]
    pub verification_base_url: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            from_address: String::new(),
            from_name: String::new(),
            region: None,
            verification_base_url: default_verification_base_url(),
        }
    }
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }
fn default_user_id_length() -> usize { 30 }
fn default_address_id_length() -> usize { 30 }
fn default_token_length() -> usize { 40 }
fn default_verification_base_url() -> String {
    "http://localhost:8080/verification-service/email-verification.html".to_string()
}

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.database.normalize_from_env();
        self.database.validate()?;
        self.ids.validate()?;
        self.email.normalize_from_env();
        self.email.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        Ok(())
    }
}

impl DatabaseConfig {
    /// Fill the URL from `DATABASE_URL` when the TOML leaves it empty.
    pub fn normalize_from_env(&mut self) {
        if self.url.trim().is_empty() {
            if let Ok(url) = std::env::var("DATABASE_URL") {
                self.url = url;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!(
                "database.url is empty; set it in config.toml or via DATABASE_URL"
            ));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://")) {
            return Err(anyhow!("database.url must start with postgresql:// or postgres://"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

impl IdsConfig {
    pub fn validate(&self) -> Result<()> {
        if self.user_id_length == 0
            || self.address_id_length == 0
            || self.verification_token_length == 0
        {
            return Err(anyhow!("ids.* lengths must be >= 1"));
        }
        Ok(())
    }
}

impl EmailConfig {
    /// Env fallbacks follow the SES SDK conventions so the same variables
    /// work for local runs and deployed instances.
    pub fn normalize_from_env(&mut self) {
        if self.from_address.trim().is_empty() {
            if let Ok(from) = std::env::var("SES_FROM_EMAIL") {
                self.from_address = from;
            }
        }
        if self.region.is_none() {
            self.region = std::env::var("AWS_SES_REGION")
                .or_else(|_| std::env::var("AWS_REGION"))
                .ok();
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.from_address.trim().is_empty() {
            return Err(anyhow!(
                "email.from_address is empty; set it in config.toml or via SES_FROM_EMAIL"
            ));
        }
        if self.verification_base_url.trim().is_empty() {
            return Err(anyhow!("email.verification_base_url must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pass_id_validation() {
        let ids = IdsConfig::default();
        assert_eq!(ids.user_id_length, 30);
        assert_eq!(ids.address_id_length, 30);
        assert_eq!(ids.verification_token_length, 40);
        assert!(ids.validate().is_ok());
    }

    #[test]
    fn database_url_scheme_is_checked() {
        let cfg = DatabaseConfig {
            url: "mysql://nope".into(),
            max_connections: 10,
            min_connections: 2,
            connect_timeout_secs: 30,
            idle_timeout_secs: 600,
            max_lifetime_secs: 3600,
            acquire_timeout_secs: 30,
            sqlx_logging: false,
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn empty_sender_fails_email_validation() {
        let cfg = EmailConfig::default();
        assert!(cfg.validate().is_err());

        let cfg = EmailConfig { from_address: "no-reply@example.com".into(), ..Default::default() };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn parses_minimal_toml() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 9000

            [database]
            url = "postgres://u:p@localhost/reg"

            [email]
            from_address = "no-reply@example.com"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.ids.user_id_length, 30);
        assert_eq!(cfg.email.from_address, "no-reply@example.com");
    }
}
