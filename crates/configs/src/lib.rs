use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

pub const DEFAULT_INTAKE_BASE_URL: &str = "https://intakeq.com/api/v1/clients";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub email: EmailConfig,
    #[serde(default)]
    pub intake: IntakeConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            worker_threads: None,
            static_dir: default_static_dir(),
        }
    }
}

fn default_host() -> String { "0.0.0.0".into() }
fn default_port() -> u16 { 3000 }
fn default_static_dir() -> String { "public".into() }
fn default_intake_base_url() -> String { DEFAULT_INTAKE_BASE_URL.into() }

/// Empty `allowed_origins` means any origin.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Webhook that sends the templated email.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct EmailConfig {
    #[serde(default)]
    pub endpoint: Option<String>,
}

#[derive(Clone, Deserialize)]
pub struct IntakeConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_intake_base_url")]
    pub base_url: String,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self { api_key: None, base_url: default_intake_base_url() }
    }
}

// Hand-written so the key never shows up in logs.
impl std::fmt::Debug for IntakeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntakeConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .finish()
    }
}

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Config file when present, defaults otherwise, then process env on top.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = match load_default() {
            Ok(cfg) => cfg,
            Err(e) if is_missing_file(&e) => AppConfig::default(),
            Err(e) => return Err(e),
        };
        cfg.apply_env(|key| std::env::var(key).ok());
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Overlay values from an env-like lookup. Unset keys leave the config untouched.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT").and_then(|p| p.trim().parse::<u16>().ok()) {
            self.server.port = port;
        }
        if let Some(w) = lookup("TOKIO_WORKER_THREADS").and_then(|v| v.trim().parse::<usize>().ok()) {
            self.server.worker_threads = Some(w);
        }
        if let Some(dir) = lookup("STATIC_DIR") {
            self.server.static_dir = dir;
        }
        if let Some(endpoint) = lookup("SENDGRID_ENDPOINT") {
            self.email.endpoint = Some(endpoint);
        }
        if let Some(key) = lookup("INTAKEQ_API_KEY") {
            self.intake.api_key = Some(key);
        }
        if let Some(url) = lookup("INTAKEQ_BASE_URL") {
            self.intake.base_url = url;
        }
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.email.endpoint = non_blank(self.email.endpoint.take());
        self.intake.api_key = non_blank(self.intake.api_key.take());
        if self.intake.base_url.trim().is_empty() {
            self.intake.base_url = default_intake_base_url();
        }
        self.cors.allowed_origins.retain(|o| !o.trim().is_empty());
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        if self.worker_threads == Some(0) {
            self.worker_threads = None;
        }
        if self.static_dir.trim().is_empty() {
            self.static_dir = default_static_dir();
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn is_missing_file(e: &anyhow::Error) -> bool {
    e.downcast_ref::<std::io::Error>()
        .map(|io| io.kind() == std::io::ErrorKind::NotFound)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_documented_values() {
        let mut cfg = AppConfig::default();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.server.static_dir, "public");
        assert_eq!(cfg.intake.base_url, DEFAULT_INTAKE_BASE_URL);
        assert!(cfg.email.endpoint.is_none());
        assert!(cfg.intake.api_key.is_none());
    }

    #[test]
    fn env_overrides_file_values() {
        let mut cfg = parse(
            r#"
            [server]
            port = 8080
            [email]
            endpoint = "https://file.example/hook"
            "#,
        )
        .unwrap();
        cfg.apply_env(lookup(&[
            ("PORT", "4000"),
            ("SENDGRID_ENDPOINT", "https://env.example/hook"),
            ("INTAKEQ_API_KEY", "k-123"),
        ]));
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.port, 4000);
        assert_eq!(cfg.email.endpoint.as_deref(), Some("https://env.example/hook"));
        assert_eq!(cfg.intake.api_key.as_deref(), Some("k-123"));
    }

    #[test]
    fn unparsable_port_is_ignored() {
        let mut cfg = AppConfig::default();
        cfg.apply_env(lookup(&[("PORT", "not-a-port")]));
        assert_eq!(cfg.server.port, 3000);
    }

    #[test]
    fn blank_secrets_normalise_to_unset() {
        let mut cfg = AppConfig::default();
        cfg.apply_env(lookup(&[("SENDGRID_ENDPOINT", "   "), ("INTAKEQ_API_KEY", "")]));
        cfg.normalize_and_validate().unwrap();
        assert!(cfg.email.endpoint.is_none());
        assert!(cfg.intake.api_key.is_none());
    }

    #[test]
    fn zero_port_rejected() {
        let mut cfg = parse("[server]\nport = 0\n").unwrap();
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let mut cfg = AppConfig::default();
        cfg.intake.api_key = Some("super-secret".into());
        let rendered = format!("{:?}", cfg);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn missing_file_is_detected() {
        let err = load_from_file("/nonexistent-config-for-tests.toml").unwrap_err();
        assert!(is_missing_file(&err));
    }
}
