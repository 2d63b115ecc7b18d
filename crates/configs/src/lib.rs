use std::io::ErrorKind;

use anyhow::anyhow;
use anyhow::{Context, Result};
use serde::Deserialize;

/// Minimum HMAC key size accepted for token signing (bytes).
pub const MIN_TOKEN_KEY_LEN: usize = 32;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub reservations: ReservationConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
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

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }
fn default_token_ttl_days() -> i64 { 7 }

/// Session token settings. The key is read once at startup and handed to the
/// token issuer; nothing else keeps a copy.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub token_key: String,
    #[serde(default = "default_token_ttl_days")]
    pub token_ttl_days: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self { token_key: String::new(), token_ttl_days: default_token_ttl_days() }
    }
}

/// How a new booking is tested against existing ones.
///
/// `Legacy` keeps the historical predicate: same day, office, zone, parking
/// zone and parking space, *or* the same desk label anywhere. `SameSlot`
/// only rejects the same desk (or the same parking space) in the same
/// office on the same day.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConflictRule {
    #[default]
    Legacy,
    SameSlot,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ReservationConfig {
    #[serde(default)]
    pub conflict_rule: ConflictRule,
}

/// `CONFIG_PATH`, else `config.toml` in the working directory.
pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

/// Reads, parses and validates the file at `path`. Only a missing file falls
/// back to [`AppConfig::from_env`]; a broken file is an error.
pub fn load_or_env(path: &str) -> Result<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return AppConfig::from_env(),
        Err(e) => return Err(anyhow!("读取配置文件 {path} 失败: {e}")),
    };
    let mut cfg = parse(&content).with_context(|| format!("配置文件 {path} 解析失败"))?;
    cfg.normalize_and_validate().with_context(|| format!("配置文件 {path} 校验失败"))?;
    Ok(cfg)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Config from [`config_path`]; see [`load_or_env`].
    pub fn load_and_validate() -> Result<Self> {
        load_or_env(&config_path())
    }

    /// Config without a file: everything comes from env vars and defaults.
    pub fn from_env() -> Result<Self> {
        let mut cfg = AppConfig::default();
        if let Ok(host) = std::env::var("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            cfg.server.port = port;
        }
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        // 归一化 server
        self.server.normalize()?;
        // database / auth 支持从环境变量补全
        self.database.normalize_from_env();
        self.database.validate()?;
        self.auth.normalize_from_env();
        self.auth.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port 必须在 1..=65535 范围内"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn normalize_from_env(&mut self) {
        if self.url.trim().is_empty() {
            if let Ok(url) = std::env::var("DATABASE_URL") {
                self.url = url;
            }
        }
    }

    /// `memory://` selects the in-process store instead of Postgres.
    pub fn is_memory(&self) -> bool {
        self.url.trim().to_lowercase().starts_with("memory://")
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url 为空；请在 config.toml 或环境变量 DATABASE_URL 中提供"));
        }
        if self.is_memory() {
            return Ok(());
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://")) {
            return Err(anyhow!("database.url 必须以 postgresql://、postgres:// 或 memory:// 开头"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections 必须 >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections 必须 >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database 超时配置必须为正整数秒"));
        }
        Ok(())
    }
}

impl AuthConfig {
    pub fn normalize_from_env(&mut self) {
        if self.token_key.trim().is_empty() {
            if let Ok(key) = std::env::var("TOKEN_KEY") {
                self.token_key = key;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.token_key.len() < MIN_TOKEN_KEY_LEN {
            return Err(anyhow!(
                "auth.token_key 至少需要 {MIN_TOKEN_KEY_LEN} 字节；请在 config.toml 或环境变量 TOKEN_KEY 中提供"
            ));
        }
        if self.token_ttl_days <= 0 {
            return Err(anyhow!("auth.token_ttl_days 必须 > 0"));
        }
        Ok(())
    }
}
