use serde::{Deserialize, Serialize};
use std::env;

use crate::utils::DEFAULT_WEIGHT_WINDOW;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub draw: DrawConfig,
    #[serde(default)]
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub expires_in: i64, // seconds
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    /// 首次启动时写入的管理员密码 (之后以数据库中的哈希为准)
    pub initial_password: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            initial_password: "admin123".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawConfig {
    /// 抽样区间上限, 权重总和超过该值的部分不可达
    pub max_weight_window: f64,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            max_weight_window: DEFAULT_WEIGHT_WINDOW,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CorsConfig {
    /// 允许的来源; 为空时不限制
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_toml() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        // 配置文件不存在时完全依赖环境变量
        let mut config: Config = match std::fs::read_to_string(&config_path) {
            Ok(config_str) => toml::from_str(&config_str)
                .map_err(|e| format!("Failed to parse config file {config_path}: {e}"))?,
            Err(e) if e.kind() == ErrorKind::NotFound => Self::from_env_defaults(),
            Err(e) => {
                return Err(format!("Unable to read config file {config_path}: {e}").into());
            }
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_env_defaults() -> Self {
        Config {
            server: ServerConfig {
                host: get_env("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: get_env_parse("SERVER_PORT", 3000u16),
            },
            database: DatabaseConfig {
                url: get_env("DATABASE_URL")
                    .unwrap_or_else(|| "sqlite://egg_draw.db?mode=rwc".to_string()),
                max_connections: get_env_parse("DB_MAX_CONNECTIONS", 5u32),
            },
            jwt: JwtConfig {
                secret: get_env("JWT_SECRET")
                    .unwrap_or_else(|| "change-me-in-production".to_string()),
                expires_in: get_env_parse("JWT_EXPIRES_IN", 7200i64),
            },
            admin: AdminConfig {
                initial_password: get_env("ADMIN_INITIAL_PASSWORD")
                    .unwrap_or_else(|| AdminConfig::default().initial_password),
            },
            draw: DrawConfig {
                max_weight_window: get_env_parse("DRAW_MAX_WEIGHT_WINDOW", DEFAULT_WEIGHT_WINDOW),
            },
            cors: CorsConfig::default(),
        }
    }

    // 环境变量覆盖（即便文件存在时也覆盖）
    fn apply_env_overrides(&mut self) {
        if let Ok(v) = env::var("SERVER_HOST") {
            self.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT")
            && let Ok(p) = v.parse()
        {
            self.server.port = p;
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = v;
        }
        if let Ok(v) = env::var("DB_MAX_CONNECTIONS")
            && let Ok(mc) = v.parse()
        {
            self.database.max_connections = mc;
        }
        if let Ok(v) = env::var("JWT_SECRET") {
            self.jwt.secret = v;
        }
        if let Ok(v) = env::var("JWT_EXPIRES_IN")
            && let Ok(n) = v.parse()
        {
            self.jwt.expires_in = n;
        }
        if let Ok(v) = env::var("ADMIN_INITIAL_PASSWORD") {
            self.admin.initial_password = v;
        }
        if let Ok(v) = env::var("DRAW_MAX_WEIGHT_WINDOW")
            && let Ok(w) = v.parse()
        {
            self.draw.max_weight_window = w;
        }
        if let Ok(v) = env::var("CORS_ALLOWED_ORIGINS") {
            self.cors.allowed_origins = split_list(&v);
        }
    }

    fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        let window = self.draw.max_weight_window;
        if !window.is_finite() || window <= 0.0 {
            return Err(format!("draw.max_weight_window must be a positive number, got {window}").into());
        }
        if self.database.max_connections == 0 {
            return Err("database.max_connections must be at least 1".into());
        }
        Ok(())
    }
}

fn get_env(name: &str) -> Option<String> {
    env::var(name).ok()
}

fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list() {
        assert_eq!(
            split_list(" https://a.example , ,https://b.example"),
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
        assert!(split_list("").is_empty());
    }

    #[test]
    fn test_parse_minimal_toml_uses_section_defaults() {
        let raw = r#"
            [server]
            host = "127.0.0.1"
            port = 8080

            [database]
            url = "sqlite::memory:"
            max_connections = 1

            [jwt]
            secret = "s3cret"
            expires_in = 60
        "#;
        let config: Config = toml::from_str(raw).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.admin.initial_password, "admin123");
        assert_eq!(config.draw.max_weight_window, DEFAULT_WEIGHT_WINDOW);
        assert!(config.cors.allowed_origins.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_non_positive_window() {
        let raw = r#"
            [server]
            host = "127.0.0.1"
            port = 8080

            [database]
            url = "sqlite::memory:"
            max_connections = 1

            [jwt]
            secret = "s3cret"
            expires_in = 60

            [draw]
            max_weight_window = 0.0
        "#;
        let config: Config = toml::from_str(raw).unwrap();
        assert!(config.validate().is_err());
    }
}
