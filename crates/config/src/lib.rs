//! relief-config - 配置加载库

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 环境变量前缀，嵌套字段用 `__` 分隔，例如 `RELIEF_TELEMETRY__LOG_LEVEL`
pub const ENV_PREFIX: &str = "RELIEF_";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    Load(#[from] figment::Error),
}

/// 遥测配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// 强制输出 JSON 日志，生产环境总是 JSON
    #[serde(default)]
    pub json_logs: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logs: false,
        }
    }
}

/// 鉴权配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorizationConfig {
    /// 拒绝时输出 warn 日志
    #[serde(default = "default_true")]
    pub log_denials: bool,
    /// 记录 authorization_checks_total 指标
    #[serde(default = "default_true")]
    pub record_metrics: bool,
}

fn default_true() -> bool {
    true
}

impl Default for AuthorizationConfig {
    fn default() -> Self {
        Self {
            log_denials: true,
            record_metrics: true,
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_app_name")]
    pub app_name: String,
    #[serde(default = "default_app_env")]
    pub app_env: String,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    #[serde(default)]
    pub authorization: AuthorizationConfig,
}

fn default_app_name() -> String {
    "relief-hub".to_string()
}

fn default_app_env() -> String {
    "development".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
            app_env: default_app_env(),
            telemetry: TelemetryConfig::default(),
            authorization: AuthorizationConfig::default(),
        }
    }
}

impl AppConfig {
    /// 从配置文件和环境变量加载配置
    ///
    /// 合并顺序：内置默认值 < `default.toml` < `{APP_ENV}.toml` < `RELIEF_*` 环境变量
    pub fn load(config_dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let config = Self::figment(config_dir.as_ref()).extract()?;
        Ok(config)
    }

    /// 构建 figment，测试中可单独使用
    pub fn figment(config_dir: &Path) -> Figment {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| default_app_env());

        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(config_dir.join("default.toml")))
            .merge(Toml::file(config_dir.join(format!("{}.toml", env))))
            .merge(Serialized::default("app_env", env))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// 是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }

    /// 是否为开发环境
    pub fn is_development(&self) -> bool {
        self.app_env == "development"
    }
}
