//! relief-telemetry - 可观测性库

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use relief_config::TelemetryConfig;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn env_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level))
}

/// 初始化 tracing
pub fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(env_filter(log_level))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// 初始化 JSON 格式的 tracing（生产环境）
pub fn init_tracing_json(log_level: &str) {
    tracing_subscriber::registry()
        .with(env_filter(log_level))
        .with(tracing_subscriber::fmt::layer().json())
        .init();
}

/// 按配置选择日志格式
pub fn init_from_config(config: &TelemetryConfig, is_production: bool) {
    if is_production || config.json_logs {
        init_tracing_json(&config.log_level);
    } else {
        init_tracing(&config.log_level);
    }

    tracing::info!(
        log_level = %config.log_level,
        json = is_production || config.json_logs,
        "Tracing initialized"
    );
}

/// 初始化 Prometheus metrics
///
/// 进程内只能安装一次 recorder，重复调用返回错误
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}
