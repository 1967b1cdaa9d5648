//! 日志初始化
//!
//! 引擎作为库运行，由宿主进程在启动时调用一次。

use tracing_appender::non_blocking::WorkerGuard;

use crate::config::AppConfig;

/// 初始化 tracing 日志
///
/// 返回的 guard 必须在宿主进程存活期间持有，否则缓冲日志会丢失。
pub fn init_logging(config: &AppConfig) -> WorkerGuard {
    let stdout_log = std::io::stdout();
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(stdout_log);
    let filter = tracing_subscriber::EnvFilter::new(&config.app.log_level);
    let tracing_format = tracing_subscriber::fmt::format()
        .with_level(true)
        .with_ansi(true);

    let tracing_builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking_writer)
        .event_format(tracing_format);

    if config.is_development() {
        tracing_builder
            .with_file(true)
            .with_line_number(true)
            .init();
    } else {
        tracing_builder.json().init();
    }

    guard
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn test_init_logging_returns_guard() {
        let config = AppConfig::default();
        let _guard = init_logging(&config);
        tracing::info!("日志初始化完成");
    }
}
