//! 日志初始化

use tracing_subscriber::{fmt, EnvFilter};

/// 初始化 stderr 日志输出
///
/// `RUST_LOG` 优先；未设置时 verbose 为 debug，否则为 info。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // 测试或重复调用时可能已初始化
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
