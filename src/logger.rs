//! 日志初始化
//!
//! 日志输出到 stderr，避免和命令行交互输出混在一起。

use tracing_subscriber::EnvFilter;

/// 初始化全局日志，`RUST_LOG` 优先生效
pub fn init(verbose: bool) {
    let default_level = if verbose { "noto=debug,info" } else { "noto=info,warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
