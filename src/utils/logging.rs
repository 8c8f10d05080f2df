/// 日志工具模块
///
/// 提供日志格式化和输出的辅助函数
use tracing::info;

use crate::config::Config;

/// 记录程序启动信息
pub fn log_startup(command: &str, config: &Config) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 Noto 启动 - {} ({})",
        command,
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("🤖 模型: {} @ {}", config.llm_model_name, config.llm_api_base_url);
    info!("{}", "=".repeat(60));
}

/// 记录测验结束统计
pub fn log_quiz_result(score: usize, total: usize) {
    info!("{}", "─".repeat(60));
    info!("🎉 测验完成: 答对 {}/{}", score, total);
    info!("{}", "─".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text_counts_chars() {
        assert_eq!(truncate_text("短文本", 10), "短文本");
        assert_eq!(truncate_text("光合作用需要光", 4), "光合作用...");
    }
}
