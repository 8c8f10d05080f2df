use chrono::{DateTime, Local};
use serde::Serialize;

/// 一轮问答
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatExchange {
    pub user: String,
    pub bot: String,
    pub asked_at: DateTime<Local>,
}

impl ChatExchange {
    pub fn new(user: impl Into<String>, bot: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            bot: bot.into(),
            asked_at: Local::now(),
        }
    }
}

/// 把历史对话和新问题拼成纯文本提示词
///
/// 格式：
/// ```text
/// User: ...
/// Assistant: ...
/// User: {new}
/// Assistant:
/// ```
pub fn build_chat_prompt(history: &[ChatExchange], new_message: &str) -> String {
    let transcript = history
        .iter()
        .map(|msg| format!("User: {}\nAssistant: {}", msg.user, msg.bot))
        .collect::<Vec<_>>()
        .join("\n");

    format!("{}\nUser: {}\nAssistant:", transcript, new_message)
}
