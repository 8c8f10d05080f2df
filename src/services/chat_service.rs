//! 聊天服务 - 业务能力层
//!
//! 只负责"根据历史回答一个问题"，历史由调用方持有

use std::sync::Arc;

use tracing::debug;

use crate::error::GatewayError;
use crate::models::chat::{build_chat_prompt, ChatExchange};
use crate::services::llm_service::TextGateway;

pub struct ChatService {
    gateway: Arc<dyn TextGateway>,
}

impl ChatService {
    pub fn new(gateway: Arc<dyn TextGateway>) -> Self {
        Self { gateway }
    }

    pub async fn reply(
        &self,
        history: &[ChatExchange],
        message: &str,
    ) -> Result<String, GatewayError> {
        debug!("发送聊天消息，历史轮数: {}", history.len());
        let prompt = build_chat_prompt(history, message);
        self.gateway.generate(&prompt).await
    }
}
