//! LLM 服务 - 业务能力层
//!
//! 只负责"把提示词发给网关、拿回文本"这一能力，不解析内容
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型
//! - 兼容 OpenAI API 的服务（如 Gemini 的 OpenAI 兼容接口）

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{ConfigError, GatewayError};

/// 文本生成网关
///
/// 输入提示词，返回 trim 后的非空文本。网络失败、远端错误或空内容都返回
/// `GatewayError`，调用方不解析网关特有的错误内容。
#[async_trait]
pub trait TextGateway: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GatewayError>;
}

/// LLM 服务
///
/// 职责：
/// - 持有 OpenAI 兼容客户端
/// - 提供通用的 LLM 调用接口
/// - 不关心提示词内容和返回格式
pub struct LlmService {
    client: Client<OpenAIConfig>,
    model_name: String,
    temperature: f32,
    max_tokens: u32,
}

impl LlmService {
    /// 创建新的 LLM 服务，未配置 API 密钥时报错
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let api_key = config.require_api_key()?;

        let openai_config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(config.llm_api_base_url.trim_end_matches('/'));

        Ok(Self {
            client: Client::with_config(openai_config),
            model_name: config.llm_model_name.clone(),
            temperature: config.llm_temperature,
            max_tokens: config.llm_max_tokens,
        })
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// 通用的 LLM 调用函数
    ///
    /// # 参数
    /// - `user_message`: 用户消息内容
    /// - `system_message`: 系统消息（可选）
    ///
    /// # 返回
    /// 返回 LLM 的响应内容（已 trim，保证非空）
    pub async fn send_to_llm(
        &self,
        user_message: &str,
        system_message: Option<&str>,
    ) -> Result<String, GatewayError> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("用户消息长度: {} 字符", user_message.len());

        let mut messages = Vec::new();

        if let Some(sys_msg) = system_message {
            let system_msg = ChatCompletionRequestSystemMessageArgs::default()
                .content(sys_msg)
                .build()
                .map_err(|e| self.map_error(e))?;
            messages.push(ChatCompletionRequestMessage::System(system_msg));
        }

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()
            .map_err(|e| self.map_error(e))?;
        messages.push(ChatCompletionRequestMessage::User(user_msg));

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(messages)
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
            .build()
            .map_err(|e| self.map_error(e))?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            self.map_error(e)
        })?;

        debug!("LLM API 调用成功");

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| GatewayError::EmptyResponse {
                model: self.model_name.clone(),
            })?;

        Ok(content)
    }

    fn map_error(&self, err: OpenAIError) -> GatewayError {
        match err {
            OpenAIError::ApiError(api) => GatewayError::Remote {
                model: self.model_name.clone(),
                message: api.message,
            },
            other => GatewayError::RequestFailed {
                model: self.model_name.clone(),
                message: other.to_string(),
            },
        }
    }
}

#[async_trait]
impl TextGateway for LlmService {
    async fn generate(&self, prompt: &str) -> Result<String, GatewayError> {
        self.send_to_llm(prompt, None).await
    }
}
