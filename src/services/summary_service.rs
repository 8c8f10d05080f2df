//! 摘要服务 - 业务能力层

use std::sync::Arc;

use tracing::{error, info};

use crate::error::GenerationError;
use crate::models::summary::Summary;
use crate::services::llm_service::TextGateway;

pub struct SummaryService {
    gateway: Arc<dyn TextGateway>,
}

impl SummaryService {
    pub fn new(gateway: Arc<dyn TextGateway>) -> Self {
        Self { gateway }
    }

    /// 生成要点式摘要
    ///
    /// # 参数
    /// - `text`: 学习笔记
    /// - `word_limit`: 摘要字数上限，必须大于 0
    pub async fn summarize(&self, text: &str, word_limit: u32) -> Result<Summary, GenerationError> {
        if word_limit == 0 {
            return Err(GenerationError::InvalidWordLimit);
        }
        if text.trim().is_empty() {
            return Err(GenerationError::EmptyInput);
        }

        let prompt = build_summary_prompt(text, word_limit);
        let raw = self.gateway.generate(&prompt).await.map_err(|e| {
            error!("摘要生成失败: {}", e);
            GenerationError::from(e)
        })?;

        let summary = Summary::from_raw(raw);
        info!("✓ 摘要生成完成，共 {} 条要点", summary.bullets.len());
        Ok(summary)
    }
}

pub fn build_summary_prompt(text: &str, word_limit: u32) -> String {
    format!(
        "Summarize the following text in simple bullet points, keeping the summary within {} words:\n\n{}",
        word_limit, text
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GatewayError;
    use async_trait::async_trait;

    struct EchoBullets;

    #[async_trait]
    impl TextGateway for EchoBullets {
        async fn generate(&self, prompt: &str) -> Result<String, GatewayError> {
            assert!(prompt.starts_with("Summarize the following text"));
            Ok("* Plants make food * Light is required *".to_string())
        }
    }

    struct Down;

    #[async_trait]
    impl TextGateway for Down {
        async fn generate(&self, _prompt: &str) -> Result<String, GatewayError> {
            Err(GatewayError::RequestFailed {
                model: "fake".to_string(),
                message: "connection reset".to_string(),
            })
        }
    }

    #[test]
    fn test_prompt_format() {
        assert_eq!(
            build_summary_prompt("Notes here", 80),
            "Summarize the following text in simple bullet points, keeping the summary within 80 words:\n\nNotes here"
        );
    }

    #[tokio::test]
    async fn test_summarize_splits_bullets() {
        let service = SummaryService::new(Arc::new(EchoBullets));

        let summary = service.summarize("photosynthesis notes", 100).await.unwrap();

        assert_eq!(summary.bullets, vec!["Plants make food", "Light is required"]);
    }

    #[tokio::test]
    async fn test_summarize_rejects_zero_limit() {
        let service = SummaryService::new(Arc::new(EchoBullets));
        assert!(matches!(
            service.summarize("text", 0).await,
            Err(GenerationError::InvalidWordLimit)
        ));
    }

    #[tokio::test]
    async fn test_gateway_failure_carries_message() {
        let service = SummaryService::new(Arc::new(Down));

        let err = service.summarize("text", 100).await.unwrap_err();

        assert!(matches!(err, GenerationError::Gateway { .. }));
        assert!(err.to_string().contains("connection reset"));
    }
}
