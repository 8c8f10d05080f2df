//! 测验生成服务 - 业务能力层
//!
//! 负责"从学习材料生成一份已校验的测验"，不持有会话状态

use std::sync::Arc;

use tracing::{debug, info};

use crate::error::{AppResult, GenerationError};
use crate::models::loaders::parse_quiz;
use crate::models::quiz::Quiz;
use crate::services::llm_service::TextGateway;
use crate::utils::logging::truncate_text;

pub struct QuizService {
    gateway: Arc<dyn TextGateway>,
    question_count: usize,
}

impl QuizService {
    pub fn new(gateway: Arc<dyn TextGateway>, question_count: usize) -> Self {
        Self {
            gateway,
            question_count: question_count.max(1),
        }
    }

    pub fn question_count(&self) -> usize {
        self.question_count
    }

    /// 生成测验
    ///
    /// 网关失败返回 `GatewayError`，返回内容不合法返回 `MalformedQuizError`。
    /// 返回题数不强制等于请求题数。
    pub async fn generate_quiz(&self, text: &str) -> AppResult<Quiz> {
        if text.trim().is_empty() {
            return Err(GenerationError::EmptyInput.into());
        }

        let prompt = build_quiz_prompt(text, self.question_count);
        let raw = self.gateway.generate(&prompt).await?;
        debug!("测验原始输出: {}", truncate_text(&raw, 120));

        let quiz = parse_quiz(&raw)?;
        info!(
            "✓ 测验生成完成: 请求 {} 题，实际 {} 题",
            self.question_count,
            quiz.len()
        );
        Ok(quiz)
    }
}

/// 构建测验生成提示词
pub fn build_quiz_prompt(text: &str, question_count: usize) -> String {
    format!(
        r#"
From the following study material, generate {count} multiple-choice questions.
Each question should have:
- A clear question
- Four options (A-D)
- The correct answer (just the letter A/B/C/D)
Format the output as JSON like this:
[
  {{
    "question": "What is ...?",
    "options": ["Option A", "Option B", "Option C", "Option D"],
    "answer": "A"
  }},
  ...
]

Text:
{text}
"#,
        count = question_count,
        text = text
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, GatewayError, MalformedQuizError};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct CannedGateway {
        reply: Result<String, String>,
        prompts: Mutex<Vec<String>>,
    }

    impl CannedGateway {
        fn ok(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(reply.to_string()),
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn failing(message: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(message.to_string()),
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl TextGateway for CannedGateway {
        async fn generate(&self, prompt: &str) -> Result<String, GatewayError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply.clone().map_err(|message| GatewayError::Remote {
                model: "fake".to_string(),
                message,
            })
        }
    }

    #[test]
    fn test_prompt_mentions_count_and_text() {
        let prompt = build_quiz_prompt("Photosynthesis uses light.", 7);
        assert!(prompt.contains("generate 7 multiple-choice questions"));
        assert!(prompt.contains("Text:\nPhotosynthesis uses light."));
        assert!(prompt.contains(r#""answer": "A""#));
    }

    #[tokio::test]
    async fn test_generate_parses_fenced_reply() {
        let gateway = CannedGateway::ok(
            "```json\n[{\"question\":\"Q\",\"options\":[\"a\",\"b\",\"c\",\"d\"],\"answer\":\"C\"}]\n```",
        );
        let service = QuizService::new(gateway.clone(), 5);

        let quiz = service.generate_quiz("notes").await.unwrap();

        assert_eq!(quiz.len(), 1);
        assert_eq!(gateway.prompts.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_generate_surfaces_malformed_reply() {
        let service = QuizService::new(CannedGateway::ok("I cannot do that."), 5);

        let err = service.generate_quiz("notes").await.unwrap_err();

        assert!(matches!(err, AppError::MalformedQuiz(MalformedQuizError::InvalidJson(_))));
    }

    #[tokio::test]
    async fn test_generate_surfaces_gateway_error() {
        let service = QuizService::new(CannedGateway::failing("quota"), 5);

        let err = service.generate_quiz("notes").await.unwrap_err();

        assert!(matches!(err, AppError::Gateway(GatewayError::Remote { .. })));
    }

    #[tokio::test]
    async fn test_empty_text_skips_gateway() {
        let gateway = CannedGateway::ok("[]");
        let service = QuizService::new(gateway.clone(), 5);

        let err = service.generate_quiz("   ").await.unwrap_err();

        assert!(matches!(err, AppError::Generation(GenerationError::EmptyInput)));
        assert!(gateway.prompts.lock().unwrap().is_empty());
    }

    #[test]
    fn test_question_count_is_at_least_one() {
        assert_eq!(QuizService::new(CannedGateway::ok("[]"), 0).question_count(), 1);
        assert_eq!(QuizService::new(CannedGateway::ok("[]"), 8).question_count(), 8);
    }
}
