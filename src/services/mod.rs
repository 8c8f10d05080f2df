pub mod chat_service;
pub mod llm_service;
pub mod quiz_service;
pub mod summary_service;

pub use chat_service::ChatService;
pub use llm_service::{LlmService, TextGateway};
pub use quiz_service::QuizService;
pub use summary_service::SummaryService;
