//! # Noto
//!
//! 学习助手：笔记摘要、测验生成、学习问答和文本朗读
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有系统语音合成进程，只暴露朗读能力
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"
//! - `LlmService` - 文本生成网关（OpenAI 兼容接口）
//! - `QuizService` / `SummaryService` / `ChatService` - 构建提示词并解释结果
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 每个屏幕的状态
//! - `QuizSession` - 测验会话状态机
//! - `SpeechController` - 互斥的朗读控制
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/` - 命令行交互
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{parse_quiz, split_bullets, AnswerLetter, Quiz, QuizQuestion};
pub use orchestrator::App;
pub use services::{LlmService, TextGateway};
pub use workflow::{QuizSession, SessionPhase, SessionSnapshot};
