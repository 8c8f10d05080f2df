//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 根据命令组装服务与屏幕，驱动终端交互，是唯一做 IO 的层。
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::App (命令 + 终端交互)
//!     ↓
//! workflow (屏幕状态 / 测验会话状态机 / 朗读控制)
//!     ↓
//! services (能力层：quiz / summary / chat / llm)
//!     ↓
//! infrastructure (基础设施：语音合成进程)
//! ```

pub mod app;
pub mod render;

pub use app::{read_source_text, run_chat_loop, run_quiz_loop, App, QuizCommand};
