//! 屏幕状态 - 流程层
//!
//! 每个屏幕持有自己的状态和 busy 标记，没有全局可变状态。
//! 会话锁只在同步操作期间持有，不跨 await。

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{info, warn};

use crate::error::{AppResult, SessionError};
use crate::models::chat::ChatExchange;
use crate::models::quiz::AnswerLetter;
use crate::models::summary::Summary;
use crate::services::{ChatService, QuizService, SummaryService};
use crate::workflow::busy::BusyFlag;
use crate::workflow::quiz_session::{AnswerFeedback, QuizSession, SessionSnapshot};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ========== 测验 ==========

/// 测验屏幕
pub struct QuizScreen {
    service: QuizService,
    session: Mutex<QuizSession>,
    busy: BusyFlag,
}

impl QuizScreen {
    pub fn new(service: QuizService) -> Self {
        Self {
            service,
            session: Mutex::new(QuizSession::new()),
            busy: BusyFlag::new("生成测验"),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    /// 生成并加载新测验
    ///
    /// 失败时会话保持原样（空或之前加载的测验），不会留下部分结果。
    pub async fn generate(&self, text: &str) -> AppResult<SessionSnapshot> {
        let _guard = self.busy.acquire()?;

        let quiz = self.service.generate_quiz(text).await.map_err(|e| {
            warn!("⚠️ 测验生成失败，保持当前会话: {}", e);
            e
        })?;

        let mut session = lock(&self.session);
        session.load(quiz)?;
        let snapshot = session.snapshot();
        info!("📚 已加载测验，共 {} 题", snapshot.total);
        Ok(snapshot)
    }

    pub fn select_option(&self, letter: AnswerLetter) -> Result<AnswerFeedback, SessionError> {
        lock(&self.session).select_option(letter)
    }

    pub fn next(&self) -> Result<usize, SessionError> {
        lock(&self.session).next()
    }

    pub fn previous(&self) -> Result<usize, SessionError> {
        lock(&self.session).previous()
    }

    pub fn finish(&self) -> Result<usize, SessionError> {
        lock(&self.session).finish()
    }

    pub fn reset(&self) {
        lock(&self.session).reset();
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        lock(&self.session).snapshot()
    }
}

// ========== 摘要 ==========

/// 摘要屏幕
pub struct SummaryScreen {
    service: SummaryService,
    word_limit: u32,
    summary: Mutex<Option<Summary>>,
    busy: BusyFlag,
}

impl SummaryScreen {
    pub fn new(service: SummaryService, word_limit: u32) -> Self {
        Self {
            service,
            word_limit,
            summary: Mutex::new(None),
            busy: BusyFlag::new("生成摘要"),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    pub fn word_limit(&self) -> u32 {
        self.word_limit
    }

    pub fn set_word_limit(&mut self, word_limit: u32) {
        self.word_limit = word_limit;
    }

    pub async fn summarize(&self, text: &str) -> AppResult<Summary> {
        let _guard = self.busy.acquire()?;
        let summary = self.service.summarize(text, self.word_limit).await?;
        *lock(&self.summary) = Some(summary.clone());
        Ok(summary)
    }

    /// 最近一次成功的摘要
    pub fn last_summary(&self) -> Option<Summary> {
        lock(&self.summary).clone()
    }
}

// ========== 聊天 ==========

/// 聊天屏幕
pub struct ChatScreen {
    service: ChatService,
    history: Mutex<Vec<ChatExchange>>,
    busy: BusyFlag,
}

impl ChatScreen {
    pub fn new(service: ChatService) -> Self {
        Self {
            service,
            history: Mutex::new(Vec::new()),
            busy: BusyFlag::new("聊天"),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    /// 提问
    ///
    /// 空白输入直接忽略，返回 `Ok(None)`。失败时历史不变。
    pub async fn ask(&self, input: &str) -> AppResult<Option<ChatExchange>> {
        let message = input.trim();
        if message.is_empty() {
            return Ok(None);
        }

        let _guard = self.busy.acquire()?;
        let history = self.history();
        let reply = self.service.reply(&history, message).await?;

        let exchange = ChatExchange::new(message, reply);
        lock(&self.history).push(exchange.clone());
        Ok(Some(exchange))
    }

    pub fn history(&self) -> Vec<ChatExchange> {
        lock(&self.history).clone()
    }

    pub fn clear(&self) {
        lock(&self.history).clear();
    }
}
