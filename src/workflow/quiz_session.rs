//! 测验会话状态机 - 流程层
//!
//! ```text
//! Empty ──load──▶ InProgress ──finish──▶ Completed
//!   ▲                 │                      │
//!   └──── reset ──────┴──────── reset ───────┘
//! ```
//!
//! 所有状态转换都是同步的，由离散的用户操作驱动。非法操作返回
//! `SessionError` 且不改变状态。

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::error::SessionError;
use crate::models::quiz::{AnswerLetter, Quiz, QuizQuestion};

/// 会话阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionPhase {
    /// 没有加载测验
    Empty,
    /// 已加载，可以作答和翻页
    InProgress,
    /// 已结束，只能重置或重新加载
    Completed,
}

/// 一次选择后的反馈
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnswerFeedback {
    pub question_index: usize,
    /// 该题最终记录的答案（重复选择时为第一次的答案）
    pub selected: AnswerLetter,
    pub correct_answer: AnswerLetter,
    pub is_correct: bool,
    /// 本次调用是否写入了答案
    pub newly_recorded: bool,
}

/// 渲染用的只读快照
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub current_index: usize,
    pub total: usize,
    pub current_question: Option<QuizQuestion>,
    pub feedback: Option<AnswerFeedback>,
    pub answered: usize,
    pub can_previous: bool,
    pub can_next: bool,
    pub can_finish: bool,
    /// 只有结束后才给出得分
    pub score: Option<usize>,
}

/// 测验会话
#[derive(Debug, Clone, Default)]
pub struct QuizSession {
    quiz: Option<Quiz>,
    current_index: usize,
    answers: BTreeMap<usize, AnswerLetter>,
    completed: bool,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SessionPhase {
        match (&self.quiz, self.completed) {
            (None, _) => SessionPhase::Empty,
            (Some(_), false) => SessionPhase::InProgress,
            (Some(_), true) => SessionPhase::Completed,
        }
    }

    pub fn quiz(&self) -> Option<&Quiz> {
        self.quiz.as_ref()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn answers(&self) -> &BTreeMap<usize, AnswerLetter> {
        &self.answers
    }

    pub fn answer_for(&self, index: usize) -> Option<AnswerLetter> {
        self.answers.get(&index).copied()
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn current_question(&self) -> Option<&QuizQuestion> {
        self.quiz.as_ref()?.get(self.current_index)
    }

    /// 加载新测验，整体替换之前的测验和答案
    ///
    /// 空测验不会进入作答状态，原有状态保持不变。
    pub fn load(&mut self, quiz: Quiz) -> Result<(), SessionError> {
        if quiz.is_empty() {
            return Err(SessionError::EmptyQuiz);
        }
        if !self.answers.is_empty() && !self.completed {
            debug!("重新加载测验，丢弃 {} 个未完成的答案", self.answers.len());
        }

        self.quiz = Some(quiz);
        self.current_index = 0;
        self.answers.clear();
        self.completed = false;
        Ok(())
    }

    /// 为当前题选择答案
    ///
    /// 第一次选择即锁定，后续调用不会覆盖，只返回已记录的答案。
    pub fn select_option(&mut self, letter: AnswerLetter) -> Result<AnswerFeedback, SessionError> {
        let question = self.active_question()?;
        let correct_answer = question.answer;
        let index = self.current_index;

        let newly_recorded = !self.answers.contains_key(&index);
        let selected = *self.answers.entry(index).or_insert(letter);

        Ok(AnswerFeedback {
            question_index: index,
            selected,
            correct_answer,
            is_correct: selected == correct_answer,
            newly_recorded,
        })
    }

    pub fn next(&mut self) -> Result<usize, SessionError> {
        let total = self.active_quiz()?.len();
        if self.current_index + 1 >= total {
            return Err(SessionError::AtLastQuestion);
        }
        self.current_index += 1;
        Ok(self.current_index)
    }

    pub fn previous(&mut self) -> Result<usize, SessionError> {
        self.active_quiz()?;
        if self.current_index == 0 {
            return Err(SessionError::AtFirstQuestion);
        }
        self.current_index -= 1;
        Ok(self.current_index)
    }

    /// 结束测验，返回得分
    pub fn finish(&mut self) -> Result<usize, SessionError> {
        let total = self.active_quiz()?.len();
        if self.current_index + 1 != total {
            return Err(SessionError::NotOnLastQuestion {
                current: self.current_index,
                total,
            });
        }
        self.completed = true;
        Ok(self.score())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// 当前得分：答案与标准答案一致的题数，未作答不计分
    pub fn score(&self) -> usize {
        let Some(quiz) = &self.quiz else {
            return 0;
        };
        quiz.iter()
            .enumerate()
            .filter(|(i, q)| self.answers.get(i) == Some(&q.answer))
            .count()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let phase = self.phase();
        let total = self.quiz.as_ref().map_or(0, Quiz::len);
        let in_progress = phase == SessionPhase::InProgress;
        let current_question = self.current_question().cloned();

        let feedback = current_question.as_ref().and_then(|q| {
            self.answer_for(self.current_index).map(|selected| AnswerFeedback {
                question_index: self.current_index,
                selected,
                correct_answer: q.answer,
                is_correct: selected == q.answer,
                newly_recorded: false,
            })
        });

        SessionSnapshot {
            phase,
            current_index: self.current_index,
            total,
            current_question,
            feedback,
            answered: self.answers.len(),
            can_previous: in_progress && self.current_index > 0,
            can_next: in_progress && self.current_index + 1 < total,
            can_finish: in_progress && total > 0 && self.current_index + 1 == total,
            score: (phase == SessionPhase::Completed).then(|| self.score()),
        }
    }

    fn active_quiz(&self) -> Result<&Quiz, SessionError> {
        match (&self.quiz, self.completed) {
            (None, _) => Err(SessionError::NoQuiz),
            (Some(_), true) => Err(SessionError::Completed),
            (Some(quiz), false) => Ok(quiz),
        }
    }

    fn active_question(&self) -> Result<&QuizQuestion, SessionError> {
        self.active_quiz()?
            .get(self.current_index)
            .ok_or(SessionError::NoQuiz)
    }
}
