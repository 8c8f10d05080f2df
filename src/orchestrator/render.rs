//! 把状态快照渲染成终端文本
//!
//! 纯函数，不做任何 IO。

use crate::models::chat::ChatExchange;
use crate::models::quiz::AnswerLetter;
use crate::models::summary::Summary;
use crate::workflow::quiz_session::{AnswerFeedback, SessionPhase, SessionSnapshot};

pub fn render_snapshot(snapshot: &SessionSnapshot) -> String {
    let Some(question) = &snapshot.current_question else {
        return "No quiz loaded. Type `g` to generate one.".to_string();
    };

    let mut out = format!(
        "Question {} of {}\n{}\n",
        snapshot.current_index + 1,
        snapshot.total,
        question.question
    );
    for letter in AnswerLetter::ALL {
        let marker = match &snapshot.feedback {
            Some(fb) if fb.selected == letter && fb.is_correct => " ✅",
            Some(fb) if fb.selected == letter => " ❌",
            _ => "",
        };
        out.push_str(&format!("  {}. {}{}\n", letter, question.option(letter), marker));
    }

    if let Some(fb) = &snapshot.feedback {
        out.push_str(&render_feedback(fb));
        out.push('\n');
    }

    if snapshot.phase == SessionPhase::Completed {
        if let Some(score) = snapshot.score {
            out.push_str(&render_result(score, snapshot.total));
            out.push('\n');
        }
        return out;
    }

    let mut actions = Vec::new();
    if snapshot.feedback.is_none() {
        actions.push("a-d answer");
    }
    if snapshot.can_previous {
        actions.push("p previous");
    }
    if snapshot.can_next {
        actions.push("n next");
    }
    if snapshot.can_finish {
        actions.push("f finish");
    }
    actions.push("r reset");
    actions.push("q quit");
    out.push_str(&format!("[{}]", actions.join(" | ")));
    out
}

pub fn render_feedback(feedback: &AnswerFeedback) -> String {
    if feedback.is_correct {
        "✅ Correct!".to_string()
    } else {
        format!(
            "❌ Incorrect. Correct answer is {}.",
            feedback.correct_answer
        )
    }
}

pub fn render_result(score: usize, total: usize) -> String {
    format!("🎉 Quiz Completed! You got {} out of {} correct.", score, total)
}

pub fn render_summary(summary: &Summary) -> String {
    if summary.bullets.is_empty() {
        return summary.raw.clone();
    }
    summary
        .bullets
        .iter()
        .map(|point| format!("• {}", point))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_exchange(exchange: &ChatExchange) -> String {
    format!(
        "[{}] Assistant: {}",
        exchange.asked_at.format("%H:%M"),
        exchange.bot
    )
}
