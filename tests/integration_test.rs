use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use noto::error::{AppError, GatewayError, SessionError};
use noto::orchestrator::{run_chat_loop, run_quiz_loop};
use noto::services::{ChatService, QuizService, SummaryService, TextGateway};
use noto::workflow::{ChatScreen, QuizScreen, SessionPhase, SummaryScreen};
use noto::AnswerLetter;

/// 按顺序返回预设回复的网关
struct FakeGateway {
    replies: Mutex<VecDeque<Result<String, GatewayError>>>,
    prompts: Mutex<Vec<String>>,
}

impl FakeGateway {
    fn new(replies: Vec<&str>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().map(|r| Ok(r.to_string())).collect()),
            prompts: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl TextGateway for FakeGateway {
    async fn generate(&self, prompt: &str) -> Result<String, GatewayError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(GatewayError::EmptyResponse {
                model: "fake".to_string(),
            }))
    }
}

const THREE_QUESTIONS: &str = r#"```json
[
  {"question": "Which gas do plants absorb?", "options": ["Carbon dioxide", "Oxygen", "Helium", "Neon"], "answer": "A"},
  {"question": "Where does photosynthesis happen?", "options": ["Nucleus", "Ribosome", "Chloroplast", "Vacuole"], "answer": "C"},
  {"question": "What is produced?", "options": ["Salt", "Iron", "Protein", "Glucose"], "answer": "D"}
]
```"#;

fn quiz_screen(gateway: Arc<FakeGateway>) -> QuizScreen {
    QuizScreen::new(QuizService::new(gateway, 5))
}

async fn drive_quiz(screen: &QuizScreen, script: &str) -> String {
    let mut out = Vec::new();
    run_quiz_loop(screen, "Photosynthesis notes", script.as_bytes(), &mut out)
        .await
        .unwrap();
    String::from_utf8(out).unwrap()
}

#[tokio::test]
async fn test_answer_all_correctly_and_finish() {
    let screen = quiz_screen(FakeGateway::new(vec![THREE_QUESTIONS]));

    let output = drive_quiz(&screen, "a\nn\nc\nn\nd\nf\nq\n").await;

    assert!(output.contains("Question 1 of 3"));
    assert!(output.contains("Question 3 of 3"));
    assert!(output.contains("You got 3 out of 3 correct."));
    let snap = screen.snapshot();
    assert_eq!(snap.phase, SessionPhase::Completed);
    assert_eq!(snap.score, Some(3));
}

#[tokio::test]
async fn test_first_answer_locks_question() {
    let screen = quiz_screen(FakeGateway::new(vec![THREE_QUESTIONS]));

    let output = drive_quiz(&screen, "b\na\nq\n").await;

    assert!(output.contains("❌ Incorrect. Correct answer is A."));
    assert!(output.contains("Already answered B."));
    assert_eq!(screen.snapshot().feedback.unwrap().selected, AnswerLetter::B);
}

#[tokio::test]
async fn test_finish_rejected_before_last_question() {
    let screen = quiz_screen(FakeGateway::new(vec![THREE_QUESTIONS]));

    let output = drive_quiz(&screen, "f\nq\n").await;

    assert!(output.contains("只有在最后一题才能结束测验"));
    assert_eq!(screen.snapshot().phase, SessionPhase::InProgress);
}

#[tokio::test]
async fn test_reset_mid_session_clears_state() {
    let screen = quiz_screen(FakeGateway::new(vec![THREE_QUESTIONS]));

    let output = drive_quiz(&screen, "a\nn\nr\nn\nq\n").await;

    assert!(output.contains("Quiz cleared."));
    let snap = screen.snapshot();
    assert_eq!(snap.phase, SessionPhase::Empty);
    assert_eq!(snap.current_index, 0);
    assert_eq!(snap.answered, 0);
    // 重置后翻页被拒绝
    assert!(output.contains("尚未加载测验"));
}

#[tokio::test]
async fn test_regenerate_replaces_quiz_and_discards_answers() {
    let one_question = r#"[{"question": "Q", "options": ["a","b","c","d"], "answer": "B"}]"#;
    let screen = quiz_screen(FakeGateway::new(vec![THREE_QUESTIONS, one_question]));

    drive_quiz(&screen, "a\nn\ng\nq\n").await;

    let snap = screen.snapshot();
    assert_eq!(snap.total, 1);
    assert_eq!(snap.answered, 0);
    assert_eq!(snap.current_index, 0);
}

#[tokio::test]
async fn test_malformed_reply_reports_error_and_stays_empty() {
    let screen = quiz_screen(FakeGateway::new(vec![
        r#"[{"question": "Q", "options": ["a","b"], "answer": "A"}]"#,
    ]));

    let output = drive_quiz(&screen, "q\n").await;

    assert!(output.contains("Failed to generate quiz"));
    assert_eq!(screen.snapshot().phase, SessionPhase::Empty);
}

#[tokio::test]
async fn test_empty_quiz_is_surfaced() {
    let screen = quiz_screen(FakeGateway::new(vec!["[]"]));

    let err = screen.generate("notes").await.unwrap_err();

    assert!(matches!(err, AppError::Session(SessionError::EmptyQuiz)));
    assert_eq!(screen.snapshot().phase, SessionPhase::Empty);
}

#[tokio::test]
async fn test_summary_bullets_end_to_end() {
    let gateway = FakeGateway::new(vec!["* First point * Second point *"]);
    let screen = SummaryScreen::new(SummaryService::new(gateway.clone()), 120);

    let summary = screen.summarize("Long lecture notes").await.unwrap();

    assert_eq!(summary.bullets, vec!["First point", "Second point"]);
    assert!(gateway.prompts.lock().unwrap()[0].contains("within 120 words"));
}

#[tokio::test]
async fn test_chat_loop_keeps_history() {
    let gateway = FakeGateway::new(vec!["Mitosis is cell division.", "Meiosis makes gametes."]);
    let screen = ChatScreen::new(ChatService::new(gateway.clone()));
    let mut out = Vec::new();

    run_chat_loop(
        &screen,
        "What is mitosis?\n\n   \nAnd meiosis?\n/quit\n".as_bytes(),
        &mut out,
    )
    .await
    .unwrap();

    let output = String::from_utf8(out).unwrap();
    assert!(output.contains("Assistant: Mitosis is cell division."));
    assert!(output.contains("Assistant: Meiosis makes gametes."));
    assert_eq!(screen.history().len(), 2);

    let prompts = gateway.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 2);
    assert!(prompts[1].starts_with("User: What is mitosis?\nAssistant: Mitosis is cell division.\n"));
}
