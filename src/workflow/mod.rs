pub mod busy;
pub mod quiz_session;
pub mod screens;
pub mod speech;

pub use busy::{BusyFlag, BusyGuard};
pub use quiz_session::{AnswerFeedback, QuizSession, SessionPhase, SessionSnapshot};
pub use screens::{ChatScreen, QuizScreen, SummaryScreen};
pub use speech::SpeechController;
