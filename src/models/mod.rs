pub mod chat;
pub mod loaders;
pub mod quiz;
pub mod speech;
pub mod summary;

pub use chat::{build_chat_prompt, ChatExchange};
pub use loaders::{parse_quiz, strip_code_fence};
pub use quiz::{AnswerLetter, Quiz, QuizQuestion};
pub use speech::SpeechRate;
pub use summary::{split_bullets, Summary};
