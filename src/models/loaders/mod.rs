pub mod quiz_loader;

pub use quiz_loader::{parse_quiz, strip_code_fence};
