pub mod speech_backend;

pub use speech_backend::{CommandSpeechBackend, SpeechBackend};
