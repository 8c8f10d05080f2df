//! 语音合成后端 - 基础设施层
//!
//! 持有系统语音合成进程，只暴露"朗读一段文本"的能力

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::error::SpeechError;
use crate::models::speech::SpeechRate;

/// 语音合成后端
///
/// `speak` 在朗读结束后返回。future 被丢弃即视为取消，实现必须随之停止发声。
#[async_trait]
pub trait SpeechBackend: Send + Sync {
    async fn speak(&self, text: &str, rate: SpeechRate) -> Result<(), SpeechError>;
}

/// 调用外部程序朗读（参数兼容 espeak / espeak-ng）
pub struct CommandSpeechBackend {
    program: String,
}

impl CommandSpeechBackend {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

#[async_trait]
impl SpeechBackend for CommandSpeechBackend {
    async fn speak(&self, text: &str, rate: SpeechRate) -> Result<(), SpeechError> {
        debug!(
            "启动语音合成: {} (语速 {}, {} 字符)",
            self.program,
            rate,
            text.chars().count()
        );

        let status = Command::new(&self.program)
            .arg("-s")
            .arg(rate.words_per_minute().to_string())
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .status()
            .await
            .map_err(|source| SpeechError::SpawnFailed {
                program: self.program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(SpeechError::ProgramFailed {
                program: self.program.clone(),
                status: status.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let backend = CommandSpeechBackend::new("noto-definitely-not-installed");
        assert_eq!(backend.program(), "noto-definitely-not-installed");

        let err = backend.speak("hello", SpeechRate::default()).await.unwrap_err();

        match err {
            SpeechError::SpawnFailed { program, .. } => assert_eq!(program, backend.program()),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_exit_status_is_checked() {
        assert!(CommandSpeechBackend::new("true")
            .speak("hello", SpeechRate::default())
            .await
            .is_ok());

        let err = CommandSpeechBackend::new("false")
            .speak("hello", SpeechRate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, SpeechError::ProgramFailed { .. }));
    }
}
