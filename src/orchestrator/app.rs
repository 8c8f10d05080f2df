//! 应用主结构 - 编排层
//!
//! 负责根据命令组装服务和屏幕，并驱动终端交互循环

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, BufReader};
use tracing::{error, info, warn};

use crate::config::Config;
use crate::infrastructure::CommandSpeechBackend;
use crate::models::quiz::AnswerLetter;
use crate::models::speech::SpeechRate;
use crate::orchestrator::render::{
    render_exchange, render_feedback, render_result, render_snapshot, render_summary,
};
use crate::services::{ChatService, LlmService, QuizService, SummaryService, TextGateway};
use crate::utils::logging::{log_quiz_result, log_startup};
use crate::workflow::{ChatScreen, QuizScreen, SpeechController, SummaryScreen};

/// 测验交互命令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizCommand {
    Select(AnswerLetter),
    Next,
    Previous,
    Finish,
    Reset,
    Regenerate,
    Help,
    Quit,
}

impl QuizCommand {
    pub fn parse(line: &str) -> Option<Self> {
        let cmd = line.trim().to_ascii_lowercase();
        let cmd = match cmd.as_str() {
            "a" => QuizCommand::Select(AnswerLetter::A),
            "b" => QuizCommand::Select(AnswerLetter::B),
            "c" => QuizCommand::Select(AnswerLetter::C),
            "d" => QuizCommand::Select(AnswerLetter::D),
            "n" | "next" => QuizCommand::Next,
            "p" | "prev" | "previous" => QuizCommand::Previous,
            "f" | "finish" => QuizCommand::Finish,
            "r" | "reset" => QuizCommand::Reset,
            "g" | "generate" => QuizCommand::Regenerate,
            "h" | "help" | "?" => QuizCommand::Help,
            "q" | "quit" | "exit" => QuizCommand::Quit,
            _ => return None,
        };
        Some(cmd)
    }
}

const QUIZ_HELP: &str =
    "Commands: a/b/c/d answer, n next, p previous, f finish, r reset, g regenerate, q quit";

/// 应用主结构
pub struct App {
    config: Config,
}

impl App {
    pub fn initialize(config: Config) -> Self {
        Self { config }
    }

    fn gateway(&self) -> Result<Arc<dyn TextGateway>> {
        let service = LlmService::new(&self.config).context("无法创建 LLM 服务")?;
        Ok(Arc::new(service))
    }

    /// 生成摘要并输出要点
    pub async fn summarize(&self, text: &str, word_limit: Option<u32>) -> Result<()> {
        log_startup("summarize", &self.config);

        let mut screen = SummaryScreen::new(
            SummaryService::new(self.gateway()?),
            self.config.summary_word_limit,
        );
        if let Some(limit) = word_limit {
            screen.set_word_limit(limit);
        }
        info!("📝 正在生成摘要 (字数限制: {})...", screen.word_limit());

        let summary = screen.summarize(text).await?;

        let mut out = std::io::stdout().lock();
        writeln!(out, "📝 Summary")?;
        writeln!(out, "{}", render_summary(&summary))?;
        Ok(())
    }

    /// 生成测验并进入交互
    pub async fn quiz(&self, text: &str) -> Result<()> {
        log_startup("quiz", &self.config);

        let screen = QuizScreen::new(QuizService::new(
            self.gateway()?,
            self.config.quiz_question_count,
        ));
        let stdin = BufReader::new(tokio::io::stdin());
        let mut out = std::io::stdout();
        run_quiz_loop(&screen, text, stdin, &mut out).await
    }

    /// 多轮聊天
    pub async fn chat(&self) -> Result<()> {
        log_startup("chat", &self.config);

        let screen = ChatScreen::new(ChatService::new(self.gateway()?));
        let stdin = BufReader::new(tokio::io::stdin());
        let mut out = std::io::stdout();
        run_chat_loop(&screen, stdin, &mut out).await
    }

    /// 朗读文本，Ctrl-C 停止
    pub async fn speak(&self, text: &str, rate: Option<f32>) -> Result<()> {
        log_startup("speak", &self.config);

        let backend = CommandSpeechBackend::new(self.config.speech_program.clone());
        info!("🔊 语音程序: {}", backend.program());
        let controller = SpeechController::new(Arc::new(backend));
        let rate = SpeechRate::new(rate.unwrap_or(self.config.speech_rate));

        controller.speak(text, rate)?;

        tokio::select! {
            result = controller.wait() => result?,
            _ = tokio::signal::ctrl_c() => {
                controller.stop();
                controller.wait().await?;
            }
        }
        Ok(())
    }
}

/// 读取输入文本：优先 `--text`，其次 `--file`，最后从 stdin 读到 EOF
pub async fn read_source_text(
    file: Option<&Path>,
    text: Option<String>,
    allow_stdin: bool,
) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }
    if let Some(path) = file {
        return tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("无法读取文件: {}", path.display()));
    }
    if !allow_stdin {
        bail!("请通过 --file 或 --text 提供学习材料");
    }

    let mut buf = String::new();
    tokio::io::stdin()
        .read_to_string(&mut buf)
        .await
        .context("无法读取标准输入")?;
    Ok(buf)
}

/// 测验交互循环
pub async fn run_quiz_loop<R, W>(
    screen: &QuizScreen,
    source_text: &str,
    input: R,
    out: &mut W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    generate_into(screen, source_text, out).await?;

    let mut lines = input.lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let Some(command) = QuizCommand::parse(&line) else {
            writeln!(out, "Unknown command `{}`. {}", line.trim(), QUIZ_HELP)?;
            continue;
        };

        match command {
            QuizCommand::Select(letter) => match screen.select_option(letter) {
                Ok(feedback) if feedback.newly_recorded => {
                    writeln!(out, "{}", render_feedback(&feedback))?;
                }
                Ok(feedback) => {
                    writeln!(
                        out,
                        "Already answered {}. {}",
                        feedback.selected,
                        render_feedback(&feedback)
                    )?;
                }
                Err(e) => writeln!(out, "⚠️ {}", e)?,
            },
            QuizCommand::Next => match screen.next() {
                Ok(_) => writeln!(out, "{}", render_snapshot(&screen.snapshot()))?,
                Err(e) => writeln!(out, "⚠️ {}", e)?,
            },
            QuizCommand::Previous => match screen.previous() {
                Ok(_) => writeln!(out, "{}", render_snapshot(&screen.snapshot()))?,
                Err(e) => writeln!(out, "⚠️ {}", e)?,
            },
            QuizCommand::Finish => match screen.finish() {
                Ok(score) => {
                    let total = screen.snapshot().total;
                    log_quiz_result(score, total);
                    writeln!(out, "{}", render_result(score, total))?;
                    writeln!(out, "Type `g` for a new quiz, `r` to reset or `q` to quit.")?;
                }
                Err(e) => writeln!(out, "⚠️ {}", e)?,
            },
            QuizCommand::Reset => {
                screen.reset();
                writeln!(out, "Quiz cleared.")?;
            }
            QuizCommand::Regenerate => generate_into(screen, source_text, out).await?,
            QuizCommand::Help => writeln!(out, "{}", QUIZ_HELP)?,
            QuizCommand::Quit => break,
        }
    }

    Ok(())
}

async fn generate_into<W: Write>(screen: &QuizScreen, source_text: &str, out: &mut W) -> Result<()> {
    writeln!(out, "Generating...")?;
    match screen.generate(source_text).await {
        Ok(snapshot) => writeln!(out, "{}", render_snapshot(&snapshot))?,
        Err(e) => {
            error!("❌ 测验生成失败: {}", e);
            writeln!(out, "Failed to generate quiz: {}", e)?;
        }
    }
    Ok(())
}

/// 聊天交互循环，`/clear` 清空历史，`/quit` 退出
pub async fn run_chat_loop<R, W>(screen: &ChatScreen, input: R, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "💬 Ask your study questions here... (/clear, /quit)")?;
    let mut lines = input.lines();
    loop {
        write!(out, "You: ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        match line.trim() {
            "/quit" | "/exit" => break,
            "/clear" => {
                screen.clear();
                writeln!(out, "History cleared.")?;
                continue;
            }
            _ => {}
        }

        match screen.ask(&line).await {
            Ok(Some(exchange)) => writeln!(out, "{}", render_exchange(&exchange))?,
            Ok(None) => {}
            Err(e) => {
                warn!("⚠️ 聊天请求失败: {}", e);
                writeln!(out, "Failed to get a response: {}", e)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quiz_commands() {
        assert_eq!(
            QuizCommand::parse(" B "),
            Some(QuizCommand::Select(AnswerLetter::B))
        );
        assert_eq!(QuizCommand::parse("next"), Some(QuizCommand::Next));
        assert_eq!(QuizCommand::parse("P"), Some(QuizCommand::Previous));
        assert_eq!(QuizCommand::parse("f"), Some(QuizCommand::Finish));
        assert_eq!(QuizCommand::parse("q"), Some(QuizCommand::Quit));
        assert_eq!(QuizCommand::parse("e"), None);
    }

    #[tokio::test]
    async fn test_read_source_text_prefers_inline_text() {
        let text = read_source_text(None, Some("inline".to_string()), false)
            .await
            .unwrap();
        assert_eq!(text, "inline");

        assert!(read_source_text(None, None, false).await.is_err());
    }
}
