//! 程序配置
//!
//! 优先级：默认值 < TOML 配置文件 < 环境变量 < 命令行参数

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// 程序配置文件
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    pub llm_temperature: f32,
    pub llm_max_tokens: u32,
    // --- 功能配置 ---
    /// 每次生成的测验题数
    pub quiz_question_count: usize,
    /// 摘要字数限制
    pub summary_word_limit: u32,
    /// 语音合成程序（兼容 espeak 参数）
    pub speech_program: String,
    /// 朗读速度倍率
    pub speech_rate: f32,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm_api_key: String::new(),
            llm_api_base_url: "https://generativelanguage.googleapis.com/v1beta/openai".to_string(),
            llm_model_name: "gemini-2.0-flash".to_string(),
            llm_temperature: 0.3,
            llm_max_tokens: 2048,
            quiz_question_count: 5,
            summary_word_limit: 100,
            speech_program: "espeak".to_string(),
            speech_rate: 1.0,
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 加载配置：可选的 TOML 文件，再叠加环境变量
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let base = match path {
            Some(path) => Self::from_toml_file(path)?,
            None => Self::default(),
        };
        base.apply_env()
    }

    /// 只使用默认值和环境变量
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().apply_env()
    }

    /// 从 TOML 文件读取，缺失的字段使用默认值
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// 用环境变量覆盖当前配置
    pub fn apply_env(self) -> Result<Self, ConfigError> {
        self.apply_vars(|name| std::env::var(name).ok())
    }

    fn apply_vars(self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            llm_api_key: lookup("NOTO_API_KEY").unwrap_or(self.llm_api_key),
            llm_api_base_url: lookup("NOTO_API_BASE_URL").unwrap_or(self.llm_api_base_url),
            llm_model_name: lookup("NOTO_MODEL").unwrap_or(self.llm_model_name),
            llm_temperature: parse_var(&lookup, "NOTO_TEMPERATURE", self.llm_temperature)?,
            llm_max_tokens: parse_var(&lookup, "NOTO_MAX_TOKENS", self.llm_max_tokens)?,
            quiz_question_count: parse_var(&lookup, "NOTO_QUIZ_QUESTIONS", self.quiz_question_count)?,
            summary_word_limit: parse_var(&lookup, "NOTO_WORD_LIMIT", self.summary_word_limit)?,
            speech_program: lookup("NOTO_SPEECH_PROGRAM").unwrap_or(self.speech_program),
            speech_rate: parse_var(&lookup, "NOTO_SPEECH_RATE", self.speech_rate)?,
            verbose_logging: parse_var(&lookup, "NOTO_VERBOSE", self.verbose_logging)?,
        })
    }

    /// 取出 API 密钥，未配置时报错
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        let key = self.llm_api_key.trim();
        if key.is_empty() {
            return Err(ConfigError::Missing {
                key: "llm_api_key".to_string(),
                var_name: "NOTO_API_KEY".to_string(),
            });
        }
        Ok(key)
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var_name: &str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(var_name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: std::any::type_name::<T>().to_string(),
            }),
    }
}
