//! 从网关原始输出加载测验
//!
//! 网关输出不可信，必须完整校验后才能交给会话使用。

use regex::Regex;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::MalformedQuizError;
use crate::models::quiz::{AnswerLetter, Quiz, QuizQuestion};

/// 去掉首尾的 ``` 代码块标记（可带语言标签，如 ```json）
///
/// 开头和结尾的标记分别处理，只有一侧有标记时也能去掉。
pub fn strip_code_fence(raw: &str) -> &str {
    let mut cleaned = raw.trim();
    if let Ok(re) = Regex::new(r"^```[A-Za-z]*") {
        if let Some(m) = re.find(cleaned) {
            cleaned = cleaned[m.end()..].trim_start();
        }
    }
    if let Some(inner) = cleaned.strip_suffix("```") {
        cleaned = inner.trim_end();
    }
    cleaned
}

/// 解析并校验测验 JSON
///
/// 要么整份测验通过，要么返回错误，不会产生部分结果。空数组是合法的形状，
/// 由会话层决定是否拒绝。
pub fn parse_quiz(raw: &str) -> Result<Quiz, MalformedQuizError> {
    let cleaned = strip_code_fence(raw);
    debug!("解析测验 JSON，长度: {} 字符", cleaned.len());

    let value: Value = serde_json::from_str(cleaned).map_err(|e| {
        warn!("测验 JSON 解析失败: {}", e);
        MalformedQuizError::InvalidJson(e)
    })?;

    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(MalformedQuizError::NotAnArray {
                found: json_kind(&other),
            })
        }
    };

    let questions = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            validate_question(item)
                .map_err(|reason| MalformedQuizError::InvalidQuestion { index, reason })
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!("测验校验通过，共 {} 题", questions.len());
    Ok(Quiz::new(questions))
}

fn validate_question(item: &Value) -> Result<QuizQuestion, String> {
    let obj = item
        .as_object()
        .ok_or_else(|| format!("应为对象，实际为 {}", json_kind(item)))?;

    let question = string_field(obj, "question")?;

    let raw_options = obj
        .get("options")
        .ok_or_else(|| "缺少字段 options".to_string())?
        .as_array()
        .ok_or_else(|| "字段 options 必须是数组".to_string())?;

    let options = raw_options
        .iter()
        .enumerate()
        .map(|(i, opt)| {
            opt.as_str()
                .map(str::to_string)
                .ok_or_else(|| format!("第 {} 个选项不是字符串", i + 1))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let options: [String; 4] = options
        .try_into()
        .map_err(|v: Vec<String>| format!("options 必须正好 4 个，实际为 {} 个", v.len()))?;

    let answer = string_field(obj, "answer")?
        .parse::<AnswerLetter>()
        .map_err(|e| e.to_string())?;

    Ok(QuizQuestion::new(question, options, answer))
}

fn string_field(obj: &Map<String, Value>, key: &str) -> Result<String, String> {
    match obj.get(key) {
        None => Err(format!("缺少字段 {}", key)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(format!("字段 {} 必须是字符串，实际为 {}", key, json_kind(other))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
