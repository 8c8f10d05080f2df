use serde::Serialize;

/// 摘要结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// 网关返回的原始文本（已 trim）
    pub raw: String,
    /// 按 `*` 切分后的要点
    pub bullets: Vec<String>,
}

impl Summary {
    pub fn from_raw(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let bullets = split_bullets(&raw);
        Self { raw, bullets }
    }
}

/// 按字面量 `*` 切分要点：每段 trim，丢弃空段，保持原有顺序
pub fn split_bullets(summary: &str) -> Vec<String> {
    summary
        .split('*')
        .map(str::trim)
        .filter(|point| !point.is_empty())
        .map(str::to_string)
        .collect()
}
