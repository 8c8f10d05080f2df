use thiserror::Error;

/// 应用程序错误类型
///
/// 所有错误都只作为用户可见的消息向上抛出，不会自动重试，也不会终止进程。
#[derive(Debug, Error)]
pub enum AppError {
    /// LLM 网关错误
    #[error("网关错误: {0}")]
    Gateway(#[from] GatewayError),
    /// 测验 JSON 不合法
    #[error("测验格式错误: {0}")]
    MalformedQuiz(#[from] MalformedQuizError),
    /// 摘要生成失败
    #[error("摘要错误: {0}")]
    Generation(#[from] GenerationError),
    /// 测验会话状态错误
    #[error("会话错误: {0}")]
    Session(#[from] SessionError),
    /// 语音播放错误
    #[error("语音错误: {0}")]
    Speech(#[from] SpeechError),
    /// 当前屏幕已有请求在处理中
    #[error(transparent)]
    Busy(#[from] BusyError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// LLM 网关错误
#[derive(Debug, Error)]
pub enum GatewayError {
    /// 网络请求失败
    #[error("请求失败 (模型: {model}): {message}")]
    RequestFailed { model: String, message: String },
    /// 远端返回错误响应
    #[error("远端返回错误 (模型: {model}): {message}")]
    Remote { model: String, message: String },
    /// 返回内容为空
    #[error("返回内容为空 (模型: {model})")]
    EmptyResponse { model: String },
}

/// 测验 JSON 校验失败
///
/// 只要有一道题不合法，整个测验都会被丢弃。
#[derive(Debug, Error)]
pub enum MalformedQuizError {
    /// JSON 解析失败
    #[error("JSON 解析失败: {0}")]
    InvalidJson(#[source] serde_json::Error),
    /// 顶层不是数组
    #[error("顶层结构不是数组 (实际: {found})")]
    NotAnArray { found: &'static str },
    /// 某道题字段不合法
    #[error("第 {index} 题不合法: {reason}")]
    InvalidQuestion { index: usize, reason: String },
}

/// 摘要生成错误
#[derive(Debug, Error)]
pub enum GenerationError {
    /// 输入文本为空
    #[error("输入文本为空")]
    EmptyInput,
    /// 字数限制必须为正数
    #[error("字数限制必须大于 0")]
    InvalidWordLimit,
    /// 网关调用失败，保留网关返回的消息
    #[error("{message}")]
    Gateway {
        message: String,
        #[source]
        source: GatewayError,
    },
}

impl From<GatewayError> for GenerationError {
    fn from(err: GatewayError) -> Self {
        GenerationError::Gateway {
            message: err.to_string(),
            source: err,
        }
    }
}

/// 测验会话状态错误
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// 网关返回了空数组
    #[error("测验没有任何题目")]
    EmptyQuiz,
    /// 尚未加载测验
    #[error("尚未加载测验")]
    NoQuiz,
    /// 测验已结束，只能重置或重新生成
    #[error("测验已结束")]
    Completed,
    /// 已经是第一题
    #[error("已经是第一题")]
    AtFirstQuestion,
    /// 已经是最后一题
    #[error("已经是最后一题")]
    AtLastQuestion,
    /// 只有在最后一题才能结束测验
    #[error("只有在最后一题才能结束测验 (当前: {current}, 共 {total} 题)")]
    NotOnLastQuestion { current: usize, total: usize },
}

/// 语音播放错误
#[derive(Debug, Error)]
pub enum SpeechError {
    /// 没有可朗读的文本
    #[error("没有可朗读的文本")]
    EmptyText,
    /// 已经在播放
    #[error("正在播放中")]
    AlreadySpeaking,
    /// 启动语音合成程序失败
    #[error("无法启动语音合成程序 {program}: {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },
    /// 语音合成程序异常退出
    #[error("语音合成程序 {program} 异常退出: {status}")]
    ProgramFailed { program: String, status: String },
}

/// 同一屏幕的请求仍在处理中
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{action} 正在处理中，请稍候")]
pub struct BusyError {
    pub action: &'static str,
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 缺少必填项
    #[error("缺少配置项 {key} (环境变量 {var_name})")]
    Missing { key: String, var_name: String },
    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
