use std::fmt;

use serde::Serialize;

/// 朗读速度倍率，限制在 [0.5, 2.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct SpeechRate(f32);

impl SpeechRate {
    pub const MIN: f32 = 0.5;
    pub const MAX: f32 = 2.0;
    /// espeak 默认语速（每分钟词数）
    const BASE_WPM: f32 = 175.0;

    /// 超出范围的值会被截断，NaN 视为默认值
    pub fn new(rate: f32) -> Self {
        if rate.is_nan() {
            return Self::default();
        }
        Self(rate.clamp(Self::MIN, Self::MAX))
    }

    pub fn value(self) -> f32 {
        self.0
    }

    pub fn words_per_minute(self) -> u32 {
        (Self::BASE_WPM * self.0).round() as u32
    }
}

impl Default for SpeechRate {
    fn default() -> Self {
        Self(1.0)
    }
}

impl fmt::Display for SpeechRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}x", self.0)
    }
}
