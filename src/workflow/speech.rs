//! 朗读控制 - 流程层
//!
//! 朗读是互斥资源：正在播放时拒绝新的朗读，空闲时停止是空操作。

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::task::{AbortHandle, JoinHandle};
use tracing::{info, warn};

use crate::error::SpeechError;
use crate::infrastructure::SpeechBackend;
use crate::models::speech::SpeechRate;

#[derive(Default)]
struct Playback {
    /// 每次朗读递增，用于区分已被停止的旧任务
    id: u64,
    speaking: bool,
    abort: Option<AbortHandle>,
    task: Option<JoinHandle<Result<(), SpeechError>>>,
}

pub struct SpeechController {
    backend: Arc<dyn SpeechBackend>,
    state: Arc<Mutex<Playback>>,
}

fn lock(state: &Mutex<Playback>) -> MutexGuard<'_, Playback> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl SpeechController {
    pub fn new(backend: Arc<dyn SpeechBackend>) -> Self {
        Self {
            backend,
            state: Arc::new(Mutex::new(Playback::default())),
        }
    }

    pub fn is_speaking(&self) -> bool {
        lock(&self.state).speaking
    }

    /// 开始朗读，立即返回；需要在 tokio 运行时中调用
    pub fn speak(&self, text: &str, rate: SpeechRate) -> Result<(), SpeechError> {
        if text.trim().is_empty() {
            return Err(SpeechError::EmptyText);
        }

        let mut state = lock(&self.state);
        if state.speaking {
            return Err(SpeechError::AlreadySpeaking);
        }
        state.id += 1;
        state.speaking = true;
        let id = state.id;

        let backend = Arc::clone(&self.backend);
        let shared = Arc::clone(&self.state);
        let text = text.to_string();

        let task = tokio::spawn(async move {
            let result = backend.speak(&text, rate).await;
            let mut state = lock(&shared);
            if state.id == id {
                state.speaking = false;
                state.abort = None;
            }
            if let Err(e) = &result {
                warn!("⚠️ 朗读失败: {}", e);
            }
            result
        });

        info!("🔊 开始朗读 (语速 {})", rate);
        state.abort = Some(task.abort_handle());
        state.task = Some(task);
        Ok(())
    }

    /// 停止朗读，返回是否真的停止了正在进行的播放
    pub fn stop(&self) -> bool {
        let mut state = lock(&self.state);
        let was_speaking = std::mem::replace(&mut state.speaking, false);
        if let Some(abort) = state.abort.take() {
            abort.abort();
        }
        if was_speaking {
            info!("⏹️ 已停止朗读");
        }
        was_speaking
    }

    /// 等待当前朗读结束；被 `stop` 中断视为正常结束
    pub async fn wait(&self) -> Result<(), SpeechError> {
        let task = lock(&self.state).task.take();
        let Some(task) = task else {
            return Ok(());
        };

        match task.await {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => Ok(()),
            Err(e) => {
                warn!("朗读任务异常结束: {}", e);
                Ok(())
            }
        }
    }
}
