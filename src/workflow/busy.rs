//! 每个屏幕的"请求处理中"标记
//!
//! 同一屏幕同一时间只允许一个请求在途。标记在守卫析构时释放，
//! 所以无论成功还是失败都会复位；请求一直挂起则标记一直保持。

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::BusyError;

#[derive(Debug, Clone)]
pub struct BusyFlag {
    action: &'static str,
    flag: Arc<AtomicBool>,
}

impl BusyFlag {
    pub fn new(action: &'static str) -> Self {
        Self {
            action,
            flag: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// 占用标记，已被占用时返回 `BusyError`
    pub fn acquire(&self) -> Result<BusyGuard, BusyError> {
        if self.flag.swap(true, Ordering::SeqCst) {
            return Err(BusyError {
                action: self.action,
            });
        }
        Ok(BusyGuard {
            flag: Arc::clone(&self.flag),
        })
    }
}

#[must_use = "标记在守卫析构时立即释放"]
#[derive(Debug)]
pub struct BusyGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}
