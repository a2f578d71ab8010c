use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// 호스트가 언제든 올릴 수 있는 취소 신호.
/// 검색 루프에서 결과를 넘기기 전에만 확인한다.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
