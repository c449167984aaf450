use crossbeam_queue::ArrayQueue;
use log::debug;

use super::params::Params;

/// `Params` のプール
///
/// ロックフリーキュー。空なら新しく確保し、満杯なら返却分を捨てる。
pub struct ParamsPool {
    queue: ArrayQueue<Params>,
    max_param: usize,
}

impl ParamsPool {
    /// size: プールに保持する最大数 (0 なら 1)
    /// max_param: 各 Params の事前確保数
    pub fn new(size: usize, max_param: usize) -> ParamsPool {
        ParamsPool {
            queue: ArrayQueue::new(size.max(1)),
            max_param,
        }
    }

    #[inline]
    pub fn max_param(&self) -> usize {
        self.max_param
    }

    /// 保持している数
    #[inline]
    pub fn idle(&self) -> usize {
        self.queue.len()
    }

    #[inline]
    pub fn acquire(&self) -> Params {
        self.queue
            .pop()
            .unwrap_or_else(|| Params::with_capacity(self.max_param))
    }

    #[inline]
    pub fn release(&self, mut params: Params) {
        params.reset();
        if self.queue.push(params).is_err() {
            debug!("params pool is full, dropping");
        }
    }
}
