use alloc::sync::Arc;
use core::sync::atomic::{AtomicU64, Ordering};

use spin::Mutex;
use tracing::{debug, trace};

use crate::{config::PoolConfig, ring_buffer::RingBuffer};

/// `RingBufferPool` 以空闲列表复用 [`RingBuffer`]，减少高频连接建立时的堆分配。
///
/// # 模块角色（Why）
/// - 连接级的读写暂存缓冲生命周期短、数量多，复用已扩容的存储可避免反复增长；
/// - 池是显式构造、按引用传递的实例；[`Default`] 只是按默认配置调用同一构造器的便捷入口，
///   不存在进程级全局池。
///
/// # 核心机制（How）
/// - `spin::Mutex<Vec<RingBuffer>>` 作为空闲列表，`get` 优先弹出，未命中时按配置新建；
/// - `PoolMetrics` 以原子计数记录新建、复用、归还、丢弃次数，[`RingBufferPool::statistics`] 生成快照。
///
/// # 契约说明（What）
/// - `put` **不会**重置缓冲：期望复用时得到干净状态的调用方必须先调用 [`RingBuffer::reset`]；
/// - 空闲列表长度不超过 `PoolConfig::max_idle`，超出时归还的缓冲被直接释放；
/// - 克隆得到的句柄共享同一空闲列表与统计。
#[derive(Clone)]
pub struct RingBufferPool {
    inner: Arc<PoolInner>,
}

impl Default for RingBufferPool {
    fn default() -> Self {
        Self::with_config(PoolConfig::default())
    }
}

impl RingBufferPool {
    /// 以给定的新建容量和默认空闲上限创建池。
    pub fn new(initial_capacity: usize) -> Self {
        Self::with_config(PoolConfig {
            initial_capacity,
            ..PoolConfig::default()
        })
    }

    pub fn with_config(config: PoolConfig) -> Self {
        Self {
            inner: Arc::new(PoolInner {
                config,
                idle: Mutex::new(Vec::new()),
                metrics: PoolMetrics::default(),
            }),
        }
    }

    pub fn config(&self) -> &PoolConfig {
        &self.inner.config
    }

    /// 取出任一空闲缓冲；空闲列表为空时新建容量为 `initial_capacity` 的空缓冲。
    ///
    /// 复用的缓冲保持其归还时的状态与容量。
    pub fn get(&self) -> RingBuffer {
        let reused = self.inner.idle.lock().pop();
        match reused {
            Some(buffer) => {
                self.inner.metrics.reused.fetch_add(1, Ordering::Relaxed);
                trace!(capacity = buffer.capacity(), "ring buffer pool hit");
                buffer
            }
            None => {
                self.inner.metrics.created.fetch_add(1, Ordering::Relaxed);
                let capacity = self.inner.config.initial_capacity;
                trace!(capacity, "ring buffer pool miss");
                RingBuffer::new(capacity)
            }
        }
    }

    /// 归还缓冲；不做隐式重置。
    pub fn put(&self, buffer: RingBuffer) {
        self.inner.metrics.returned.fetch_add(1, Ordering::Relaxed);
        let mut idle = self.inner.idle.lock();
        if idle.len() >= self.inner.config.max_idle {
            drop(idle);
            self.inner.metrics.discarded.fetch_add(1, Ordering::Relaxed);
            debug!(
                capacity = buffer.capacity(),
                max_idle = self.inner.config.max_idle,
                "ring buffer pool at idle limit, dropping returned buffer"
            );
            return;
        }
        trace!(capacity = buffer.capacity(), "ring buffer returned to pool");
        idle.push(buffer);
    }

    /// 释放全部空闲缓冲，返回释放的逻辑容量总和。
    pub fn shrink_to_fit(&self) -> usize {
        let drained: Vec<_> = self.inner.idle.lock().drain(..).collect();
        drained.iter().map(RingBuffer::capacity).sum()
    }

    pub fn statistics(&self) -> PoolStats {
        let idle = self.inner.idle.lock().len();
        let metrics = &self.inner.metrics;
        PoolStats {
            created: metrics.created.load(Ordering::Relaxed),
            reused: metrics.reused.load(Ordering::Relaxed),
            returned: metrics.returned.load(Ordering::Relaxed),
            discarded: metrics.discarded.load(Ordering::Relaxed),
            idle,
        }
    }
}

/// 池统计快照，各计数自池创建起累计。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolStats {
    pub created: u64,
    pub reused: u64,
    pub returned: u64,
    pub discarded: u64,
    pub idle: usize,
}

struct PoolInner {
    config: PoolConfig,
    idle: Mutex<Vec<RingBuffer>>,
    metrics: PoolMetrics,
}

#[derive(Default)]
struct PoolMetrics {
    created: AtomicU64,
    reused: AtomicU64,
    returned: AtomicU64,
    discarded: AtomicU64,
}
