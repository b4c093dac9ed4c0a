//! 环形缓冲与缓冲池的配置项。
//!
//! 两个结构均可由 `serde` 从任意格式反序列化，缺省字段回落到 [`DEFAULT_CAPACITY`] 等默认值，
//! 便于嵌入宿主服务的配置文件（例如 TOML 中的 `[ring_buffer]`、`[ring_buffer_pool]` 段）。

use serde::{Deserialize, Serialize};

use crate::{pool::RingBufferPool, ring_buffer::RingBuffer, shared::SharedRingBuffer};

/// 新建缓冲的默认初始容量（字节）。
pub const DEFAULT_CAPACITY: usize = 1024;

/// 缓冲池默认保留的空闲缓冲上限。
pub const DEFAULT_MAX_IDLE: usize = 64;

/// 单个缓冲的构造参数。
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingBufferConfig {
    /// 初始逻辑容量；写入超出后按需扩容。
    pub initial_capacity: usize,
}

impl Default for RingBufferConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
        }
    }
}

impl RingBufferConfig {
    /// 构造不加锁的缓冲。
    pub fn build(&self) -> RingBuffer {
        RingBuffer::new(self.initial_capacity)
    }

    /// 构造加锁的缓冲。
    pub fn build_shared(&self) -> SharedRingBuffer {
        SharedRingBuffer::new(self.initial_capacity)
    }
}

/// 缓冲池的构造参数。
///
/// - `initial_capacity`：池中无空闲缓冲时新建缓冲的容量；
/// - `max_idle`：归还时空闲列表的上限，超出部分直接释放。
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    pub initial_capacity: usize,
    pub max_idle: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
            max_idle: DEFAULT_MAX_IDLE,
        }
    }
}

impl PoolConfig {
    pub fn build(self) -> RingBufferPool {
        RingBufferPool::with_config(self)
    }
}
