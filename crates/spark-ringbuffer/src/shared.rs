//! 加锁形态的环形缓冲。
//!
//! # 模块定位（Why）
//! - [`RingBuffer`] 依赖 `&mut self` 独占借用实现互斥，适合单一所有者；
//! - 生产者与消费者位于不同线程时，以 [`SharedRingBuffer`] 包装，所有公开操作自动取锁。
//!
//! # 锁语义（What）
//! - 只读查询（`len`、`capacity`、`peek*`、`to_vec`）取共享锁；
//! - 写入、读取、丢弃、重置取独占锁，扩容发生在独占锁内；
//! - 探索事务不在 `&SharedRingBuffer` 上提供：调用方通过 [`SharedRingBuffer::lock`]
//!   取得独占守卫后在守卫上完成整个事务，事务期间的串行化由守卫保证。
//! - 视图仅在闭包内可见，闭包返回即释放共享锁，视图无法越过后续的扩容。

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::{error::Result, peek::PeekView, ring_buffer::RingBuffer};

#[derive(Debug, Default)]
pub struct SharedRingBuffer {
    inner: RwLock<RingBuffer>,
}

impl SharedRingBuffer {
    pub fn new(capacity: usize) -> Self {
        Self::from_buffer(RingBuffer::new(capacity))
    }

    pub fn from_buffer(buffer: RingBuffer) -> Self {
        Self {
            inner: RwLock::new(buffer),
        }
    }

    pub fn into_inner(self) -> RingBuffer {
        self.inner.into_inner()
    }

    pub fn capacity(&self) -> usize {
        self.inner.read().capacity()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn free(&self) -> usize {
        self.inner.read().free()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.inner.read().is_full()
    }

    /// 在共享锁内以至多 `count` 字节的视图调用 `f`。
    pub fn with_peek<R>(&self, count: usize, f: impl FnOnce(PeekView<'_>) -> R) -> R {
        let guard = self.inner.read();
        f(guard.peek(count))
    }

    /// 在共享锁内以全部可读字节的视图调用 `f`。
    pub fn with_peek_all<R>(&self, f: impl FnOnce(PeekView<'_>) -> R) -> R {
        let guard = self.inner.read();
        f(guard.peek_all())
    }

    pub fn peek_u8(&self) -> u8 {
        self.inner.read().peek_u8()
    }

    pub fn peek_u16(&self) -> u16 {
        self.inner.read().peek_u16()
    }

    pub fn peek_u32(&self) -> u32 {
        self.inner.read().peek_u32()
    }

    pub fn peek_u64(&self) -> u64 {
        self.inner.read().peek_u64()
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.inner.read().to_vec()
    }

    pub fn write(&self, src: &[u8]) -> usize {
        self.inner.write().write(src)
    }

    pub fn write_str(&self, text: &str) -> usize {
        self.inner.write().write_str(text)
    }

    pub fn write_one_byte(&self, byte: u8) {
        self.inner.write().write_one_byte(byte);
    }

    pub fn read(&self, dst: &mut [u8]) -> Result<usize> {
        if dst.is_empty() {
            return Ok(0);
        }
        self.inner.write().read(dst)
    }

    pub fn read_one_byte(&self) -> Result<u8> {
        self.inner.write().read_one_byte()
    }

    pub fn retrieve(&self, count: usize) {
        self.inner.write().retrieve(count);
    }

    pub fn retrieve_all(&self) {
        self.inner.write().retrieve_all();
    }

    pub fn reset(&self) {
        self.inner.write().reset();
    }

    /// 取得共享读守卫，可在其上连续执行多次只读查询。
    pub fn read_guard(&self) -> RwLockReadGuard<'_, RingBuffer> {
        self.inner.read()
    }

    /// 取得独占守卫；探索事务与需要原子组合的多步操作在守卫上执行。
    pub fn lock(&self) -> RwLockWriteGuard<'_, RingBuffer> {
        self.inner.write()
    }
}

impl From<RingBuffer> for SharedRingBuffer {
    fn from(buffer: RingBuffer) -> Self {
        Self::from_buffer(buffer)
    }
}
