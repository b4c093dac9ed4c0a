//! 探索事务：独立于已提交读游标的试探性读取，可提交也可回滚。
//!
//! # 状态机（What）
//! ```text
//! Idle --explore_begin--> Exploring --explore_commit / explore_break--> Idle
//! ```
//! - `Exploring` 期间探索游标以“相对读游标的偏移”保存，始终落在读游标到写游标的弧上；
//! - 提交等价于对事务开始前的状态执行 `retrieve(已探索字节数)`；
//! - 回滚只关闭事务，已提交状态逐位不变；
//! - `retrieve`/`reset` 会强制关闭事务，已提交读取越过探索游标时探索游标随之前移。
//!
//! # 使用方式（How）
//! 协议解码器在 `explore_begin` 后逐段 `explore_read` 判断帧是否完整：
//! 完整则 `explore_commit` 消费整帧，不完整则 `explore_break` 等待更多数据，
//! 期间无需把未消费的尾部复制回缓冲。[`RingBuffer::explore`] 提供离开作用域自动回滚的守卫。

use crate::{
    error::{Result, RingBufferError},
    peek::PeekView,
    ring_buffer::RingBuffer,
};

impl RingBuffer {
    pub fn is_exploring(&self) -> bool {
        self.explored.is_some()
    }

    /// 开启探索事务，探索游标取当前读游标。
    ///
    /// # 错误
    /// 事务已开启时返回 [`RingBufferError::AlreadyExploring`]。
    pub fn explore_begin(&mut self) -> Result<()> {
        if self.is_exploring() {
            return Err(RingBufferError::AlreadyExploring);
        }
        self.explored = Some(0);
        Ok(())
    }

    /// 探索游标的物理位置；未开启事务时与读游标相同。
    pub fn explore_cursor(&self) -> usize {
        self.wrap(self.head + self.explored.unwrap_or(0))
    }

    /// 探索游标到写游标之间的字节数；任何状态下均可调用。
    pub fn explore_size(&self) -> usize {
        self.len - self.explored.unwrap_or(0)
    }

    /// 按 `read` 的规则从探索游标读取，不影响已提交读游标。
    ///
    /// # 错误
    /// - 未开启事务：[`RingBufferError::NotExploring`]；
    /// - `dst` 为空时返回 `Ok(0)`，先于空检查；
    /// - 可探索区间为空：[`RingBufferError::Empty`]。
    pub fn explore_read(&mut self, dst: &mut [u8]) -> Result<usize> {
        let explored = self.explored.ok_or(RingBufferError::NotExploring)?;
        if dst.is_empty() {
            return Ok(0);
        }
        let remaining = self.len - explored;
        if remaining == 0 {
            return Err(RingBufferError::Empty);
        }
        let count = dst.len().min(remaining);
        self.copy_out(explored, &mut dst[..count]);
        self.explored = Some(explored + count);
        Ok(count)
    }

    /// 探索游标直接前移 `count` 字节，不复制数据。
    ///
    /// # 错误
    /// - 未开启事务：[`RingBufferError::NotExploring`]；
    /// - `count` 不小于 `explore_size()`：[`RingBufferError::ExploreCrossedLine`]，
    ///   整段消费应走 `explore_commit`。
    pub fn explore_retrieve(&mut self, count: usize) -> Result<()> {
        let explored = self.explored.ok_or(RingBufferError::NotExploring)?;
        let explorable = self.len - explored;
        if count >= explorable {
            return Err(RingBufferError::ExploreCrossedLine {
                requested: count,
                explorable,
            });
        }
        self.explored = Some(explored + count);
        Ok(())
    }

    /// 从探索游标开始的至多 `count` 字节视图；未开启事务时等同于 [`RingBuffer::peek`]。
    pub fn explore_peek(&self, count: usize) -> PeekView<'_> {
        self.view(self.explored.unwrap_or(0), count.min(self.explore_size()))
    }

    /// 将探索进度并入已提交读游标并关闭事务，返回被消费的字节数。
    pub fn explore_commit(&mut self) -> Result<usize> {
        let explored = self.explored.take().ok_or(RingBufferError::NotExploring)?;
        self.retrieve(explored);
        Ok(explored)
    }

    /// 丢弃探索进度并关闭事务，已提交状态不变。
    pub fn explore_break(&mut self) -> Result<()> {
        self.explored
            .take()
            .map(|_| ())
            .ok_or(RingBufferError::NotExploring)
    }

    /// 开启探索事务并返回守卫；守卫未提交即被丢弃时自动回滚。
    pub fn explore(&mut self) -> Result<ExploreGuard<'_>> {
        self.explore_begin()?;
        Ok(ExploreGuard { buffer: self })
    }
}

/// 作用域化的探索事务。
///
/// 守卫独占借用缓冲，事务期间无法进行写入或已提交读取；
/// 只有 [`ExploreGuard::commit`] 会消费数据，其余退出路径（含提前返回与 panic 展开）均回滚。
#[derive(Debug)]
pub struct ExploreGuard<'a> {
    buffer: &'a mut RingBuffer,
}

impl ExploreGuard<'_> {
    pub fn read(&mut self, dst: &mut [u8]) -> Result<usize> {
        self.buffer.explore_read(dst)
    }

    pub fn retrieve(&mut self, count: usize) -> Result<()> {
        self.buffer.explore_retrieve(count)
    }

    pub fn size(&self) -> usize {
        self.buffer.explore_size()
    }

    pub fn peek(&self, count: usize) -> PeekView<'_> {
        self.buffer.explore_peek(count)
    }

    /// 提交并返回被消费的字节数。
    pub fn commit(self) -> usize {
        let explored = self.buffer.explored.take().unwrap_or(0);
        self.buffer.retrieve(explored);
        explored
    }
}

impl Drop for ExploreGuard<'_> {
    fn drop(&mut self) {
        self.buffer.explored = None;
    }
}
