//! 扩容管理：写入空间不足时扩大逻辑容量。
//!
//! # 策略（How）
//! 1. **原地扩展**（[`RingBuffer::extend_in_place`]）：存储的分配余量足以覆盖缺口时，
//!    仅延长逻辑容量；若数据回绕，则搬移较短且可落入新窗口的一段，使空隙紧跟写游标之后。
//! 2. **重新分配并线性化**（[`RingBuffer::reallocate`]）：分配不小于所需容量的 2 的幂（至少为 2），
//!    将全部可读字节按序复制到新存储前部，读游标归零。
//!
//! 两种策略都保持已用字节数与探索偏移不变；容量只增不减。
//! 分配失败由全局分配器中止进程，这里不做恢复。

use tracing::debug;

use crate::ring_buffer::RingBuffer;

/// 计算重新分配后的容量：不小于 `current + shortfall` 的最小 2 的幂，下限为 2。
///
/// # Panics
/// 目标容量超出 `usize` 表示范围时 panic，与 `Vec` 的容量溢出行为一致。
pub(crate) fn next_capacity(current: usize, shortfall: usize) -> usize {
    match current
        .checked_add(shortfall)
        .and_then(|required| required.max(2).checked_next_power_of_two())
    {
        Some(capacity) => capacity,
        None => panic!("ring buffer capacity overflow: {current} + {shortfall}"),
    }
}

impl RingBuffer {
    /// 使空闲空间至少增加 `shortfall` 字节，优先原地扩展。
    pub(crate) fn grow(&mut self, shortfall: usize) {
        let before = self.capacity();
        if self.extend_in_place(shortfall) {
            debug!(
                strategy = "extend_in_place",
                before,
                after = self.capacity(),
                shortfall,
                "ring buffer grown"
            );
        } else {
            self.reallocate(shortfall);
            debug!(
                strategy = "reallocate",
                before,
                after = self.capacity(),
                shortfall,
                "ring buffer grown"
            );
        }
    }

    /// 在既有分配内将逻辑容量延长 `shortfall` 字节；余量不足时返回 `false` 且不做任何修改。
    ///
    /// # 教案式说明
    /// - **前提 (What)**：设旧容量为 `cap`，读游标之后到存储末尾的字节数为 `cap - head`，
    ///   回绕到存储前部的字节数恰为写游标位置；
    /// - **搬移选择 (How)**：
    ///   - 数据未回绕时，新窗口紧接写游标，无需搬移；
    ///   - 回绕段能整体落入新窗口且短于尾段时，把回绕段复制到新窗口，读游标不变；
    ///   - 否则把尾段 `[head, cap)` 后移到新容量的末尾，读游标随之后移 `shortfall`。
    pub(crate) fn extend_in_place(&mut self, shortfall: usize) -> bool {
        let old_capacity = self.storage.len();
        if self.storage.capacity() - old_capacity < shortfall {
            return false;
        }
        // 余量足够，`resize` 不会触发重新分配。
        self.storage.resize(old_capacity + shortfall, 0);

        let tail_run = old_capacity - self.head;
        if self.len > tail_run {
            let wrapped = self.len - tail_run;
            if wrapped <= shortfall && wrapped < tail_run {
                self.storage.copy_within(0..wrapped, old_capacity);
            } else {
                self.storage
                    .copy_within(self.head..old_capacity, self.head + shortfall);
                self.head += shortfall;
            }
        }
        true
    }

    /// 分配新存储并把可读区线性化到其前部。
    pub(crate) fn reallocate(&mut self, shortfall: usize) {
        let mut storage = vec![0; next_capacity(self.capacity(), shortfall)];
        self.copy_out(0, &mut storage[..self.len]);
        self.storage = storage;
        self.head = 0;
    }
}
