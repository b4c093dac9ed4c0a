//! 非消费视图与大端定宽整数解码。
//!
//! # 契约（What）
//! - 视图借用缓冲本身，借用存续期间任何写入、读取、丢弃或扩容都无法通过编译，
//!   因此不存在“扩容后视图悬垂”的情形；
//! - 定宽整数按网络字节序（大端）解码；可读字节不足宽度时返回 0 而非错误。

use crate::ring_buffer::RingBuffer;

/// 可读区间的至多两段只读视图。
///
/// `head` 从游标位置开始；仅当区间越过存储末尾时 `tail` 非空，并从存储起点继续。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PeekView<'a> {
    head: &'a [u8],
    tail: &'a [u8],
}

impl<'a> PeekView<'a> {
    pub(crate) fn new(head: &'a [u8], tail: &'a [u8]) -> Self {
        Self { head, tail }
    }

    pub fn head(&self) -> &'a [u8] {
        self.head
    }

    /// 回绕部分；区间连续时为空切片。
    pub fn tail(&self) -> &'a [u8] {
        self.tail
    }

    pub fn len(&self) -> usize {
        self.head.len() + self.tail.len()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_empty() && self.tail.is_empty()
    }

    pub fn is_contiguous(&self) -> bool {
        self.tail.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + use<'a> {
        self.head.iter().chain(self.tail.iter()).copied()
    }

    /// 将视图前 `min(dst.len(), len())` 个字节拼接复制到 `dst`，返回复制数。
    pub fn copy_to_slice(&self, dst: &mut [u8]) -> usize {
        let first = dst.len().min(self.head.len());
        dst[..first].copy_from_slice(&self.head[..first]);
        let second = (dst.len() - first).min(self.tail.len());
        dst[first..first + second].copy_from_slice(&self.tail[..second]);
        first + second
    }

    pub fn to_vec(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len());
        out.extend_from_slice(self.head);
        out.extend_from_slice(self.tail);
        out
    }

    /// 读取前 `N` 个字节；不足时返回 `None`。跨越回绕点时先拼接到栈上暂存区。
    fn leading<const N: usize>(&self) -> Option<[u8; N]> {
        if self.len() < N {
            return None;
        }
        let mut scratch = [0u8; N];
        self.copy_to_slice(&mut scratch);
        Some(scratch)
    }
}

impl RingBuffer {
    /// 构造从读游标偏移 `offset` 起、长度 `count` 的视图。
    pub(crate) fn view(&self, offset: usize, count: usize) -> PeekView<'_> {
        let (first, second) = self.ranges(offset, count);
        PeekView::new(&self.storage[first], &self.storage[second])
    }

    /// 返回从已提交读游标开始、至多 `count` 字节的视图，不移动任何游标。
    pub fn peek(&self, count: usize) -> PeekView<'_> {
        self.view(0, count.min(self.len))
    }

    /// 返回全部可读字节的视图。
    pub fn peek_all(&self) -> PeekView<'_> {
        self.view(0, self.len)
    }

    pub fn peek_u8(&self) -> u8 {
        self.peek(1).leading::<1>().map_or(0, u8::from_be_bytes)
    }

    pub fn peek_u16(&self) -> u16 {
        self.peek(2).leading::<2>().map_or(0, u16::from_be_bytes)
    }

    pub fn peek_u32(&self) -> u32 {
        self.peek(4).leading::<4>().map_or(0, u32::from_be_bytes)
    }

    pub fn peek_u64(&self) -> u64 {
        self.peek(8).leading::<8>().map_or(0, u64::from_be_bytes)
    }
}
