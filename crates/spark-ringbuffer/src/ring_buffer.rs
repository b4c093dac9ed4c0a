use core::{fmt, ops::Range};

use tracing::debug;

use crate::error::{Result, RingBufferError};

/// `RingBuffer` 是单块连续存储上的可扩容环形字节缓冲。
///
/// # 设计动机（Why）
/// - 网络 I/O 暂存需要“写入端不断追加、读取端按帧消费”的缓冲；
///   环形布局让消费后的前缀空间无需搬移即可复用。
/// - 协议解码常需试探性地读取一段字节判断帧是否完整，
///   探索事务（见 `explore` 模块）在不触碰已提交读游标的前提下支持回滚。
///
/// # 状态表示（How）
/// - `storage.len()` 即逻辑容量；`storage.capacity()` 超出部分是可原地扩展的余量；
/// - `head` 为已提交读游标，`len` 为已用字节数，写游标由 `(head + len) % capacity` 推导；
///   以计数器取代“游标相等 + 空标志”的组合，满/空判定不会出现标志失步；
/// - `explored` 为探索事务内相对 `head` 已试读的字节数，`None` 表示未开启事务。
///
/// # 契约说明（What）
/// - 任意公开调用结束时：`head < capacity`（容量为 0 时 `head == 0`），`len <= capacity`；
/// - 探索事务开启时 `explored <= len`，即探索游标始终落在读游标到写游标的弧上；
/// - 写入永不因容量失败，空间不足时先扩容（见 `growth` 模块）。
///
/// # 并发（Trade-offs）
/// - 本类型不加锁，独占借用 `&mut self` 即调用方提供的互斥；
///   需要跨线程共享时使用 [`SharedRingBuffer`](crate::SharedRingBuffer)。
pub struct RingBuffer {
    pub(crate) storage: Vec<u8>,
    pub(crate) head: usize,
    pub(crate) len: usize,
    pub(crate) explored: Option<usize>,
}

impl RingBuffer {
    /// 分配容量为 `capacity` 的空缓冲。
    pub fn new(capacity: usize) -> Self {
        Self {
            storage: vec![0; capacity],
            head: 0,
            len: 0,
            explored: None,
        }
    }

    /// 接管调用方存储，并将其全部内容视为已写入的可读数据。
    ///
    /// `storage` 的剩余分配余量（`capacity() - len()`）会在后续扩容时被原地复用。
    pub fn from_vec(storage: Vec<u8>) -> Self {
        let len = storage.len();
        Self {
            storage,
            head: 0,
            len,
            explored: None,
        }
    }

    /// 接管调用方存储，并按给定游标与空/满声明恢复缓冲状态。
    ///
    /// # 参数
    /// - `read`：下一个待读字节的位置；
    /// - `write`：下一个可写位置；
    /// - `empty`：游标相等时区分“全空”（`true`）与“全满”（`false`）。
    ///
    /// # 错误
    /// 下列情形返回 [`RingBufferError::InvalidInitParameters`]：
    /// - 存储非空而任一游标 `>= storage.len()`；
    /// - 存储为空而游标不全为 0，或声明为满；
    /// - 游标不相等却声明为空。
    pub fn from_parts(storage: Vec<u8>, read: usize, write: usize, empty: bool) -> Result<Self> {
        let capacity = storage.len();
        let valid = if capacity == 0 {
            read == 0 && write == 0 && empty
        } else {
            read < capacity && write < capacity && (read == write || !empty)
        };
        if !valid {
            debug!(
                read,
                write,
                storage_len = capacity,
                empty,
                "rejecting ring buffer init parameters"
            );
            return Err(RingBufferError::InvalidInitParameters {
                read,
                write,
                storage_len: capacity,
                empty,
            });
        }

        let len = if read == write {
            if empty { 0 } else { capacity }
        } else if write > read {
            write - read
        } else {
            capacity - read + write
        };
        Ok(Self {
            storage,
            head: read,
            len,
            explored: None,
        })
    }

    /// 当前逻辑容量。
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// 已提交读游标之后的可读字节数。
    pub fn len(&self) -> usize {
        self.len
    }

    /// 无需扩容即可写入的字节数；恒有 `len() + free() == capacity()`。
    pub fn free(&self) -> usize {
        self.capacity() - self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len != 0 && self.len == self.capacity()
    }

    /// 下一个待读字节的物理位置。
    pub fn read_cursor(&self) -> usize {
        self.head
    }

    /// 下一个可写槽位的物理位置。
    pub fn write_cursor(&self) -> usize {
        self.wrap(self.head + self.len)
    }

    /// 将逻辑位置折回 `[0, capacity)`；容量为 0 时恒为 0。
    pub(crate) fn wrap(&self, position: usize) -> usize {
        match self.capacity() {
            0 => 0,
            capacity => position % capacity,
        }
    }

    /// 计算从读游标偏移 `offset` 起、长度 `count` 的区间所占的物理范围。
    ///
    /// 返回 `(前段, 回绕段)`：前段延伸至存储末尾为止，回绕段从 0 开始，不回绕时为空。
    /// 调用方需保证 `offset + count <= len()`。
    pub(crate) fn ranges(&self, offset: usize, count: usize) -> (Range<usize>, Range<usize>) {
        debug_assert!(offset + count <= self.len);
        if count == 0 {
            return (0..0, 0..0);
        }
        let start = self.wrap(self.head + offset);
        let first = count.min(self.capacity() - start);
        (start..start + first, 0..count - first)
    }

    /// 将偏移 `offset` 起的 `dst.len()` 个字节复制到 `dst`，不移动任何游标。
    pub(crate) fn copy_out(&self, offset: usize, dst: &mut [u8]) {
        let (first, second) = self.ranges(offset, dst.len());
        let split = first.len();
        dst[..split].copy_from_slice(&self.storage[first]);
        dst[split..].copy_from_slice(&self.storage[second]);
    }

    /// 推进已提交读游标 `count` 字节（`count <= len()`），并保持探索游标不落后于读游标。
    pub(crate) fn consume(&mut self, count: usize) {
        debug_assert!(count <= self.len);
        self.head = self.wrap(self.head + count);
        self.len -= count;
        if let Some(explored) = self.explored.as_mut() {
            *explored = explored.saturating_sub(count);
        }
    }

    /// 追加写入 `src`，空间不足时先扩容；返回写入字节数（恒为 `src.len()`）。
    pub fn write(&mut self, src: &[u8]) -> usize {
        if src.is_empty() {
            return 0;
        }
        let free = self.free();
        if free < src.len() {
            self.grow(src.len() - free);
        }

        let start = self.write_cursor();
        let first = src.len().min(self.capacity() - start);
        self.storage[start..start + first].copy_from_slice(&src[..first]);
        self.storage[..src.len() - first].copy_from_slice(&src[first..]);
        self.len += src.len();
        src.len()
    }

    /// 以字节视图写入字符串，不做额外拷贝或编码转换。
    pub fn write_str(&mut self, text: &str) -> usize {
        self.write(text.as_bytes())
    }

    pub fn write_one_byte(&mut self, byte: u8) {
        if self.free() == 0 {
            self.grow(1);
        }
        let slot = self.write_cursor();
        self.storage[slot] = byte;
        self.len += 1;
    }

    /// 读取至多 `dst.len()` 个字节并推进已提交读游标，返回实际读取数。
    ///
    /// # 错误
    /// - `dst` 为空时直接返回 `Ok(0)`，先于空检查；
    /// - 缓冲为空时返回 [`RingBufferError::Empty`]，`dst` 不被写入。
    pub fn read(&mut self, dst: &mut [u8]) -> Result<usize> {
        if dst.is_empty() {
            return Ok(0);
        }
        if self.is_empty() {
            return Err(RingBufferError::Empty);
        }
        let count = dst.len().min(self.len);
        self.copy_out(0, &mut dst[..count]);
        self.consume(count);
        Ok(count)
    }

    pub fn read_one_byte(&mut self) -> Result<u8> {
        if self.is_empty() {
            return Err(RingBufferError::Empty);
        }
        let byte = self.storage[self.head];
        self.consume(1);
        Ok(byte)
    }

    /// 丢弃至多 `count` 个可读字节。
    ///
    /// `count >= len()` 时等价于 [`RingBuffer::reset`]：游标归零并强制关闭探索事务。
    pub fn retrieve(&mut self, count: usize) {
        if count >= self.len {
            self.reset();
        } else {
            self.consume(count);
        }
    }

    /// 同 [`RingBuffer::reset`]。
    pub fn retrieve_all(&mut self) {
        self.reset();
    }

    /// 回到位置 0 的空状态并关闭探索事务；存储与容量保持不变。
    pub fn reset(&mut self) {
        self.head = 0;
        self.len = 0;
        self.explored = None;
    }

    /// 将全部可读字节复制到新的 `Vec`，不消费数据。
    pub fn to_vec(&self) -> Vec<u8> {
        let mut out = vec![0; self.len];
        self.copy_out(0, &mut out);
        out
    }
}

impl Default for RingBuffer {
    fn default() -> Self {
        Self::new(0)
    }
}

impl fmt::Debug for RingBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingBuffer")
            .field("capacity", &self.capacity())
            .field("read_cursor", &self.head)
            .field("write_cursor", &self.write_cursor())
            .field("len", &self.len)
            .field("explored", &self.explored)
            .finish()
    }
}

impl fmt::Display for RingBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "RingBuffer:")?;
        writeln!(f, "  capacity: {}", self.capacity())?;
        writeln!(f, "  readable: {}", self.len)?;
        writeln!(f, "  free: {}", self.free())?;
        write!(f, "  content: {}", String::from_utf8_lossy(&self.to_vec()))
    }
}
