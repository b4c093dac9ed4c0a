//! 与 `std::io` 及 `bytes` 生态的适配。
//!
//! - `io::Read`：缓冲为空时返回 `Ok(0)`，遵循 `Read` 的惯例而非报错；
//! - `io::Write`：写入永不失败，`flush` 为空操作；
//! - `bytes::Buf`：覆盖已提交可读区，`chunk` 为视图前段，`advance` 等价于 `retrieve`。

use std::io;

use bytes::Buf;

use crate::ring_buffer::RingBuffer;

impl io::Read for RingBuffer {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.is_empty() {
            return Ok(0);
        }
        Ok(RingBuffer::read(self, buf).unwrap_or(0))
    }
}

impl io::Write for RingBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(RingBuffer::write(self, buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Buf for RingBuffer {
    fn remaining(&self) -> usize {
        self.len()
    }

    fn chunk(&self) -> &[u8] {
        self.peek_all().head()
    }

    fn advance(&mut self, cnt: usize) {
        assert!(
            cnt <= self.len(),
            "cannot advance past `remaining`: {cnt} > {}",
            self.len()
        );
        self.retrieve(cnt);
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};

    use bytes::Buf;

    use super::*;

    #[test]
    fn std_io_round_trip() {
        let mut rb = RingBuffer::new(4);
        rb.write_all(b"hello world").expect("写入不会失败");
        let mut out = String::new();
        Read::read_to_string(&mut rb, &mut out).expect("UTF-8 内容");
        assert_eq!(out, "hello world");
        assert_eq!(Read::read(&mut rb, &mut [0u8; 4]).expect("空缓冲读取"), 0);
    }

    #[test]
    fn buf_decodes_across_wrap_point() {
        let mut rb = RingBuffer::new(8);
        rb.write(&[0u8; 6]);
        assert_eq!(rb.read(&mut [0u8; 6]), Ok(6));
        rb.write(&0x0102_0304u32.to_be_bytes());
        rb.write(&0xABCDu16.to_be_bytes());
        assert_eq!(rb.get_u32(), 0x0102_0304);
        assert_eq!(rb.get_u16(), 0xABCD);
        assert!(!rb.has_remaining());
    }

    #[test]
    #[should_panic(expected = "cannot advance past")]
    fn advance_beyond_remaining_panics() {
        let mut rb = RingBuffer::new(4);
        rb.write(b"ab");
        rb.advance(3);
    }
}
