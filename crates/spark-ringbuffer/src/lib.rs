//! `spark-ringbuffer` 提供单块连续存储上的可扩容环形字节缓冲。
//!
//! # 模块定位（Why）
//! - 作为字节流生产者/消费者之间的暂存原语（例如网络 I/O 的收发缓冲），
//!   支撑协议解码器“先窥视、再试探、最后提交”的读取模式；
//! - 不承担网络 I/O、持久化、多缓冲拼接或背压策略，这些由上层调用方组合实现。
//!
//! # 设计概要（How）
//! - `ring_buffer`：游标运算、读写、丢弃与重置，以及三种构造方式；
//! - `growth`：写入空间不足时的原地扩展与重新分配线性化；
//! - `peek`：不消费数据的双段视图与大端定宽整数解码；
//! - `explore`：可提交、可回滚的探索事务及其作用域守卫；
//! - `shared`：基于 `parking_lot::RwLock` 的加锁形态；
//! - `pool`：显式构造的缓冲复用池；`config`：可反序列化的构造参数；
//! - `io`：`std::io::{Read, Write}` 与 `bytes::Buf` 适配。
//!
//! # 命名约定（Consistency）
//! - `len`/`free`/`capacity` 分别对应已用字节、空闲字节与逻辑容量，恒有 `len + free == capacity`；
//! - 探索族方法统一以 `explore_` 前缀命名，与已提交读取的同名操作一一对应。

extern crate alloc;

mod config;
mod error;
mod explore;
mod growth;
mod io;
mod peek;
mod pool;
mod ring_buffer;
mod shared;

pub use config::{DEFAULT_CAPACITY, DEFAULT_MAX_IDLE, PoolConfig, RingBufferConfig};
pub use error::{Result, RingBufferError};
pub use explore::ExploreGuard;
pub use peek::PeekView;
pub use pool::{PoolStats, RingBufferPool};
pub use ring_buffer::RingBuffer;
pub use shared::SharedRingBuffer;
