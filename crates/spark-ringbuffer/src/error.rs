//! # error 模块说明
//!
//! ## 角色定位（Why）
//! - 集中定义环形缓冲对外暴露的可恢复错误，读族、探索族与构造路径共用同一枚举；
//! - 每个变体附带稳定错误码，便于上层协议栈按码分类而非匹配文本。
//!
//! ## 设计要求（What）
//! - 所有变体均可恢复，调用方据此决定重试、等待更多数据或放弃；
//! - 扩容时的内存耗尽不在此列：交由全局分配器中止进程，本模块不提供对应变体。

use thiserror::Error;

/// 环形缓冲操作的统一返回类型。
pub type Result<T, E = RingBufferError> = core::result::Result<T, E>;

/// 环形缓冲错误域。
///
/// # 教案式说明
/// - **意图 (Why)**：读取、探索事务与存储包装构造器的失败语义各不相同，
///   以细粒度枚举区分，避免调用方把“暂无数据”与“调用顺序错误”混为一谈。
/// - **契约 (What)**：
///   - 变体均实现 `Send + Sync + 'static`，可跨线程传播；
///   - [`RingBufferError::code`] 返回的错误码在版本间保持稳定。
/// - **设计权衡 (Trade-offs)**：`InvalidInitParameters` 携带全部入参，
///   构造失败通常只在接入阶段出现，多几个字段换取排障时不必复现。
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum RingBufferError {
    /// 读族操作（`read`、`read_one_byte`、`explore_read`）在可见区间为空时调用。
    #[error("ring buffer is empty")]
    Empty,

    /// 探索族操作在未开启探索事务时调用。
    #[error("explore transaction has not begun")]
    NotExploring,

    /// 探索事务已处于开启状态，再次 `explore_begin` 被拒绝。
    #[error("explore transaction is already in progress")]
    AlreadyExploring,

    /// `explore_retrieve` 请求跳过的字节数达到或超过当前可探索字节数。
    ///
    /// - `requested`：调用方请求跳过的字节数；
    /// - `explorable`：调用时探索游标之后剩余的字节数。
    #[error("explore retrieve of {requested} bytes crosses the line ({explorable} explorable)")]
    ExploreCrossedLine { requested: usize, explorable: usize },

    /// 包装调用方存储时给出的游标与空/满声明不一致，或越出存储边界。
    #[error(
        "invalid ring buffer init parameters: read={read}, write={write}, storage_len={storage_len}, empty={empty}"
    )]
    InvalidInitParameters {
        read: usize,
        write: usize,
        storage_len: usize,
        empty: bool,
    },
}

impl RingBufferError {
    /// 返回稳定的点分错误码，供日志与指标维度使用。
    pub fn code(&self) -> &'static str {
        match self {
            RingBufferError::Empty => "ringbuffer.empty",
            RingBufferError::NotExploring => "ringbuffer.explore.not_started",
            RingBufferError::AlreadyExploring => "ringbuffer.explore.already_started",
            RingBufferError::ExploreCrossedLine { .. } => "ringbuffer.explore.crossed_line",
            RingBufferError::InvalidInitParameters { .. } => "ringbuffer.init.invalid_parameters",
        }
    }
}
