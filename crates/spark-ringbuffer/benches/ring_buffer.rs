use criterion::{BenchmarkId, Criterion, Throughput};
use spark_ringbuffer::{RingBuffer, RingBufferPool};
use std::{env, hint::black_box, time::Duration};

/// 环形缓冲基准：衡量稳态读写、窥视解码、探索事务与池化复用的开销。
///
/// # 设计背景（Why）
/// - 协议解码循环的热路径是“写入一段 → 窥视帧头 → 探索读取 → 提交/回滚”，
///   需要在调整游标表示或扩容策略后快速发现回归。
///
/// # 逻辑解析（How）
/// - `write_read`：预热到稳态容量后循环写入并读出不同大小的块，迫使游标反复回绕；
/// - `peek_decode`：在回绕状态下解码 `u32` 帧头；
/// - `explore_frame`：按长度前缀探索整帧，交替提交与回滚；
/// - `pool_cycle`：从池取出、写入、重置并归还。
fn bench_write_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("write_read");
    for chunk in [16usize, 256, 4096] {
        let payload = vec![0xA5u8; chunk];
        let mut sink = vec![0u8; chunk];
        let mut rb = RingBuffer::new(chunk * 4 + 3);
        group.throughput(Throughput::Bytes(chunk as u64));
        group.bench_with_input(BenchmarkId::from_parameter(chunk), &chunk, |b, _| {
            b.iter(|| {
                rb.write(black_box(&payload));
                black_box(rb.read(&mut sink).unwrap_or(0))
            });
        });
    }
    group.finish();
}

fn bench_peek_decode(c: &mut Criterion) {
    let mut rb = RingBuffer::new(64);
    rb.write(&[0u8; 62]);
    rb.retrieve(61);
    rb.write(&0xDEAD_BEEFu32.to_be_bytes());
    c.bench_function("peek_decode_wrapped_u32", |b| {
        b.iter(|| black_box(rb.peek_u32()));
    });
}

fn bench_explore_frame(c: &mut Criterion) {
    let mut rb = RingBuffer::new(1024);
    let body = [7u8; 120];
    c.bench_function("explore_frame", |b| {
        let mut commit = false;
        b.iter(|| {
            if rb.is_empty() {
                rb.write(&(body.len() as u16).to_be_bytes());
                rb.write(&body);
            }
            let Ok(mut tx) = rb.explore() else {
                return;
            };
            let mut prefix = [0u8; 2];
            let mut frame = [0u8; 120];
            let _ = tx.read(&mut prefix);
            let _ = tx.read(&mut frame);
            black_box(&frame);
            commit = !commit;
            if commit {
                black_box(tx.commit());
            }
        });
    });
}

fn bench_pool_cycle(c: &mut Criterion) {
    let pool = RingBufferPool::new(4096);
    c.bench_function("pool_cycle", |b| {
        b.iter(|| {
            let mut rb = pool.get();
            rb.write(black_box(b"hello pool"));
            rb.reset();
            pool.put(rb);
        });
    });
}

fn main() {
    let mut quick_mode = false;
    for arg in env::args().skip(1) {
        if arg == "--quick" {
            quick_mode = true;
        }
    }

    let mut criterion = Criterion::default();
    if quick_mode {
        criterion = criterion
            .sample_size(10)
            .warm_up_time(Duration::from_millis(100))
            .measurement_time(Duration::from_millis(250));
    }

    bench_write_read(&mut criterion);
    bench_peek_decode(&mut criterion);
    bench_explore_frame(&mut criterion);
    bench_pool_cycle(&mut criterion);
    criterion.final_summary();
}
