//! `shared_contract` 集成测试：加锁形态在多线程生产/消费下的可见性与顺序。
//!
//! # 测试意图（Why）
//! - 生产者写入触发扩容时，消费者不得读到重复或错序的字节；
//! - 只读查询在并发写入下仍满足 `len + free == capacity`。

use std::{sync::Arc, thread};

use spark_ringbuffer::{RingBufferConfig, RingBufferError, SharedRingBuffer};

const TOTAL: usize = 64 * 1024;

#[test]
fn producer_consumer_preserve_byte_order_across_growth() {
    let shared = Arc::new(RingBufferConfig { initial_capacity: 16 }.build_shared());

    let producer = {
        let shared = Arc::clone(&shared);
        thread::spawn(move || {
            for chunk in (0..TOTAL).collect::<Vec<_>>().chunks(97) {
                let bytes: Vec<u8> = chunk.iter().map(|i| (i % 251) as u8).collect();
                shared.write(&bytes);
            }
        })
    };

    let consumer = {
        let shared = Arc::clone(&shared);
        thread::spawn(move || {
            let mut received = Vec::with_capacity(TOTAL);
            let mut scratch = [0u8; 61];
            while received.len() < TOTAL {
                match shared.read(&mut scratch) {
                    Ok(n) => received.extend_from_slice(&scratch[..n]),
                    Err(RingBufferError::Empty) => thread::yield_now(),
                    Err(other) => panic!("unexpected error: {other}"),
                }
            }
            received
        })
    };

    producer.join().expect("producer panicked");
    let received = consumer.join().expect("consumer panicked");
    assert_eq!(received.len(), TOTAL);
    assert!(
        received
            .iter()
            .enumerate()
            .all(|(i, byte)| *byte == (i % 251) as u8)
    );
    assert!(shared.is_empty());
}

#[test]
fn readers_observe_consistent_accounting_during_writes() {
    let shared = Arc::new(SharedRingBuffer::new(8));
    let writer = {
        let shared = Arc::clone(&shared);
        thread::spawn(move || {
            for round in 0..2_000u32 {
                shared.write(&round.to_be_bytes());
                if round % 3 == 0 {
                    shared.retrieve(2);
                }
            }
        })
    };

    for _ in 0..2_000 {
        let guard = shared.read_guard();
        assert_eq!(guard.len() + guard.free(), guard.capacity());
        drop(guard);
        shared.with_peek_all(|view| assert!(view.len() <= TOTAL));
    }
    writer.join().expect("writer panicked");
}
