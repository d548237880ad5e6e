// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use understory_timing::TimerQueue;

fn bench_schedule_and_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("timing/queue");

    // Dwell timers rarely exceed a handful; larger sizes show where the sorted
    // storage stops being cheap.
    for len in [4_u64, 32, 256] {
        group.bench_with_input(BenchmarkId::new("schedule_drain", len), &len, |b, &len| {
            b.iter(|| {
                let mut q = TimerQueue::new();
                for i in 0..len {
                    q.schedule((i * 7_919) % 1_000, i);
                }
                let mut sum = 0;
                while let Some(e) = q.pop_expired(1_000) {
                    sum += e.key;
                }
                black_box(sum)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_schedule_and_drain);
criterion_main!(benches);
