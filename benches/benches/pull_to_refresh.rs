// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_pull_to_refresh::{
    GestureEvent, PullConfig, PullEvent, PullMachine, PullService, RefreshTicket,
};
use understory_timing::ManualClock;

fn at_top() -> f64 {
    0.0
}

fn bench_pulling_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("pull_to_refresh/transition");

    // Pointer moves dominate a gesture; each one clamps and compares context.
    let machine = PullMachine::new(PullConfig::default()).unwrap();
    let moves: Vec<f64> = (0..1_024).map(|i| f64::from(i % 240)).collect();
    group.throughput(Throughput::Elements(moves.len() as u64));

    group.bench_function("pulling_moves", |b| {
        b.iter_batched(
            || {
                let mut s = machine.initial_snapshot::<()>();
                machine.apply(
                    &mut s,
                    GestureEvent::TouchStart {
                        starting_distance: 0.0,
                    }
                    .into(),
                    &at_top,
                );
                machine.apply(
                    &mut s,
                    GestureEvent::TouchMove { distance: 1.0 }.into(),
                    &at_top,
                );
                s
            },
            |mut s| {
                for &distance in &moves {
                    let effects = machine.apply(
                        &mut s,
                        PullEvent::Gesture(GestureEvent::TouchMove { distance }),
                        &at_top,
                    );
                    black_box(effects);
                }
                black_box(s);
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn bench_full_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("pull_to_refresh/service");

    group.bench_function("full_cycle", |b| {
        let clock = ManualClock::new(0);
        let mut last = None;
        let mut service = PullService::<(), _, _, _>::new(
            PullConfig::default(),
            at_top,
            |_: RefreshTicket| {},
            clock.clone(),
        )
        .unwrap();
        service.start();

        b.iter(|| {
            service.send(GestureEvent::TouchStart {
                starting_distance: 0.0,
            });
            for distance in [20.0, 60.0, 120.0] {
                service.send(GestureEvent::TouchMove { distance });
            }
            service.send(GestureEvent::TouchEnd);
            let ticket = service.outstanding_refresh().unwrap();
            service.settle(ticket, Ok(())).unwrap();
            last = Some(ticket);
            clock.advance(1_200);
            black_box(service.update());
        });
        black_box(last);
    });

    group.finish();
}

criterion_group!(benches, bench_pulling_moves, bench_full_cycle);
criterion_main!(benches);
