// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `understory_pull_to_refresh` crate.
//!
//! These drive a [`PullService`] through whole gestures with a manual clock
//! and a refresh stub, checking states, context and listener notifications.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use understory_pull_to_refresh::{
    GestureEvent, LoadingPhase, PullConfig, PullService, PullState, RefreshTicket, Snapshot,
    TouchPhase,
};
use understory_timing::{Clock, ManualClock};

#[derive(Clone, Debug, PartialEq)]
struct FetchError(&'static str);

type Scroll = Box<dyn Fn() -> f64>;
type Refresh = Box<dyn FnMut(RefreshTicket)>;
type Service = PullService<FetchError, Scroll, Refresh, ManualClock>;

struct Harness {
    service: Service,
    clock: ManualClock,
    scroll_top: Rc<Cell<f64>>,
    tickets: Rc<RefCell<Vec<RefreshTicket>>>,
    seen: Rc<RefCell<Vec<(PullState, f64)>>>,
}

impl Harness {
    fn new(config: PullConfig) -> Self {
        let clock = ManualClock::new(0);
        let scroll_top = Rc::new(Cell::new(0.0));
        let tickets = Rc::new(RefCell::new(Vec::new()));
        let seen = Rc::new(RefCell::new(Vec::new()));

        let scroll: Scroll = {
            let scroll_top = Rc::clone(&scroll_top);
            Box::new(move || scroll_top.get())
        };
        let refresh: Refresh = {
            let tickets = Rc::clone(&tickets);
            Box::new(move |t| tickets.borrow_mut().push(t))
        };

        let mut service = PullService::new(config, scroll, refresh, clock.clone()).unwrap();
        {
            let seen = Rc::clone(&seen);
            service.on_transition(move |s: &Snapshot<FetchError>| {
                seen.borrow_mut().push((s.value(), s.context().distance()));
            });
        }
        service.start();

        Self {
            service,
            clock,
            scroll_top,
            tickets,
            seen,
        }
    }

    fn start(&mut self, starting_distance: f64) {
        self.service.send(GestureEvent::TouchStart { starting_distance });
    }

    fn move_to(&mut self, distance: f64) {
        self.service.send(GestureEvent::TouchMove { distance });
    }

    fn end(&mut self) {
        self.service.send(GestureEvent::TouchEnd);
    }

    fn last_ticket(&self) -> RefreshTicket {
        *self.tickets.borrow().last().unwrap()
    }

    fn elapse(&mut self, ms: u64) -> usize {
        self.clock.advance(ms);
        self.service.update()
    }

    fn state(&self) -> PullState {
        self.service.state()
    }
}

fn config() -> PullConfig {
    PullConfig::default()
        .with_distance_required(100.0)
        .with_status_display(600)
}

#[test]
fn start_notifies_with_initial_snapshot() {
    let h = Harness::new(config());
    assert_eq!(*h.seen.borrow(), [(PullState::Listening, 0.0)]);
}

#[test]
fn moving_above_start_point_returns_to_listening() {
    let mut h = Harness::new(config());
    h.start(10.0);
    h.move_to(5.0);
    assert_eq!(h.state(), PullState::Listening);
}

#[test]
fn moving_below_start_point_begins_pulling() {
    let mut h = Harness::new(config());
    h.start(10.0);
    h.move_to(20.0);
    assert_eq!(h.state(), PullState::Touching(TouchPhase::Pulling));
    assert_eq!(h.service.context().distance(), 10.0);
}

#[test]
fn scrolled_content_is_never_pulled() {
    let mut h = Harness::new(config());
    h.scroll_top.set(240.0);
    h.start(10.0);
    h.move_to(200.0);
    assert_eq!(h.state(), PullState::Listening);
    assert!(h.tickets.borrow().is_empty());

    // Scrolling back to the top lets the next gesture through.
    h.scroll_top.set(0.0);
    h.start(10.0);
    h.move_to(200.0);
    assert_eq!(h.state(), PullState::Touching(TouchPhase::Pulling));
}

#[test]
fn distance_stays_within_threshold_for_any_moves() {
    let mut h = Harness::new(config());
    h.start(30.0);
    h.move_to(30.0);

    let mut y = 30.0;
    for delta in [12.5, 80.0, -200.0, 5.0, 400.0, -1.0, -90.0, 33.3, 1e9, -1e9] {
        y += delta;
        h.move_to(y);
        let distance = h.service.context().distance();
        assert!(
            (0.0..=100.0).contains(&distance),
            "distance {distance} escaped [0, 100] after moving to {y}"
        );
    }
}

#[test]
fn successful_refresh_cycle() {
    let mut h = Harness::new(config());
    h.start(0.0);
    h.move_to(40.0);
    h.move_to(100.0);
    assert_eq!(h.service.context().distance(), 100.0);

    h.end();
    assert_eq!(h.state(), PullState::Loading(LoadingPhase::Pending));
    assert_eq!(h.tickets.borrow().len(), 1);

    let ticket = h.last_ticket();
    h.service.settle(ticket, Ok(())).unwrap();
    assert_eq!(h.state(), PullState::Loading(LoadingPhase::Resolved));
    assert_eq!(h.service.context().error(), None);

    assert_eq!(h.elapse(600), 1);
    assert_eq!(h.state(), PullState::Loading(LoadingPhase::Restoring));
    assert_eq!(h.service.context().distance(), 0.0);

    assert_eq!(h.elapse(599), 0);
    assert_eq!(h.state(), PullState::Loading(LoadingPhase::Restoring));
    assert_eq!(h.elapse(1), 1);
    assert_eq!(h.state(), PullState::Listening);
    assert_eq!(h.tickets.borrow().len(), 1);
}

#[test]
fn failed_refresh_keeps_error_until_next_success() {
    let mut h = Harness::new(config());
    h.start(0.0);
    h.move_to(150.0);
    h.end();

    let ticket = h.last_ticket();
    h.service.settle(ticket, Err(FetchError("offline"))).unwrap();
    assert_eq!(h.state(), PullState::Loading(LoadingPhase::Rejected));
    assert_eq!(h.service.context().error(), Some(&FetchError("offline")));

    h.elapse(600);
    assert_eq!(h.state(), PullState::Loading(LoadingPhase::Restoring));
    assert_eq!(h.service.context().error(), Some(&FetchError("offline")));

    h.elapse(600);
    assert_eq!(h.state(), PullState::Listening);
    assert_eq!(h.service.context().error(), Some(&FetchError("offline")));

    // Retry is a whole new gesture.
    h.start(0.0);
    h.move_to(150.0);
    h.end();
    assert_eq!(h.tickets.borrow().len(), 2);
    let retry = h.last_ticket();
    assert_ne!(retry, ticket);
    h.service.settle(retry, Ok(())).unwrap();
    assert_eq!(h.service.context().error(), None);
}

#[test]
fn pointer_events_are_inert_while_loading() {
    let mut h = Harness::new(config());
    h.start(0.0);
    h.move_to(150.0);
    h.end();
    let notified = h.seen.borrow().len();

    h.start(0.0);
    h.move_to(10.0);
    h.end();

    assert_eq!(h.state(), PullState::Loading(LoadingPhase::Pending));
    assert_eq!(h.seen.borrow().len(), notified);
    assert_eq!(h.tickets.borrow().len(), 1);
}

#[test]
fn no_op_events_do_not_notify() {
    let mut h = Harness::new(config());
    let snapshot_before = h.service.snapshot().clone();

    h.end();
    h.move_to(42.0);

    assert_eq!(h.service.snapshot().value(), snapshot_before.value());
    assert_eq!(h.service.snapshot().context(), snapshot_before.context());
    assert!(!h.service.snapshot().changed());
    assert_eq!(h.seen.borrow().len(), 1);
}

#[test]
fn listeners_observe_every_step_of_a_cycle() {
    let mut h = Harness::new(config());
    h.start(20.0);
    h.move_to(70.0);
    h.move_to(140.0);
    h.end();
    let ticket = h.last_ticket();
    h.service.settle(ticket, Ok(())).unwrap();
    h.elapse(1_200);

    let states: Vec<_> = h.seen.borrow().iter().map(|(s, _)| s.name()).collect();
    assert_eq!(
        states,
        [
            "listening",
            "touching.idle",
            "touching.pulling",
            "touching.pulling",
            "loading.pending",
            "loading.resolved",
            "loading.restoring",
            "listening",
        ]
    );
    let distances: Vec<_> = h.seen.borrow().iter().map(|(_, d)| *d).collect();
    assert_eq!(distances, [0.0, 0.0, 50.0, 100.0, 100.0, 100.0, 0.0, 0.0]);
}

#[test]
fn unmount_mid_refresh_discards_late_outcome() {
    let mut h = Harness::new(config());
    h.start(0.0);
    h.move_to(150.0);
    h.end();
    let ticket = h.last_ticket();

    h.service.stop();
    assert!(h.service.settle(ticket, Ok(())).is_err());
    assert_eq!(h.state(), PullState::Loading(LoadingPhase::Pending));
    assert_eq!(h.elapse(10_000), 0);
}

#[test]
fn zero_dwell_advances_on_next_update() {
    let mut h = Harness::new(config().with_status_display(0));
    h.start(0.0);
    h.move_to(150.0);
    h.end();
    let ticket = h.last_ticket();
    h.service.settle(ticket, Ok(())).unwrap();
    assert_eq!(h.service.next_deadline(), Some(0));

    assert_eq!(h.service.update(), 2);
    assert_eq!(h.state(), PullState::Listening);
}

#[test]
fn refresher_can_share_the_service_clock() {
    let clock = ManualClock::new(250);
    let in_flight: Rc<Cell<Option<(RefreshTicket, u64)>>> = Rc::default();

    let mut service = {
        let in_flight = Rc::clone(&in_flight);
        let refresh_clock = clock.clone();
        PullService::<FetchError, _, _, _>::new(
            config(),
            || 0.0,
            move |ticket: RefreshTicket| {
                in_flight.set(Some((ticket, refresh_clock.now() + 1_000)));
            },
            clock.clone(),
        )
        .unwrap()
    };
    service.start();

    clock.advance(50);
    service.send(GestureEvent::TouchStart {
        starting_distance: 0.0,
    });
    service.send(GestureEvent::TouchMove { distance: 120.0 });
    service.send(GestureEvent::TouchEnd);

    let (ticket, done_at) = in_flight.get().unwrap();
    assert_eq!(done_at, 1_300);

    clock.set(done_at);
    service.settle(ticket, Ok(())).unwrap();
    assert_eq!(service.next_deadline(), Some(1_900));
}
