// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pull-to-refresh walkthrough.
//!
//! Drive a scripted mouse gesture over a feed surface, run a simulated refresh
//! that takes a second and fails during the second half of every ten-second
//! window, and print each state the status badge would show.
//!
//! Run:
//! - `cargo run -p understory_demos --example pull_to_refresh`
//! - `RUST_LOG=understory_pull_to_refresh=trace cargo run -p understory_demos --example pull_to_refresh`

use std::cell::Cell;
use std::rc::Rc;

use kurbo::{Point, Rect};
use tracing_subscriber::EnvFilter;
use understory_pull_to_refresh::pointer::{PointerAdapter, PointerButtons};
use understory_pull_to_refresh::{GestureEvent, PullConfig, PullService, RefreshTicket};
use understory_timing::{Clock, ManualClock};

const MS_EXPECTED_REFRESH_DURATION: u64 = 1_000;
const FRAME_MS: u64 = 100;

#[derive(Clone, Debug)]
struct FeedError(&'static str);

/// One scripted pointer action, applied on its own frame.
#[derive(Copy, Clone, Debug)]
enum Action {
    Down(f64),
    Move(f64),
    Up,
    Wait(u64),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let clock = ManualClock::new(0);
    let in_flight: Rc<Cell<Option<(RefreshTicket, u64)>>> = Rc::default();

    let mut service = {
        let in_flight = Rc::clone(&in_flight);
        let refresh_clock = clock.clone();
        PullService::<FeedError, _, _, _>::new(
            PullConfig::default(),
            // The feed starts scrolled to the top and the script never scrolls it.
            || 0.0,
            move |ticket: RefreshTicket| {
                let done_at = refresh_clock.now() + MS_EXPECTED_REFRESH_DURATION;
                in_flight.set(Some((ticket, done_at)));
            },
            clock.clone(),
        )
        .expect("default configuration is valid")
    };

    service.on_transition(|snapshot| {
        let label = snapshot.to_strings().last().copied().unwrap_or_default();
        let ctx = snapshot.context();
        println!(
            "[{label:>17}] distance {:>5.1}px ({:>3.0}%){}",
            ctx.distance(),
            ctx.progress() * 100.0,
            ctx.error()
                .map(|e| format!(" last error: {}", e.0))
                .unwrap_or_default(),
        );
    });
    service.start();

    // Feed area below a 64px header.
    let adapter = PointerAdapter::new(Rect::new(0.0, 64.0, 360.0, 640.0));
    let x = 180.0;

    let script = [
        // A short pull snaps back.
        Action::Down(100.0),
        Action::Move(130.0),
        Action::Move(150.0),
        Action::Up,
        // A full pull refreshes; the refresh finishes at 1.9s and succeeds.
        Action::Down(100.0),
        Action::Move(160.0),
        Action::Move(220.0),
        Action::Move(260.0),
        Action::Up,
        Action::Wait(3_000),
        // Another full pull at 5s finishes at 6.2s and fails.
        Action::Wait(1_000),
        Action::Down(90.0),
        Action::Move(240.0),
        Action::Up,
        Action::Wait(3_000),
    ];

    for action in script {
        let event = match action {
            Action::Down(y) => adapter.mouse_down(Point::new(x, y), PointerButtons::PRIMARY),
            Action::Move(y) => adapter.mouse_move(Point::new(x, y), PointerButtons::PRIMARY),
            Action::Up => Some(adapter.mouse_up()),
            Action::Wait(ms) => {
                for _ in 0..ms / FRAME_MS {
                    frame(&mut service, &clock, &in_flight, None);
                }
                continue;
            }
        };
        frame(&mut service, &clock, &in_flight, event);
    }

    service.stop();
}

/// Advance one frame: deliver input, finish a due refresh, fire due timers.
fn frame<S, R>(
    service: &mut PullService<FeedError, S, R, ManualClock>,
    clock: &ManualClock,
    in_flight: &Cell<Option<(RefreshTicket, u64)>>,
    event: Option<GestureEvent>,
) where
    S: understory_pull_to_refresh::ScrollSource,
    R: understory_pull_to_refresh::Refresher,
{
    clock.advance(FRAME_MS);
    if let Some(event) = event {
        service.send(event);
    }
    if let Some((ticket, done_at)) = in_flight.get()
        && clock.now() >= done_at
    {
        in_flight.set(None);
        if let Err(err) = service.settle(ticket, simulated_outcome(clock.now())) {
            tracing::warn!(%err, "refresh outcome dropped");
        }
    }
    service.update();
}

/// Fails during the second half of every ten-second window.
fn simulated_outcome(now: u64) -> Result<(), FeedError> {
    if (now / 1_000) % 10 >= 5 {
        Err(FeedError("simulated failure while refreshing"))
    } else {
        Ok(())
    }
}
