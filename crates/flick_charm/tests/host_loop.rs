//! Integration tests driving the engine the way a host toolkit would
//!
//! These tests verify that:
//! - A tap is replayed to the surface exactly once, via the replay queue
//! - A drag never produces a click
//! - Several surfaces share one timer that stops once all of them settle
//! - A poll-driven host loop runs the right number of ticks
//! - A stalled frame runs one tick and keeps the drag velocity

use std::sync::Arc;
use std::time::{Duration, Instant};

use flick_charm::{
    FilterResult, FlickAxes, FlickCharm, FlickState, ScrollableSurface, VirtualSurface,
};
use flick_core::events::event_types::{POINTER_DOWN, POINTER_MOVE, POINTER_UP};
use flick_core::events::{PointerButton, SurfaceId};
use flick_core::{Event, Point};
use parking_lot::Mutex;

const LIST: SurfaceId = SurfaceId(1);
const GALLERY: SurfaceId = SurfaceId(2);

/// Minimal host: routes events through the filter and delivers survivors
struct Host {
    charm: FlickCharm,
    surfaces: Vec<(SurfaceId, Arc<Mutex<VirtualSurface>>)>,
    consumed: usize,
}

impl Host {
    fn new() -> Self {
        let list = Arc::new(Mutex::new(
            VirtualSurface::new(0, 4000).with_offset(Point::new(0, 1000)),
        ));
        let gallery = Arc::new(Mutex::new(
            VirtualSurface::new(4000, 0).with_offset(Point::new(1000, 0)),
        ));

        let mut charm = FlickCharm::new();
        charm
            .activate(LIST, list.clone(), FlickAxes::Vertical)
            .unwrap();
        charm
            .activate(GALLERY, gallery.clone(), FlickAxes::Horizontal)
            .unwrap();

        Self {
            charm,
            surfaces: vec![(LIST, list), (GALLERY, gallery)],
            consumed: 0,
        }
    }

    fn surface(&self, id: SurfaceId) -> &Arc<Mutex<VirtualSurface>> {
        &self
            .surfaces
            .iter()
            .find(|(sid, _)| *sid == id)
            .unwrap()
            .1
    }

    fn route(&mut self, event: &Event) {
        match self.charm.filter_event(event) {
            FilterResult::Pass => self.surface(event.target).lock().deliver(event),
            FilterResult::Consumed => self.consumed += 1,
        }
    }

    /// Deliver user input, flushing replayed events first
    fn send(&mut self, event: Event) {
        self.flush();
        self.route(&event);
    }

    fn flush(&mut self) {
        for replayed in self.charm.drain_synthetic() {
            self.route(&replayed);
        }
    }

    fn pointer(&mut self, event_type: u32, id: SurfaceId, x: i32, y: i32) {
        self.send(Event::pointer(event_type, id, Point::new(x, y), PointerButton::Primary));
    }

    fn offset(&self, id: SurfaceId) -> Point {
        self.surface(id).lock().scroll_offset()
    }
}

#[test]
fn test_tap_is_replayed_once() {
    let mut host = Host::new();

    host.pointer(POINTER_DOWN, LIST, 40, 60);
    host.pointer(POINTER_UP, LIST, 41, 60);
    host.flush();

    let list = host.surface(LIST).lock();
    // Original pair plus the replayed pair
    assert_eq!(list.delivered(), 4);
    assert_eq!(list.clicks(), &[Point::new(41, 60), Point::new(41, 60)]);
    drop(list);

    // The replay is not replayed again
    host.flush();
    assert_eq!(host.surface(LIST).lock().delivered(), 4);
    assert_eq!(host.charm.state(LIST), Some(FlickState::Steady));
    assert_eq!(host.charm.snapshot(LIST).unwrap().ignored, 0);
}

#[test]
fn test_drag_scrolls_without_replay() {
    let mut host = Host::new();

    host.pointer(POINTER_DOWN, LIST, 40, 300);
    for y in (100..=280).rev().step_by(20) {
        host.pointer(POINTER_MOVE, LIST, 40, y);
    }
    host.pointer(POINTER_UP, LIST, 40, 100);
    host.flush();

    assert_eq!(host.charm.pending_synthetic(), 0);
    assert_eq!(host.offset(LIST), Point::new(0, 1200));
    assert_eq!(host.consumed, 0);
}

#[test]
fn test_shared_timer_runs_until_every_surface_settles() {
    let mut host = Host::new();

    // Flick the list up by 8 per tick
    host.pointer(POINTER_DOWN, LIST, 50, 200);
    host.pointer(POINTER_MOVE, LIST, 50, 200);
    host.pointer(POINTER_MOVE, LIST, 50, 192);
    host.charm.tick();
    host.pointer(POINTER_UP, LIST, 50, 192);

    // Flick the gallery left by 20 per tick
    host.pointer(POINTER_DOWN, GALLERY, 300, 50);
    host.pointer(POINTER_MOVE, GALLERY, 300, 50);
    host.pointer(POINTER_MOVE, GALLERY, 320, 50);
    host.charm.tick();
    host.pointer(POINTER_UP, GALLERY, 320, 50);

    assert_eq!(host.charm.state(LIST), Some(FlickState::AutoScroll));
    assert_eq!(host.charm.state(GALLERY), Some(FlickState::AutoScroll));

    let mut ticks = 0;
    while host.charm.is_timer_active() {
        host.charm.tick();
        ticks += 1;
        assert!(ticks < 100, "timer never stopped");
    }

    // Gallery decays from 20 in 20 ticks; one more tick stops the timer
    assert_eq!(ticks, 21);
    assert_eq!(host.charm.state(LIST), Some(FlickState::Steady));
    assert_eq!(host.charm.state(GALLERY), Some(FlickState::Steady));
    assert!(host.offset(LIST).y > 1008);
    assert!(host.offset(GALLERY).x < 980);
}

#[test]
fn test_poll_driven_loop() {
    let mut host = Host::new();
    let t0 = Instant::now();
    let frame = Duration::from_millis(20);

    // The first frame sets the clock the timer starts on
    assert!(!host.charm.advance(t0));

    host.pointer(POINTER_DOWN, GALLERY, 300, 50);
    host.pointer(POINTER_MOVE, GALLERY, 300, 50);
    host.pointer(POINTER_MOVE, GALLERY, 305, 50);
    assert_eq!(host.charm.timer().until_next(t0), Some(frame));

    // Nothing due before the first interval has passed
    assert!(!host.charm.advance(t0 + Duration::from_millis(19)));
    assert!(host.charm.advance(t0 + frame));
    assert_eq!(host.charm.velocity(GALLERY), Some(Point::new(5, 0)));
    host.pointer(POINTER_UP, GALLERY, 305, 50);

    // 5 ticks to decay, 1 to notice and stop
    let mut now = t0 + frame;
    let mut ran = 0;
    while host.charm.is_timer_active() {
        now += frame;
        if host.charm.advance(now) {
            ran += 1;
        }
        assert!(ran < 100, "timer never stopped");
    }
    assert_eq!(ran, 6);
    assert_eq!(host.charm.state(GALLERY), Some(FlickState::Steady));
}

#[test]
fn test_stalled_frame_keeps_drag_momentum() {
    let mut host = Host::new();
    let t0 = Instant::now();
    assert!(!host.charm.advance(t0));

    host.pointer(POINTER_DOWN, LIST, 50, 400);
    host.pointer(POINTER_MOVE, LIST, 50, 400);
    host.pointer(POINTER_MOVE, LIST, 50, 300);

    // Five intervals late: one tick samples the whole drag
    assert!(host.charm.advance(t0 + Duration::from_millis(100)));
    assert_eq!(host.charm.velocity(LIST), Some(Point::new(0, -100)));

    host.pointer(POINTER_UP, LIST, 50, 300);
    assert_eq!(host.charm.state(LIST), Some(FlickState::AutoScroll));

    // Clamped to 64 then stepped
    assert!(host.charm.advance(t0 + Duration::from_millis(120)));
    assert_eq!(host.charm.velocity(LIST), Some(Point::new(0, -63)));
}
