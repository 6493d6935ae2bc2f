//! Flick gesture engine
//!
//! [`FlickCharm`] sits in front of one or more scrollable surfaces and turns
//! press/drag/release sequences into scrolling, with inertial deceleration
//! after a flick. The host routes every pointer event through
//! [`FlickCharm::filter_event`] before delivering it, drains replayed events
//! with [`FlickCharm::drain_synthetic`], and calls [`FlickCharm::tick`]
//! whenever the timer fires.
//!
//! ```rust
//! use std::sync::Arc;
//! use parking_lot::Mutex;
//! use flick_charm::{FlickAxes, FlickCharm, FlickState, ScrollableSurface, VirtualSurface};
//! use flick_core::events::{event_types::*, PointerButton, SurfaceId};
//! use flick_core::{Event, Point};
//!
//! let id = SurfaceId(1);
//! let surface = Arc::new(Mutex::new(VirtualSurface::new(0, 2000).with_offset(Point::new(0, 500))));
//!
//! let mut charm = FlickCharm::new();
//! charm.activate(id, surface.clone(), FlickAxes::Vertical).unwrap();
//!
//! let at = |t, y| Event::pointer(t, id, Point::new(50, y), PointerButton::Primary);
//! charm.filter_event(&at(POINTER_DOWN, 300));
//! charm.filter_event(&at(POINTER_MOVE, 280));
//! charm.filter_event(&at(POINTER_MOVE, 200));
//! assert_eq!(charm.state(id), Some(FlickState::ManualScroll));
//! assert_eq!(surface.lock().scroll_offset().y, 600);
//! ```

use std::time::Instant;

use flick_core::events::event_types::{self, POINTER_DOWN, POINTER_MOVE, POINTER_UP, SETTLE};
use flick_core::events::{EventData, PointerButton, PointerButtons, SurfaceId};
use flick_core::fsm::{StateMachine, Transition};
use flick_core::{Event, EventOrigin, Point};
use rustc_hash::FxHashMap;

use crate::axis::{FlickAxes, ScrollSetter};
use crate::config::FlickConfig;
use crate::error::{FlickError, Result};
use crate::physics::deaccelerate_with;
use crate::replay::{IgnoreSet, SyntheticQueue};
use crate::state::FlickState;
use crate::surface::SharedSurface;
use crate::timer::{IntervalTimer, TimerService};

/// What the host should do with an event after filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterResult {
    /// Deliver the event to the surface as usual
    Pass,
    /// The engine swallowed the event; do not deliver it
    Consumed,
}

/// Gesture bookkeeping for one surface
struct TrackedSurface {
    surface: SharedSurface,
    setter: ScrollSetter,
    fsm: StateMachine<FlickState>,
    /// Local position of the press that started the gesture
    press_pos: Point,
    /// Screen position of that press
    press_screen: Point,
    /// Scroll offset captured at that press
    offset: Point,
    /// Cursor position at the previous velocity sample
    drag_pos: Point,
    speed: Point,
    ignored: IgnoreSet,
}

impl TrackedSurface {
    fn new(surface: SharedSurface, axes: FlickAxes) -> Self {
        Self {
            surface,
            setter: axes.setter(),
            fsm: StateMachine::new(FlickState::Steady),
            press_pos: Point::ZERO,
            press_screen: Point::ZERO,
            offset: Point::ZERO,
            drag_pos: Point::ZERO,
            speed: Point::ZERO,
            ignored: IgnoreSet::default(),
        }
    }

    fn scroll_offset(&self) -> Point {
        self.surface.lock().scroll_offset()
    }

    fn scroll_to(&self, offset: Point) {
        let mut surface = self.surface.lock();
        self.setter.apply(&mut *surface, offset);
    }
}

/// Read-only view of a tracked surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSnapshot {
    pub state: FlickState,
    pub axes: FlickAxes,
    pub press_position: Point,
    pub press_offset: Point,
    pub drag_anchor: Point,
    pub velocity: Point,
    pub scroll_offset: Point,
    /// Replayed events still expected back
    pub ignored: usize,
}

/// Outcome of one timer tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Surfaces that were moving during this tick
    pub active: usize,
    /// Surfaces whose momentum ran out during this tick
    pub settled: usize,
    /// The tick found nothing moving and stopped the timer
    pub timer_stopped: bool,
}

/// Kinetic drag-to-scroll for any number of surfaces
pub struct FlickCharm<T: TimerService = IntervalTimer> {
    config: FlickConfig,
    surfaces: FxHashMap<SurfaceId, TrackedSurface>,
    synthetic: SyntheticQueue,
    timer: T,
    /// Last screen position reported by real pointer input
    cursor: Point,
}

impl Default for FlickCharm<IntervalTimer> {
    fn default() -> Self {
        Self::new()
    }
}

impl FlickCharm<IntervalTimer> {
    /// Engine with the default configuration and a poll-driven timer
    pub fn new() -> Self {
        Self {
            config: FlickConfig::default(),
            surfaces: FxHashMap::default(),
            synthetic: SyntheticQueue::new(),
            timer: IntervalTimer::new(),
            cursor: Point::ZERO,
        }
    }

    /// Engine with a custom configuration and a poll-driven timer
    pub fn with_config(config: FlickConfig) -> Result<Self> {
        Self::with_timer(IntervalTimer::new(), config)
    }

    /// Tick once if the timer fell due by `now`; returns whether it did
    ///
    /// Call once per frame with the host's clock. A stalled frame still runs
    /// a single tick, so drag velocity is sampled against real motion.
    pub fn advance(&mut self, now: Instant) -> bool {
        if !self.timer.poll(now) {
            return false;
        }
        self.tick();
        true
    }
}

impl<T: TimerService> FlickCharm<T> {
    /// Engine driven by a host-provided timer
    pub fn with_timer(timer: T, config: FlickConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            surfaces: FxHashMap::default(),
            synthetic: SyntheticQueue::new(),
            timer,
            cursor: Point::ZERO,
        })
    }

    pub fn config(&self) -> &FlickConfig {
        &self.config
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    pub fn is_timer_active(&self) -> bool {
        self.timer.is_active()
    }

    /// Last screen position seen on real pointer input
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Start flicking `surface` along `axes`
    ///
    /// Registering an id that is already tracked replaces its record; replayed
    /// events the old record was still waiting for stay ignored.
    pub fn activate(&mut self, id: SurfaceId, surface: SharedSurface, axes: FlickAxes) -> Result<()> {
        {
            let mut target = surface.lock();
            if !axes.axes().iter().any(|&axis| target.can_scroll(axis)) {
                tracing::warn!("{} cannot scroll {}; flick not activated", id, axes);
                return Err(FlickError::NotScrollable { surface: id, axes });
            }
            target.hide_scrollbars();
        }

        let mut tracked = TrackedSurface::new(surface, axes);
        if let Some(previous) = self.surfaces.remove(&id) {
            tracing::debug!("{} re-activated, replacing previous record", id);
            tracked.ignored.absorb(previous.ignored);
        } else {
            tracing::debug!("{} activated ({:?})", id, axes);
        }
        self.surfaces.insert(id, tracked);
        Ok(())
    }

    /// Stop flicking `id`; false if it was not tracked
    pub fn deactivate(&mut self, id: SurfaceId) -> bool {
        let removed = self.surfaces.remove(&id).is_some();
        if removed {
            tracing::debug!("{} deactivated", id);
        }
        removed
    }

    pub fn is_tracked(&self, id: SurfaceId) -> bool {
        self.surfaces.contains_key(&id)
    }

    pub fn tracked_count(&self) -> usize {
        self.surfaces.len()
    }

    pub fn state(&self, id: SurfaceId) -> Option<FlickState> {
        self.surfaces.get(&id).map(|t| t.fsm.current_state())
    }

    pub fn velocity(&self, id: SurfaceId) -> Option<Point> {
        self.surfaces.get(&id).map(|t| t.speed)
    }

    pub fn snapshot(&self, id: SurfaceId) -> Option<SurfaceSnapshot> {
        self.surfaces.get(&id).map(|t| SurfaceSnapshot {
            state: t.fsm.current_state(),
            axes: t.setter.axes(),
            press_position: t.press_pos,
            press_offset: t.offset,
            drag_anchor: t.drag_pos,
            velocity: t.speed,
            scroll_offset: t.scroll_offset(),
            ignored: t.ignored.len(),
        })
    }

    /// Recent state transitions of `id`, oldest first
    pub fn history(&self, id: SurfaceId) -> Option<Vec<Transition<FlickState>>> {
        self.surfaces
            .get(&id)
            .map(|t| t.fsm.history().copied().collect())
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Classify one input event
    ///
    /// Only unmodified pointer press/move/release events addressed to a
    /// tracked surface can change state; everything else passes through.
    pub fn filter_event(&mut self, event: &Event) -> FilterResult {
        if !event_types::is_pointer_button_or_motion(event.event_type) {
            return FilterResult::Pass;
        }
        let EventData::Pointer {
            position,
            screen_position,
            buttons,
            modifiers,
            ..
        } = event.data
        else {
            return FilterResult::Pass;
        };

        if event.origin == EventOrigin::User {
            self.cursor = screen_position;
        }
        if modifiers.any() {
            return FilterResult::Pass;
        }

        let Some(tracked) = self.surfaces.get_mut(&event.target) else {
            return FilterResult::Pass;
        };

        if let EventOrigin::Synthetic(id) = event.origin {
            if tracked.ignored.take(id) {
                tracing::trace!("{} replayed event {:?} let through", event.target, id);
                return FilterResult::Pass;
            }
        }

        // Only a plain primary-button press starts a gesture
        if tracked.fsm.is_in(FlickState::Steady)
            && event.event_type == POINTER_DOWN
            && buttons != PointerButtons::PRIMARY
        {
            return FilterResult::Pass;
        }

        let Some(transition) = tracked.fsm.send(event.event_type) else {
            return FilterResult::Pass;
        };
        if transition.from != transition.to {
            tracing::debug!(
                "{} {:?} -> {:?} at {}",
                event.target,
                transition.from,
                transition.to,
                position
            );
        }

        let mut result = FilterResult::Pass;
        let mut start_timer = false;

        match (transition.from, event.event_type) {
            (FlickState::Steady, POINTER_DOWN) => {
                tracked.press_pos = position;
                tracked.press_screen = screen_position;
                tracked.offset = tracked.scroll_offset();
            }
            (FlickState::Pressed, POINTER_UP) => {
                // Nothing was dragged: give the surface its click back
                let press = Event::pointer(
                    POINTER_DOWN,
                    event.target,
                    tracked.press_pos,
                    PointerButton::Primary,
                )
                .with_screen_position(tracked.press_screen);

                tracked.ignored.insert(self.synthetic.push(press));
                tracked.ignored.insert(self.synthetic.push(event.clone()));
            }
            (FlickState::Pressed, POINTER_MOVE) => {
                tracked.drag_pos = self.cursor;
                start_timer = true;
            }
            (FlickState::ManualScroll, POINTER_MOVE) => {
                let delta = position - tracked.press_pos;
                tracked.scroll_to(tracked.offset - delta);
            }
            (FlickState::AutoScroll, POINTER_DOWN) => {
                tracked.speed = Point::ZERO;
                tracked.press_pos = position;
                tracked.press_screen = screen_position;
                tracked.offset = tracked.scroll_offset();
            }
            (FlickState::AutoScroll, POINTER_UP) => {
                tracked.speed = Point::ZERO;
            }
            (FlickState::Stop, POINTER_MOVE) => {
                tracked.drag_pos = self.cursor;
                start_timer = true;
                result = FilterResult::Consumed;
            }
            // ManualScroll + up, Stop + up: state change only
            _ => {}
        }

        if start_timer && !self.timer.is_active() {
            self.timer.start(self.config.tick_interval());
        }
        result
    }

    /// Take the replayed events the host must deliver next, in order
    ///
    /// Each one should go back through [`filter_event`](Self::filter_event)
    /// (which lets it through once) and then to its target surface.
    pub fn drain_synthetic(&mut self) -> Vec<Event> {
        self.synthetic.drain().collect()
    }

    pub fn pending_synthetic(&self) -> usize {
        self.synthetic.len()
    }

    // =========================================================================
    // Timer
    // =========================================================================

    /// Advance every moving surface by one timer period
    ///
    /// Dragged surfaces sample their velocity from the cursor; released
    /// surfaces decelerate and scroll by their velocity. The timer is stopped
    /// when no surface is moving.
    pub fn tick(&mut self) -> TickReport {
        let mut report = TickReport::default();
        let cursor = self.cursor;

        for (id, tracked) in self.surfaces.iter_mut() {
            let state = tracked.fsm.current_state();
            if !state.is_moving() {
                continue;
            }
            report.active += 1;

            match state {
                FlickState::ManualScroll => {
                    tracked.speed = cursor - tracked.drag_pos;
                    tracked.drag_pos = cursor;
                    tracing::trace!("{} drag velocity {}", id, tracked.speed);
                }
                _ => {
                    tracked.speed = deaccelerate_with(tracked.speed, &self.config);

                    let position = tracked.scroll_offset();
                    tracked.scroll_to(position - tracked.speed);
                    tracing::trace!(
                        "{} auto-scroll velocity {} offset {}",
                        id,
                        tracked.speed,
                        position - tracked.speed
                    );

                    if tracked.speed.is_zero() {
                        tracked.fsm.send(SETTLE);
                        report.settled += 1;
                        tracing::debug!("{} settled", id);
                    }
                }
            }
        }

        if report.active == 0 {
            report.timer_stopped = self.timer.is_active();
            self.timer.stop();
        }
        report
    }
}
