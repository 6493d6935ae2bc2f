//! Flick gesture engine
//!
//! Drag-to-scroll with inertial deceleration for any surface that can report
//! and set its scroll position.
//!
//! # Features
//!
//! - **Tap-through**: a press and release without motion is replayed to the
//!   surface so ordinary clicks keep working
//! - **1:1 dragging**: the offset follows the pointer while the button is held
//! - **Momentum**: after release the content keeps moving and decelerates by
//!   a fixed step per tick
//! - **Axis locking**: horizontal-only, vertical-only, or free scrolling
//! - **FSM-based state**: Steady, Pressed, ManualScroll, AutoScroll, Stop
//!
//! # Host integration
//!
//! 1. Implement [`ScrollableSurface`] for the scroll container and register
//!    it with [`FlickCharm::activate`].
//! 2. Pass each input event to [`FlickCharm::filter_event`]; deliver it
//!    unless the result is [`FilterResult::Consumed`].
//! 3. Before the next user input, deliver [`FlickCharm::drain_synthetic`]
//!    through the same filter.
//! 4. Call [`FlickCharm::tick`] every time the timer fires (or
//!    [`FlickCharm::advance`] from a frame loop).

pub mod axis;
pub mod config;
pub mod engine;
pub mod error;
pub mod physics;
pub mod replay;
pub mod state;
pub mod surface;
pub mod timer;

pub use axis::{Axis, FlickAxes, ScrollSetter};
pub use config::FlickConfig;
pub use engine::{FilterResult, FlickCharm, SurfaceSnapshot, TickReport};
pub use error::{FlickError, Result};
pub use physics::{deaccelerate, ticks_to_rest};
pub use state::FlickState;
pub use surface::{shared, ScrollableSurface, SharedSurface, VirtualSurface};
pub use timer::{IntervalTimer, TimerService};
