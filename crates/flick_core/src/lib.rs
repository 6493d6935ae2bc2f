//! Flick Core
//!
//! This crate provides the toolkit-independent primitives the flick engine
//! is built on:
//!
//! - **Geometry**: integer device-unit points used for positions, offsets and velocities
//! - **Events**: pointer/key/wheel events as delivered by a host toolkit
//! - **State Machines**: event-driven state enums with a bounded transition log
//!
//! # Example
//!
//! ```rust
//! use flick_core::events::{event_types, Event, PointerButton, SurfaceId};
//! use flick_core::Point;
//!
//! let press = Event::pointer(
//!     event_types::POINTER_DOWN,
//!     SurfaceId(1),
//!     Point::new(10, 20),
//!     PointerButton::Primary,
//! );
//!
//! assert!(press.is_pointer());
//! assert_eq!(press.pointer_position(), Some(Point::new(10, 20)));
//! ```

pub mod events;
pub mod fsm;
pub mod geometry;

pub use events::{Event, EventData, EventOrigin, EventType, Modifiers, SurfaceId, SyntheticId};
pub use fsm::{StateMachine, StateTransitions, Transition};
pub use geometry::Point;
