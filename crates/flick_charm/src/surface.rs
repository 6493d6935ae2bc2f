//! Scrollable surfaces
//!
//! [`ScrollableSurface`] is the capability a host widget implements to be
//! flickable. The engine only ever reads the current offset and writes one
//! axis at a time; clamping to the content range is the surface's business.

use std::sync::Arc;

use flick_core::events::event_types::{POINTER_DOWN, POINTER_UP};
use flick_core::{Event, Point};
use parking_lot::Mutex;

use crate::axis::Axis;

/// A viewport whose content can be scrolled
pub trait ScrollableSurface {
    /// Current horizontal and vertical scroll position
    fn scroll_offset(&self) -> Point;

    /// Set the horizontal scroll position
    fn set_horizontal(&mut self, value: i32);

    /// Set the vertical scroll position
    fn set_vertical(&mut self, value: i32);

    /// Whether the surface can scroll along `axis` at all
    fn can_scroll(&self, _axis: Axis) -> bool {
        true
    }

    /// Hide scrollbars; a flicked surface is dragged directly
    fn hide_scrollbars(&mut self) {}
}

/// Shared surface handle (host and engine both hold one)
pub type SharedSurface = Arc<Mutex<dyn ScrollableSurface + Send>>;

/// Wrap a surface into a [`SharedSurface`]
pub fn shared<S: ScrollableSurface + Send + 'static>(surface: S) -> SharedSurface {
    Arc::new(Mutex::new(surface))
}

/// In-memory scrollable surface
///
/// Behaves like a scroll area with two scrollbars ranging over `[0, max]`:
/// written values are clamped to the range. It also plays the host side of
/// event delivery, counting a click whenever a press is followed by a
/// release.
#[derive(Debug, Clone, Default)]
pub struct VirtualSurface {
    offset: Point,
    max: Point,
    scrollbars_hidden: bool,
    horizontal_writes: usize,
    vertical_writes: usize,
    delivered: usize,
    pressed: bool,
    clicks: Vec<Point>,
}

impl VirtualSurface {
    /// Create a surface scrollable over `[0, max_x] x [0, max_y]`
    pub fn new(max_x: i32, max_y: i32) -> Self {
        Self {
            max: Point::new(max_x.max(0), max_y.max(0)),
            ..Default::default()
        }
    }

    /// Start at a given offset (clamped)
    pub fn with_offset(mut self, offset: Point) -> Self {
        self.offset = self.clamp(offset);
        self
    }

    pub fn max(&self) -> Point {
        self.max
    }

    pub fn scrollbars_hidden(&self) -> bool {
        self.scrollbars_hidden
    }

    pub fn horizontal_writes(&self) -> usize {
        self.horizontal_writes
    }

    pub fn vertical_writes(&self) -> usize {
        self.vertical_writes
    }

    /// Deliver an event that the gesture filter let through
    pub fn deliver(&mut self, event: &Event) {
        self.delivered += 1;
        match event.event_type {
            POINTER_DOWN => self.pressed = true,
            POINTER_UP if self.pressed => {
                self.pressed = false;
                if let Some(position) = event.pointer_position() {
                    self.clicks.push(position);
                }
            }
            _ => {}
        }
    }

    /// Number of events delivered through [`deliver`](Self::deliver)
    pub fn delivered(&self) -> usize {
        self.delivered
    }

    /// Release positions of completed clicks
    pub fn clicks(&self) -> &[Point] {
        &self.clicks
    }

    fn clamp(&self, p: Point) -> Point {
        Point::new(p.x.clamp(0, self.max.x), p.y.clamp(0, self.max.y))
    }
}

impl ScrollableSurface for VirtualSurface {
    fn scroll_offset(&self) -> Point {
        self.offset
    }

    fn set_horizontal(&mut self, value: i32) {
        self.horizontal_writes += 1;
        self.offset.x = value.clamp(0, self.max.x);
    }

    fn set_vertical(&mut self, value: i32) {
        self.vertical_writes += 1;
        self.offset.y = value.clamp(0, self.max.y);
    }

    fn can_scroll(&self, axis: Axis) -> bool {
        match axis {
            Axis::Horizontal => self.max.x > 0,
            Axis::Vertical => self.max.y > 0,
        }
    }

    fn hide_scrollbars(&mut self) {
        self.scrollbars_hidden = true;
    }
}
