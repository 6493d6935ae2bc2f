//! Axis modes and scroll-offset strategies

use flick_core::Point;
use serde::{Deserialize, Serialize};

use crate::surface::ScrollableSurface;

/// A single scroll axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Which axes a flick gesture is allowed to move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlickAxes {
    /// Horizontal scrolling only
    Horizontal,
    /// Vertical scrolling only
    Vertical,
    /// Both directions (free scroll)
    #[default]
    Both,
}

impl FlickAxes {
    /// Axes covered by this mode
    pub fn axes(&self) -> &'static [Axis] {
        match self {
            FlickAxes::Horizontal => &[Axis::Horizontal],
            FlickAxes::Vertical => &[Axis::Vertical],
            FlickAxes::Both => &[Axis::Horizontal, Axis::Vertical],
        }
    }

    /// Resolve the offset writer for this mode
    pub fn setter(&self) -> ScrollSetter {
        match self {
            FlickAxes::Horizontal => ScrollSetter {
                axes: *self,
                write: write_horizontal,
            },
            FlickAxes::Vertical => ScrollSetter {
                axes: *self,
                write: write_vertical,
            },
            FlickAxes::Both => ScrollSetter {
                axes: *self,
                write: write_both,
            },
        }
    }
}

impl std::fmt::Display for FlickAxes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FlickAxes::Horizontal => "horizontally",
            FlickAxes::Vertical => "vertically",
            FlickAxes::Both => "in either direction",
        };
        f.write_str(name)
    }
}

type WriteFn = fn(&mut dyn ScrollableSurface, Point);

/// Offset writer chosen once at registration
///
/// Writes only the axes its mode allows; the other axis of the surface is
/// left exactly as it was.
#[derive(Clone, Copy)]
pub struct ScrollSetter {
    axes: FlickAxes,
    write: WriteFn,
}

impl ScrollSetter {
    pub fn axes(&self) -> FlickAxes {
        self.axes
    }

    /// Move `surface` to `offset` along the allowed axes
    pub fn apply(&self, surface: &mut dyn ScrollableSurface, offset: Point) {
        (self.write)(surface, offset);
    }
}

impl std::fmt::Debug for ScrollSetter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollSetter").field("axes", &self.axes).finish()
    }
}

fn write_both(surface: &mut dyn ScrollableSurface, offset: Point) {
    surface.set_horizontal(offset.x);
    surface.set_vertical(offset.y);
}

fn write_horizontal(surface: &mut dyn ScrollableSurface, offset: Point) {
    surface.set_horizontal(offset.x);
}

fn write_vertical(surface: &mut dyn ScrollableSurface, offset: Point) {
    surface.set_vertical(offset.y);
}
