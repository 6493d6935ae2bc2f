//! Integer geometry
//!
//! Scroll offsets, pointer positions and flick velocities are all measured in
//! whole device units, so a single integer point type covers all three.

use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// 2D point in device units
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// True when both components are zero
    pub const fn is_zero(&self) -> bool {
        self.x == 0 && self.y == 0
    }

    /// Largest absolute component (Chebyshev length)
    pub fn max_abs(&self) -> i32 {
        self.x.saturating_abs().max(self.y.saturating_abs())
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x.saturating_add(rhs.x), self.y.saturating_add(rhs.y))
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        *self = *self + rhs;
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x.saturating_sub(rhs.x), self.y.saturating_sub(rhs.y))
    }
}

impl SubAssign for Point {
    fn sub_assign(&mut self, rhs: Point) {
        *self = *self - rhs;
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(self.x.saturating_neg(), self.y.saturating_neg())
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Point::new(x, y)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_arithmetic() {
        let a = Point::new(10, -4);
        let b = Point::new(3, 6);

        assert_eq!(a + b, Point::new(13, 2));
        assert_eq!(a - b, Point::new(7, -10));
        assert_eq!(-a, Point::new(-10, 4));

        let mut c = a;
        c -= b;
        c += b;
        assert_eq!(c, a);
    }

    #[test]
    fn test_point_saturates() {
        let p = Point::new(i32::MAX, i32::MIN) + Point::new(1, -1);
        assert_eq!(p, Point::new(i32::MAX, i32::MIN));
        assert_eq!(Point::new(i32::MIN, 0).max_abs(), i32::MAX);
    }

    #[test]
    fn test_point_zero() {
        assert!(Point::ZERO.is_zero());
        assert!(!Point::new(0, 1).is_zero());
        assert_eq!(Point::new(-7, 3).max_abs(), 7);
        assert_eq!(Point::new(2, 5).to_string(), "(2, 5)");
    }
}
