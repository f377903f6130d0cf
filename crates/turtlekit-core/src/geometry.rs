//! Geometry primitives for the turtle's coordinate space
//!
//! The turtle lives on a Cartesian plane centered on the origin with the
//! y-axis pointing up. Headings are degrees, 90 = up, and are converted to
//! radians only at the point where coordinates are computed.

use serde::{Deserialize, Serialize};

use crate::constants::HOME_HEADING;

/// A point in turtle space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The turtle's position and heading at an instant
///
/// Heading is unbounded: repeated turns may grow it past 360 or below 0.
/// Only the trigonometric functions consume it, and those are periodic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    /// Heading in degrees, 90 = up
    pub heading: f64,
}

impl Pose {
    pub fn new(x: f64, y: f64, heading: f64) -> Self {
        Self { x, y, heading }
    }

    /// The pose the turtle starts from and returns to on `home`
    pub fn home() -> Self {
        Self::new(0.0, 0.0, HOME_HEADING)
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Unit direction vector for the current heading
    pub fn direction(&self) -> (f64, f64) {
        let radians = self.heading.to_radians();
        (radians.cos(), radians.sin())
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::home()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_to() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance_to(b), 5.0);
    }

    #[test]
    fn test_home_pose() {
        let pose = Pose::home();
        assert_eq!(pose.x, 0.0);
        assert_eq!(pose.y, 0.0);
        assert_eq!(pose.heading, 90.0);
    }

    #[test]
    fn test_direction_up_at_home() {
        let (dx, dy) = Pose::home().direction();
        assert!(dx.abs() < 1e-12);
        assert!((dy - 1.0).abs() < 1e-12);
    }
}
