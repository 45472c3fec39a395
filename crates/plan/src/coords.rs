//! Typed canvas coordinates.
//!
//! The plan canvas uses whole pixels. Positions are signed so a pointer
//! that strays outside the canvas still produces a sensible point; sizes
//! are unsigned because a normalized rect never has negative extent.

use glam::{IVec2, UVec2};
use serde::{Deserialize, Serialize};
use std::ops::Sub;

/// Position in canvas space, in pixels from the canvas top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CanvasPoint(pub IVec2);

/// Width and height in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CanvasSize(pub UVec2);

/// An axis-aligned rectangle in canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CanvasRect {
    pub origin: CanvasPoint,
    pub size: CanvasSize,
}

// === CanvasPoint ===

impl CanvasPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self(IVec2::new(x, y))
    }

    /// Round a fractional pointer position to the nearest pixel.
    pub fn from_f32(x: f32, y: f32) -> Self {
        Self::new(x.round() as i32, y.round() as i32)
    }

    pub fn x(&self) -> i32 {
        self.0.x
    }

    pub fn y(&self) -> i32 {
        self.0.y
    }
}

impl From<IVec2> for CanvasPoint {
    fn from(v: IVec2) -> Self {
        Self(v)
    }
}

impl From<CanvasPoint> for IVec2 {
    fn from(p: CanvasPoint) -> Self {
        p.0
    }
}

impl Sub for CanvasPoint {
    type Output = IVec2;

    fn sub(self, other: CanvasPoint) -> Self::Output {
        self.0 - other.0
    }
}

// === CanvasSize ===

impl CanvasSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self(UVec2::new(width, height))
    }

    pub fn width(&self) -> u32 {
        self.0.x
    }

    pub fn height(&self) -> u32 {
        self.0.y
    }

    /// True when both dimensions are strictly greater than `min`.
    pub fn exceeds(&self, min: u32) -> bool {
        self.0.x > min && self.0.y > min
    }
}

impl From<UVec2> for CanvasSize {
    fn from(v: UVec2) -> Self {
        Self(v)
    }
}

// === CanvasRect ===

impl CanvasRect {
    pub fn new(origin: CanvasPoint, size: CanvasSize) -> Self {
        Self { origin, size }
    }

    /// The rectangle spanned by two corners, in either drag direction.
    pub fn from_corners(a: CanvasPoint, b: CanvasPoint) -> Self {
        let min = a.0.min(b.0);
        let extent = (a.0 - b.0).abs();
        Self {
            origin: CanvasPoint(min),
            size: CanvasSize(extent.as_uvec2()),
        }
    }

    pub fn x(&self) -> i32 {
        self.origin.x()
    }

    pub fn y(&self) -> i32 {
        self.origin.y()
    }

    pub fn width(&self) -> u32 {
        self.size.width()
    }

    pub fn height(&self) -> u32 {
        self.size.height()
    }

    /// Bottom-right corner.
    pub fn max(&self) -> CanvasPoint {
        CanvasPoint(self.origin.0 + self.size.0.as_ivec2())
    }

    /// Center point, rounded toward the origin.
    pub fn center(&self) -> CanvasPoint {
        CanvasPoint(self.origin.0 + (self.size.0 / 2).as_ivec2())
    }

    /// Point containment, inclusive of all four edges.
    pub fn contains(&self, point: CanvasPoint) -> bool {
        let max = self.max();
        point.x() >= self.x() && point.x() <= max.x() && point.y() >= self.y() && point.y() <= max.y()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_corners_normalizes_any_drag_direction() {
        let forward = CanvasRect::from_corners(CanvasPoint::new(100, 100), CanvasPoint::new(260, 320));
        let backward = CanvasRect::from_corners(CanvasPoint::new(260, 320), CanvasPoint::new(100, 100));
        let crossed = CanvasRect::from_corners(CanvasPoint::new(260, 100), CanvasPoint::new(100, 320));

        assert_eq!(forward, backward);
        assert_eq!(forward, crossed);
        assert_eq!(forward.origin, CanvasPoint::new(100, 100));
        assert_eq!(forward.size, CanvasSize::new(160, 220));
    }

    #[test]
    fn contains_is_inclusive_of_edges() {
        let rect = CanvasRect::new(CanvasPoint::new(10, 10), CanvasSize::new(30, 40));
        assert!(rect.contains(CanvasPoint::new(10, 10)));
        assert!(rect.contains(CanvasPoint::new(40, 50)));
        assert!(rect.contains(CanvasPoint::new(25, 30)));
        assert!(!rect.contains(CanvasPoint::new(9, 30)));
        assert!(!rect.contains(CanvasPoint::new(41, 30)));
        assert!(!rect.contains(CanvasPoint::new(25, 51)));
    }

    #[test]
    fn exceeds_requires_both_dimensions() {
        assert!(CanvasSize::new(21, 21).exceeds(20));
        assert!(!CanvasSize::new(20, 100).exceeds(20));
        assert!(!CanvasSize::new(100, 20).exceeds(20));
    }

    #[test]
    fn from_f32_rounds_to_nearest_pixel() {
        assert_eq!(CanvasPoint::from_f32(10.4, 10.6), CanvasPoint::new(10, 11));
    }
}
