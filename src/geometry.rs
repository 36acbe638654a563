//! Plain geometry value types shared by the manifest loaders.
//!
//! [`Rect`] is a region of interest inside a source image, [`Size`] is an
//! image's declared dimensions and [`Pivot`] is a normalized anchor within a
//! frame. None of these carry behavior beyond bounds arithmetic.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A rectangular area within an image, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Unpack into `(x, y, w, h)`.
    pub fn xywh(&self) -> (i32, i32, i32, i32) {
        (self.x, self.y, self.w, self.h)
    }

    /// True if the rectangle fits inside an image of the given size.
    /// Sums are computed in `i64`.
    pub fn contains_within(&self, size: Size) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x as i64 + self.w as i64 <= size.w as i64
            && self.y as i64 + self.h as i64 <= size.h as i64
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) {}x{}", self.x, self.y, self.w, self.h)
    }
}

/// Width and height of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Size {
    pub w: i32,
    pub h: i32,
}

impl Size {
    pub fn new(w: i32, h: i32) -> Self {
        Self { w, h }
    }

    /// Both dimensions are strictly positive.
    pub fn is_valid(&self) -> bool {
        self.w > 0 && self.h > 0
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.w, self.h)
    }
}

/// Anchor point of a frame, as a fraction of its width and height.
///
/// Carried through loading for the renderer; frame selection ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Pivot {
    pub x: f64,
    pub y: f64,
}

impl Pivot {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both components lie in `[0, 1]`, bounds included.
    pub fn is_valid(&self) -> bool {
        (0.0..=1.0).contains(&self.x) && (0.0..=1.0).contains(&self.y)
    }
}

impl fmt::Display for Pivot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_touching_the_edges_fits() {
        let size = Size::new(64, 16);
        assert!(Rect::new(0, 0, 64, 16).contains_within(size));
        assert!(Rect::new(48, 0, 16, 16).contains_within(size));
    }

    #[test]
    fn rect_past_the_edges_does_not_fit() {
        let size = Size::new(64, 16);
        assert!(!Rect::new(49, 0, 16, 16).contains_within(size));
        assert!(!Rect::new(0, 1, 16, 16).contains_within(size));
        assert!(!Rect::new(-1, 0, 16, 16).contains_within(size));
        assert!(!Rect::new(0, -4, 16, 16).contains_within(size));
    }

    #[test]
    fn rect_with_overflowing_extent_does_not_fit() {
        let size = Size::new(64, 64);
        assert!(!Rect::new(i32::MAX, 0, i32::MAX, 1).contains_within(size));
    }

    #[test]
    fn size_needs_both_dimensions() {
        assert!(Size::new(1, 1).is_valid());
        assert!(!Size::new(0, 16).is_valid());
        assert!(!Size::new(16, -1).is_valid());
    }

    #[test]
    fn pivot_bounds_are_inclusive() {
        assert!(Pivot::new(0.0, 1.0).is_valid());
        assert!(Pivot::new(0.5, 0.5).is_valid());
        assert!(!Pivot::new(1.01, 0.5).is_valid());
        assert!(!Pivot::new(0.5, -0.1).is_valid());
        assert!(!Pivot::new(f64::NAN, 0.5).is_valid());
    }

    #[test]
    fn missing_pivot_fields_default_to_zero() {
        let p: Pivot = serde_json::from_str(r#"{"x": 0.5}"#).unwrap();
        assert_eq!(p, Pivot::new(0.5, 0.0));
    }
}
