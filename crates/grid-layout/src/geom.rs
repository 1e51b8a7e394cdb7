//! Geometry primitives shared by the planner and the window backends.
//!
//! Rectangles use a bottom-up coordinate convention: `y` is the bottom edge
//! and grows upward, matching AppKit screen frames.

use serde::{Deserialize, Serialize};

/// Length of the overlap between the intervals `[a1, a2]` and `[b1, b2]`.
#[inline]
fn overlap_1d(a1: f64, a2: f64, b1: f64, b2: f64) -> f64 {
    let l = a1.max(b1);
    let r = a2.min(b2);
    (r - l).max(0.0)
}

/// Axis-aligned rectangle in screen points.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Bottom edge.
    pub y: f64,
    /// Width.
    pub w: f64,
    /// Height.
    pub h: f64,
}

impl Rect {
    /// Construct a rectangle from origin and size.
    #[inline]
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    /// Left edge.
    pub fn left(&self) -> f64 {
        self.x
    }

    #[inline]
    /// Right edge.
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    #[inline]
    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y
    }

    #[inline]
    /// Top edge.
    pub fn top(&self) -> f64 {
        self.y + self.h
    }

    /// Area in square points.
    #[inline]
    pub fn area(&self) -> f64 {
        self.w * self.h
    }

    /// Shrink the rectangle by `pad` on every side.
    pub fn inset(&self, pad: f64) -> Self {
        Self {
            x: self.x + pad,
            y: self.y + pad,
            w: self.w - 2.0 * pad,
            h: self.h - 2.0 * pad,
        }
    }

    /// True when the two rectangles share a region of positive area.
    ///
    /// Rectangles that merely touch along an edge do not intersect.
    pub fn intersects(&self, other: &Self) -> bool {
        overlap_1d(self.left(), self.right(), other.left(), other.right()) > 0.0
            && overlap_1d(self.bottom(), self.top(), other.bottom(), other.top()) > 0.0
    }

    /// True when `other` lies entirely within this rectangle, allowing `eps` slack.
    pub fn contains_rect(&self, other: &Self, eps: f64) -> bool {
        other.left() >= self.left() - eps
            && other.right() <= self.right() + eps
            && other.bottom() >= self.bottom() - eps
            && other.top() <= self.top() + eps
    }
}
