//! Screen-space geometry for hierarchy nodes.
//!
//! uiautomator writes node bounds as `[left,top][right,bottom]`. Bounds that do
//! not match that shape are treated as the zero rectangle rather than failing
//! the whole dump.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static BOUNDS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(\d+),(\d+)\]\[(\d+),(\d+)\]").expect("bounds pattern is a valid regex")
});

/// A rectangle in screen pixel coordinates.
///
/// `left <= right` and `top <= bottom` are not guaranteed by the input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        left: 0,
        top: 0,
        right: 0,
        bottom: 0,
    };

    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Midpoint of the rectangle, rounded half up on each axis.
    pub fn center(&self) -> Point {
        Point {
            x: midpoint(self.left, self.right),
            y: midpoint(self.top, self.bottom),
        }
    }

    /// Width and height. Negative values are passed through unchanged.
    pub fn size(&self) -> Size {
        Size {
            width: self.right.wrapping_sub(self.left),
            height: self.bottom.wrapping_sub(self.top),
        }
    }
}

fn midpoint(a: i32, b: i32) -> i32 {
    let sum = i64::from(a) + i64::from(b);
    // floor((sum + 1) / 2) is round-half-up of sum / 2, including negatives
    (sum + 1).div_euclid(2) as i32
}

/// Parse a `[L,T][R,B]` bounds string.
///
/// Returns [`Rect::ZERO`] when the string does not contain the pattern or a
/// coordinate does not fit in an `i32`.
///
/// # Examples
///
/// ```
/// use droidscope::hierarchy::geometry::{Rect, parse_rect};
///
/// assert_eq!(parse_rect("[0,72][1080,200]"), Rect::new(0, 72, 1080, 200));
/// assert_eq!(parse_rect("garbage"), Rect::ZERO);
/// ```
pub fn parse_rect(raw: &str) -> Rect {
    let Some(caps) = BOUNDS_PATTERN.captures(raw) else {
        return Rect::ZERO;
    };

    let coord = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<i32>().ok());

    match (coord(1), coord(2), coord(3), coord(4)) {
        (Some(left), Some(top), Some(right), Some(bottom)) => Rect::new(left, top, right, bottom),
        _ => Rect::ZERO,
    }
}
