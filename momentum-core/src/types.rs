//! Value types that flow through motion streams.

use serde::{Deserialize, Serialize};

/// A point or vector in two dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    /// Create a point from its coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A size in two dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    /// Create a size from its width and height.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// A point expressed as a distance and an angle in radians.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PolarCoords {
    pub distance: f64,
    pub angle: f64,
}

/// A value paired with the time, in milliseconds, at which it was received.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Timestamped<T> {
    pub value: T,
    pub timestamp: f64,
}

/// Where a value sits relative to a limit or range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdRegion {
    Below,
    Within,
    Above,
}

/// Values that support per-component arithmetic.
///
/// Scalars apply the operation directly. Compound values apply it to each
/// component independently.
pub trait Arithmetic: Clone + 'static {
    /// Combine `self` and `other` component-wise.
    fn combine(&self, other: &Self, operation: fn(f64, f64) -> f64) -> Self;

    /// Euclidean distance between `self` and `other`.
    fn distance(&self, other: &Self) -> f64;
}

impl Arithmetic for f64 {
    fn combine(&self, other: &Self, operation: fn(f64, f64) -> f64) -> Self {
        operation(*self, *other)
    }

    fn distance(&self, other: &Self) -> f64 {
        (self - other).abs()
    }
}

impl Arithmetic for Point2D {
    fn combine(&self, other: &Self, operation: fn(f64, f64) -> f64) -> Self {
        Point2D {
            x: operation(self.x, other.x),
            y: operation(self.y, other.y),
        }
    }

    fn distance(&self, other: &Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl Arithmetic for Dimensions {
    fn combine(&self, other: &Self, operation: fn(f64, f64) -> f64) -> Self {
        Dimensions {
            width: operation(self.width, other.width),
            height: operation(self.height, other.height),
        }
    }

    fn distance(&self, other: &Self) -> f64 {
        (self.width - other.width).hypot(self.height - other.height)
    }
}

/// Values with a defined opposite.
pub trait Invertible: Sized {
    /// The opposite value, if there is one.
    fn invert(&self) -> Option<Self>;
}

impl Invertible for bool {
    fn invert(&self) -> Option<Self> {
        Some(!self)
    }
}

impl Invertible for f64 {
    fn invert(&self) -> Option<Self> {
        if *self == 0.0 {
            Some(1.0)
        } else if *self == 1.0 {
            Some(0.0)
        } else {
            None
        }
    }
}
