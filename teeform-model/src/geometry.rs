//! Pixel- and percent-space geometry for design placements.
//!
//! A placement is authored in pixels against a concrete canvas (the
//! product mockup as rendered on the submitting client) and stored as
//! percentages of that canvas, so a differently sized rendering can
//! reproduce it exactly.

/// A point in pixel space on some concrete canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An extent in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PixelSize {
    pub width: f64,
    pub height: f64,
}

impl PixelSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// The reference rectangle placements are normalized against.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether both dimensions are positive finite numbers. Normalization
    /// divides by these, so anything else is unusable.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }
}

/// A point expressed as percentages (0–100) of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PercentPoint {
    pub x: f64,
    pub y: f64,
}

impl PercentPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An extent expressed as percentages (0–100) of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PercentSize {
    pub width: f64,
    pub height: f64,
}

impl PercentSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}
