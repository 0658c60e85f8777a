//! Text overlays placed alongside a design.

/// A single line of text positioned on the canvas.
///
/// Geometry is stored in the same percent-of-canvas units as the image
/// placement itself, so overlays scale with the mockup the way the
/// design does.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TextOverlay {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// CSS-style color, e.g. `#2C3E50`.
    pub color: String,
    /// Font size as a percentage of canvas height.
    pub font_size: f64,
}
