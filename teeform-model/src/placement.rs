//! The placement normalizer.
//!
//! Converts between pixel coordinates on a reference canvas and
//! percentage coordinates independent of canvas size. The round trip
//! `to_pixels(to_percent(p, s, c), c)` reproduces `(p, s)` up to
//! floating-point rounding for any canvas with positive dimensions,
//! which is what lets a placement authored on one mockup size render
//! pixel-for-pixel on another.

use crate::error::{PlacementError, Result};
use crate::geometry::{CanvasSize, PercentPoint, PercentSize, PixelPoint, PixelSize};

/// A placement normalized to percentages of its reference canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PercentPlacement {
    pub position: PercentPoint,
    pub size: PercentSize,
}

impl PercentPlacement {
    /// Normalize a pixel-space placement against `canvas`.
    pub fn to_percent(
        position: PixelPoint,
        size: PixelSize,
        canvas: CanvasSize,
    ) -> Result<Self> {
        if !canvas.is_valid() {
            return Err(PlacementError::InvalidCanvas {
                width: canvas.width,
                height: canvas.height,
            });
        }

        let placement = Self {
            position: PercentPoint::new(
                position.x / canvas.width * 100.0,
                position.y / canvas.height * 100.0,
            ),
            size: PercentSize::new(
                size.width / canvas.width * 100.0,
                size.height / canvas.height * 100.0,
            ),
        };
        placement.ensure_finite()?;
        Ok(placement)
    }

    /// Project this placement back into pixel space on `canvas`.
    pub fn to_pixels(&self, canvas: CanvasSize) -> Result<(PixelPoint, PixelSize)> {
        if !canvas.is_valid() {
            return Err(PlacementError::InvalidCanvas {
                width: canvas.width,
                height: canvas.height,
            });
        }

        Ok((
            PixelPoint::new(
                self.position.x / 100.0 * canvas.width,
                self.position.y / 100.0 * canvas.height,
            ),
            PixelSize::new(
                self.size.width / 100.0 * canvas.width,
                self.size.height / 100.0 * canvas.height,
            ),
        ))
    }

    /// Reject placements that fall outside the canvas. Values are not
    /// clamped: a design dragged half off the mockup is a client bug the
    /// server should surface, not silently repair.
    pub fn ensure_in_bounds(&self) -> Result<()> {
        for (field, value) in [
            ("position.x", self.position.x),
            ("position.y", self.position.y),
            ("size.width", self.size.width),
            ("size.height", self.size.height),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(PlacementError::OutOfRange { field, value });
            }
        }
        Ok(())
    }

    fn ensure_finite(&self) -> Result<()> {
        for (field, value) in [
            ("position.x", self.position.x),
            ("position.y", self.position.y),
            ("size.width", self.size.width),
            ("size.height", self.size.height),
        ] {
            if !value.is_finite() {
                return Err(PlacementError::NotFinite { field });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "expected {a} ~= {b}");
    }

    #[test]
    fn round_trips_across_canvas_sizes() {
        let canvases = [
            CanvasSize::new(288.0, 288.0),
            CanvasSize::new(1920.0, 1080.0),
            CanvasSize::new(3.0, 7.0),
            CanvasSize::new(10_000.0, 450.0),
        ];
        let positions = [
            PixelPoint::new(0.0, 0.0),
            PixelPoint::new(86.4, 86.4),
            PixelPoint::new(1.5, 2.25),
        ];

        for canvas in canvases {
            for position in positions {
                let size = PixelSize::new(canvas.width / 4.0, canvas.height / 4.0);
                let pct = PercentPlacement::to_percent(position, size, canvas).unwrap();
                let (out_pos, out_size) = pct.to_pixels(canvas).unwrap();
                assert_close(out_pos.x, position.x);
                assert_close(out_pos.y, position.y);
                assert_close(out_size.width, size.width);
                assert_close(out_size.height, size.height);
            }
        }
    }

    #[test]
    fn same_percent_scales_to_other_canvas() {
        // Authored at 30%/30% on a 288px mockup, rendered on a 576px one.
        let authored = CanvasSize::new(288.0, 288.0);
        let rendered = CanvasSize::new(576.0, 576.0);
        let pct = PercentPlacement::to_percent(
            PixelPoint::new(86.4, 86.4),
            PixelSize::new(96.0, 96.0),
            authored,
        )
        .unwrap();

        let (pos, size) = pct.to_pixels(rendered).unwrap();
        assert_close(pos.x, 172.8);
        assert_close(pos.y, 172.8);
        assert_close(size.width, 192.0);
        assert_close(size.height, 192.0);
    }

    #[test]
    fn zero_or_negative_canvas_is_rejected() {
        for canvas in [
            CanvasSize::new(0.0, 288.0),
            CanvasSize::new(288.0, 0.0),
            CanvasSize::new(-1.0, 288.0),
        ] {
            let err = PercentPlacement::to_percent(
                PixelPoint::new(1.0, 1.0),
                PixelSize::new(1.0, 1.0),
                canvas,
            )
            .unwrap_err();
            assert!(matches!(err, PlacementError::InvalidCanvas { .. }));

            let err = PercentPlacement::default().to_pixels(canvas).unwrap_err();
            assert!(matches!(err, PlacementError::InvalidCanvas { .. }));
        }
    }

    #[test]
    fn out_of_range_percent_is_rejected_not_clamped() {
        let placement = PercentPlacement {
            position: PercentPoint::new(30.0, 120.0),
            size: PercentSize::new(25.0, 25.0),
        };
        let err = placement.ensure_in_bounds().unwrap_err();
        assert_eq!(
            err,
            PlacementError::OutOfRange {
                field: "position.y",
                value: 120.0
            }
        );

        let placement = PercentPlacement {
            position: PercentPoint::new(30.0, 30.0),
            size: PercentSize::new(-5.0, 25.0),
        };
        assert!(placement.ensure_in_bounds().is_err());
    }
}
