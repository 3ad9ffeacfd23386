//! Rendering-surface geometry: the bounding rectangle used to map device
//! pixel coordinates into normalized device coordinates.

use glam::Vec2;

/// Bounding rectangle of a rendering surface, in device pixels.
///
/// `left`/`top` locate the surface within the host window or page, so pointer
/// coordinates arriving in window space can be made surface-local first.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceRect {
    /// Left edge in device pixels.
    pub left: f32,
    /// Top edge in device pixels.
    pub top: f32,
    /// Width in device pixels.
    pub width: f32,
    /// Height in device pixels.
    pub height: f32,
}

impl SurfaceRect {
    /// Build a rectangle from its left/top corner and size.
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// A rectangle anchored at the origin, for surfaces that fill the window.
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// True when the rectangle has no usable area (surface not ready yet).
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Bottom edge in device pixels.
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Map a device-pixel position to normalized device coordinates.
    ///
    /// Both axes land in [-1, 1] for points inside the rectangle, with Y
    /// inverted so the top edge maps to +1. Callers must check
    /// [`SurfaceRect::is_empty`] first; an empty rect has no meaningful NDC.
    pub fn to_ndc(&self, position: Vec2) -> Vec2 {
        let local_x = position.x - self.left;
        let local_y = position.y - self.top;
        Vec2::new(
            (local_x / self.width) * 2.0 - 1.0,
            -(local_y / self.height) * 2.0 + 1.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ndc_mapping_covers_corners_and_center() {
        let rect = SurfaceRect::new(10.0, 20.0, 200.0, 100.0);

        // Top-left corner.
        let ndc = rect.to_ndc(Vec2::new(10.0, 20.0));
        assert_eq!(ndc, Vec2::new(-1.0, 1.0));

        // Bottom-right corner.
        let ndc = rect.to_ndc(Vec2::new(210.0, 120.0));
        assert_eq!(ndc, Vec2::new(1.0, -1.0));

        // Center.
        let ndc = rect.to_ndc(Vec2::new(110.0, 70.0));
        assert!(ndc.x.abs() < 1e-6);
        assert!(ndc.y.abs() < 1e-6);
    }

    #[test]
    fn empty_rect_is_detected() {
        assert!(SurfaceRect::default().is_empty());
        assert!(!SurfaceRect::from_size(640.0, 480.0).is_empty());
    }
}
