//! Viewport-region math for drawing an overlay into a sub-rectangle of the
//! surface, with save/restore around the overlay pass.

use pointcast_core::SurfaceRect;

/// A viewport rectangle in surface coordinates with a bottom-left origin
/// (the convention render backends use for viewport and scissor state).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportRegion {
    /// Distance from the surface's left edge.
    pub x: f32,
    /// Distance from the surface's bottom edge.
    pub y: f32,
    /// Region width.
    pub width: f32,
    /// Region height.
    pub height: f32,
}

impl ViewportRegion {
    /// Map an overlay element's top-left-origin rectangle into a viewport
    /// region of the surface it overlays. The overlay's bottom position is
    /// re-expressed as a distance from the surface's bottom edge.
    pub fn from_rects(overlay: SurfaceRect, surface: SurfaceRect) -> Self {
        Self {
            x: overlay.left - surface.left,
            y: surface.bottom() - overlay.bottom(),
            width: overlay.width,
            height: overlay.height,
        }
    }

    /// Width over height, used to keep an overlay camera's projection in
    /// step with its on-surface footprint.
    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }
}

/// The viewport/scissor state a render backend exposes. Implemented by the
/// host over its renderer; the overlay pass mutates it only inside
/// [`with_region`].
pub trait ViewportTarget {
    /// Current viewport rectangle.
    fn viewport(&self) -> ViewportRegion;
    /// Replace the viewport rectangle.
    fn set_viewport(&mut self, region: ViewportRegion);
    /// Current scissor rectangle.
    fn scissor(&self) -> ViewportRegion;
    /// Replace the scissor rectangle.
    fn set_scissor(&mut self, region: ViewportRegion);
    /// Whether scissor testing is enabled.
    fn scissor_test(&self) -> bool;
    /// Enable or disable scissor testing.
    fn set_scissor_test(&mut self, enabled: bool);
}

/// Run `pass` with viewport and scissor confined to `region`, restoring the
/// target's prior state afterwards regardless of what the pass changed.
pub fn with_region<T: ViewportTarget, O>(
    target: &mut T,
    region: ViewportRegion,
    pass: impl FnOnce(&mut T) -> O,
) -> O {
    let saved_viewport = target.viewport();
    let saved_scissor = target.scissor();
    let saved_scissor_test = target.scissor_test();

    target.set_viewport(region);
    target.set_scissor(region);
    target.set_scissor_test(true);

    let output = pass(target);

    target.set_viewport(saved_viewport);
    target.set_scissor(saved_scissor);
    target.set_scissor_test(saved_scissor_test);
    output
}
