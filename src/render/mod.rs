//! Host renderer contract.
//!
//! Cameras never talk to a graphics API directly. They drive a
//! [`Renderer`]: a render-target stack, a color write mask, a viewport, and
//! textured screen quads. [`crate::gpu::GpuRenderer`] implements it on wgpu;
//! [`RecordingRenderer`] implements it as a command log for headless use.

/// Command-recording renderer with allocation tracking.
pub mod recording;

pub use recording::{RecordedQuad, RecordedTarget, RecordingRenderer, RenderCommand};

/// Which color channels a draw may write.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorMask {
    /// Red channel writes enabled.
    pub red: bool,
    /// Green channel writes enabled.
    pub green: bool,
    /// Blue channel writes enabled.
    pub blue: bool,
    /// Alpha channel writes enabled.
    pub alpha: bool,
}

impl ColorMask {
    /// Every channel writable.
    pub const ALL: Self = Self {
        red: true,
        green: true,
        blue: true,
        alpha: true,
    };
    /// Red plus alpha (left eye of a red/cyan anaglyph).
    pub const RED: Self = Self {
        red: true,
        green: false,
        blue: false,
        alpha: true,
    };
    /// Green, blue plus alpha (right eye of a red/cyan anaglyph).
    pub const CYAN: Self = Self {
        red: false,
        green: true,
        blue: true,
        alpha: true,
    };
}

impl Default for ColorMask {
    fn default() -> Self {
        Self::ALL
    }
}

/// Pixel rectangle of the current render target that draws land in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Left edge in pixels.
    pub x: u32,
    /// Top edge in pixels.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Viewport {
    /// Viewport covering a whole `(width, height)` surface.
    #[must_use]
    pub fn full(size: (u32, u32)) -> Self {
        Self {
            x: 0,
            y: 0,
            width: size.0,
            height: size.1,
        }
    }
}

/// Two-triangle rectangle in normalized device coordinates with texture
/// coordinates for sampling an eye image.
///
/// Texture coordinates use a bottom-left origin (`(0, 0)` at NDC `(-1, -1)`);
/// backends with a top-left texture origin flip `v` when sampling.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadGeometry {
    /// Corner positions, counter-clockwise from bottom-left.
    pub positions: [[f32; 3]; 4],
    /// Texture coordinate per corner.
    pub tex_coords: [[f32; 2]; 4],
    /// Triangle corner indices.
    pub triangles: [[u32; 3]; 2],
}

impl QuadGeometry {
    /// Quad covering the whole of NDC space.
    #[must_use]
    pub fn full_screen() -> Self {
        Self {
            positions: [
                [-1.0, -1.0, 0.0],
                [1.0, -1.0, 0.0],
                [1.0, 1.0, 0.0],
                [-1.0, 1.0, 0.0],
            ],
            tex_coords: [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
            triangles: [[0, 1, 2], [0, 2, 3]],
        }
    }

    /// Shift every corner by `offset` along `axis` (0 = x, 1 = y), then
    /// halve that axis. An offset of -1 lands the quad in the lower half of
    /// the axis range, +1 in the upper half.
    #[must_use]
    pub fn halved(mut self, axis: usize, offset: f32) -> Self {
        for p in &mut self.positions {
            p[axis] = (p[axis] + offset) / 2.0;
        }
        self
    }

    /// `(min, max)` extent of the corners along `axis`.
    #[must_use]
    pub fn extent(&self, axis: usize) -> (f32, f32) {
        self.positions
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), p| {
                (lo.min(p[axis]), hi.max(p[axis]))
            })
    }
}

/// The slice of a host renderer a camera needs to render stereo pairs.
///
/// Resources are owned by the camera that created them and released when
/// dropped. The renderer keeps a stack of render targets on top of its own
/// output; draws and clears go to the top of that stack.
pub trait Renderer {
    /// An offscreen color + depth surface.
    type Target;
    /// A textured rectangle that blits a target's color image.
    type Quad;

    /// Current output size in pixels.
    fn render_size(&self) -> (u32, u32);

    /// Size a target was created with.
    fn target_size(&self, target: &Self::Target) -> (u32, u32);

    /// Allocate an offscreen target.
    fn create_render_target(
        &mut self,
        label: &str,
        width: u32,
        height: u32,
    ) -> Self::Target;

    /// Make `target` the destination of subsequent clears and draws, with
    /// the viewport set to cover the whole target.
    fn push_render_target(&mut self, target: &Self::Target);

    /// Restore the destination and the viewport that were current before
    /// the last push.
    fn pop_render_target(&mut self);

    /// Clear color and depth of the current destination. Clears ignore the
    /// color write mask.
    fn clear(&mut self);

    /// Restrict which channels subsequent draws write.
    fn set_color_mask(&mut self, mask: ColorMask);

    /// Set the pixel rectangle subsequent draws land in.
    fn set_viewport(&mut self, viewport: Viewport);

    /// Build an unlit, opaque quad sampling `texture`'s color image.
    fn create_quad(
        &mut self,
        label: &str,
        geometry: &QuadGeometry,
        texture: &Self::Target,
    ) -> Self::Quad;

    /// Point an existing quad at a (recreated) target's color image.
    fn set_quad_texture(&mut self, quad: &mut Self::Quad, texture: &Self::Target);

    /// Draw quads into the current destination with the current mask and
    /// viewport.
    fn draw_quads(&mut self, quads: &[&Self::Quad]);
}
