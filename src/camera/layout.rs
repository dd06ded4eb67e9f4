use crate::camera::eye::Eye;
use crate::options::StereoLayout;
use crate::render::{ColorMask, QuadGeometry};

/// Where a window pixel lands in a stereo layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickViewport {
    /// View index of the sub-viewport containing the pixel.
    pub view: usize,
    /// Pixel x relative to the sub-viewport.
    pub x: f32,
    /// Pixel y relative to the sub-viewport.
    pub y: f32,
    /// Sub-viewport size in pixels.
    pub size: (f32, f32),
}

impl StereoLayout {
    /// Axis the output is split along (0 = x, 1 = y), or `None` when both
    /// eyes cover the whole frame.
    #[must_use]
    pub fn split_axis(self) -> Option<usize> {
        match self {
            Self::SideBySide => Some(0),
            Self::TopBottom => Some(1),
            Self::Anaglyph => None,
        }
    }

    /// Size of each eye's render target for an output of `output` pixels.
    #[must_use]
    pub fn eye_target_size(self, output: (u32, u32)) -> (u32, u32) {
        let (w, h) = output;
        match self {
            Self::SideBySide => (w / 2, h),
            Self::TopBottom => (w, h / 2),
            Self::Anaglyph => (w, h),
        }
    }

    /// Placement of `eye`'s quad in the output: the left eye takes the left
    /// or top half, the right eye the right or bottom half.
    #[must_use]
    pub fn eye_quad(self, eye: Eye) -> QuadGeometry {
        let quad = QuadGeometry::full_screen();
        match (self, eye) {
            (Self::SideBySide, Eye::Left) => quad.halved(0, -1.0),
            (Self::SideBySide, Eye::Right) => quad.halved(0, 1.0),
            (Self::TopBottom, Eye::Left) => quad.halved(1, 1.0),
            (Self::TopBottom, Eye::Right) => quad.halved(1, -1.0),
            (Self::Anaglyph, _) => quad,
        }
    }

    /// Channel mask an eye is rendered with; only anaglyphs mask.
    #[must_use]
    pub fn eye_mask(self, eye: Eye) -> Option<ColorMask> {
        match self {
            Self::Anaglyph => Some(eye.color_mask()),
            Self::SideBySide | Self::TopBottom => None,
        }
    }

    /// Sub-viewport containing window pixel `(x, y)` (top-left origin).
    /// The midline pixel starts the second half. Anaglyph frames are not
    /// split and report view 1.
    #[must_use]
    pub fn pick_viewport(
        self,
        x: f32,
        y: f32,
        window_size: (u32, u32),
    ) -> PickViewport {
        let (w, h) = (window_size.0 as f32, window_size.1 as f32);
        match self {
            Self::SideBySide => {
                let half = w / 2.0;
                if x >= half {
                    PickViewport { view: 1, x: x - half, y, size: (half, h) }
                } else {
                    PickViewport { view: 0, x, y, size: (half, h) }
                }
            }
            Self::TopBottom => {
                let half = h / 2.0;
                if y >= half {
                    PickViewport { view: 1, x, y: y - half, size: (w, half) }
                } else {
                    PickViewport { view: 0, x, y, size: (w, half) }
                }
            }
            Self::Anaglyph => PickViewport { view: 1, x, y, size: (w, h) },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_size_follows_split_axis() {
        let out = (800, 600);
        assert_eq!(StereoLayout::Anaglyph.eye_target_size(out), (800, 600));
        assert_eq!(StereoLayout::SideBySide.eye_target_size(out), (400, 600));
        assert_eq!(StereoLayout::TopBottom.eye_target_size(out), (800, 300));
        assert_eq!(StereoLayout::SideBySide.eye_target_size((801, 3)), (400, 3));
    }

    #[test]
    fn side_by_side_quads_fill_opposite_halves() {
        let left = StereoLayout::SideBySide.eye_quad(Eye::Left);
        let right = StereoLayout::SideBySide.eye_quad(Eye::Right);
        assert_eq!(left.extent(0), (-1.0, 0.0));
        assert_eq!(right.extent(0), (0.0, 1.0));
        assert_eq!(left.extent(1), (-1.0, 1.0));
        // Texture coordinates still span the whole eye image.
        assert_eq!(left.tex_coords, QuadGeometry::full_screen().tex_coords);
    }

    #[test]
    fn top_bottom_puts_left_eye_on_top() {
        let left = StereoLayout::TopBottom.eye_quad(Eye::Left);
        let right = StereoLayout::TopBottom.eye_quad(Eye::Right);
        assert_eq!(left.extent(1), (0.0, 1.0));
        assert_eq!(right.extent(1), (-1.0, 0.0));
        assert_eq!(right.extent(0), (-1.0, 1.0));
    }

    #[test]
    fn anaglyph_quads_overlap_fully() {
        let full = QuadGeometry::full_screen();
        assert_eq!(StereoLayout::Anaglyph.eye_quad(Eye::Left), full);
        assert_eq!(StereoLayout::Anaglyph.eye_quad(Eye::Right), full);
    }

    #[test]
    fn midline_pixel_belongs_to_second_view() {
        let size = (800, 600);
        let mid = StereoLayout::SideBySide.pick_viewport(400.0, 10.0, size);
        assert_eq!(mid.view, 1);
        assert_eq!(mid.x, 0.0);
        assert_eq!(mid.size, (400.0, 600.0));
        let before = StereoLayout::SideBySide.pick_viewport(399.5, 10.0, size);
        assert_eq!(before.view, 0);
        assert_eq!(before.x, 399.5);

        let low = StereoLayout::TopBottom.pick_viewport(5.0, 450.0, size);
        assert_eq!(low.view, 1);
        assert_eq!(low.y, 150.0);
        assert_eq!(low.size, (800.0, 300.0));

        let mid = StereoLayout::TopBottom.pick_viewport(5.0, 300.0, size);
        assert_eq!(mid.view, 1);
        assert_eq!(mid.y, 0.0);
        let above = StereoLayout::TopBottom.pick_viewport(5.0, 299.5, size);
        assert_eq!(above.view, 0);
        assert_eq!(above.y, 299.5);
    }

    #[test]
    fn anaglyph_pick_uses_whole_window() {
        let pick = StereoLayout::Anaglyph.pick_viewport(10.0, 20.0, (800, 600));
        assert_eq!(pick, PickViewport { view: 1, x: 10.0, y: 20.0, size: (800.0, 600.0) });
    }
}
