//! Camera modes a host view can render through.
//!
//! A [`Camera`] turns one camera position into one or more views, tells the
//! renderer where each view is drawn, and merges the views into the final
//! frame. [`MonoCamera`] renders a single view straight into the host's
//! output; [`StereoCamera`] renders a left/right eye pair and composites
//! them side by side, top/bottom, or as a red/cyan anaglyph.

/// Left/right eye identities and per-eye resource slots.
pub mod eye;
/// Per-layout target sizes, quad placement and pick sub-viewports.
pub mod layout;
/// Single-view perspective camera.
pub mod mono;
/// Perspective fit, pick direction and view width helpers.
pub mod perspective;
/// Camera configuration settings and parameter reports.
pub mod report;
/// Two-eye stereo camera.
pub mod stereo;

use glam::Vec3;

pub use eye::{Eye, EyePair};
pub use layout::PickViewport;
pub use mono::MonoCamera;
pub use report::{CameraReport, CameraSettings, StereoReport};
pub use stereo::StereoCamera;

use crate::error::StereoError;
use crate::geometry::{Bounds, Place, Ray};
use crate::render::Renderer;

/// Capability set a host renderer drives once per frame.
///
/// Per frame the host calls [`Camera::set_render_target`] for each view in
/// `0..number_of_views()`, draws the scene from
/// [`Camera::get_position`]`(Some(view))` after each, then calls
/// [`Camera::combine_rendered_views`] once.
pub trait Camera<R: Renderer> {
    /// Short mode name shown in reports.
    fn name(&self) -> &'static str;

    /// Camera frame in scene coordinates.
    fn position(&self) -> Place;

    /// Move the camera (navigation, activation).
    fn set_position(&mut self, position: Place);

    /// Horizontal field of view in degrees.
    fn field_of_view(&self) -> f32;

    /// Frame of a specific view derived from `base`. `None` asks for the
    /// single reference viewpoint and returns `base` unchanged.
    fn view(&self, base: Place, view: Option<usize>) -> Place;

    /// Views rendered per frame.
    fn number_of_views(&self) -> usize;

    /// Sight line in scene coordinates through a window pixel.
    fn ray(&self, window_x: f32, window_y: f32, window_size: (u32, u32)) -> Ray;

    /// Direct subsequent scene drawing for `view` to the right place.
    ///
    /// # Errors
    ///
    /// Fails if the camera is detached or deleted, if `view` is out of
    /// range, or if views are set out of order.
    fn set_render_target(
        &mut self,
        view: usize,
        renderer: &mut R,
    ) -> Result<(), StereoError>;

    /// Merge the views drawn this frame into the renderer's output.
    ///
    /// # Errors
    ///
    /// Fails if the camera is detached or deleted, or if no view was
    /// rendered this frame.
    fn combine_rendered_views(
        &mut self,
        renderer: &mut R,
    ) -> Result<(), StereoError>;

    /// Apply the settings present in `settings`. Returns whether anything
    /// was applied.
    ///
    /// # Errors
    ///
    /// Returns [`StereoError::InvalidOption`] for out-of-range values or
    /// settings this camera mode does not have; nothing is applied then.
    fn configure(&mut self, settings: &CameraSettings)
        -> Result<bool, StereoError>;

    /// Current parameters.
    fn report(&self) -> CameraReport;

    /// Release every renderer resource. Safe to call repeatedly. Call it
    /// between frames: a target still pushed on the renderer is not popped.
    fn delete(&mut self);

    /// Frame of `view` derived from the camera's own position.
    fn get_position(&self, view: Option<usize>) -> Place {
        self.view(self.position(), view)
    }

    /// Viewing direction (the camera's -Z axis) in scene coordinates.
    fn view_direction(&self) -> Vec3 {
        -self.position().z_axis()
    }

    /// Move the camera along its view axis so `bounds` fill the view.
    fn view_all(
        &mut self,
        bounds: &Bounds,
        window_size: Option<(u32, u32)>,
        pad: f32,
    ) {
        let position = perspective::perspective_view_all(
            bounds,
            self.position(),
            self.field_of_view(),
            window_size,
            pad,
        );
        self.set_position(position);
    }

    /// Scene-space width of the view at `point`'s distance.
    fn view_width(&self, point: Vec3) -> f32 {
        perspective::perspective_view_width(
            point,
            self.position().origin(),
            self.field_of_view(),
        )
    }
}
