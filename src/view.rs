//! Host view: owns the active camera and drives it once per frame.

use crate::camera::{Camera, MonoCamera};
use crate::error::StereoError;
use crate::geometry::{Bounds, Place};
use crate::render::Renderer;

/// A window's drawing state: the active camera, the window size and the
/// redraw flag.
pub struct View<R: Renderer> {
    camera: Box<dyn Camera<R>>,
    window_size: (u32, u32),
    redraw_needed: bool,
}

impl<R: Renderer + 'static> View<R> {
    /// View with a default [`MonoCamera`].
    #[must_use]
    pub fn new(window_size: (u32, u32)) -> Self {
        Self::with_camera(Box::new(MonoCamera::default()), window_size)
    }
}

impl<R: Renderer> View<R> {
    /// View rendering through `camera`.
    #[must_use]
    pub fn with_camera(
        camera: Box<dyn Camera<R>>,
        window_size: (u32, u32),
    ) -> Self {
        Self {
            camera,
            window_size,
            redraw_needed: true,
        }
    }

    /// Active camera.
    #[must_use]
    pub fn camera(&self) -> &dyn Camera<R> {
        self.camera.as_ref()
    }

    /// Active camera, mutably.
    pub fn camera_mut(&mut self) -> &mut dyn Camera<R> {
        self.camera.as_mut()
    }

    /// Replace the camera. The old camera is deleted so its renderer
    /// resources are released before the new one renders.
    pub fn set_camera(&mut self, camera: Box<dyn Camera<R>>) {
        let mut old = std::mem::replace(&mut self.camera, camera);
        log::debug!(
            "camera {} replaced by {}",
            old.name(),
            self.camera.name()
        );
        old.delete();
        self.redraw_needed = true;
    }

    /// Window size in pixels.
    #[must_use]
    pub fn window_size(&self) -> (u32, u32) {
        self.window_size
    }

    /// Track a window resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        if (width, height) != self.window_size {
            self.window_size = (width, height);
            self.redraw_needed = true;
        }
    }

    /// Whether the next frame must be drawn.
    #[must_use]
    pub fn redraw_needed(&self) -> bool {
        self.redraw_needed
    }

    /// Request a redraw.
    pub fn request_redraw(&mut self) {
        self.redraw_needed = true;
    }

    /// Move the camera so `bounds` fill the window.
    pub fn view_all(&mut self, bounds: &Bounds, pad: f32) {
        let size = self.window_size;
        self.camera.view_all(bounds, Some(size), pad);
        self.redraw_needed = true;
    }

    /// Render one frame: for each camera view, point the renderer at that
    /// view's target and call `draw_scene` with the view's frame, then let
    /// the camera composite the views.
    ///
    /// # Errors
    ///
    /// Propagates camera errors; the redraw flag stays set when drawing
    /// fails.
    pub fn draw<F>(
        &mut self,
        renderer: &mut R,
        mut draw_scene: F,
    ) -> Result<(), StereoError>
    where
        F: FnMut(&mut R, &Place),
    {
        for view in 0..self.camera.number_of_views() {
            self.camera.set_render_target(view, renderer)?;
            let position = self.camera.get_position(Some(view));
            draw_scene(renderer, &position);
        }
        self.camera.combine_rendered_views(renderer)?;
        self.redraw_needed = false;
        Ok(())
    }
}

impl<R: Renderer> Drop for View<R> {
    fn drop(&mut self) {
        self.camera.delete();
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::camera::StereoCamera;
    use crate::options::StereoOptions;
    use crate::render::{RecordingRenderer, RenderCommand};

    fn stereo_view(r: &RecordingRenderer) -> View<RecordingRenderer> {
        let mut cam = StereoCamera::new(&StereoOptions::default());
        cam.attach(Place::IDENTITY).unwrap();
        View::with_camera(Box::new(cam), r.render_size())
    }

    #[test]
    fn mono_frame_draws_once() {
        let mut r = RecordingRenderer::new(100, 80);
        let mut view = View::new((100, 80));
        let mut frames = Vec::new();
        view.draw(&mut r, |_, place| frames.push(*place)).unwrap();
        assert_eq!(frames, [Place::IDENTITY]);
        assert!(!view.redraw_needed());
        assert!(r.commands().is_empty());
    }

    #[test]
    fn stereo_frame_draws_each_eye_into_its_target() {
        let mut r = RecordingRenderer::new(200, 100);
        let mut view = stereo_view(&r);
        let mut seen = Vec::new();
        view.draw(&mut r, |r, place| {
            seen.push((r.current_target(), place.origin().x));
        })
        .unwrap();

        assert_eq!(seen.len(), 2);
        assert!(seen.iter().all(|(target, _)| target.is_some()));
        assert_ne!(seen[0].0, seen[1].0);
        assert!(seen[0].1 < 0.0 && seen[1].1 > 0.0);
        assert_eq!(r.stack_depth(), 0);
        assert!(matches!(
            r.commands().last(),
            Some(RenderCommand::SetColorMask(_))
        ));
    }

    #[test]
    fn replacing_camera_releases_old_resources() {
        let mut r = RecordingRenderer::new(200, 100);
        let mut view = stereo_view(&r);
        view.draw(&mut r, |_, _| {}).unwrap();
        assert_eq!(r.live_targets(), 2);
        assert!(!view.redraw_needed());

        view.set_camera(Box::new(MonoCamera::default()));
        assert_eq!(r.live_targets(), 0);
        assert_eq!(r.live_quads(), 0);
        assert!(view.redraw_needed());
        assert_eq!(view.camera().name(), "mono");
    }

    #[test]
    fn dropping_view_deletes_camera() {
        let mut r = RecordingRenderer::new(64, 64);
        let mut view = stereo_view(&r);
        view.draw(&mut r, |_, _| {}).unwrap();
        drop(view);
        assert_eq!(r.live_targets(), 0);
    }

    #[test]
    fn resize_and_view_all_request_redraw() {
        let mut r = RecordingRenderer::new(64, 64);
        let mut view: View<RecordingRenderer> = View::new((64, 64));
        view.draw(&mut r, |_, _| {}).unwrap();

        view.resize(64, 64);
        assert!(!view.redraw_needed());
        view.resize(128, 64);
        assert!(view.redraw_needed());

        view.draw(&mut r, |_, _| {}).unwrap();
        view.view_all(&Bounds::new(Vec3::splat(-1.0), Vec3::splat(1.0)), 0.05);
        assert!(view.redraw_needed());
        assert!(view.camera().position().origin().z > 1.0);
    }

    #[test]
    fn failed_frame_keeps_redraw_flag() {
        let mut r = RecordingRenderer::new(0, 0);
        let mut view = stereo_view(&r);
        let err = view.draw(&mut r, |_, _| {});
        assert!(matches!(err, Err(StereoError::DegenerateSize { .. })));
        assert!(view.redraw_needed());
    }
}
