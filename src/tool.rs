//! User-facing entry points: the stereo tool that swaps a view's camera, and
//! the camera configuration command.

use crate::camera::{CameraReport, CameraSettings, MonoCamera, StereoCamera};
use crate::error::StereoError;
use crate::options::StereoOptions;
use crate::render::Renderer;
use crate::view::View;

/// Tool that switches a view to stereo rendering and back.
#[derive(Debug, Clone, Default)]
pub struct StereoTool {
    options: StereoOptions,
    active: bool,
}

impl StereoTool {
    /// Name shown in host menus.
    pub const DISPLAY_NAME: &'static str = "Anaglyph";

    /// Tool that will build stereo cameras with `options`.
    #[must_use]
    pub fn new(options: StereoOptions) -> Self {
        Self {
            options,
            active: false,
        }
    }

    /// Options the next activation uses.
    #[must_use]
    pub fn options(&self) -> &StereoOptions {
        &self.options
    }

    /// Replace the options the next activation uses.
    pub fn set_options(&mut self, options: StereoOptions) {
        self.options = options;
    }

    /// Whether the tool's camera is installed.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Install a stereo camera in `view` at the current camera's position.
    /// The previous camera is deleted.
    ///
    /// # Errors
    ///
    /// Returns [`StereoError::InvalidOption`] if the options are out of
    /// range; the view is left unchanged then.
    pub fn activate<R: Renderer + 'static>(
        &mut self,
        view: &mut View<R>,
    ) -> Result<(), StereoError> {
        self.options.validate()?;
        let mut camera = StereoCamera::new(&self.options);
        camera.attach(view.camera().position())?;
        view.set_camera(Box::new(camera));
        self.active = true;
        log::info!(
            "{} camera on: {} layout, eye separation {}",
            Self::DISPLAY_NAME,
            self.options.layout.name(),
            self.options.eye_separation
        );
        Ok(())
    }

    /// Put a mono camera back with the stereo camera's position and field
    /// of view. Does nothing when the tool is not active.
    pub fn deactivate<R: Renderer + 'static>(&mut self, view: &mut View<R>) {
        if !self.active {
            return;
        }
        let camera = view.camera();
        let mono = MonoCamera::new(camera.position(), camera.field_of_view());
        view.set_camera(Box::new(mono));
        self.active = false;
        log::info!("{} camera off", Self::DISPLAY_NAME);
    }
}

/// Change the view's camera parameters.
///
/// With no settings, logs and returns the camera report. Otherwise applies
/// the settings and requests a redraw.
///
/// # Errors
///
/// Returns [`StereoError::InvalidOption`] for out-of-range values or
/// stereo-only settings on a mono camera.
pub fn configure_camera<R: Renderer>(
    view: &mut View<R>,
    settings: &CameraSettings,
) -> Result<Option<CameraReport>, StereoError> {
    if settings.is_empty() {
        let report = view.camera().report();
        log::info!("{report}");
        return Ok(Some(report));
    }
    if view.camera_mut().configure(settings)? {
        view.request_redraw();
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::geometry::Place;
    use crate::options::StereoLayout;
    use crate::render::RecordingRenderer;

    fn view() -> (View<RecordingRenderer>, RecordingRenderer) {
        (View::new((320, 240)), RecordingRenderer::new(320, 240))
    }

    #[test]
    fn activation_keeps_camera_position() {
        let (mut view, mut r) = view();
        let start = Place::translation(Vec3::new(0.0, 0.0, 50.0));
        view.camera_mut().set_position(start);
        view.draw(&mut r, |_, _| {}).unwrap();

        let mut tool = StereoTool::default();
        tool.activate(&mut view).unwrap();
        assert!(tool.is_active());
        assert!(view.redraw_needed());
        assert_eq!(view.camera().name(), "stereo");
        assert_eq!(view.camera().position(), start);
        assert_eq!(view.camera().number_of_views(), 2);
    }

    #[test]
    fn invalid_options_leave_view_alone() {
        let (mut view, _) = view();
        let mut tool = StereoTool::new(StereoOptions {
            eye_separation: 0.0,
            ..StereoOptions::default()
        });
        assert!(matches!(
            tool.activate(&mut view),
            Err(StereoError::InvalidOption(_))
        ));
        assert!(!tool.is_active());
        assert_eq!(view.camera().name(), "mono");
    }

    #[test]
    fn deactivation_restores_mono_and_releases_targets() {
        let (mut view, mut r) = view();
        let mut tool = StereoTool::new(StereoOptions {
            field_of_view: 40.0,
            ..StereoOptions::default()
        });
        tool.activate(&mut view).unwrap();
        view.draw(&mut r, |_, _| {}).unwrap();
        assert_eq!(r.live_targets(), 2);

        let position = view.camera().position();
        tool.deactivate(&mut view);
        assert!(!tool.is_active());
        assert_eq!(view.camera().name(), "mono");
        assert_eq!(view.camera().position(), position);
        assert_eq!(view.camera().field_of_view(), 40.0);
        assert_eq!(r.live_targets(), 0);
    }

    #[test]
    fn configure_without_settings_reports() {
        let (mut view, mut r) = view();
        StereoTool::default().activate(&mut view).unwrap();
        view.draw(&mut r, |_, _| {}).unwrap();

        let report = configure_camera(&mut view, &CameraSettings::default())
            .unwrap()
            .unwrap();
        assert_eq!(report.name, "stereo");
        assert!(report.to_string().starts_with("Camera parameters:"));
        assert!(!view.redraw_needed());
    }

    #[test]
    fn configure_applies_and_requests_redraw() {
        let (mut view, mut r) = view();
        StereoTool::default().activate(&mut view).unwrap();
        view.draw(&mut r, |_, _| {}).unwrap();

        let report = configure_camera(
            &mut view,
            &CameraSettings {
                layout: Some(StereoLayout::TopBottom),
                convergence: Some(4.0),
                ..CameraSettings::default()
            },
        )
        .unwrap();
        assert!(report.is_none());
        assert!(view.redraw_needed());
        let stereo = view.camera().report().stereo.unwrap();
        assert_eq!(stereo.layout, StereoLayout::TopBottom);
        assert_eq!(stereo.convergence, 4.0);
        // Layout change dropped the anaglyph-sized targets.
        assert_eq!(r.live_targets(), 0);
    }

    #[test]
    fn stereo_settings_on_mono_camera_fail() {
        let (mut view, _) = view();
        let err = configure_camera(
            &mut view,
            &CameraSettings {
                eye_separation: Some(2.0),
                ..CameraSettings::default()
            },
        )
        .unwrap_err();
        assert!(err
            .to_string()
            .contains("eye separation only applies to stereo camera mode"));
    }
}
