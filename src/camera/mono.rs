use crate::camera::perspective::perspective_direction;
use crate::camera::{Camera, CameraReport, CameraSettings};
use crate::error::StereoError;
use crate::geometry::{Place, Ray};
use crate::options::validate_field_of_view;
use crate::render::Renderer;

/// Single-view perspective camera rendering straight into the host's
/// current target. The default camera a stereo camera replaces and is
/// replaced by.
#[derive(Debug, Clone, PartialEq)]
pub struct MonoCamera {
    position: Place,
    field_of_view: f32,
}

impl Default for MonoCamera {
    fn default() -> Self {
        Self::new(Place::IDENTITY, 30.0)
    }
}

impl MonoCamera {
    /// Camera at `position` with a horizontal field of view in degrees.
    #[must_use]
    pub fn new(position: Place, field_of_view: f32) -> Self {
        Self {
            position,
            field_of_view,
        }
    }
}

impl<R: Renderer> Camera<R> for MonoCamera {
    fn name(&self) -> &'static str {
        "mono"
    }

    fn position(&self) -> Place {
        self.position
    }

    fn set_position(&mut self, position: Place) {
        self.position = position;
    }

    fn field_of_view(&self) -> f32 {
        self.field_of_view
    }

    fn view(&self, base: Place, _view: Option<usize>) -> Place {
        base
    }

    fn number_of_views(&self) -> usize {
        1
    }

    fn ray(&self, window_x: f32, window_y: f32, window_size: (u32, u32)) -> Ray {
        let size = (window_size.0 as f32, window_size.1 as f32);
        let d =
            perspective_direction(window_x, window_y, size, self.field_of_view);
        Ray {
            origin: self.position.origin(),
            direction: self.position.transform_vector(d),
        }
    }

    fn set_render_target(
        &mut self,
        view: usize,
        _renderer: &mut R,
    ) -> Result<(), StereoError> {
        if view == 0 {
            Ok(())
        } else {
            Err(StereoError::InvalidView(view))
        }
    }

    fn combine_rendered_views(
        &mut self,
        _renderer: &mut R,
    ) -> Result<(), StereoError> {
        Ok(())
    }

    fn configure(
        &mut self,
        settings: &CameraSettings,
    ) -> Result<bool, StereoError> {
        if let Some(name) = settings.stereo_only_setting() {
            return Err(StereoError::InvalidOption(format!(
                "{name} only applies to stereo camera mode"
            )));
        }
        if let Some(fov) = settings.field_of_view {
            validate_field_of_view(fov)?;
            self.field_of_view = fov;
        }
        Ok(!settings.is_empty())
    }

    fn report(&self) -> CameraReport {
        CameraReport {
            name: "mono",
            position: self.position.origin(),
            view_direction: -self.position.z_axis(),
            field_of_view: self.field_of_view,
            stereo: None,
        }
    }

    fn delete(&mut self) {}
}
