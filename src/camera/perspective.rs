//! Perspective projection helpers shared by every camera mode.
//!
//! Field of view is horizontal and in degrees throughout.

use glam::Vec3;

use crate::geometry::{Bounds, Place};

/// Camera frame that shows all of `bounds` without changing the view
/// direction.
///
/// The bounding sphere, grown by `pad` (a fraction of its radius), is fit
/// inside the narrower of the horizontal and vertical fields. Without a
/// window size the horizontal field is used.
#[must_use]
pub fn perspective_view_all(
    bounds: &Bounds,
    position: Place,
    field_of_view: f32,
    window_size: Option<(u32, u32)>,
    pad: f32,
) -> Place {
    let radius = bounds.radius() * (1.0 + pad);
    let mut half_tan = (0.5 * field_of_view.to_radians()).tan();
    if let Some((w, h)) = window_size {
        if w > 0 && h > 0 {
            half_tan *= (h as f32 / w as f32).min(1.0);
        }
    }
    let distance = radius / half_tan.atan().sin();
    let view_direction = -position.z_axis();
    let eye = bounds.center() - view_direction * distance;
    Place::translation(eye - position.origin()) * position
}

/// Camera-space unit direction through window pixel `(x, y)`.
///
/// Pixels are measured from the top-left corner of a viewport of
/// `viewport_size` pixels; the camera looks down -Z.
#[must_use]
pub fn perspective_direction(
    x: f32,
    y: f32,
    viewport_size: (f32, f32),
    field_of_view: f32,
) -> Vec3 {
    let (w, h) = viewport_size;
    let half_width = (0.5 * field_of_view.to_radians()).tan();
    let px = (2.0 * x / w - 1.0) * half_width;
    let py = (1.0 - 2.0 * y / h) * half_width * h / w;
    Vec3::new(px, py, -1.0).normalize()
}

/// Scene-space width of the field of view at `point`'s distance from
/// `origin`.
#[must_use]
pub fn perspective_view_width(
    point: Vec3,
    origin: Vec3,
    field_of_view: f32,
) -> f32 {
    2.0 * point.distance(origin) * (0.5 * field_of_view.to_radians()).tan()
}
