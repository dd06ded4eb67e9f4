use std::fmt;

use glam::Vec3;

use crate::options::StereoLayout;

/// Camera parameters to change. `None` leaves a parameter as it is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CameraSettings {
    /// Horizontal field of view in degrees.
    pub field_of_view: Option<f32>,
    /// Stereo eye separation in scene units.
    pub eye_separation: Option<f32>,
    /// Stereo toe-in angle in degrees.
    pub convergence: Option<f32>,
    /// Stereo left/right exchange.
    pub swap_eyes: Option<bool>,
    /// Stereo eye packing.
    pub layout: Option<StereoLayout>,
}

impl CameraSettings {
    /// Whether no parameter is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Name of the first setting only stereo cameras have, if any.
    #[must_use]
    pub fn stereo_only_setting(&self) -> Option<&'static str> {
        if self.eye_separation.is_some() {
            Some("eye separation")
        } else if self.convergence.is_some() {
            Some("convergence")
        } else if self.swap_eyes.is_some() {
            Some("swap eyes")
        } else if self.layout.is_some() {
            Some("layout")
        } else {
            None
        }
    }
}

/// Stereo-specific part of a [`CameraReport`].
#[derive(Debug, Clone, PartialEq)]
pub struct StereoReport {
    /// Eye separation in scene units.
    pub eye_separation: f32,
    /// Toe-in angle in degrees.
    pub convergence: f32,
    /// Eye packing.
    pub layout: StereoLayout,
    /// Whether eyes are exchanged.
    pub swap_eyes: bool,
}

/// Snapshot of a camera's parameters, printable as the multi-line
/// "Camera parameters" listing.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraReport {
    /// Camera mode name.
    pub name: &'static str,
    /// Camera origin in scene coordinates.
    pub position: Vec3,
    /// Viewing direction in scene coordinates.
    pub view_direction: Vec3,
    /// Horizontal field of view in degrees.
    pub field_of_view: f32,
    /// Present for stereo cameras.
    pub stereo: Option<StereoReport>,
}

impl CameraReport {
    /// One-line summary for a status bar.
    #[must_use]
    pub fn status(&self) -> String {
        format!(
            "{} camera, {} degree field of view",
            self.name, self.field_of_view
        )
    }
}

fn write_vec(f: &mut fmt::Formatter<'_>, v: Vec3) -> fmt::Result {
    write!(f, "{} {} {}", v.x, v.y, v.z)
}

impl fmt::Display for CameraReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Camera parameters:")?;
        writeln!(f, "    type: {}", self.name)?;
        write!(f, "    position: ")?;
        write_vec(f, self.position)?;
        write!(f, "\n    view direction: ")?;
        write_vec(f, self.view_direction)?;
        write!(f, "\n    field of view: {} degrees", self.field_of_view)?;
        if let Some(stereo) = &self.stereo {
            write!(
                f,
                "\n    eye separation in scene: {}\n    convergence (degrees): {}\n    layout: {}\n    swap eyes: {}",
                stereo.eye_separation,
                stereo.convergence,
                stereo.layout.name(),
                stereo.swap_eyes,
            )?;
        }
        Ok(())
    }
}
