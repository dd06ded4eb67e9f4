use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::StereoError;

/// How the two eye images are packed into the output frame.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum StereoLayout {
    /// Left eye in the left half, right eye in the right half.
    #[serde(alias = "side-by-side")]
    SideBySide,
    /// Left eye in the top half, right eye in the bottom half.
    #[serde(alias = "top-bottom")]
    TopBottom,
    /// Both eyes full-frame, left in red and right in green+blue.
    #[default]
    Anaglyph,
}

impl StereoLayout {
    /// Name used in reports, matching the serialized form.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::SideBySide => "side_by_side",
            Self::TopBottom => "top_bottom",
            Self::Anaglyph => "anaglyph",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Stereo", inline)]
#[serde(default)]
/// Stereo camera parameters.
pub struct StereoOptions {
    /// Eye image packing.
    #[schemars(title = "Layout")]
    pub layout: StereoLayout,
    /// Distance between the eyes in scene units.
    #[schemars(title = "Eye Separation", range(min = 0.1, max = 100.0), extend("step" = 0.1))]
    pub eye_separation: f32,
    /// Swap left and right eyes (cross-eye viewing).
    #[schemars(title = "Swap Eyes")]
    pub swap_eyes: bool,
    /// Per-eye toe-in rotation in degrees. Zero keeps the eyes parallel.
    #[schemars(title = "Convergence", range(min = -30.0, max = 30.0), extend("step" = 0.5))]
    pub convergence: f32,
    /// Horizontal field of view in degrees.
    #[schemars(title = "Field of View", range(min = 5.0, max = 120.0), extend("step" = 1.0))]
    pub field_of_view: f32,
}

impl Default for StereoOptions {
    fn default() -> Self {
        Self {
            layout: StereoLayout::Anaglyph,
            eye_separation: 5.0,
            swap_eyes: false,
            convergence: 0.0,
            field_of_view: 30.0,
        }
    }
}

impl StereoOptions {
    /// Reject values the camera cannot render with.
    ///
    /// # Errors
    ///
    /// Returns [`StereoError::InvalidOption`] for a non-positive eye
    /// separation, a field of view outside (0, 180) degrees, or a
    /// non-finite convergence.
    pub fn validate(&self) -> Result<(), StereoError> {
        validate_eye_separation(self.eye_separation)?;
        validate_field_of_view(self.field_of_view)?;
        validate_convergence(self.convergence)
    }
}

pub(crate) fn validate_eye_separation(value: f32) -> Result<(), StereoError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(StereoError::InvalidOption(format!(
            "eye separation must be positive, got {value}"
        )))
    }
}

pub(crate) fn validate_field_of_view(value: f32) -> Result<(), StereoError> {
    if value > 0.0 && value < 180.0 {
        Ok(())
    } else {
        Err(StereoError::InvalidOption(format!(
            "field of view must be between 0 and 180 degrees, got {value}"
        )))
    }
}

pub(crate) fn validate_convergence(value: f32) -> Result<(), StereoError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(StereoError::InvalidOption(format!(
            "convergence must be finite, got {value}"
        )))
    }
}
