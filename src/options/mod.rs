//! Stereo camera options with TOML preset support.
//!
//! Options serialize to/from TOML for camera presets stored in
//! `assets/presets/`, and expose a JSON schema for host option panels.

mod stereo;

use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub(crate) use stereo::{
    validate_convergence, validate_eye_separation, validate_field_of_view,
};
pub use stereo::{StereoLayout, StereoOptions};

use crate::error::StereoError;

/// Top-level options container. Sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `layout`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Stereo camera parameters.
    pub stereo: StereoOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`StereoError::Io`] if the file cannot be read and
    /// [`StereoError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, StereoError> {
        let content = std::fs::read_to_string(path).map_err(StereoError::Io)?;
        Self::from_toml(&content)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`StereoError::OptionsParse`] on malformed TOML or unknown
    /// enum values.
    pub fn from_toml(content: &str) -> Result<Self, StereoError> {
        toml::from_str(content)
            .map_err(|e| StereoError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`StereoError::OptionsParse`] if serialization fails and
    /// [`StereoError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), StereoError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| StereoError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(StereoError::Io)?;
        }
        std::fs::write(path, content).map_err(StereoError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn presets_dir() -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/presets")
    }

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[stereo]
layout = "side_by_side"
"#;
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.stereo.layout, StereoLayout::SideBySide);
        assert_eq!(opts.stereo.field_of_view, 30.0);
        assert_eq!(opts.stereo.eye_separation, 5.0);
        assert!(!opts.stereo.swap_eyes);
    }

    #[test]
    fn hyphenated_layout_names_are_accepted() {
        let opts =
            Options::from_toml("[stereo]\nlayout = \"top-bottom\"\n").unwrap();
        assert_eq!(opts.stereo.layout, StereoLayout::TopBottom);
    }

    #[test]
    fn unknown_layout_is_a_parse_error() {
        let err = Options::from_toml("[stereo]\nlayout = \"interlaced\"\n")
            .unwrap_err();
        assert!(matches!(err, StereoError::OptionsParse(_)));
    }

    #[test]
    fn validate_rejects_out_of_range_values() {
        let mut stereo = StereoOptions::default();
        assert!(stereo.validate().is_ok());
        stereo.eye_separation = 0.0;
        assert!(stereo.validate().is_err());
        stereo.eye_separation = 1.0;
        stereo.field_of_view = 180.0;
        assert!(stereo.validate().is_err());
        stereo.field_of_view = 45.0;
        stereo.convergence = f32::NAN;
        assert!(stereo.validate().is_err());
    }

    #[test]
    fn bundled_presets_load_and_validate() {
        let dir = presets_dir();
        let names = Options::list_presets(&dir);
        assert_eq!(names, ["converged", "cross_eye", "red_cyan", "wall_eye"]);
        for name in &names {
            let opts = Options::load(&dir.join(format!("{name}.toml"))).unwrap();
            opts.stereo.validate().unwrap();
        }
        let converged = Options::load(&dir.join("converged.toml")).unwrap();
        assert!(converged.stereo.swap_eyes);
        assert_eq!(converged.stereo.convergence, 10.0);
        assert_eq!(converged.stereo.eye_separation, 50.0);
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = std::env::temp_dir().join(format!(
            "anaglyph-options-{}",
            std::process::id()
        ));
        let path = dir.join("nested/custom.toml");
        let mut opts = Options::default();
        opts.stereo.layout = StereoLayout::TopBottom;
        opts.stereo.convergence = 2.5;
        opts.save(&path).unwrap();
        assert_eq!(Options::load(&path).unwrap(), opts);
        assert_eq!(Options::list_presets(&dir.join("nested")), ["custom"]);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();
        assert!(props.contains_key("stereo"));

        let stereo = &props["stereo"]["properties"];
        for key in [
            "layout",
            "eye_separation",
            "swap_eyes",
            "convergence",
            "field_of_view",
        ] {
            assert!(stereo.get(key).is_some(), "missing {key}");
        }
    }
}
