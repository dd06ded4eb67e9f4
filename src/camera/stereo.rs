//! Two-eye stereo camera.
//!
//! Each frame the host renders view 0 and view 1 into per-eye offscreen
//! targets owned by the camera, then [`Camera::combine_rendered_views`]
//! blits both into the output with textured quads. In the anaglyph layout
//! both quads cover the whole frame and color write masks keep the left
//! eye in red and the right eye in green+blue; in the split layouts each
//! quad covers its own half.
//!
//! Render-target stack discipline per frame:
//!
//! ```text
//! set_render_target(0)   push eye 0
//! set_render_target(1)   pop eye 0, push eye 1
//! combine_rendered_views pop eye 1, draw quads into the output
//! ```

use glam::Vec3;

use crate::camera::eye::{Eye, EyePair};
use crate::camera::perspective::perspective_direction;
use crate::camera::{Camera, CameraReport, CameraSettings, StereoReport};
use crate::error::StereoError;
use crate::geometry::{Place, Ray};
use crate::options::{
    validate_convergence, validate_eye_separation, validate_field_of_view,
    StereoLayout, StereoOptions,
};
use crate::render::{ColorMask, Renderer, Viewport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Detached,
    Attached,
    Deleted,
}

/// Stereo pair camera generic over the host renderer.
pub struct StereoCamera<R: Renderer> {
    field_of_view: f32,
    eye_separation: f32,
    swap_eyes: bool,
    convergence: f32,
    layout: StereoLayout,
    position: Place,
    lifecycle: Lifecycle,
    /// Eye whose target is currently pushed on the renderer's stack.
    pushed: Option<Eye>,
    targets: EyePair<R::Target>,
    quads: EyePair<R::Quad>,
}

impl<R: Renderer> StereoCamera<R> {
    /// Detached camera with the given parameters. Values are taken as is;
    /// run [`StereoOptions::validate`] first for user input.
    #[must_use]
    pub fn new(options: &StereoOptions) -> Self {
        Self {
            field_of_view: options.field_of_view,
            eye_separation: options.eye_separation,
            swap_eyes: options.swap_eyes,
            convergence: options.convergence,
            layout: options.layout,
            position: Place::IDENTITY,
            lifecycle: Lifecycle::Detached,
            pushed: None,
            targets: EyePair::default(),
            quads: EyePair::default(),
        }
    }

    /// Attach to a view, taking over the previous camera's position.
    ///
    /// # Errors
    ///
    /// Returns [`StereoError::Deleted`] if the camera was deleted.
    pub fn attach(&mut self, position: Place) -> Result<(), StereoError> {
        if self.lifecycle == Lifecycle::Deleted {
            return Err(StereoError::Deleted);
        }
        self.position = position;
        self.lifecycle = Lifecycle::Attached;
        Ok(())
    }

    /// Whether the camera is attached and not deleted.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.lifecycle == Lifecycle::Attached
    }

    /// Whether [`Camera::delete`] was called.
    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.lifecycle == Lifecycle::Deleted
    }

    /// Eye packing.
    #[must_use]
    pub fn layout(&self) -> StereoLayout {
        self.layout
    }

    /// Eye separation in scene units.
    #[must_use]
    pub fn eye_separation(&self) -> f32 {
        self.eye_separation
    }

    /// Whether eyes are exchanged.
    #[must_use]
    pub fn swap_eyes(&self) -> bool {
        self.swap_eyes
    }

    /// Toe-in angle in degrees.
    #[must_use]
    pub fn convergence(&self) -> f32 {
        self.convergence
    }

    /// Current parameters as options.
    #[must_use]
    pub fn options(&self) -> StereoOptions {
        StereoOptions {
            layout: self.layout,
            eye_separation: self.eye_separation,
            swap_eyes: self.swap_eyes,
            convergence: self.convergence,
            field_of_view: self.field_of_view,
        }
    }

    /// Eye whose target is pushed, between eye passes.
    #[must_use]
    pub fn pushed_eye(&self) -> Option<Eye> {
        self.pushed
    }

    /// `eye`'s render target, if allocated.
    #[must_use]
    pub fn eye_target(&self, eye: Eye) -> Option<&R::Target> {
        self.targets.get(eye)
    }

    /// `eye`'s screen quad, if allocated.
    #[must_use]
    pub fn eye_quad(&self, eye: Eye) -> Option<&R::Quad> {
        self.quads.get(eye)
    }

    /// Number of allocated targets and quads.
    #[must_use]
    pub fn allocated(&self) -> (usize, usize) {
        (self.targets.count(), self.quads.count())
    }

    /// Change the eye packing. Targets and quads are released because
    /// their sizes and placement depend on the layout.
    pub fn set_layout(&mut self, layout: StereoLayout) {
        if layout != self.layout {
            log::debug!(
                "stereo layout {} -> {}",
                self.layout.name(),
                layout.name()
            );
            self.layout = layout;
            self.release_resources();
        }
    }

    /// Take every parameter from `options`.
    ///
    /// # Errors
    ///
    /// Returns [`StereoError::InvalidOption`] and changes nothing if any
    /// value is out of range.
    pub fn apply_options(
        &mut self,
        options: &StereoOptions,
    ) -> Result<(), StereoError> {
        options.validate()?;
        self.field_of_view = options.field_of_view;
        self.eye_separation = options.eye_separation;
        self.swap_eyes = options.swap_eyes;
        self.convergence = options.convergence;
        self.set_layout(options.layout);
        Ok(())
    }

    fn ensure_active(&self) -> Result<(), StereoError> {
        match self.lifecycle {
            Lifecycle::Attached => Ok(()),
            Lifecycle::Detached => Err(StereoError::Detached),
            Lifecycle::Deleted => Err(StereoError::Deleted),
        }
    }

    fn release_resources(&mut self) {
        // Quads reference target textures; drop them first.
        self.quads.clear();
        self.targets.clear();
    }

    /// Fetch `eye`'s target, recreating it when the output size changed.
    fn eye_render_target(
        &mut self,
        eye: Eye,
        renderer: &mut R,
    ) -> Result<&R::Target, StereoError> {
        let output = renderer.render_size();
        let size = self.layout.eye_target_size(output);
        if size.0 == 0 || size.1 == 0 {
            return Err(StereoError::DegenerateSize {
                width: output.0,
                height: output.1,
            });
        }

        let slot = self.targets.slot_mut(eye);
        if slot
            .as_ref()
            .is_some_and(|target| renderer.target_size(target) != size)
        {
            log::debug!("{} target stale, recreating", eye.label());
            *slot = None;
        }
        let quads = &mut self.quads;
        let target = slot.get_or_insert_with(|| {
            log::debug!("creating {} target {}x{}", eye.label(), size.0, size.1);
            let target =
                renderer.create_render_target(eye.label(), size.0, size.1);
            if let Some(quad) = quads.slot_mut(eye) {
                renderer.set_quad_texture(quad, &target);
            }
            target
        });
        Ok(&*target)
    }

    fn ensure_eye_quad(
        &mut self,
        eye: Eye,
        renderer: &mut R,
    ) -> Result<(), StereoError> {
        if self.quads.get(eye).is_some() {
            return Ok(());
        }
        let target = self.targets.get(eye).ok_or(StereoError::RenderOrder(
            "eye target released before compositing",
        ))?;
        let quad = renderer.create_quad(
            eye.label(),
            &self.layout.eye_quad(eye),
            target,
        );
        *self.quads.slot_mut(eye) = Some(quad);
        Ok(())
    }
}

impl<R: Renderer> Camera<R> for StereoCamera<R> {
    fn name(&self) -> &'static str {
        "stereo"
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

    fn view(&self, base: Place, view: Option<usize>) -> Place {
        let Some(index) = view else {
            return base;
        };
        let sign = if index == 0 { -1.0 } else { 1.0 };
        let shifted = base
            * Place::translation(Vec3::new(
                sign * 0.5 * self.eye_separation,
                0.0,
                0.0,
            ));
        if self.convergence == 0.0 {
            shifted
        } else {
            shifted * Place::rotation(Vec3::Y, sign * self.convergence)
        }
    }

    fn number_of_views(&self) -> usize {
        2
    }

    /// Picks through view 1 regardless of which half the pixel is in, so a
    /// pick matches the single-eye reference pick.
    fn ray(&self, window_x: f32, window_y: f32, window_size: (u32, u32)) -> Ray {
        let pick = self.layout.pick_viewport(window_x, window_y, window_size);
        let d = perspective_direction(
            pick.x,
            pick.y,
            pick.size,
            self.field_of_view,
        );
        let eye = self.get_position(Some(1));
        Ray {
            origin: eye.origin(),
            direction: eye.transform_vector(d),
        }
    }

    fn set_render_target(
        &mut self,
        view: usize,
        renderer: &mut R,
    ) -> Result<(), StereoError> {
        self.ensure_active()?;
        if view >= 2 {
            return Err(StereoError::InvalidView(view));
        }
        if view > 0 {
            if self.pushed.take().is_none() {
                return Err(StereoError::RenderOrder(
                    "second eye set before the first",
                ));
            }
            renderer.pop_render_target();
        } else if self.pushed.is_some() {
            return Err(StereoError::RenderOrder(
                "previous frame's eyes were never combined",
            ));
        }

        let eye = Eye::for_view(view, self.swap_eyes);
        let target = self.eye_render_target(eye, renderer)?;
        renderer.push_render_target(target);
        self.pushed = Some(eye);
        renderer.clear();
        if let Some(mask) = self.layout.eye_mask(eye) {
            renderer.set_color_mask(mask);
        }
        Ok(())
    }

    fn combine_rendered_views(
        &mut self,
        renderer: &mut R,
    ) -> Result<(), StereoError> {
        self.ensure_active()?;
        if self.pushed.take().is_none() {
            return Err(StereoError::RenderOrder(
                "combine called without a rendered eye",
            ));
        }
        renderer.pop_render_target();

        renderer.clear();
        let output = renderer.render_size();
        renderer.set_viewport(Viewport::full(output));

        for eye in Eye::BOTH {
            self.ensure_eye_quad(eye, renderer)?;
        }
        let (Some(left), Some(right)) =
            (self.quads.get(Eye::Left), self.quads.get(Eye::Right))
        else {
            return Err(StereoError::RenderOrder("eye quads missing"));
        };

        match self.layout {
            StereoLayout::Anaglyph => {
                renderer.set_color_mask(Eye::Left.color_mask());
                renderer.draw_quads(&[left]);
                renderer.set_color_mask(Eye::Right.color_mask());
                renderer.draw_quads(&[right]);
                renderer.set_color_mask(ColorMask::ALL);
            }
            StereoLayout::SideBySide | StereoLayout::TopBottom => {
                renderer.draw_quads(&[left, right]);
            }
        }
        Ok(())
    }

    fn configure(
        &mut self,
        settings: &CameraSettings,
    ) -> Result<bool, StereoError> {
        if let Some(fov) = settings.field_of_view {
            validate_field_of_view(fov)?;
        }
        if let Some(separation) = settings.eye_separation {
            validate_eye_separation(separation)?;
        }
        if let Some(convergence) = settings.convergence {
            validate_convergence(convergence)?;
        }

        if let Some(fov) = settings.field_of_view {
            self.field_of_view = fov;
        }
        if let Some(separation) = settings.eye_separation {
            self.eye_separation = separation;
        }
        if let Some(convergence) = settings.convergence {
            self.convergence = convergence;
        }
        if let Some(swap) = settings.swap_eyes {
            self.swap_eyes = swap;
        }
        if let Some(layout) = settings.layout {
            self.set_layout(layout);
        }
        Ok(!settings.is_empty())
    }

    fn report(&self) -> CameraReport {
        CameraReport {
            name: "stereo",
            position: self.position.origin(),
            view_direction: -self.position.z_axis(),
            field_of_view: self.field_of_view,
            stereo: Some(StereoReport {
                eye_separation: self.eye_separation,
                convergence: self.convergence,
                layout: self.layout,
                swap_eyes: self.swap_eyes,
            }),
        }
    }

    /// Deleting mid-frame cannot pop the pushed eye target: the renderer is
    /// not reachable here, so the host must pop it itself.
    fn delete(&mut self) {
        if self.lifecycle != Lifecycle::Deleted {
            log::debug!("deleting stereo camera");
        }
        if let Some(eye) = self.pushed {
            log::warn!(
                "stereo camera deleted with the {} target still pushed",
                eye.label()
            );
        }
        self.release_resources();
        self.pushed = None;
        self.lifecycle = Lifecycle::Deleted;
    }
}
