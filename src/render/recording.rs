//! Headless [`Renderer`] that records every call as a [`RenderCommand`].
//!
//! Useful for hosts that want to verify a camera's render-target discipline
//! without a GPU, and for exercising cameras in tests. Targets and quads
//! count themselves in and out of a live-allocation tally so resource leaks
//! and double releases are observable.

use std::cell::Cell;
use std::rc::Rc;

use super::{ColorMask, QuadGeometry, Renderer, Viewport};

/// One renderer call, in the order it was made.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// A target was allocated.
    CreateTarget {
        /// Target id.
        id: u32,
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
    },
    /// A target was pushed.
    PushTarget(u32),
    /// The top of the target stack was popped.
    PopTarget,
    /// The current destination was cleared (`None` = output framebuffer).
    Clear {
        /// Destination that was cleared.
        target: Option<u32>,
    },
    /// The color write mask changed.
    SetColorMask(ColorMask),
    /// The viewport changed.
    SetViewport(Viewport),
    /// A quad was built.
    CreateQuad {
        /// Quad id.
        id: u32,
        /// Target whose color image the quad samples.
        texture: u32,
        /// Quad corners.
        geometry: QuadGeometry,
    },
    /// A quad was re-pointed at another target.
    SetQuadTexture {
        /// Quad id.
        quad: u32,
        /// New texture target id.
        texture: u32,
    },
    /// Quads were drawn.
    DrawQuads {
        /// Quad ids in draw order.
        quads: Vec<u32>,
        /// Destination (`None` = output framebuffer).
        target: Option<u32>,
        /// Write mask in effect.
        mask: ColorMask,
    },
}

/// Offscreen target handed out by [`RecordingRenderer`].
#[derive(Debug)]
pub struct RecordedTarget {
    id: u32,
    width: u32,
    height: u32,
    live: Rc<Cell<usize>>,
}

impl RecordedTarget {
    /// Target id as it appears in the command log.
    #[must_use]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Size the target was created with.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl Drop for RecordedTarget {
    fn drop(&mut self) {
        self.live.set(self.live.get().saturating_sub(1));
    }
}

/// Screen quad handed out by [`RecordingRenderer`].
#[derive(Debug)]
pub struct RecordedQuad {
    id: u32,
    texture: u32,
    geometry: QuadGeometry,
    live: Rc<Cell<usize>>,
}

impl RecordedQuad {
    /// Quad id as it appears in the command log.
    #[must_use]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Id of the target currently textured onto the quad.
    #[must_use]
    pub fn texture(&self) -> u32 {
        self.texture
    }

    /// Quad corners.
    #[must_use]
    pub fn geometry(&self) -> &QuadGeometry {
        &self.geometry
    }
}

impl Drop for RecordedQuad {
    fn drop(&mut self) {
        self.live.set(self.live.get().saturating_sub(1));
    }
}

/// Command-log renderer.
#[derive(Debug)]
pub struct RecordingRenderer {
    size: (u32, u32),
    /// Pushed target ids with the viewport in effect before each push.
    stack: Vec<(u32, Viewport)>,
    mask: ColorMask,
    viewport: Viewport,
    next_id: u32,
    commands: Vec<RenderCommand>,
    live_targets: Rc<Cell<usize>>,
    live_quads: Rc<Cell<usize>>,
    underflows: usize,
}

impl RecordingRenderer {
    /// Renderer whose output framebuffer is `width` x `height`.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            stack: Vec::new(),
            mask: ColorMask::ALL,
            viewport: Viewport::full((width, height)),
            next_id: 0,
            commands: Vec::new(),
            live_targets: Rc::new(Cell::new(0)),
            live_quads: Rc::new(Cell::new(0)),
            underflows: 0,
        }
    }

    /// Change the output size, as a window resize would.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    /// Every command recorded so far.
    #[must_use]
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Drain the command log.
    pub fn take_commands(&mut self) -> Vec<RenderCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Number of pushed targets above the output framebuffer.
    #[must_use]
    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    /// Id of the target on top of the stack (`None` = output framebuffer).
    #[must_use]
    pub fn current_target(&self) -> Option<u32> {
        self.stack.last().map(|&(id, _)| id)
    }

    /// Write mask currently in effect.
    #[must_use]
    pub fn color_mask(&self) -> ColorMask {
        self.mask
    }

    /// Viewport currently in effect.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Targets created and not yet dropped.
    #[must_use]
    pub fn live_targets(&self) -> usize {
        self.live_targets.get()
    }

    /// Quads created and not yet dropped.
    #[must_use]
    pub fn live_quads(&self) -> usize {
        self.live_quads.get()
    }

    /// Pops attempted with nothing pushed.
    #[must_use]
    pub fn underflows(&self) -> usize {
        self.underflows
    }

    fn allocate_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl Renderer for RecordingRenderer {
    type Target = RecordedTarget;
    type Quad = RecordedQuad;

    fn render_size(&self) -> (u32, u32) {
        self.size
    }

    fn target_size(&self, target: &RecordedTarget) -> (u32, u32) {
        target.size()
    }

    fn create_render_target(
        &mut self,
        label: &str,
        width: u32,
        height: u32,
    ) -> RecordedTarget {
        let id = self.allocate_id();
        log::debug!("recording target {id} '{label}' {width}x{height}");
        self.live_targets.set(self.live_targets.get() + 1);
        self.commands.push(RenderCommand::CreateTarget { id, width, height });
        RecordedTarget {
            id,
            width,
            height,
            live: Rc::clone(&self.live_targets),
        }
    }

    fn push_render_target(&mut self, target: &RecordedTarget) {
        self.stack.push((target.id, self.viewport));
        self.viewport = Viewport::full(target.size());
        self.commands.push(RenderCommand::PushTarget(target.id));
    }

    fn pop_render_target(&mut self) {
        match self.stack.pop() {
            Some((_, previous)) => self.viewport = previous,
            None => {
                log::warn!("render target stack underflow");
                self.underflows += 1;
            }
        }
        self.commands.push(RenderCommand::PopTarget);
    }

    fn clear(&mut self) {
        let target = self.current_target();
        self.commands.push(RenderCommand::Clear { target });
    }

    fn set_color_mask(&mut self, mask: ColorMask) {
        self.mask = mask;
        self.commands.push(RenderCommand::SetColorMask(mask));
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.commands.push(RenderCommand::SetViewport(viewport));
    }

    fn create_quad(
        &mut self,
        label: &str,
        geometry: &QuadGeometry,
        texture: &RecordedTarget,
    ) -> RecordedQuad {
        let id = self.allocate_id();
        log::debug!("recording quad {id} '{label}'");
        self.live_quads.set(self.live_quads.get() + 1);
        self.commands.push(RenderCommand::CreateQuad {
            id,
            texture: texture.id,
            geometry: geometry.clone(),
        });
        RecordedQuad {
            id,
            texture: texture.id,
            geometry: geometry.clone(),
            live: Rc::clone(&self.live_quads),
        }
    }

    fn set_quad_texture(
        &mut self,
        quad: &mut RecordedQuad,
        texture: &RecordedTarget,
    ) {
        quad.texture = texture.id;
        self.commands.push(RenderCommand::SetQuadTexture {
            quad: quad.id,
            texture: texture.id,
        });
    }

    fn draw_quads(&mut self, quads: &[&RecordedQuad]) {
        let target = self.current_target();
        self.commands.push(RenderCommand::DrawQuads {
            quads: quads.iter().map(|q| q.id).collect(),
            target,
            mask: self.mask,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropping_resources_updates_live_counts() {
        let mut r = RecordingRenderer::new(64, 32);
        let t = r.create_render_target("a", 32, 32);
        let q = r.create_quad("q", &QuadGeometry::full_screen(), &t);
        assert_eq!(r.live_targets(), 1);
        assert_eq!(r.live_quads(), 1);
        drop(q);
        drop(t);
        assert_eq!(r.live_targets(), 0);
        assert_eq!(r.live_quads(), 0);
    }

    #[test]
    fn clears_and_draws_go_to_top_of_stack() {
        let mut r = RecordingRenderer::new(64, 32);
        let t = r.create_render_target("a", 64, 32);
        r.push_render_target(&t);
        r.clear();
        r.pop_render_target();
        r.clear();
        let cmds = r.take_commands();
        assert!(cmds.contains(&RenderCommand::Clear { target: Some(t.id()) }));
        assert_eq!(cmds.last(), Some(&RenderCommand::Clear { target: None }));
        assert_eq!(r.stack_depth(), 0);
    }

    #[test]
    fn push_fits_viewport_to_target_and_pop_restores_it() {
        let mut r = RecordingRenderer::new(800, 600);
        let inner = Viewport { x: 10, y: 20, width: 100, height: 50 };
        r.set_viewport(inner);
        let t = r.create_render_target("half", 400, 600);
        r.push_render_target(&t);
        assert_eq!(r.viewport(), Viewport::full((400, 600)));
        r.pop_render_target();
        assert_eq!(r.viewport(), inner);
    }

    #[test]
    fn pop_on_empty_stack_is_counted() {
        let mut r = RecordingRenderer::new(8, 8);
        r.pop_render_target();
        assert_eq!(r.underflows(), 1);
    }
}
