//! [`Renderer`] implementation on wgpu.
//!
//! The renderer records into one command encoder per frame. The host calls
//! [`GpuRenderer::begin_frame`] with the view it wants the final image in,
//! drives its cameras, draws its scene into
//! [`GpuRenderer::current_color_view`] / [`GpuRenderer::current_depth_view`]
//! between eye switches, and submits with [`GpuRenderer::end_frame`].
//!
//! wgpu bakes write masks into pipelines, so scene pipelines must be built
//! with [`GpuRenderer::write_mask`] to honor the per-eye anaglyph mask.

use rustc_hash::FxHashMap;

use crate::gpu::pipeline_helpers::{
    create_quad_pipeline, filtering_sampler, linear_sampler, texture_2d,
};
use crate::gpu::quad::EyeQuad;
use crate::gpu::render_context::RenderContext;
use crate::gpu::texture::RenderTarget;
use crate::render::{ColorMask, QuadGeometry, Renderer, Viewport};

/// A pushed render target, held by view so the camera keeps ownership.
struct StackEntry {
    color: wgpu::TextureView,
    depth: wgpu::TextureView,
    size: (u32, u32),
    /// Viewport restored when this entry is popped.
    saved_viewport: Viewport,
}

/// Where clears and draws currently land.
struct Destination {
    color: wgpu::TextureView,
    depth: Option<wgpu::TextureView>,
    size: (u32, u32),
}

/// wgpu-backed host renderer.
pub struct GpuRenderer {
    context: RenderContext,
    shader: wgpu::ShaderModule,
    quad_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    pipelines: FxHashMap<ColorMask, wgpu::RenderPipeline>,
    output: Option<wgpu::TextureView>,
    stack: Vec<StackEntry>,
    encoder: Option<wgpu::CommandEncoder>,
    mask: ColorMask,
    viewport: Viewport,
    clear_color: wgpu::Color,
}

impl GpuRenderer {
    /// Build the quad shader, bind group layout and sampler on `context`.
    #[must_use]
    pub fn new(context: RenderContext) -> Self {
        let shader = context.device.create_shader_module(wgpu::include_wgsl!(
            "../../assets/shaders/eye_quad.wgsl"
        ));
        let quad_layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Eye Quad Bind Group Layout"),
                entries: &[texture_2d(0), filtering_sampler(1)],
            },
        );
        let sampler = linear_sampler(&context.device, "Eye Quad Sampler");
        let viewport = Viewport::full(context.size());

        Self {
            context,
            shader,
            quad_layout,
            sampler,
            pipelines: FxHashMap::default(),
            output: None,
            stack: Vec::new(),
            encoder: None,
            mask: ColorMask::ALL,
            viewport,
            clear_color: wgpu::Color::BLACK,
        }
    }

    /// The underlying device and queue.
    #[must_use]
    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    /// Mutable access, e.g. to track an output resize.
    pub fn context_mut(&mut self) -> &mut RenderContext {
        &mut self.context
    }

    /// Color used by [`Renderer::clear`].
    pub fn set_clear_color(&mut self, color: wgpu::Color) {
        self.clear_color = color;
    }

    /// Start a frame whose final image lands in `output`.
    pub fn begin_frame(&mut self, output: wgpu::TextureView) {
        if !self.stack.is_empty() {
            log::warn!(
                "begin_frame with {} render targets still pushed",
                self.stack.len()
            );
            self.stack.clear();
        }
        self.output = Some(output);
        self.mask = ColorMask::ALL;
        self.viewport = Viewport::full(self.context.size());
    }

    /// Submit everything recorded since [`GpuRenderer::begin_frame`].
    pub fn end_frame(&mut self) {
        if let Some(encoder) = self.encoder.take() {
            self.context.submit(encoder);
        }
        self.output = None;
    }

    /// Encoder for the host's own scene passes this frame.
    pub fn encoder(&mut self) -> &mut wgpu::CommandEncoder {
        self.encoder
            .get_or_insert_with(|| self.context.create_encoder())
    }

    /// Number of pushed targets above the output.
    #[must_use]
    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    /// Color view scene passes should render into.
    #[must_use]
    pub fn current_color_view(&self) -> Option<&wgpu::TextureView> {
        self.stack
            .last()
            .map(|entry| &entry.color)
            .or(self.output.as_ref())
    }

    /// Depth view scene passes should render into (`None` on the output).
    #[must_use]
    pub fn current_depth_view(&self) -> Option<&wgpu::TextureView> {
        self.stack.last().map(|entry| &entry.depth)
    }

    /// Write mask in effect.
    #[must_use]
    pub fn color_mask(&self) -> ColorMask {
        self.mask
    }

    /// Write mask in effect, as scene pipelines need it.
    #[must_use]
    pub fn write_mask(&self) -> wgpu::ColorWrites {
        self.mask.into()
    }

    /// Viewport in effect.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn destination(&self) -> Option<Destination> {
        if let Some(entry) = self.stack.last() {
            return Some(Destination {
                color: entry.color.clone(),
                depth: Some(entry.depth.clone()),
                size: entry.size,
            });
        }
        self.output.as_ref().map(|color| Destination {
            color: color.clone(),
            depth: None,
            size: self.context.size(),
        })
    }
}

impl Renderer for GpuRenderer {
    type Target = RenderTarget;
    type Quad = EyeQuad;

    fn render_size(&self) -> (u32, u32) {
        self.context.size()
    }

    fn target_size(&self, target: &RenderTarget) -> (u32, u32) {
        target.size()
    }

    fn create_render_target(
        &mut self,
        label: &str,
        width: u32,
        height: u32,
    ) -> RenderTarget {
        RenderTarget::new(
            &self.context.device,
            label,
            width,
            height,
            self.context.format(),
        )
    }

    fn push_render_target(&mut self, target: &RenderTarget) {
        self.stack.push(StackEntry {
            color: target.color_view.clone(),
            depth: target.depth_view.clone(),
            size: target.size(),
            saved_viewport: self.viewport,
        });
        self.viewport = Viewport::full(target.size());
    }

    fn pop_render_target(&mut self) {
        match self.stack.pop() {
            Some(entry) => self.viewport = entry.saved_viewport,
            None => log::warn!("render target stack underflow"),
        }
    }

    fn clear(&mut self) {
        let Some(dest) = self.destination() else {
            log::warn!("clear with no output view; call begin_frame first");
            return;
        };
        let clear_color = self.clear_color;
        let encoder = self
            .encoder
            .get_or_insert_with(|| self.context.create_encoder());
        let _clear_pass =
            encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Stereo Clear Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &dest.color,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: dest.depth.as_ref().map(|view| {
                    wgpu::RenderPassDepthStencilAttachment {
                        view,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    }
                }),
                ..Default::default()
            });
    }

    fn set_color_mask(&mut self, mask: ColorMask) {
        self.mask = mask;
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn create_quad(
        &mut self,
        label: &str,
        geometry: &QuadGeometry,
        texture: &RenderTarget,
    ) -> EyeQuad {
        EyeQuad::new(
            &self.context.device,
            label,
            geometry,
            &self.quad_layout,
            &self.sampler,
            texture,
        )
    }

    fn set_quad_texture(&mut self, quad: &mut EyeQuad, texture: &RenderTarget) {
        quad.set_texture(
            &self.context.device,
            &self.quad_layout,
            &self.sampler,
            texture,
        );
    }

    fn draw_quads(&mut self, quads: &[&EyeQuad]) {
        if quads.is_empty() {
            return;
        }
        let Some(dest) = self.destination() else {
            log::warn!("draw with no output view; call begin_frame first");
            return;
        };
        let (width, height) = dest.size;
        let x = self.viewport.x.min(width.saturating_sub(1));
        let y = self.viewport.y.min(height.saturating_sub(1));
        let vw = self.viewport.width.min(width - x);
        let vh = self.viewport.height.min(height - y);
        if vw == 0 || vh == 0 {
            return;
        }

        let mask = self.mask;
        let format = self.context.format();
        let pipeline = self.pipelines.entry(mask).or_insert_with(|| {
            log::debug!("building eye quad pipeline for {mask:?}");
            create_quad_pipeline(
                &self.context.device,
                &self.shader,
                format,
                &self.quad_layout,
                mask,
            )
        });
        let encoder = self
            .encoder
            .get_or_insert_with(|| self.context.create_encoder());

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Eye Quad Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &dest.color,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            ..Default::default()
        });
        pass.set_pipeline(pipeline);
        pass.set_viewport(
            x as f32, y as f32, vw as f32, vh as f32, 0.0, 1.0,
        );
        for quad in quads {
            quad.draw(&mut pass);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{Camera, Eye, StereoCamera};
    use crate::geometry::Place;
    use crate::options::{StereoLayout, StereoOptions};

    const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

    fn headless(width: u32, height: u32) -> Option<GpuRenderer> {
        let context = pollster::block_on(RenderContext::new_headless(
            width, height, FORMAT,
        ))
        .ok()?;
        Some(GpuRenderer::new(context))
    }

    fn output_texture(renderer: &GpuRenderer) -> wgpu::Texture {
        let (width, height) = renderer.render_size();
        renderer
            .context()
            .device
            .create_texture(&wgpu::TextureDescriptor {
                label: Some("Test Output"),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: FORMAT,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                    | wgpu::TextureUsages::COPY_SRC,
                view_formats: &[],
            })
    }

    fn stereo_camera(layout: StereoLayout) -> StereoCamera<GpuRenderer> {
        let mut camera = StereoCamera::new(&StereoOptions {
            layout,
            ..StereoOptions::default()
        });
        camera.attach(Place::IDENTITY).unwrap();
        camera
    }

    /// Render a frame where each eye's scene is a flat clear color.
    fn render_frame(
        renderer: &mut GpuRenderer,
        camera: &mut StereoCamera<GpuRenderer>,
        output: &wgpu::Texture,
        eye_colors: [wgpu::Color; 2],
    ) {
        renderer.begin_frame(
            output.create_view(&wgpu::TextureViewDescriptor::default()),
        );
        for (view, color) in eye_colors.into_iter().enumerate() {
            renderer.set_clear_color(color);
            camera.set_render_target(view, renderer).unwrap();
            assert!(renderer.current_depth_view().is_some());
            let eye = camera.pushed_eye().unwrap();
            let size = camera.eye_target(eye).unwrap().size();
            assert_eq!(renderer.viewport(), Viewport::full(size));
        }
        renderer.set_clear_color(wgpu::Color::BLACK);
        camera.combine_rendered_views(renderer).unwrap();
        assert_eq!(renderer.stack_depth(), 0);
        assert_eq!(renderer.color_mask(), ColorMask::ALL);
        assert_eq!(
            renderer.viewport(),
            Viewport::full(renderer.render_size())
        );
    }

    /// Copy `output` into a mappable buffer and return pixel `(x, y)`.
    fn read_pixel(
        renderer: &mut GpuRenderer,
        output: &wgpu::Texture,
        x: u32,
        y: u32,
    ) -> [u8; 4] {
        let (width, height) = renderer.render_size();
        // Rows must be 256-byte aligned for buffer copies.
        let bytes_per_row = (width * 4).div_ceil(256) * 256;
        let buffer =
            renderer
                .context()
                .device
                .create_buffer(&wgpu::BufferDescriptor {
                    label: Some("Test Readback"),
                    size: u64::from(bytes_per_row * height),
                    usage: wgpu::BufferUsages::COPY_DST
                        | wgpu::BufferUsages::MAP_READ,
                    mapped_at_creation: false,
                });
        renderer.encoder().copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: output,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(bytes_per_row),
                    rows_per_image: Some(height),
                },
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
        renderer.end_frame();

        let slice = buffer.slice(..);
        slice.map_async(wgpu::MapMode::Read, |_| {});
        let _ = renderer
            .context()
            .device
            .poll(wgpu::PollType::Wait)
            .unwrap();
        let data = slice.get_mapped_range();
        let offset = (y * bytes_per_row + x * 4) as usize;
        [data[offset], data[offset + 1], data[offset + 2], data[offset + 3]]
    }

    #[test]
    fn stereo_frames_on_headless_device() {
        // Skips silently on machines without any wgpu adapter.
        let Some(mut renderer) = headless(64, 48) else {
            return;
        };
        for layout in [
            StereoLayout::Anaglyph,
            StereoLayout::SideBySide,
            StereoLayout::TopBottom,
        ] {
            let mut camera = stereo_camera(layout);
            let output = output_texture(&renderer);
            for _ in 0..2 {
                render_frame(
                    &mut renderer,
                    &mut camera,
                    &output,
                    [wgpu::Color::WHITE, wgpu::Color::BLACK],
                );
                renderer.end_frame();
            }

            renderer.context_mut().resize(32, 24);
            let output = output_texture(&renderer);
            render_frame(
                &mut renderer,
                &mut camera,
                &output,
                [wgpu::Color::WHITE, wgpu::Color::BLACK],
            );
            renderer.end_frame();
            let expected = layout.eye_target_size((32, 24));
            assert_eq!(camera.eye_target(Eye::Left).unwrap().size(), expected);

            camera.delete();
            renderer.context_mut().resize(64, 48);
        }
    }

    #[test]
    fn anaglyph_takes_red_from_left_and_cyan_from_right() {
        let Some(mut renderer) = headless(64, 48) else {
            return;
        };
        let mut camera = stereo_camera(StereoLayout::Anaglyph);
        let output = output_texture(&renderer);

        render_frame(
            &mut renderer,
            &mut camera,
            &output,
            [wgpu::Color::WHITE, wgpu::Color::BLACK],
        );
        let pixel = read_pixel(&mut renderer, &output, 32, 24);
        assert_eq!(&pixel[..3], [255, 0, 0]);

        render_frame(
            &mut renderer,
            &mut camera,
            &output,
            [wgpu::Color::BLACK, wgpu::Color::WHITE],
        );
        let pixel = read_pixel(&mut renderer, &output, 32, 24);
        assert_eq!(&pixel[..3], [0, 255, 255]);
        camera.delete();
    }
}
