//! GPU eye quads: a vertex/index buffer pair plus a bind group sampling an
//! eye target's color texture.

use wgpu::util::DeviceExt;

use crate::gpu::texture::RenderTarget;
use crate::render::QuadGeometry;

/// Per-vertex data of an eye quad.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadVertex {
    /// NDC position.
    pub position: [f32; 3],
    /// Texture coordinate, bottom-left origin.
    pub tex_coord: [f32; 2],
}

impl QuadVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2];

    /// Vertex buffer layout matching `eye_quad.wgsl`.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Textured rectangle that blits one eye target into the destination.
///
/// Holds a bind group over the target's color view, not the target itself;
/// after the target is recreated the bind group must be rebuilt with
/// [`EyeQuad::set_texture`].
pub struct EyeQuad {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    index_count: u32,
    label: String,
}

impl EyeQuad {
    /// Upload `geometry` and bind `texture`'s color view.
    pub fn new(
        device: &wgpu::Device,
        label: &str,
        geometry: &QuadGeometry,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        texture: &RenderTarget,
    ) -> Self {
        let vertices: Vec<QuadVertex> = geometry
            .positions
            .iter()
            .zip(&geometry.tex_coords)
            .map(|(&position, &tex_coord)| QuadVertex {
                position,
                tex_coord,
            })
            .collect();
        let indices: Vec<u32> =
            geometry.triangles.iter().flatten().copied().collect();

        let vertex_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Vertex Buffer")),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Index Buffer")),
                contents: bytemuck::cast_slice(&indices),
                usage: wgpu::BufferUsages::INDEX,
            });
        let bind_group =
            Self::create_bind_group(device, label, layout, sampler, texture);

        Self {
            vertex_buffer,
            index_buffer,
            bind_group,
            index_count: indices.len() as u32,
            label: label.to_owned(),
        }
    }

    fn create_bind_group(
        device: &wgpu::Device,
        label: &str,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        texture: &RenderTarget,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{label} Bind Group")),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(
                        &texture.color_view,
                    ),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        })
    }

    /// Rebind to a (recreated) target's color view.
    pub fn set_texture(
        &mut self,
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        texture: &RenderTarget,
    ) {
        self.bind_group = Self::create_bind_group(
            device,
            &self.label,
            layout,
            sampler,
            texture,
        );
    }

    /// Record the quad's draw into an open render pass.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_index_buffer(
            self.index_buffer.slice(..),
            wgpu::IndexFormat::Uint32,
        );
        pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}
