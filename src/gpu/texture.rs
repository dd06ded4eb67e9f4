//! Offscreen eye render targets.

/// Color + depth render target one eye is drawn into before compositing.
///
/// The color texture is created with `RENDER_ATTACHMENT | TEXTURE_BINDING`
/// so it can be rendered into and then sampled by an eye quad. Resizing is
/// destroy-and-recreate; dropping the target releases both textures.
pub struct RenderTarget {
    /// Color texture sampled during compositing.
    pub color: wgpu::Texture,
    /// Default view of the color texture.
    pub color_view: wgpu::TextureView,
    /// Depth texture for the eye's scene pass.
    pub depth: wgpu::Texture,
    /// Default view of the depth texture.
    pub depth_view: wgpu::TextureView,
    width: u32,
    height: u32,
}

impl RenderTarget {
    /// Depth format of every eye target.
    pub const DEPTH_FORMAT: wgpu::TextureFormat =
        wgpu::TextureFormat::Depth32Float;

    /// Create a target of the given size with a `format` color texture.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        label: &str,
        width: u32,
        height: u32,
        format: wgpu::TextureFormat,
    ) -> Self {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let color = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(&format!("{label} Color")),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                | wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let depth = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(&format!("{label} Depth")),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let color_view =
            color.create_view(&wgpu::TextureViewDescriptor::default());
        let depth_view =
            depth.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            color,
            color_view,
            depth,
            depth_view,
            width,
            height,
        }
    }

    /// Size in pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
