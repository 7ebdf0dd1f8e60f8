//
// ──────────────────────────────────────────────────────────────
//   Depth attachment
//
//   Recreated whenever the surface is resized; the scene pass is
//   the only consumer.
// ──────────────────────────────────────────────────────────────
//

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

pub struct DepthTarget
{
  pub view: wgpu::TextureView,
}

impl DepthTarget
{
  pub fn create(device: &wgpu::Device, width: u32, height: u32) -> Self
  {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
      label: Some("Depth Texture"),
      size: wgpu::Extent3d { width, height, depth_or_array_layers: 1 },
      mip_level_count: 1,
      sample_count: 1,
      dimension: wgpu::TextureDimension::D2,
      format: DEPTH_FORMAT,
      usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
      view_formats: &[],
    });

    Self { view: texture.create_view(&wgpu::TextureViewDescriptor::default()) }
  }
}
