use std::sync::Arc;

use anyhow::Context as _;
use winit::window::Window;

use crate::camera::{Camera, CameraUniform};
use crate::scene::Scene;

use super::depth::{DepthTarget, DEPTH_FORMAT};
use super::gui::GuiRenderer;
use super::mesh::{SceneMesh, VERTEX_LAYOUT};

pub struct Renderer
{
  surface: wgpu::Surface<'static>,
  device: wgpu::Device,
  queue: wgpu::Queue,
  config: wgpu::SurfaceConfiguration,

  depth: DepthTarget,
  camera_buffer: wgpu::Buffer,
  camera_bind_group: wgpu::BindGroup,

  pipeline: wgpu::RenderPipeline,
  mesh: SceneMesh,

  pub gui: GuiRenderer,
}

//
// ──────────────────────────────────────────────────────────────
//   Public API
// ──────────────────────────────────────────────────────────────
//

impl Renderer
{
  pub async fn new(window: Arc<Window>, camera: &Camera, scene: &Scene) -> anyhow::Result<Self>
  {
    let instance = wgpu::Instance::default();
    let surface =
      instance.create_surface(window.clone()).context("creating the render surface")?;

    let adapter = instance
      .request_adapter(&wgpu::RequestAdapterOptions {
        power_preference: wgpu::PowerPreference::HighPerformance,
        compatible_surface: Some(&surface),
        force_fallback_adapter: false,
      })
      .await
      .context("no suitable GPU adapter found")?;

    let (device, queue) = adapter
      .request_device(&wgpu::DeviceDescriptor {
        label: Some("Vitrine Device"),
        ..Default::default()
      })
      .await
      .context("creating the GPU device")?;

    let config = configure_surface(&window, &surface, &adapter, &device)?;
    let depth = DepthTarget::create(&device, config.width, config.height);

    let (camera_buffer, camera_bind_group, camera_bgl) = create_camera_resources(&device);

    // Upload the initial camera uniform before the first frame.
    let uniform = CameraUniform::from_camera(camera);
    queue.write_buffer(&camera_buffer, 0, bytemuck::bytes_of(&uniform));

    let pipeline = create_pipeline(&device, &config, &camera_bgl);
    let mesh = SceneMesh::create(&device, scene);

    let gui = GuiRenderer::new(&device, config.format, &window);

    Ok(Self {
      surface,
      device,
      queue,
      config,
      depth,
      camera_buffer,
      camera_bind_group,
      pipeline,
      mesh,
      gui,
    })
  }

  pub fn resize(&mut self, width: u32, height: u32)
  {
    self.config.width = width;
    self.config.height = height;
    self.surface.configure(&self.device, &self.config);
    self.depth = DepthTarget::create(&self.device, width, height);
  }

  pub fn update_camera(&mut self, camera: &Camera)
  {
    let uniform = CameraUniform::from_camera(camera);
    self.queue.write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(&uniform));
  }

  pub fn render(&mut self, window: &Window, gui_output: egui::FullOutput)
  {
    let frame = match self.surface.get_current_texture()
    {
      Ok(frame) => frame,
      Err(_) =>
      {
        // Lost/outdated surface — reconfigure and retry once.
        self.surface.configure(&self.device, &self.config);

        match self.surface.get_current_texture()
        {
          Ok(frame) => frame,
          Err(err) =>
          {
            log::warn!("skipping frame, surface unavailable: {err}");
            return;
          }
        }
      }
    };

    let view = frame.texture.create_view(&wgpu::TextureViewDescriptor::default());

    let mut encoder =
      self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("Frame Encoder"),
      });

    record_scene_pass(
      &mut encoder,
      &view,
      &self.depth.view,
      &self.pipeline,
      &self.camera_bind_group,
      &self.mesh,
    );

    self.gui.render(&self.device, &self.queue, &mut encoder, window, &view, gui_output);

    self.queue.submit(Some(encoder.finish()));
    frame.present();
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Initialization Helpers
// ──────────────────────────────────────────────────────────────
//

fn configure_surface(
  window: &Window,
  surface: &wgpu::Surface<'_>,
  adapter: &wgpu::Adapter,
  device: &wgpu::Device,
) -> anyhow::Result<wgpu::SurfaceConfiguration>
{
  let size = window.inner_size();
  let caps = surface.get_capabilities(adapter);
  let format = caps.formats.first().copied().context("surface reports no texture formats")?;

  let config = wgpu::SurfaceConfiguration {
    usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
    format,
    width: size.width.max(1),
    height: size.height.max(1),
    present_mode: wgpu::PresentMode::Fifo,
    alpha_mode: wgpu::CompositeAlphaMode::Auto,
    view_formats: vec![],
    desired_maximum_frame_latency: 2,
  };

  surface.configure(device, &config);
  Ok(config)
}

fn create_camera_resources(
  device: &wgpu::Device,
) -> (wgpu::Buffer, wgpu::BindGroup, wgpu::BindGroupLayout)
{
  let camera_buffer = device.create_buffer(&wgpu::BufferDescriptor {
    label: Some("Camera Buffer"),
    size: std::mem::size_of::<CameraUniform>() as u64,
    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    mapped_at_creation: false,
  });

  let camera_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
    label: Some("Camera BGL"),
    entries: &[wgpu::BindGroupLayoutEntry {
      binding: 0,
      visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
      ty: wgpu::BindingType::Buffer {
        ty: wgpu::BufferBindingType::Uniform,
        has_dynamic_offset: false,
        min_binding_size: None,
      },
      count: None,
    }],
  });

  let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
    label: Some("Camera BG"),
    layout: &camera_bgl,
    entries: &[wgpu::BindGroupEntry { binding: 0, resource: camera_buffer.as_entire_binding() }],
  });

  (camera_buffer, camera_bind_group, camera_bgl)
}

fn create_pipeline(
  device: &wgpu::Device,
  config: &wgpu::SurfaceConfiguration,
  camera_bgl: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline
{
  let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
    label: Some("Scene Shader"),
    source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/scene.wgsl").into()),
  });

  let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
    label: Some("Scene Pipeline Layout"),
    bind_group_layouts: &[camera_bgl],
    push_constant_ranges: &[],
  });

  device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
    label: Some("Scene Pipeline"),
    layout: Some(&layout),
    vertex: wgpu::VertexState {
      module: &shader,
      entry_point: Some("vs_main"),
      buffers: &[VERTEX_LAYOUT],
      compilation_options: wgpu::PipelineCompilationOptions::default(),
    },
    fragment: Some(wgpu::FragmentState {
      module: &shader,
      entry_point: Some("fs_main"),
      targets: &[Some(wgpu::ColorTargetState {
        format: config.format,
        blend: Some(wgpu::BlendState::REPLACE),
        write_mask: wgpu::ColorWrites::ALL,
      })],
      compilation_options: wgpu::PipelineCompilationOptions::default(),
    }),
    primitive: wgpu::PrimitiveState::default(),
    depth_stencil: Some(wgpu::DepthStencilState {
      format: DEPTH_FORMAT,
      depth_write_enabled: true,
      depth_compare: wgpu::CompareFunction::Less,
      stencil: wgpu::StencilState::default(),
      bias: wgpu::DepthBiasState::default(),
    }),
    multisample: wgpu::MultisampleState::default(),
    multiview: None,
    cache: None,
  })
}

//
// ──────────────────────────────────────────────────────────────
//   Render Pass
// ──────────────────────────────────────────────────────────────
//

fn record_scene_pass(
  encoder: &mut wgpu::CommandEncoder,
  color_view: &wgpu::TextureView,
  depth_view: &wgpu::TextureView,
  pipeline: &wgpu::RenderPipeline,
  camera_bg: &wgpu::BindGroup,
  mesh: &SceneMesh,
)
{
  let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
    label: Some("Scene Pass"),
    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
      view: color_view,
      resolve_target: None,
      ops: wgpu::Operations {
        // #111111 showroom background
        load: wgpu::LoadOp::Clear(wgpu::Color { r: 0.006, g: 0.006, b: 0.007, a: 1.0 }),
        store: wgpu::StoreOp::Store,
      },
      depth_slice: None,
    })],
    depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
      view: depth_view,
      depth_ops: Some(wgpu::Operations {
        load: wgpu::LoadOp::Clear(1.0),
        store: wgpu::StoreOp::Store,
      }),
      stencil_ops: None,
    }),
    occlusion_query_set: None,
    timestamp_writes: None,
  });

  pass.set_pipeline(pipeline);
  pass.set_bind_group(0, camera_bg, &[]);
  pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
  pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
  pass.draw_indexed(0..mesh.index_count, 0, 0..1);
}
