use wgpu::util::DeviceExt;

use crate::scene::{Block, Scene};

//
// ──────────────────────────────────────────────────────────────
//   Scene mesh
//
//   The whole showroom bakes into one vertex/index buffer pair at
//   startup: every block contributes 24 vertices (4 per face) with
//   a per-face shade factor pre-multiplied into the colour, which
//   stands in for lighting without any per-frame work.
// ──────────────────────────────────────────────────────────────
//

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex
{
  pub position: [f32; 3],
  pub color: [f32; 3],
}

pub struct SceneMesh
{
  pub vertex_buffer: wgpu::Buffer,
  pub index_buffer: wgpu::Buffer,
  pub index_count: u32,
}

pub const VERTEX_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
  array_stride: std::mem::size_of::<Vertex>() as u64,
  step_mode: wgpu::VertexStepMode::Vertex,
  attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3],
};

impl SceneMesh
{
  pub fn create(device: &wgpu::Device, scene: &Scene) -> Self
  {
    let mut vertices: Vec<Vertex> = Vec::with_capacity(scene.blocks.len() * 24);
    let mut indices: Vec<u32> = Vec::with_capacity(scene.blocks.len() * 36);

    for block in &scene.blocks
    {
      push_block(&mut vertices, &mut indices, block);
    }

    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
      label: Some("Scene Vertex Buffer"),
      contents: bytemuck::cast_slice(&vertices),
      usage: wgpu::BufferUsages::VERTEX,
    });

    let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
      label: Some("Scene Index Buffer"),
      contents: bytemuck::cast_slice(&indices),
      usage: wgpu::BufferUsages::INDEX,
    });

    Self { vertex_buffer, index_buffer, index_count: indices.len() as u32 }
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Block tessellation
// ──────────────────────────────────────────────────────────────
//

// Fake top-light: each face keeps a fixed fraction of the block colour.
const SHADE: [f32; 6] = [
  1.0,  // +Y top
  0.45, // -Y bottom
  0.85, // +Z
  0.7,  // -Z
  0.8,  // +X
  0.65, // -X
];

fn push_block(vertices: &mut Vec<Vertex>, indices: &mut Vec<u32>, block: &Block)
{
  let (lo, hi) = (block.min, block.max);

  // 4 corners per face, counter-clockwise seen from outside.
  #[rustfmt::skip]
  let faces: [[[f32; 3]; 4]; 6] = [
    [[lo.x, hi.y, hi.z], [hi.x, hi.y, hi.z], [hi.x, hi.y, lo.z], [lo.x, hi.y, lo.z]], // +Y
    [[lo.x, lo.y, lo.z], [hi.x, lo.y, lo.z], [hi.x, lo.y, hi.z], [lo.x, lo.y, hi.z]], // -Y
    [[lo.x, lo.y, hi.z], [hi.x, lo.y, hi.z], [hi.x, hi.y, hi.z], [lo.x, hi.y, hi.z]], // +Z
    [[hi.x, lo.y, lo.z], [lo.x, lo.y, lo.z], [lo.x, hi.y, lo.z], [hi.x, hi.y, lo.z]], // -Z
    [[hi.x, lo.y, hi.z], [hi.x, lo.y, lo.z], [hi.x, hi.y, lo.z], [hi.x, hi.y, hi.z]], // +X
    [[lo.x, lo.y, lo.z], [lo.x, lo.y, hi.z], [lo.x, hi.y, hi.z], [lo.x, hi.y, lo.z]], // -X
  ];

  for (face, shade) in faces.iter().zip(SHADE)
  {
    let base = vertices.len() as u32;
    let color = [block.color[0] * shade, block.color[1] * shade, block.color[2] * shade];

    for corner in face
    {
      vertices.push(Vertex { position: *corner, color });
    }

    indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
  }
}
