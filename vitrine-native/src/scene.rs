use glam::Vec3;

use crate::config::ShowroomConfig;
use crate::pick::{Aabb, Clickable};

//
// ──────────────────────────────────────────────────────────────
//   Showroom layout
//
//   Stand-in geometry for the showroom: everything is an axis-
//   aligned coloured block. The button panel sits on the left wall
//   at (-5, 3, 0); each station button is a composite of outline,
//   face and label strip, exactly the volumes the hit-tester sees.
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy)]
pub struct Block
{
  pub min: Vec3,
  pub max: Vec3,
  pub color: [f32; 3],
}

pub struct Scene
{
  pub blocks: Vec<Block>,
  /// One composite clickable per station, in station order.
  pub buttons: Vec<Clickable>,
}

//
// ──────────────────────────────────────────────────────────────
//   Layout constants
// ──────────────────────────────────────────────────────────────
//

const PANEL_CENTER: Vec3 = Vec3::new(-5.0, 3.0, 0.0);
const PANEL_COLOR: [f32; 3] = [0.2, 0.2, 0.2];
const OUTLINE_COLOR: [f32; 3] = [0.02, 0.02, 0.02];
const LABEL_COLOR: [f32; 3] = [0.95, 0.95, 0.95];

const BUTTON_SPACING: f32 = 0.7;
const BUTTON_HALF: Vec3 = Vec3::new(0.75, 0.25, 0.05);
const OUTLINE_HALF: Vec3 = Vec3::new(0.775, 0.275, 0.05);
const LABEL_HALF: Vec3 = Vec3::new(0.6, 0.1, 0.01);

//
// ──────────────────────────────────────────────────────────────
//   Public API
// ──────────────────────────────────────────────────────────────
//

pub fn build(config: &ShowroomConfig) -> Scene
{
  let mut blocks = Vec::new();
  let mut buttons = Vec::new();

  push_room(&mut blocks);
  push_panel(&mut blocks);

  for (index, station) in config.stations.iter().enumerate()
  {
    let center = button_center(index);
    let (button_blocks, clickable) = build_button(center, station.color);

    blocks.extend(button_blocks);
    buttons.push(clickable);
  }

  Scene { blocks, buttons }
}

/// World-space centre of the button for station `index`, top-down on
/// the panel.
pub fn button_center(index: usize) -> Vec3
{
  PANEL_CENTER + Vec3::new(0.0, (1.5 - index as f32) * BUTTON_SPACING, 0.05)
}

//
// ──────────────────────────────────────────────────────────────
//   Layout helpers
// ──────────────────────────────────────────────────────────────
//

fn block(center: Vec3, half: Vec3, color: [f32; 3]) -> Block
{
  Block { min: center - half, max: center + half, color }
}

fn push_room(blocks: &mut Vec<Block>)
{
  // Floor slab
  blocks.push(block(Vec3::new(0.0, -0.1, 0.0), Vec3::new(15.0, 0.1, 15.0), [0.08, 0.08, 0.09]));

  // Display wall the first two stations look toward
  blocks.push(block(Vec3::new(0.0, 2.5, -8.0), Vec3::new(4.0, 2.5, 0.2), [0.12, 0.12, 0.14]));

  // Screen inset on the display wall
  blocks.push(block(Vec3::new(0.0, 2.8, -7.75), Vec3::new(2.8, 1.4, 0.05), [0.05, 0.09, 0.12]));

  // Desk block near the About station's line of sight
  blocks.push(block(Vec3::new(4.0, 0.6, -3.0), Vec3::new(1.6, 0.6, 0.8), [0.25, 0.18, 0.12]));
}

fn push_panel(blocks: &mut Vec<Block>)
{
  blocks.push(block(PANEL_CENTER, Vec3::new(1.0, 1.5, 0.01), PANEL_COLOR));
}

fn build_button(center: Vec3, color: [f32; 3]) -> (Vec<Block>, Clickable)
{
  let outline = block(center - Vec3::new(0.0, 0.0, 0.01), OUTLINE_HALF, OUTLINE_COLOR);
  let face = block(center, BUTTON_HALF, color);
  let label = block(center + Vec3::new(0.0, 0.0, 0.06), LABEL_HALF, LABEL_COLOR);

  let clickable = Clickable {
    volumes: vec![
      Aabb { min: outline.min, max: outline.max },
      Aabb { min: face.min, max: face.max },
      Aabb { min: label.min, max: label.max },
    ],
  };

  (vec![outline, face, label], clickable)
}

//
// ──────────────────────────────────────────────────────────────
//   Tests
// ──────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests
{
  use super::*;
  use crate::config;

  #[test]
  fn one_composite_button_per_station()
  {
    let config = config::load().unwrap();
    let scene = build(&config);

    assert_eq!(scene.buttons.len(), config.stations.len());

    for button in &scene.buttons
    {
      assert_eq!(button.volumes.len(), 3);
    }
  }

  #[test]
  fn buttons_stack_top_down_on_the_panel()
  {
    assert_eq!(button_center(0).y, 3.0 + 1.05);
    assert_eq!(button_center(3).y, 3.0 - 1.05);

    // All on the panel face
    for index in 0..4
    {
      let c = button_center(index);
      assert_eq!(c.x, -5.0);
      assert_eq!(c.z, 0.05);
    }
  }

  #[test]
  fn button_volumes_sit_in_front_of_the_panel()
  {
    let config = config::load().unwrap();
    let scene = build(&config);

    for button in &scene.buttons
    {
      for volume in &button.volumes
      {
        assert!(volume.max.z > 0.0);
        assert!(volume.min.x >= -6.0 && volume.max.x <= -4.0);
      }
    }
  }
}
