use glam::Vec3;

use crate::config::ShowroomConfig;

//
// ──────────────────────────────────────────────────────────────
//   Viewpoint table
//
//   A viewpoint is a camera pose: where the eye sits and what it
//   looks at. The table is built once from the station config and
//   indexed by the same order the panel buttons are registered in.
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewpoint
{
  pub position: Vec3,
  pub target: Vec3,
}

pub struct ViewpointTable
{
  viewpoints: Vec<Viewpoint>,
}

impl ViewpointTable
{
  pub fn from_config(config: &ShowroomConfig) -> Self
  {
    let viewpoints = config
      .stations
      .iter()
      .map(|s| Viewpoint {
        position: Vec3::from_array(s.position),
        target: Vec3::from_array(s.target),
      })
      .collect();

    Self { viewpoints }
  }

  pub fn get(&self, index: usize) -> Option<&Viewpoint>
  {
    self.viewpoints.get(index)
  }

  pub fn len(&self) -> usize
  {
    self.viewpoints.len()
  }
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
  fn table_is_index_addressable()
  {
    let table = ViewpointTable::from_config(&config::load().unwrap());

    assert_eq!(table.len(), 4);
    assert_eq!(table.get(1).unwrap().position, Vec3::new(0.0, 4.3, 0.0));
    assert!(table.get(4).is_none());
  }
}
