use glam::Vec3;

use super::Camera;

//
// ──────────────────────────────────────────────────────────────
//   Frame clamp
//
//   Hard safety net under the orbit limits: whatever wrote the eye
//   this frame (drag, flight, or a direct assignment), it must end
//   the frame inside this axis-aligned box. Runs once per tick,
//   after all other camera writers.
// ──────────────────────────────────────────────────────────────
//

pub const BOUNDS_MIN: Vec3 = Vec3::new(-10.0, 1.0, -10.0);
pub const BOUNDS_MAX: Vec3 = Vec3::new(10.0, 10.0, 10.0);

/// Clamp the camera eye into the showroom box. Returns true when the
/// eye actually moved, in which case the orbit rig must be resynced.
pub fn clamp_camera(camera: &mut Camera) -> bool
{
  let clamped = camera.eye.clamp(BOUNDS_MIN, BOUNDS_MAX);

  if clamped == camera.eye
  {
    return false;
  }

  camera.eye = clamped;
  true
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
  use crate::camera::OrbitRig;

  fn in_bounds(eye: Vec3) -> bool
  {
    eye.cmpge(BOUNDS_MIN).all() && eye.cmple(BOUNDS_MAX).all()
  }

  #[test]
  fn clamp_is_a_no_op_inside_the_box()
  {
    let mut camera = Camera::new(1.0);
    camera.eye = Vec3::new(0.0, 5.0, 3.0);

    assert!(!clamp_camera(&mut camera));
    assert_eq!(camera.eye, Vec3::new(0.0, 5.0, 3.0));
  }

  #[test]
  fn clamp_pulls_each_axis_to_its_boundary()
  {
    let mut camera = Camera::new(1.0);
    camera.eye = Vec3::new(-25.0, 0.2, 40.0);

    assert!(clamp_camera(&mut camera));
    assert_eq!(camera.eye, Vec3::new(-10.0, 1.0, 10.0));
  }

  #[test]
  fn eye_stays_in_bounds_across_a_wild_drag_sequence()
  {
    let mut camera = Camera::new(1.0);
    let mut rig = OrbitRig::from_camera(&camera);

    let gestures: [(f32, f32, f32); 6] = [
      (900.0, -400.0, -8.0),
      (-1200.0, 250.0, 0.0),
      (0.0, -900.0, -10.0),
      (2000.0, 0.0, 6.0),
      (-50.0, 1500.0, -4.0),
      (300.0, 300.0, 0.0),
    ];

    // Per-frame tick order as the app runs it: orbit update, then clamp.
    for (dx, dy, scroll) in gestures
    {
      rig.apply_drag(dx, dy);
      rig.apply_zoom(scroll);

      for _ in 0..120
      {
        let moving = rig.update(&mut camera);

        if clamp_camera(&mut camera)
        {
          rig.resync(&camera);
        }

        assert!(in_bounds(camera.eye), "eye escaped the box: {:?}", camera.eye);

        if !moving
        {
          break;
        }
      }
    }
  }
}
