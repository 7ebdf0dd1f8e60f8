pub mod bounds;
pub mod orbit;
pub mod uniform;

pub use orbit::OrbitRig;
pub use uniform::CameraUniform;

use glam::{Mat4, Vec3};

//
// ──────────────────────────────────────────────────────────────
//   Session camera (right-handed, Y-up)
//
//   Coordinate system:
//     X → right
//     Y → up
//     Z → toward the default eye (out of the showroom)
//
//   Exactly one camera exists per running session. It is owned by
//   the app and passed by reference to the three writers that need
//   it: the choreographer (during a flight), the orbit rig (during
//   manual drag) and the frame clamp.
// ──────────────────────────────────────────────────────────────
//

pub struct Camera
{
  pub eye: Vec3,
  pub target: Vec3,

  pub aspect: f32,
  pub fovy: f32,
  pub znear: f32,
  pub zfar: f32,
}

impl Camera
{
  pub fn new(aspect: f32) -> Self
  {
    Self {
      eye: default_eye(),
      target: Vec3::ZERO,

      aspect,
      fovy: 50f32.to_radians(),
      znear: 0.1,
      zfar: 100.0,
    }
  }

  pub fn set_aspect(&mut self, aspect: f32)
  {
    self.aspect = aspect;
  }

  pub fn build_view_proj(&self) -> Mat4
  {
    let view = build_view_matrix(self);
    let proj = build_projection_matrix(self);
    proj * view
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Matrix builders
// ──────────────────────────────────────────────────────────────
//

fn default_eye() -> Vec3
{
  Vec3::new(-5.0, 5.0, 10.0)
}

fn build_view_matrix(cam: &Camera) -> Mat4
{
  Mat4::look_at_rh(cam.eye, cam.target, up_vector(cam))
}

// Y degenerates as the up axis when the camera looks straight along
// it (the overhead station parks exactly on the pole). Fall back to
// Z there so the view basis stays orthonormal.
fn up_vector(cam: &Camera) -> Vec3
{
  let dir = (cam.target - cam.eye).normalize_or_zero();

  if dir.cross(Vec3::Y).length_squared() < 1e-8
  {
    Vec3::Z
  }
  else
  {
    Vec3::Y
  }
}

fn build_projection_matrix(cam: &Camera) -> Mat4
{
  Mat4::perspective_rh(cam.fovy, cam.aspect, cam.znear, cam.zfar)
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

  #[test]
  fn view_matrix_survives_looking_straight_down_the_up_axis()
  {
    let mut camera = Camera::new(1.0);
    camera.eye = Vec3::new(0.0, 10.0, 0.0);
    camera.target = Vec3::ZERO;

    assert_eq!(up_vector(&camera), Vec3::Z);
    assert!(camera.build_view_proj().is_finite());
  }

  #[test]
  fn view_matrix_survives_looking_straight_up()
  {
    let mut camera = Camera::new(1.0);
    camera.eye = Vec3::ZERO;
    camera.target = Vec3::new(0.0, 10.0, 0.0);

    assert_eq!(up_vector(&camera), Vec3::Z);
    assert!(camera.build_view_proj().is_finite());
  }

  #[test]
  fn ordinary_poses_keep_the_y_up_basis()
  {
    let camera = Camera::new(16.0 / 9.0);

    assert_eq!(up_vector(&camera), Vec3::Y);
    assert!(camera.build_view_proj().is_finite());
  }
}
