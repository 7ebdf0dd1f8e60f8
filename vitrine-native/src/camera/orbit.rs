use glam::Vec3;

use super::Camera;

//
// ──────────────────────────────────────────────────────────────
//   Orbit rig (spherical coordinates around a focus point)
//
//   Spherical convention, Y-up:
//     azimuth = horizontal angle around Y, measured from +Z
//     polar   = angle from the +Y axis (0 = straight overhead)
//     radius  = distance from the focus point to the eye
//
//   Drag input is accumulated into delta angles and integrated
//   with damping each frame, so rotation eases out instead of
//   stopping dead with the pointer. Panning is not offered — the
//   focus point only ever moves via a choreographed flight.
// ──────────────────────────────────────────────────────────────
//

pub struct OrbitRig
{
  radius: f32,
  azimuth: f32,
  polar: f32,

  // Pending (damped) input
  delta_azimuth: f32,
  delta_polar: f32,
  zoom_scale: f32,
}

//
// ──────────────────────────────────────────────────────────────
//   Constants
// ──────────────────────────────────────────────────────────────
//

const RADIUS_MIN: f32 = 5.0;
const RADIUS_MAX: f32 = 50.0;

// Keep the polar angle a hair off the pole so look_at never degenerates.
const POLAR_MIN: f32 = 1e-4;
const POLAR_MAX: f32 = std::f32::consts::PI / 2.2; // never below the ground plane

const AZIMUTH_MIN: f32 = -std::f32::consts::FRAC_PI_2; // left boundary
const AZIMUTH_MAX: f32 = std::f32::consts::PI / 10.0; // right boundary

const DAMPING: f32 = 0.25;
const ORBIT_SENSITIVITY: f32 = 0.005; // radians per pixel
const ZOOM_FACTOR: f32 = 0.1; // 10% radius change per scroll line
const REST_EPSILON: f32 = 1e-5;

//
// ──────────────────────────────────────────────────────────────
//   Public API
// ──────────────────────────────────────────────────────────────
//

impl OrbitRig
{
  pub fn from_camera(camera: &Camera) -> Self
  {
    let mut rig = Self {
      radius: RADIUS_MIN,
      azimuth: 0.0,
      polar: POLAR_MAX,
      delta_azimuth: 0.0,
      delta_polar: 0.0,
      zoom_scale: 1.0,
    };

    rig.resync(camera);
    rig
  }

  /// Rebuild the cached spherical state from an externally written
  /// eye/target pair. Called by the choreographer on every flight
  /// step and by the app after the frame clamp moves the eye, so a
  /// following drag continues from the current pose instead of
  /// snapping back to a stale one.
  ///
  /// Reads the raw pose without applying the radial/angular limits:
  /// a flight must be able to land exactly on its viewpoint even
  /// when that pose violates them. Limits apply when drag or zoom
  /// input is integrated in `update`.
  pub fn resync(&mut self, camera: &Camera)
  {
    let offset = camera.eye - camera.target;

    self.radius = offset.length().max(1e-6);
    self.polar = (offset.y / self.radius).clamp(-1.0, 1.0).acos();
    self.azimuth = offset.x.atan2(offset.z);
  }

  /// Accumulate a drag gesture, in pixels.
  pub fn apply_drag(&mut self, dx: f32, dy: f32)
  {
    self.delta_azimuth -= dx * ORBIT_SENSITIVITY;
    self.delta_polar -= dy * ORBIT_SENSITIVITY;
  }

  /// Accumulate scroll-wheel zoom, in lines. Positive zooms in.
  pub fn apply_zoom(&mut self, scroll: f32)
  {
    self.zoom_scale *= 1.0 - scroll * ZOOM_FACTOR;
  }

  /// Drop any residual velocity. Called when a flight starts so the
  /// choreographer is the only camera writer while it runs.
  pub fn halt(&mut self)
  {
    self.delta_azimuth = 0.0;
    self.delta_polar = 0.0;
    self.zoom_scale = 1.0;
  }

  /// Integrate pending input with damping and write the eye back to
  /// the camera. Returns false once the rig is at rest, in which
  /// case the camera is untouched.
  pub fn update(&mut self, camera: &mut Camera) -> bool
  {
    if self.at_rest()
    {
      return false;
    }

    self.azimuth = (self.azimuth + self.delta_azimuth * DAMPING).clamp(AZIMUTH_MIN, AZIMUTH_MAX);
    self.polar = (self.polar + self.delta_polar * DAMPING).clamp(POLAR_MIN, POLAR_MAX);
    self.radius = (self.radius * self.zoom_scale).clamp(RADIUS_MIN, RADIUS_MAX);

    // Zoom applies fully each frame; rotation keeps its residual.
    self.zoom_scale = 1.0;
    self.delta_azimuth *= 1.0 - DAMPING;
    self.delta_polar *= 1.0 - DAMPING;

    if self.delta_azimuth.abs() < REST_EPSILON
    {
      self.delta_azimuth = 0.0;
    }

    if self.delta_polar.abs() < REST_EPSILON
    {
      self.delta_polar = 0.0;
    }

    camera.eye = camera.target + self.eye_offset();
    true
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Spherical → cartesian helpers
// ──────────────────────────────────────────────────────────────
//

impl OrbitRig
{
  fn at_rest(&self) -> bool
  {
    self.delta_azimuth == 0.0 && self.delta_polar == 0.0 && (self.zoom_scale - 1.0).abs() < 1e-9
  }

  fn eye_offset(&self) -> Vec3
  {
    let sin_polar = self.polar.sin();

    Vec3::new(
      self.radius * sin_polar * self.azimuth.sin(),
      self.radius * self.polar.cos(),
      self.radius * sin_polar * self.azimuth.cos(),
    )
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

  fn test_camera() -> Camera
  {
    Camera::new(16.0 / 9.0)
  }

  fn settle(rig: &mut OrbitRig, camera: &mut Camera)
  {
    for _ in 0..200
    {
      if !rig.update(camera)
      {
        break;
      }
    }
  }

  #[test]
  fn resync_recovers_the_camera_pose()
  {
    let mut camera = test_camera();
    camera.eye = Vec3::new(-5.0, 5.0, 10.0);
    camera.target = Vec3::new(1.0, 2.0, -3.0);

    let rig = OrbitRig::from_camera(&camera);
    let rebuilt = camera.target + rig.eye_offset();

    assert!((rebuilt - camera.eye).length() < 1e-4);
  }

  #[test]
  fn polar_angle_never_goes_below_the_ground_limit()
  {
    let mut camera = test_camera();
    let mut rig = OrbitRig::from_camera(&camera);

    // Drag hard downward (camera toward the ground) and let it settle.
    for _ in 0..50
    {
      rig.apply_drag(0.0, -500.0);
      let _ = rig.update(&mut camera);
    }
    settle(&mut rig, &mut camera);

    assert!(rig.polar <= POLAR_MAX + 1e-6);
    assert!(camera.eye.y >= camera.target.y - 1e-3);
  }

  #[test]
  fn azimuth_is_clamped_to_both_boundaries()
  {
    let mut camera = test_camera();
    let mut rig = OrbitRig::from_camera(&camera);

    for _ in 0..50
    {
      rig.apply_drag(5000.0, 0.0);
      let _ = rig.update(&mut camera);
    }
    assert!((rig.azimuth - AZIMUTH_MIN).abs() < 1e-4);

    rig.halt();
    for _ in 0..50
    {
      rig.apply_drag(-5000.0, 0.0);
      let _ = rig.update(&mut camera);
    }
    assert!((rig.azimuth - AZIMUTH_MAX).abs() < 1e-4);
  }

  #[test]
  fn zoom_is_clamped_radially()
  {
    let mut camera = test_camera();
    let mut rig = OrbitRig::from_camera(&camera);

    for _ in 0..100
    {
      rig.apply_zoom(10.0); // zoom in hard
      let _ = rig.update(&mut camera);
    }
    assert!((rig.radius - RADIUS_MIN).abs() < 1e-4);

    for _ in 0..100
    {
      rig.apply_zoom(-10.0); // zoom out hard
      let _ = rig.update(&mut camera);
    }
    assert!((rig.radius - RADIUS_MAX).abs() < 1e-4);
  }

  #[test]
  fn residual_velocity_decays_to_rest()
  {
    let mut camera = test_camera();
    let mut rig = OrbitRig::from_camera(&camera);

    rig.apply_drag(40.0, 10.0);
    assert!(rig.update(&mut camera));

    // With no further input the residual must die out on its own.
    let mut frames = 0;
    while rig.update(&mut camera)
    {
      frames += 1;
      assert!(frames < 200, "damping residual never decayed");
    }

    assert!(!rig.update(&mut camera));
  }

  #[test]
  fn halt_discards_pending_input()
  {
    let mut camera = test_camera();
    let mut rig = OrbitRig::from_camera(&camera);
    let before = camera.eye;

    rig.apply_drag(300.0, 100.0);
    rig.apply_zoom(3.0);
    rig.halt();

    assert!(!rig.update(&mut camera));
    assert_eq!(camera.eye, before);
  }
}
