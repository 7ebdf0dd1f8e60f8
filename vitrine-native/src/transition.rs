use glam::Vec3;

use crate::camera::{Camera, OrbitRig};
use crate::viewpoint::ViewpointTable;

//
// ──────────────────────────────────────────────────────────────
//   Camera choreography
//
//   A flight interpolates the eye and the orbit focus from their
//   current values to a viewpoint's pose over a fixed duration.
//   Both segments share one clock, so the look direction and the
//   position arrive together and the camera never transiently
//   points at a stale focus.
//
//   Requesting a new flight while one is running replaces it
//   (last request wins) — there is never more than one camera
//   writer in flight.
// ──────────────────────────────────────────────────────────────
//

const FLIGHT_DURATION: f32 = 2.0; // seconds

struct Flight
{
  from_eye: Vec3,
  from_target: Vec3,
  to_eye: Vec3,
  to_target: Vec3,
  elapsed: f32,
}

pub struct Choreographer
{
  flight: Option<Flight>,
}

//
// ──────────────────────────────────────────────────────────────
//   Public API
// ──────────────────────────────────────────────────────────────
//

impl Choreographer
{
  pub fn new() -> Self
  {
    Self { flight: None }
  }

  pub fn is_active(&self) -> bool
  {
    self.flight.is_some()
  }

  /// Start (or restart) a flight to the given viewpoint. An index
  /// outside the table is logged and ignored — user-retriggerable,
  /// never worth failing the frame over.
  pub fn transition_to(
    &mut self,
    table: &ViewpointTable,
    index: usize,
    camera: &Camera,
    rig: &mut OrbitRig,
  )
  {
    let Some(viewpoint) = table.get(index)
    else
    {
      log::warn!("ignoring flight request to viewpoint {index} (table has {})", table.len());
      return;
    };

    // The choreographer is the sole camera writer until arrival.
    rig.halt();

    log::debug!("flight to viewpoint {index} started");

    self.flight = Some(Flight {
      from_eye: camera.eye,
      from_target: camera.target,
      to_eye: viewpoint.position,
      to_target: viewpoint.target,
      elapsed: 0.0,
    });
  }

  /// Advance the active flight by `dt` seconds, writing the camera
  /// and resyncing the orbit rig. Returns false when idle.
  pub fn advance(&mut self, dt: f32, camera: &mut Camera, rig: &mut OrbitRig) -> bool
  {
    let Some(flight) = &mut self.flight
    else
    {
      return false;
    };

    flight.elapsed += dt;

    let t = (flight.elapsed / FLIGHT_DURATION).clamp(0.0, 1.0);
    let k = ease_out_quad(t);

    camera.eye = flight.from_eye.lerp(flight.to_eye, k);
    camera.target = flight.from_target.lerp(flight.to_target, k);

    if flight.elapsed >= FLIGHT_DURATION
    {
      // Land exactly on the viewpoint, independent of frame timing.
      camera.eye = flight.to_eye;
      camera.target = flight.to_target;
      self.flight = None;

      log::debug!("flight arrived");
    }

    // Keep the rig's cached spherical state in step with the pose we
    // just wrote, otherwise the next manual drag would snap back.
    rig.resync(camera);

    true
  }
}

fn ease_out_quad(t: f32) -> f32
{
  let inv = 1.0 - t;
  1.0 - inv * inv
}

//
// ──────────────────────────────────────────────────────────────
//   Tests
// ──────────────────────────────────────────────────────────────
//
