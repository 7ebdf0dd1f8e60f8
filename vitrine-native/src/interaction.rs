use crate::camera::{Camera, OrbitRig};
use crate::pick::{self, Clickable};
use crate::transition::Choreographer;
use crate::viewpoint::ViewpointTable;

//
// ──────────────────────────────────────────────────────────────
//   Interaction controller
//
//   Composition root for pointer navigation: owns the ordered
//   clickable registry and routes clicks through the hit-tester to
//   the choreographer. The registry is append-only and read at
//   click time, so objects registered after the event listeners
//   are live still receive clicks.
// ──────────────────────────────────────────────────────────────
//

pub struct InteractionController
{
  clickables: Vec<Clickable>,
}

impl InteractionController
{
  pub fn new() -> Self
  {
    Self { clickables: Vec::new() }
  }

  /// Append a clickable; its registry position is the viewpoint
  /// index it navigates to.
  pub fn register(&mut self, clickable: Clickable) -> usize
  {
    self.clickables.push(clickable);
    self.clickables.len() - 1
  }

  pub fn len(&self) -> usize
  {
    self.clickables.len()
  }

  /// Route one pointer click. A miss does nothing; a hit starts a
  /// flight to the struck station.
  pub fn handle_click(
    &self,
    pointer_x: f32,
    pointer_y: f32,
    width: f32,
    height: f32,
    camera: &Camera,
    table: &ViewpointTable,
    choreographer: &mut Choreographer,
    rig: &mut OrbitRig,
  )
  {
    let Some(index) = pick::hit_test(pointer_x, pointer_y, width, height, camera, &self.clickables)
    else
    {
      return;
    };

    log::debug!("station {index} clicked");
    choreographer.transition_to(table, index, camera, rig);
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
  use crate::pick::Aabb;
  use glam::Vec3;

  fn button_at(center: Vec3) -> Clickable
  {
    Clickable {
      volumes: vec![Aabb { min: center - Vec3::splat(0.5), max: center + Vec3::splat(0.5) }],
    }
  }

  fn fixtures() -> (ViewpointTable, Camera, OrbitRig, Choreographer)
  {
    let table = ViewpointTable::from_config(&config::load().unwrap());
    let mut camera = Camera::new(1.0);
    camera.eye = Vec3::new(0.0, 0.0, 10.0);
    camera.target = Vec3::ZERO;
    let rig = OrbitRig::from_camera(&camera);
    (table, camera, rig, Choreographer::new())
  }

  #[test]
  fn click_routes_to_the_struck_station()
  {
    let (table, camera, mut rig, mut chor) = fixtures();
    let mut controller = InteractionController::new();

    // Station 0 off to the side, station 1 dead ahead.
    let _ = controller.register(button_at(Vec3::new(40.0, 0.0, 0.0)));
    let _ = controller.register(button_at(Vec3::ZERO));

    controller.handle_click(400.0, 300.0, 800.0, 600.0, &camera, &table, &mut chor, &mut rig);

    assert!(chor.is_active());

    let mut cam = camera;
    while chor.advance(0.5, &mut cam, &mut rig)
    {}
    assert_eq!(cam.eye, table.get(1).unwrap().position);
  }

  #[test]
  fn miss_is_silent()
  {
    let (table, camera, mut rig, mut chor) = fixtures();
    let mut controller = InteractionController::new();
    let _ = controller.register(button_at(Vec3::new(40.0, 0.0, 0.0)));

    controller.handle_click(400.0, 300.0, 800.0, 600.0, &camera, &table, &mut chor, &mut rig);

    assert!(!chor.is_active());
  }

  #[test]
  fn registration_after_listener_attach_is_not_missed()
  {
    let (table, camera, mut rig, mut chor) = fixtures();
    let mut controller = InteractionController::new();

    // "Listeners" are live but nothing is registered yet — the same
    // click is a miss now and a hit after late registration.
    controller.handle_click(400.0, 300.0, 800.0, 600.0, &camera, &table, &mut chor, &mut rig);
    assert!(!chor.is_active());

    let index = controller.register(button_at(Vec3::ZERO));
    assert_eq!(index, 0);

    controller.handle_click(400.0, 300.0, 800.0, 600.0, &camera, &table, &mut chor, &mut rig);
    assert!(chor.is_active());
  }
}
