use glam::Vec3;

use crate::camera::Camera;

//
// ──────────────────────────────────────────────────────────────
//   Pointer hit-testing
//
//   A click arrives as raw pixel coordinates. They are mapped to
//   normalised device coordinates, a ray is cast from the eye
//   through that point, and the ray is tested against every child
//   volume of every registered clickable. The nearest struck
//   clickable wins; a hit on any child counts for its owner.
//
//   Pure with respect to scene state — safe to call on every click.
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb
{
  pub min: Vec3,
  pub max: Vec3,
}

/// A composite clickable: an ordered bag of world-space volumes
/// (e.g. a button's outline, face and label) owned by one station.
#[derive(Debug, Clone)]
pub struct Clickable
{
  pub volumes: Vec<Aabb>,
}

#[derive(Debug, Clone, Copy)]
pub struct Ray
{
  pub origin: Vec3,
  pub dir: Vec3,
}

//
// ──────────────────────────────────────────────────────────────
//   Public API
// ──────────────────────────────────────────────────────────────
//

/// Resolve which clickable, if any, the pointer coordinate projects
/// onto. Returns the index of the nearest struck candidate.
pub fn hit_test(
  pointer_x: f32,
  pointer_y: f32,
  width: f32,
  height: f32,
  camera: &Camera,
  candidates: &[Clickable],
) -> Option<usize>
{
  if width <= 0.0 || height <= 0.0
  {
    return None;
  }

  let ray = ray_through_pixel(pointer_x, pointer_y, width, height, camera);
  let mut nearest: Option<(usize, f32)> = None;

  for (index, clickable) in candidates.iter().enumerate()
  {
    for volume in &clickable.volumes
    {
      let Some(t) = intersect(&ray, volume)
      else
      {
        continue;
      };

      if nearest.map_or(true, |(_, best)| t < best)
      {
        nearest = Some((index, t));
      }
    }
  }

  nearest.map(|(index, _)| index)
}

//
// ──────────────────────────────────────────────────────────────
//   Ray construction
// ──────────────────────────────────────────────────────────────
//

fn ray_through_pixel(px: f32, py: f32, width: f32, height: f32, camera: &Camera) -> Ray
{
  // Screen → NDC: x right, y up, both in [-1, 1]
  let ndc_x = (px / width) * 2.0 - 1.0;
  let ndc_y = -(py / height) * 2.0 + 1.0;

  // Unproject a point inside the frustum; every perspective ray
  // passes through the eye, so origin = eye.
  let inv_view_proj = camera.build_view_proj().inverse();
  let world = inv_view_proj.project_point3(Vec3::new(ndc_x, ndc_y, 0.5));

  Ray { origin: camera.eye, dir: (world - camera.eye).normalize() }
}

//
// ──────────────────────────────────────────────────────────────
//   Ray / AABB slab test
// ──────────────────────────────────────────────────────────────
//

/// Distance along the ray to the box, or None on a miss. An origin
/// inside the box reports distance zero.
fn intersect(ray: &Ray, aabb: &Aabb) -> Option<f32>
{
  let inv_dir = ray.dir.recip();
  let t_a = (aabb.min - ray.origin) * inv_dir;
  let t_b = (aabb.max - ray.origin) * inv_dir;

  let t_near = t_a.min(t_b).max_element();
  let t_far = t_a.max(t_b).min_element();

  if t_far < t_near.max(0.0)
  {
    return None;
  }

  Some(t_near.max(0.0))
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

  fn unit_box_at(center: Vec3) -> Aabb
  {
    Aabb { min: center - Vec3::splat(0.5), max: center + Vec3::splat(0.5) }
  }

  fn camera_looking_at(eye: Vec3, target: Vec3) -> Camera
  {
    let mut camera = Camera::new(1.0);
    camera.eye = eye;
    camera.target = target;
    camera
  }

  #[test]
  fn center_pixel_maps_to_ndc_origin()
  {
    let camera = camera_looking_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
    let ray = ray_through_pixel(400.0, 300.0, 800.0, 600.0, &camera);

    // Looking down -Z from +Z through the screen center.
    assert!((ray.origin - camera.eye).length() < 1e-4);
    assert!((ray.dir - Vec3::NEG_Z).length() < 1e-4);
  }

  #[test]
  fn click_on_screen_center_hits_the_focused_object()
  {
    let camera = camera_looking_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
    let candidates = vec![Clickable { volumes: vec![unit_box_at(Vec3::ZERO)] }];

    assert_eq!(hit_test(400.0, 300.0, 800.0, 600.0, &camera, &candidates), Some(0));
  }

  #[test]
  fn click_on_empty_space_misses()
  {
    let camera = camera_looking_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
    let candidates = vec![Clickable { volumes: vec![unit_box_at(Vec3::new(30.0, 0.0, 0.0))] }];

    assert_eq!(hit_test(400.0, 300.0, 800.0, 600.0, &camera, &candidates), None);
  }

  #[test]
  fn nearest_of_two_stacked_candidates_wins()
  {
    let camera = camera_looking_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
    let candidates = vec![
      Clickable { volumes: vec![unit_box_at(Vec3::new(0.0, 0.0, -3.0))] }, // behind
      Clickable { volumes: vec![unit_box_at(Vec3::ZERO)] },                // in front
    ];

    assert_eq!(hit_test(400.0, 300.0, 800.0, 600.0, &camera, &candidates), Some(1));
  }

  #[test]
  fn hit_on_a_child_volume_counts_for_the_owner()
  {
    let camera = camera_looking_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);

    // Owner's first volume is far off screen; only the second child
    // (a label strip in front of the face) is under the ray.
    let composite = Clickable {
      volumes: vec![
        unit_box_at(Vec3::new(50.0, 50.0, 0.0)),
        Aabb { min: Vec3::new(-0.6, -0.1, 0.0), max: Vec3::new(0.6, 0.1, 0.1) },
      ],
    };

    assert_eq!(hit_test(400.0, 300.0, 800.0, 600.0, &camera, &[composite]), Some(0));
  }

  #[test]
  fn every_panel_button_is_clickable_at_its_projected_centre()
  {
    let config = crate::config::load().unwrap();
    let scene = crate::scene::build(&config);

    let (width, height) = (800.0_f32, 600.0_f32);
    let mut camera = Camera::new(width / height);
    camera.eye = Vec3::new(-5.0, 3.0, 6.0);
    camera.target = Vec3::new(-5.0, 3.0, 0.0);

    let view_proj = camera.build_view_proj();
    assert!(view_proj.is_finite());

    for index in 0..scene.buttons.len()
    {
      // Project the button centre back onto the screen and click it.
      let ndc = view_proj.project_point3(crate::scene::button_center(index));
      let px = (ndc.x + 1.0) * 0.5 * width;
      let py = (1.0 - ndc.y) * 0.5 * height;

      assert_eq!(
        hit_test(px, py, width, height, &camera, &scene.buttons),
        Some(index),
        "button {index} is not clickable at its own centre"
      );
    }
  }

  #[test]
  fn zero_sized_viewport_is_a_miss_not_a_panic()
  {
    let camera = camera_looking_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
    let candidates = vec![Clickable { volumes: vec![unit_box_at(Vec3::ZERO)] }];

    assert_eq!(hit_test(0.0, 0.0, 0.0, 0.0, &camera, &candidates), None);
  }

  #[test]
  fn slab_test_reports_a_forward_distance()
  {
    let ray = Ray { origin: Vec3::new(0.0, 0.0, 10.0), dir: Vec3::NEG_Z };
    let t = intersect(&ray, &unit_box_at(Vec3::ZERO)).unwrap();

    assert!((t - 9.5).abs() < 1e-4);

    // Box entirely behind the origin.
    let behind = unit_box_at(Vec3::new(0.0, 0.0, 20.0));
    assert!(intersect(&ray, &behind).is_none());
  }
}
