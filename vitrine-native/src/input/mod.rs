use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::Key;

// A press/release pair with less accumulated motion than this is a
// click; anything longer is an orbit drag.
const CLICK_SLOP_PX: f32 = 4.0;

pub struct InputState
{
  pub mouse_x: f32,
  pub mouse_y: f32,
  pub mouse_dx: f32,
  pub mouse_dy: f32,

  pub left_held: bool,

  pub scroll: f32,

  drag_distance: f32,
  click: Option<(f32, f32)>,
  station_key: Option<usize>,
}

impl InputState
{
  pub fn new() -> Self
  {
    Self {
      mouse_x: 0.0,
      mouse_y: 0.0,
      mouse_dx: 0.0,
      mouse_dy: 0.0,

      left_held: false,

      scroll: 0.0,

      drag_distance: 0.0,
      click: None,
      station_key: None,
    }
  }

  pub fn handle_event(&mut self, event: &WindowEvent)
  {
    match event
    {
      WindowEvent::CursorMoved { position, .. } =>
      {
        let x = position.x as f32;
        let y = position.y as f32;

        let dx = x - self.mouse_x;
        let dy = y - self.mouse_y;

        // Accumulate — several cursor events can land in one frame.
        self.mouse_dx += dx;
        self.mouse_dy += dy;

        if self.left_held
        {
          self.drag_distance += dx.abs() + dy.abs();
        }

        self.mouse_x = x;
        self.mouse_y = y;
      }

      WindowEvent::MouseInput { state, button: MouseButton::Left, .. } =>
      {
        match state
        {
          ElementState::Pressed => self.press_pointer(),
          ElementState::Released => self.release_pointer(),
        }
      }

      WindowEvent::MouseWheel { delta, .. } => match delta
      {
        MouseScrollDelta::LineDelta(_, y) => self.scroll += *y,
        MouseScrollDelta::PixelDelta(p) => self.scroll += p.y as f32 / 50.0,
      },

      WindowEvent::KeyboardInput { event, .. } =>
      {
        if event.state != ElementState::Pressed
        {
          return;
        }

        if let Key::Character(text) = &event.logical_key
        {
          // Station hotkeys: "1" → station 0, and so on.
          if let Some(digit) = text.chars().next().and_then(|c| c.to_digit(10))
          {
            if digit >= 1
            {
              self.station_key = Some(digit as usize - 1);
            }
          }
        }
      }

      _ =>
      {}
    }
  }

  fn press_pointer(&mut self)
  {
    self.left_held = true;
    self.drag_distance = 0.0;
  }

  fn release_pointer(&mut self)
  {
    let was_held = self.left_held;
    self.left_held = false;

    // A release whose press we never saw (it went to the overlay)
    // is not a click.
    if was_held && self.drag_distance < CLICK_SLOP_PX
    {
      self.click = Some((self.mouse_x, self.mouse_y));
    }
  }

  /// Forget the in-progress press without producing a click. Called
  /// when another layer consumes the release, so the drag does not
  /// stay latched on.
  pub fn cancel_pointer(&mut self)
  {
    self.left_held = false;
    self.drag_distance = 0.0;
  }

  /// Take the click registered this frame, if any.
  pub fn take_click(&mut self) -> Option<(f32, f32)>
  {
    self.click.take()
  }

  /// Take the station hotkey pressed this frame, if any.
  pub fn take_station_key(&mut self) -> Option<usize>
  {
    self.station_key.take()
  }

  pub fn end_frame(&mut self)
  {
    self.mouse_dx = 0.0;
    self.mouse_dy = 0.0;
    self.scroll = 0.0;
    self.click = None;
    self.station_key = None;
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

  #[test]
  fn cancelled_release_clears_the_drag_without_a_click()
  {
    let mut input = InputState::new();

    input.press_pointer();
    input.drag_distance = 30.0;
    input.cancel_pointer();

    assert!(!input.left_held);
    assert_eq!(input.take_click(), None);

    // The next real gesture still registers.
    input.press_pointer();
    input.release_pointer();
    assert!(input.take_click().is_some());
  }

  #[test]
  fn release_without_a_prior_press_is_not_a_click()
  {
    let mut input = InputState::new();

    input.release_pointer();

    assert!(!input.left_held);
    assert_eq!(input.take_click(), None);
  }

  #[test]
  fn short_press_release_is_a_click_and_a_long_drag_is_not()
  {
    let mut input = InputState::new();
    input.mouse_x = 120.0;
    input.mouse_y = 80.0;

    input.press_pointer();
    input.release_pointer();
    assert_eq!(input.take_click(), Some((120.0, 80.0)));

    input.press_pointer();
    input.drag_distance = CLICK_SLOP_PX + 1.0;
    input.release_pointer();
    assert_eq!(input.take_click(), None);
  }
}
