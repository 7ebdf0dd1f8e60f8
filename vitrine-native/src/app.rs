use std::sync::Arc;
use std::time::Instant;

use winit::{
  application::ApplicationHandler,
  event::{ElementState, MouseButton, WindowEvent},
  event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
  window::{Window, WindowId},
};

use crate::camera::{bounds, Camera, OrbitRig};
use crate::config::ShowroomConfig;
use crate::input::InputState;
use crate::interaction::InteractionController;
use crate::renderer::{self, Renderer};
use crate::scene::{self, Scene};
use crate::transition::Choreographer;
use crate::viewpoint::ViewpointTable;

// Guard against pauses (window drags, suspend) turning into one
// giant animation step.
const MAX_FRAME_DT: f32 = 0.1;

pub fn run(config: ShowroomConfig) -> anyhow::Result<()>
{
  let event_loop = EventLoop::new()?;
  let mut app = VitrineApp::new(config);

  event_loop.run_app(&mut app)?;
  Ok(())
}

struct VitrineApp
{
  window: Option<Arc<Window>>,
  renderer: Option<Renderer>,

  camera: Camera,
  orbit: OrbitRig,
  choreographer: Choreographer,
  interaction: InteractionController,
  viewpoints: ViewpointTable,
  scene: Scene,
  station_labels: Vec<String>,

  input: InputState,
  last_frame: Option<Instant>,
}

impl VitrineApp
{
  fn new(config: ShowroomConfig) -> Self
  {
    let camera = Camera::new(16.0 / 9.0);
    let orbit = OrbitRig::from_camera(&camera);
    let viewpoints = ViewpointTable::from_config(&config);
    let scene = scene::build(&config);
    let station_labels = config.stations.iter().map(|s| s.label.clone()).collect();

    Self {
      window: None,
      renderer: None,

      camera,
      orbit,
      choreographer: Choreographer::new(),
      interaction: InteractionController::new(),
      viewpoints,
      scene,
      station_labels,

      input: InputState::new(),
      last_frame: None,
    }
  }

  fn init_window_and_renderer(&mut self, event_loop: &ActiveEventLoop)
  {
    if self.window.is_some()
    {
      return;
    }

    let attrs = Window::default_attributes().with_title("Vitrine — Showroom");
    let window = match event_loop.create_window(attrs)
    {
      Ok(window) => Arc::new(window),
      Err(err) =>
      {
        log::error!("window creation failed: {err}");
        event_loop.exit();
        return;
      }
    };

    {
      let size = window.inner_size();
      if size.height > 0
      {
        self.camera.set_aspect(size.width as f32 / size.height as f32);
      }
    }

    let renderer =
      match pollster::block_on(Renderer::new(window.clone(), &self.camera, &self.scene))
      {
        Ok(renderer) => renderer,
        Err(err) =>
        {
          log::error!("renderer initialisation failed: {err:#}");
          event_loop.exit();
          return;
        }
      };

    self.window = Some(window);
    self.renderer = Some(renderer);

    // Button registration happens after the event listeners are
    // live; the registry is read per click, so nothing is missed.
    for button in self.scene.buttons.clone()
    {
      let _ = self.interaction.register(button);
    }

    log::info!("{} stations registered", self.interaction.len());
  }

  fn handle_window_event(&mut self, elwt: &ActiveEventLoop, window_id: WindowId, event: WindowEvent)
  {
    let window = match &self.window
    {
      Some(w) if w.id() == window_id => w.clone(),
      _ => return,
    };

    // The overlay gets first refusal on pointer/keyboard events.
    if let Some(renderer) = &mut self.renderer
    {
      let response = renderer.gui.state.on_window_event(&window, &event);
      if response.consumed
      {
        // A release swallowed by the overlay must still end the
        // drag, or the camera keeps orbiting with no button down.
        if matches!(
          event,
          WindowEvent::MouseInput {
            state: ElementState::Released,
            button: MouseButton::Left,
            ..
          }
        )
        {
          self.input.cancel_pointer();
        }

        return;
      }
    }

    self.input.handle_event(&event);

    match event
    {
      WindowEvent::CloseRequested =>
      {
        self.detach();
        elwt.exit();
      }

      WindowEvent::Resized(size) =>
      {
        if size.width == 0 || size.height == 0
        {
          return;
        }

        if let Some(renderer) = &mut self.renderer
        {
          renderer.resize(size.width, size.height);
        }

        self.camera.set_aspect(size.width as f32 / size.height as f32);

        if let Some(renderer) = &mut self.renderer
        {
          renderer.update_camera(&self.camera);
        }

        window.request_redraw();
      }

      _ =>
      {}
    }
  }

  fn frame(&mut self)
  {
    let (Some(window), Some(renderer)) = (&self.window, &mut self.renderer)
    else
    {
      return;
    };

    let now = Instant::now();
    let dt = self
      .last_frame
      .map(|last| (now - last).as_secs_f32().min(MAX_FRAME_DT))
      .unwrap_or(0.0);
    self.last_frame = Some(now);

    let size = window.inner_size();

    // Pointer click → hit-test → flight request.
    if let Some((x, y)) = self.input.take_click()
    {
      self.interaction.handle_click(
        x,
        y,
        size.width as f32,
        size.height as f32,
        &self.camera,
        &self.viewpoints,
        &mut self.choreographer,
        &mut self.orbit,
      );
    }

    // Station hotkeys take the same path as the 3D buttons.
    if let Some(index) = self.input.take_station_key()
    {
      self.choreographer.transition_to(&self.viewpoints, index, &self.camera, &mut self.orbit);
    }

    // One camera writer per frame: the choreographer while a flight
    // is active, the orbit rig otherwise. Drag input during a flight
    // is dropped, not queued.
    if self.choreographer.is_active()
    {
      let _ = self.choreographer.advance(dt, &mut self.camera, &mut self.orbit);
    }
    else
    {
      if self.input.left_held && (self.input.mouse_dx != 0.0 || self.input.mouse_dy != 0.0)
      {
        self.orbit.apply_drag(self.input.mouse_dx, self.input.mouse_dy);
      }

      if self.input.scroll != 0.0
      {
        self.orbit.apply_zoom(self.input.scroll);
      }

      let _ = self.orbit.update(&mut self.camera);
    }

    // Hard safety net, runs last and wins.
    if bounds::clamp_camera(&mut self.camera)
    {
      self.orbit.resync(&self.camera);
    }

    renderer.update_camera(&self.camera);

    let raw_input = renderer.gui.state.take_egui_input(window);
    let labels = &self.station_labels;
    let in_flight = self.choreographer.is_active();
    let mut full_output =
      renderer.gui.context.run(raw_input, |ctx| renderer::draw_overlay(ctx, labels, in_flight));

    renderer
      .gui
      .state
      .handle_platform_output(window, std::mem::take(&mut full_output.platform_output));

    renderer.render(window, full_output);

    window.request_redraw();
    self.input.end_frame();
  }

  /// Tear down the render surface. Idempotent — safe to call from
  /// both the close path and the event-loop exit path, and when
  /// setup never completed.
  fn detach(&mut self)
  {
    if self.renderer.is_none() && self.window.is_none()
    {
      return;
    }

    log::debug!("detaching render surface");
    self.renderer = None;
    self.window = None;
  }
}

impl ApplicationHandler for VitrineApp
{
  fn resumed(&mut self, event_loop: &ActiveEventLoop)
  {
    event_loop.set_control_flow(ControlFlow::Wait);
    self.init_window_and_renderer(event_loop);
  }

  fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent)
  {
    self.handle_window_event(event_loop, window_id, event);
  }

  fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop)
  {
    self.frame();
  }

  fn exiting(&mut self, _event_loop: &ActiveEventLoop)
  {
    self.detach();
  }
}
