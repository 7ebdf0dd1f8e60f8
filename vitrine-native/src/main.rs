mod app;
mod camera;
mod config;
mod input;
mod interaction;
mod pick;
mod renderer;
mod scene;
mod transition;
mod viewpoint;

fn main() -> anyhow::Result<()>
{
  // Initialise the logger so wgpu validation errors and warnings appear in the console.
  // Set RUST_LOG=warn (default) or RUST_LOG=wgpu=debug for more verbose GPU output.

  std::env::set_var("RUST_LOG", "info,wgpu_hal=off,naga=warn");
  env_logger::init();

  let config = config::load()?;

  app::run(config)
}
