mod core;
mod depth;
mod gui;
mod mesh;

pub use self::core::Renderer;
pub use self::gui::draw_overlay;
