pub mod renderer;
pub mod tui;

pub use tui::Tui;
