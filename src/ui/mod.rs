mod app;
mod home;
mod popups;
mod settings;
mod status_bar;
pub mod theme;
mod thread;
mod widgets;

pub use app::render;
