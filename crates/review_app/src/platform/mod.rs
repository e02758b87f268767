pub mod app;
pub mod effects;
pub mod input;
pub mod render;

pub use app::{run_app, SessionConfig};
