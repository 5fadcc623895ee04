mod application;
pub mod data;
mod render;
mod runtime_config;

pub use application::{Application, ApplicationError};
pub use render::Renderer;
pub use runtime_config::RuntimeConfig;
