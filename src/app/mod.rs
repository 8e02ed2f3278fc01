pub mod app_core;
pub mod handlers;
pub mod state;

pub use app_core::ShakeDiceApp;
pub use state::AppState;
