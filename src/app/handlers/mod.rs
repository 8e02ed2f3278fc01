pub mod shake;

pub use shake::ShakeHandler;
