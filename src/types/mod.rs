pub mod data_point;
pub mod input_event;
pub mod results;

pub use data_point::DataPoint;
pub use input_event::InputEvent;
pub use results::{RollTrigger, SessionSummary, ShakeEvent};
