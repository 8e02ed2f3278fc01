use super::DataPoint;

/// Events delivered from an input source to the processing loop
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// Accelerometer reading; `None` when the source produced an empty event
    Sample(Option<DataPoint>),
    /// Button-equivalent trigger, rolls regardless of the debounce window
    ManualRoll,
    /// Ends the session; the source stops reading after sending it
    Shutdown,
}

impl InputEvent {
    pub fn sample(point: DataPoint) -> Self {
        Self::Sample(Some(point))
    }
}
