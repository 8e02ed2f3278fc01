use log::{debug, info};

use crate::app::state::AppState;
use crate::dice::DieFace;
use crate::types::{InputEvent, RollTrigger};
use crate::utils::format_timestamp;

pub struct ShakeHandler;

impl ShakeHandler {
    /// Feeds one input event through detection and rolling.
    ///
    /// `now_ms` is used for samples that carry no timestamp of their own.
    pub fn handle_event(state: &mut AppState, event: InputEvent, now_ms: i64) -> Option<(DieFace, RollTrigger)> {
        match event {
            InputEvent::Sample(sample) => {
                state.summary.samples_seen += 1;

                let Some(sample) = sample.filter(|s| s.is_finite()) else {
                    state.summary.samples_ignored += 1;
                    return None;
                };

                let at = sample.timestamp.unwrap_or(now_ms);
                let shake = state.detector.on_sensor_event(Some(&sample), at)?;
                state.summary.shakes += 1;
                debug!("Shake accepted at {} ({:.3})", format_timestamp(shake.timestamp), shake.magnitude);

                Some((Self::roll(state, RollTrigger::Shake), RollTrigger::Shake))
            }
            InputEvent::ManualRoll => Some((Self::roll(state, RollTrigger::Manual), RollTrigger::Manual)),
            InputEvent::Shutdown => None,
        }
    }

    fn roll(state: &mut AppState, trigger: RollTrigger) -> DieFace {
        let face = state.roller.roll();
        state.apply_roll(face, trigger);
        info!("Rolls: {} ({}, {})", face, face.asset_name(), trigger.as_str());
        face
    }
}
