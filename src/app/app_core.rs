use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use crossbeam_channel::Receiver;
use log::info;

use super::handlers::ShakeHandler;
use super::state::AppState;
use crate::config::ConfigManager;
use crate::dice::{DieFace, DieRoller};
use crate::types::{InputEvent, RollTrigger, SessionSummary};

pub struct ShakeDiceApp {
    // 统一的状态管理
    pub state: AppState,

    // 配置管理
    pub config: ConfigManager,

    // 收到 Shutdown 时置位，输入线程据此退出
    shutdown_signal: Arc<AtomicBool>,
}

impl ShakeDiceApp {
    pub fn new(
        input_receiver: Receiver<InputEvent>,
        config: ConfigManager,
        roller: DieRoller,
        shutdown_signal: Arc<AtomicBool>,
    ) -> Self {
        let state = AppState::new(input_receiver, config.get_config(), roller);

        info!(
            "Detector ready: threshold {:.2}, debounce {}ms, gravity {:?}",
            state.detector.threshold(),
            config.get_config().detector.debounce_ms,
            state.detector.gravity_mode()
        );

        Self { state, config, shutdown_signal }
    }

    /// 处理单个输入事件，有新结果时调用 `display`
    pub fn handle_event<F>(&mut self, event: InputEvent, display: &mut F)
    where
        F: FnMut(DieFace, RollTrigger),
    {
        let now_ms = Utc::now().timestamp_millis();
        if let Some((face, trigger)) = ShakeHandler::handle_event(&mut self.state, event, now_ms) {
            display(face, trigger);
        }
    }

    /// Drains the input channel until a `Shutdown` event, the shutdown flag,
    /// or every sender is gone.
    pub fn run<F>(&mut self, mut display: F) -> SessionSummary
    where
        F: FnMut(DieFace, RollTrigger),
    {
        let receiver = self.state.channels.input_receiver.clone();
        for event in receiver.iter() {
            if event == InputEvent::Shutdown {
                info!("Shutdown requested");
                self.shutdown_signal.store(true, Ordering::Relaxed);
                break;
            }
            self.handle_event(event, &mut display);

            if self.shutdown_signal.load(Ordering::Relaxed) {
                break;
            }
        }

        info!("Input closed: {}", self.state.get_status_summary());
        self.state.summary.clone()
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutdown_signal.load(Ordering::Relaxed)
    }
}
