use crossbeam_channel::Receiver;

use crate::config::AppConfig;
use crate::detector::ShakeDetector;
use crate::dice::{DieFace, DieRoller};
use crate::types::{InputEvent, RollTrigger, SessionSummary};

/// 应用状态管理模块
/// 检测器、掷骰器与统计计数都归处理线程独占

/// 当前显示的骰子结果
#[derive(Debug, Clone, Default)]
pub struct RollState {
    pub current: DieFace,
    pub last_trigger: Option<RollTrigger>,
}

/// 数据通道状态
#[derive(Debug)]
pub struct DataChannels {
    pub input_receiver: Receiver<InputEvent>,
}

/// 统一的应用状态管理
#[derive(Debug)]
pub struct AppState {
    pub detector: ShakeDetector,
    pub roller: DieRoller,
    pub roll: RollState,
    pub summary: SessionSummary,
    pub channels: DataChannels,
}

impl AppState {
    /// 创建新的应用状态
    pub fn new(input_receiver: Receiver<InputEvent>, config: &AppConfig, roller: DieRoller) -> Self {
        Self {
            detector: ShakeDetector::new(&config.detector),
            roller,
            roll: RollState::default(),
            summary: SessionSummary::default(),
            channels: DataChannels { input_receiver },
        }
    }

    /// 获取当前状态摘要
    pub fn get_status_summary(&self) -> String {
        let trigger = self.roll.last_trigger.map(|t| t.as_str()).unwrap_or("none");
        format!(
            "Showing {} ({}), last trigger: {}, {} shakes / {} samples",
            self.roll.current,
            self.roll.current.asset_name(),
            trigger,
            self.summary.shakes,
            self.summary.samples_seen
        )
    }

    /// 记录一次掷骰结果
    pub fn apply_roll(&mut self, face: DieFace, trigger: RollTrigger) {
        self.roll.current = face;
        self.roll.last_trigger = Some(trigger);
        self.summary.record_face(face.value());
    }
}
