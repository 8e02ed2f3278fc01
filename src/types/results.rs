/// 一次被接受的摇晃事件
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShakeEvent {
    /// 线性加速度的模
    pub magnitude: f64,
    /// 接受该事件的时间 (ms)
    pub timestamp: i64,
}

impl ShakeEvent {
    pub fn new(magnitude: f64, timestamp: i64) -> Self {
        Self { magnitude, timestamp }
    }
}

/// What caused a roll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollTrigger {
    Shake,
    Manual,
}

impl RollTrigger {
    pub fn as_str(&self) -> &'static str {
        match self {
            RollTrigger::Shake => "shake",
            RollTrigger::Manual => "manual",
        }
    }
}

/// Counters reported when the processing loop exits
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub samples_seen: usize,
    pub samples_ignored: usize,
    pub shakes: usize,
    pub rolls: usize,
    pub face_counts: [usize; 6],
}

impl SessionSummary {
    pub fn record_face(&mut self, face: u8) {
        if (1..=6).contains(&face) {
            self.face_counts[(face - 1) as usize] += 1;
        }
        self.rolls += 1;
    }
}
