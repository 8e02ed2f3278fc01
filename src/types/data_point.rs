/// 单个三轴加速度采样
///
/// `timestamp` 为毫秒时间戳；缺省时按到达时刻处理
#[derive(serde::Deserialize, serde::Serialize, Clone, Copy, Debug, PartialEq)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[serde(default)]
    pub timestamp: Option<i64>,
}

impl DataPoint {
    pub fn new(x: f64, y: f64, z: f64, timestamp: i64) -> Self {
        Self { x, y, z, timestamp: Some(timestamp) }
    }

    /// Sample without a timestamp; the processing loop stamps it on arrival.
    pub fn untimed(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z, timestamp: None }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}
