//! 加速度摇晃检测
//!
//! `GravityFilter` 把原始读数拆成重力与线性加速度，
//! `ShakeDetector` 在线性加速度的模上做阈值判断和去抖。

pub mod gravity;
pub mod shake;

pub use gravity::{GravityFilter, LinearAcceleration};
pub use shake::ShakeDetector;
