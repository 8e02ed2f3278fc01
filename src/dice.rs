use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// One face of a six-sided die, always in 1..=6
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DieFace(u8);

impl DieFace {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 6;

    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// 对应的静态图片资源名
    pub fn asset_name(&self) -> &'static str {
        match self.0 {
            1 => "dice_1",
            2 => "dice_2",
            3 => "dice_3",
            4 => "dice_4",
            5 => "dice_5",
            _ => "dice_6",
        }
    }
}

impl Default for DieFace {
    fn default() -> Self {
        Self(1)
    }
}

impl fmt::Display for DieFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 掷骰器
#[derive(Debug)]
pub struct DieRoller {
    rng: StdRng,
}

impl DieRoller {
    /// Seeds from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible roller for replays.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn roll(&mut self) -> DieFace {
        DieFace(self.rng.random_range(DieFace::MIN..=DieFace::MAX))
    }

    pub fn roll_with<F>(&mut self, callback: F) -> DieFace
    where
        F: FnOnce(DieFace),
    {
        let face = self.roll();
        callback(face);
        face
    }
}

impl Default for DieRoller {
    fn default() -> Self {
        Self::new()
    }
}
