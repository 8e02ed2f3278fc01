use std::path::PathBuf;
use std::str::FromStr;

/// 输入源选择，取自 `SHAKE_DICE_SOURCE`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum InputSource {
    #[default]
    Mqtt,
    Stdin,
    File(PathBuf),
}

impl FromStr for InputSource {
    type Err = SourceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "" => Err(SourceError::UnknownSource(value.to_string())),
            "mqtt" => Ok(Self::Mqtt),
            "stdin" | "-" => Ok(Self::Stdin),
            path => Ok(Self::File(PathBuf::from(path))),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unknown input source: {0:?}")]
    UnknownSource(String),
}
