use crate::player::PlaybackCommand;
use thiserror::Error;

/// One line from the device, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceCommand {
    Playback(PlaybackCommand),
    /// Raw key token from the device keyboard. Logged only for now.
    Key(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command {0:?}")]
    Unknown(String),
    #[error("invalid seek target {0:?} (expected 0-100)")]
    InvalidSeek(String),
}

/// Parse a line. Prefixes are case-sensitive; payloads are trimmed.
pub fn parse(line: &str) -> Result<DeviceCommand, CommandError> {
    if let Some(action) = line.strip_prefix("CMD:") {
        let cmd = match action.trim() {
            "PLAY" => PlaybackCommand::TogglePlay,
            "NEXT" => PlaybackCommand::Next,
            "PREV" => PlaybackCommand::Prev,
            "SHUFFLE" => PlaybackCommand::ToggleShuffle,
            "LIKE" => PlaybackCommand::Like,
            _ => return Err(CommandError::Unknown(line.to_string())),
        };
        return Ok(DeviceCommand::Playback(cmd));
    }

    if let Some(payload) = line.strip_prefix("SEEK:") {
        let payload = payload.trim();
        return match payload.parse::<u8>() {
            Ok(pct) if pct <= 100 => Ok(DeviceCommand::Playback(PlaybackCommand::SeekPercent(pct))),
            _ => Err(CommandError::InvalidSeek(payload.to_string())),
        };
    }

    if let Some(key) = line.strip_prefix("KEY:") {
        return Ok(DeviceCommand::Key(key.trim().to_string()));
    }

    Err(CommandError::Unknown(line.to_string()))
}
