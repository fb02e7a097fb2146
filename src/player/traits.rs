use crate::player::error::ApiError;
use serde::{Deserialize, Serialize};

/// Point-in-time read of the remote playback state.
///
/// Re-fetched on every use and never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackSnapshot {
    pub id: String,
    pub name: String,
    pub artist: String,
    pub is_playing: bool,
    pub progress_ms: u64,
    pub duration_ms: u64,
    /// 0-100, derived from progress and duration
    pub progress_percent: u8,
    pub shuffle: bool,
}

impl TrackSnapshot {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        artist: impl Into<String>,
        is_playing: bool,
        progress_ms: u64,
        duration_ms: u64,
        shuffle: bool,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            artist: artist.into(),
            is_playing,
            progress_ms,
            duration_ms,
            progress_percent: progress_percent(progress_ms, duration_ms),
            shuffle,
        }
    }

    /// Absolute position for a seek to `percent` of this track.
    pub fn seek_position_ms(&self, percent: u8) -> u64 {
        seek_position_ms(self.duration_ms, percent)
    }
}

/// `floor(elapsed / duration * 100)`, clamped to 0..=100. Zero duration yields 0.
pub fn progress_percent(elapsed_ms: u64, duration_ms: u64) -> u8 {
    if duration_ms == 0 {
        return 0;
    }
    let pct = (elapsed_ms as u128 * 100) / duration_ms as u128;
    pct.min(100) as u8
}

/// `floor(percent / 100 * duration)`.
pub fn seek_position_ms(duration_ms: u64, percent: u8) -> u64 {
    ((duration_ms as u128 * percent.min(100) as u128) / 100) as u64
}

/// The remote playback service, as seen by the bridge.
///
/// Every method is a single remote call; nothing retries.
pub trait PlayerTrait {
    /// `Ok(None)` when nothing is playing.
    fn fetch_snapshot(&self) -> Result<Option<TrackSnapshot>, ApiError>;
    fn play(&self) -> Result<(), ApiError>;
    fn pause(&self) -> Result<(), ApiError>;
    fn next(&self) -> Result<(), ApiError>;
    fn prev(&self) -> Result<(), ApiError>;
    fn shuffle(&self, enable: bool) -> Result<(), ApiError>;
    fn seek(&self, position_ms: u64) -> Result<(), ApiError>;
    /// Save a track to the user's library.
    fn like(&self, track_id: &str) -> Result<(), ApiError>;
}
